//! Reducer for the compose session.

use crate::ui::mvi::Reducer;

use super::intent::{SessionIntent, View};
use super::state::{Screen, SessionState};

/// Pure state transitions for the compose session.
///
/// Remote calls are issued by the caller after dispatch, and only when the
/// reducer flipped the matching pending flag on.
pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Intent = SessionIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SessionIntent::SelectImage(image) => SessionState {
                image: Some(image),
                poem_text: None,
                poem_title: None,
                inspiration_text: None,
                error_message: None,
                screen: Screen::ImageSelected,
                inspiration_loading: false,
                generation_pending: false,
                epoch: state.epoch.wrapping_add(1),
                ..state
            },

            SessionIntent::RequestInspiration => {
                if !state.has_image() || state.inspiration_loading {
                    return state;
                }
                SessionState {
                    inspiration_loading: true,
                    error_message: None,
                    ..state
                }
            }

            SessionIntent::InspirationResolved { epoch, outcome } => {
                if epoch != state.epoch || !state.inspiration_loading {
                    tracing::debug!(epoch, current = state.epoch, "Dropping stale inspiration");
                    return state;
                }
                match outcome {
                    Ok(text) => SessionState {
                        inspiration_text: Some(text),
                        inspiration_loading: false,
                        ..state
                    },
                    Err(message) => SessionState {
                        error_message: Some(message),
                        inspiration_loading: false,
                        ..state
                    },
                }
            }

            SessionIntent::StartGeneration => {
                if !state.has_image() || state.generation_pending || !state.screen.is_compose() {
                    return state;
                }
                SessionState {
                    screen: Screen::Generating,
                    generation_pending: true,
                    error_message: None,
                    ..state
                }
            }

            SessionIntent::PoemResolved { epoch, outcome } => {
                if epoch != state.epoch || !state.generation_pending {
                    tracing::debug!(epoch, current = state.epoch, "Dropping stale poem");
                    return state;
                }
                let in_library = state.screen == Screen::Library;
                match outcome {
                    Ok(poem) => SessionState {
                        poem_text: Some(poem),
                        generation_pending: false,
                        screen: if in_library {
                            Screen::Library
                        } else {
                            Screen::Ready
                        },
                        ..state
                    },
                    Err(message) => SessionState {
                        error_message: Some(message),
                        generation_pending: false,
                        screen: if in_library {
                            Screen::Library
                        } else {
                            Screen::ImageSelected
                        },
                        ..state
                    },
                }
            }

            SessionIntent::UpdatePoemText(text) => {
                if state.screen != Screen::Ready {
                    return state;
                }
                SessionState {
                    poem_text: Some(text),
                    ..state
                }
            }

            SessionIntent::UpdateTitle(title) => {
                if state.screen != Screen::Ready {
                    return state;
                }
                let poem_title = if title.trim().is_empty() {
                    None
                } else {
                    Some(title)
                };
                SessionState { poem_title, ..state }
            }

            SessionIntent::SelectStyle(selected_style) => SessionState {
                selected_style,
                ..state
            },

            SessionIntent::SelectTheme(theme) => SessionState { theme, ..state },

            SessionIntent::DismissError => SessionState {
                error_message: None,
                ..state
            },

            // Theme is cosmetic and survives a reset.
            SessionIntent::Reset => SessionState {
                theme: state.theme,
                epoch: state.epoch.wrapping_add(1),
                ..SessionState::default()
            },

            SessionIntent::Navigate(View::Library) => SessionState {
                screen: Screen::Library,
                ..state
            },

            SessionIntent::Navigate(View::Compose) => {
                if state.screen != Screen::Library {
                    return state;
                }
                let screen = state.compose_screen();
                SessionState { screen, ..state }
            }
        }
    }
}
