use crate::session::image::ImageSelection;
use crate::session::style::{PoemStyle, VisualTheme};
use crate::ui::mvi::UiState;

/// Discrete UI phase; decides which controls are shown and which intents apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Idle,
    ImageSelected,
    Generating,
    Ready,
    Library,
}

impl Screen {
    pub fn is_compose(&self) -> bool {
        !matches!(self, Screen::Library)
    }
}

/// Everything the compose and library screens need to render.
///
/// Only `SessionReducer` produces new values of this type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub image: Option<ImageSelection>,
    pub poem_text: Option<String>,
    pub poem_title: Option<String>,
    pub inspiration_text: Option<String>,
    pub screen: Screen,
    pub error_message: Option<String>,
    pub selected_style: PoemStyle,
    pub theme: VisualTheme,
    pub inspiration_loading: bool,
    pub generation_pending: bool,
    /// Bumped whenever the image context is replaced or cleared.
    /// Remote results tagged with an older epoch are dropped.
    pub epoch: u64,
}

impl UiState for SessionState {}

impl SessionState {
    pub fn new(style: PoemStyle, theme: VisualTheme) -> Self {
        Self {
            selected_style: style,
            theme,
            ..Self::default()
        }
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Compose screen implied by the current data, used when leaving the library.
    pub fn compose_screen(&self) -> Screen {
        if self.generation_pending {
            Screen::Generating
        } else if self.poem_text.is_some() {
            Screen::Ready
        } else if self.image.is_some() {
            Screen::ImageSelected
        } else {
            Screen::Idle
        }
    }

    /// A poem that may be saved: present and not blank.
    pub fn savable_poem(&self) -> Option<&str> {
        self.poem_text
            .as_deref()
            .filter(|poem| !poem.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle() {
        let state = SessionState::default();
        assert_eq!(state.screen, Screen::Idle);
        assert_eq!(state.selected_style, PoemStyle::FreeVerse);
        assert_eq!(state.theme, VisualTheme::Serene);
        assert!(!state.inspiration_loading);
        assert_eq!(state.epoch, 0);
    }

    #[test]
    fn compose_screen_prefers_pending_then_poem_then_image() {
        let mut state = SessionState::default();
        assert_eq!(state.compose_screen(), Screen::Idle);

        state.image = Some(ImageSelection {
            encoded_bytes: "AAAA".into(),
            mime_type: "image/png".into(),
            preview_reference: "data:image/png;base64,AAAA".into(),
        });
        assert_eq!(state.compose_screen(), Screen::ImageSelected);

        state.poem_text = Some(String::new());
        assert_eq!(state.compose_screen(), Screen::Ready);

        state.generation_pending = true;
        assert_eq!(state.compose_screen(), Screen::Generating);
    }

    #[test]
    fn blank_poem_is_not_savable() {
        let mut state = SessionState::default();
        state.poem_text = Some("  \n ".into());
        assert!(state.savable_poem().is_none());
        state.poem_text = Some("Dawn".into());
        assert_eq!(state.savable_poem(), Some("Dawn"));
    }
}
