use crate::ui::mvi::Reducer;

use super::intent::PromptIntent;
use super::state::PromptState;

pub struct PromptReducer;

impl Reducer for PromptReducer {
    type State = PromptState;
    type Intent = PromptIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            PromptIntent::Open { purpose, initial } => {
                let cursor = initial.chars().count();
                return PromptState::Active {
                    purpose,
                    input: initial,
                    cursor,
                };
            }
            PromptIntent::Close => return PromptState::Hidden,
            _ => {}
        }

        let PromptState::Active {
            purpose,
            mut input,
            mut cursor,
        } = state
        else {
            return PromptState::Hidden;
        };

        match intent {
            PromptIntent::Insert(ch) => {
                input.insert(byte_index(&input, cursor), ch);
                cursor += 1;
            }
            PromptIntent::InsertText(text) => {
                for ch in text.chars().filter(|c| !matches!(c, '\n' | '\r')) {
                    input.insert(byte_index(&input, cursor), ch);
                    cursor += 1;
                }
            }
            PromptIntent::Backspace => {
                if cursor > 0 {
                    input.remove(byte_index(&input, cursor - 1));
                    cursor -= 1;
                }
            }
            PromptIntent::Delete => {
                if cursor < input.chars().count() {
                    input.remove(byte_index(&input, cursor));
                }
            }
            PromptIntent::Left => cursor = cursor.saturating_sub(1),
            PromptIntent::Right => cursor = (cursor + 1).min(input.chars().count()),
            PromptIntent::Home => cursor = 0,
            PromptIntent::End => cursor = input.chars().count(),
            PromptIntent::Open { .. } | PromptIntent::Close => {}
        }

        PromptState::Active {
            purpose,
            input,
            cursor,
        }
    }
}

fn byte_index(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}
