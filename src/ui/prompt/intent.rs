use crate::ui::mvi::Intent;

use super::state::PromptPurpose;

#[derive(Debug, Clone)]
pub enum PromptIntent {
    Open {
        purpose: PromptPurpose,
        initial: String,
    },
    Insert(char),
    /// Pasted text; line breaks are dropped.
    InsertText(String),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Close,
}

impl Intent for PromptIntent {}
