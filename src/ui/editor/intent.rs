use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum EditorIntent {
    Open { text: String },
    Insert(char),
    /// Pasted text; may contain newlines.
    InsertText(String),
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Close,
}

impl Intent for EditorIntent {}
