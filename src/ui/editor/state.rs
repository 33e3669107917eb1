use crate::ui::mvi::UiState;

/// Multi-line poem editor. `col` counts characters, not bytes.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    #[default]
    Closed,
    Open {
        lines: Vec<String>,
        row: usize,
        col: usize,
    },
}

impl UiState for EditorState {}

impl EditorState {
    pub fn open(text: &str) -> Self {
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        let row = lines.len() - 1;
        let col = lines[row].chars().count();
        EditorState::Open { lines, row, col }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, EditorState::Open { .. })
    }

    /// Buffer contents joined with newlines; `None` when closed.
    pub fn text(&self) -> Option<String> {
        match self {
            EditorState::Open { lines, .. } => Some(lines.join("\n")),
            EditorState::Closed => None,
        }
    }

    pub fn cursor(&self) -> Option<(usize, usize)> {
        match self {
            EditorState::Open { row, col, .. } => Some((*row, *col)),
            EditorState::Closed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_places_cursor_at_end() {
        let state = EditorState::open("first\nsécond");
        assert_eq!(state.cursor(), Some((1, 6)));
        assert_eq!(state.text().as_deref(), Some("first\nsécond"));
    }

    #[test]
    fn open_empty_text_has_one_line() {
        let state = EditorState::open("");
        assert_eq!(state.cursor(), Some((0, 0)));
        assert_eq!(state.text().as_deref(), Some(""));
    }

    #[test]
    fn closed_has_no_text() {
        assert!(!EditorState::Closed.is_open());
        assert_eq!(EditorState::Closed.text(), None);
    }
}
