use crate::ui::mvi::Reducer;

use super::intent::EditorIntent;
use super::state::EditorState;

pub struct EditorReducer;

impl Reducer for EditorReducer {
    type State = EditorState;
    type Intent = EditorIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            EditorIntent::Open { text } => return EditorState::open(&text),
            EditorIntent::Close => return EditorState::Closed,
            _ => {}
        }

        let EditorState::Open {
            mut lines,
            mut row,
            mut col,
        } = state
        else {
            return EditorState::Closed;
        };

        match intent {
            EditorIntent::Insert(ch) => {
                let at = byte_index(&lines[row], col);
                lines[row].insert(at, ch);
                col += 1;
            }
            EditorIntent::InsertText(text) => {
                for ch in text.chars().filter(|c| *c != '\r') {
                    if ch == '\n' {
                        split_line(&mut lines, &mut row, &mut col);
                    } else {
                        let at = byte_index(&lines[row], col);
                        lines[row].insert(at, ch);
                        col += 1;
                    }
                }
            }
            EditorIntent::Newline => split_line(&mut lines, &mut row, &mut col),
            EditorIntent::Backspace => {
                if col > 0 {
                    let at = byte_index(&lines[row], col - 1);
                    lines[row].remove(at);
                    col -= 1;
                } else if row > 0 {
                    let current = lines.remove(row);
                    row -= 1;
                    col = lines[row].chars().count();
                    lines[row].push_str(&current);
                }
            }
            EditorIntent::Delete => {
                let len = lines[row].chars().count();
                if col < len {
                    let at = byte_index(&lines[row], col);
                    lines[row].remove(at);
                } else if row + 1 < lines.len() {
                    let next = lines.remove(row + 1);
                    lines[row].push_str(&next);
                }
            }
            EditorIntent::Left => {
                if col > 0 {
                    col -= 1;
                } else if row > 0 {
                    row -= 1;
                    col = lines[row].chars().count();
                }
            }
            EditorIntent::Right => {
                if col < lines[row].chars().count() {
                    col += 1;
                } else if row + 1 < lines.len() {
                    row += 1;
                    col = 0;
                }
            }
            EditorIntent::Up => {
                if row > 0 {
                    row -= 1;
                    col = col.min(lines[row].chars().count());
                }
            }
            EditorIntent::Down => {
                if row + 1 < lines.len() {
                    row += 1;
                    col = col.min(lines[row].chars().count());
                }
            }
            EditorIntent::Home => col = 0,
            EditorIntent::End => col = lines[row].chars().count(),
            EditorIntent::Open { .. } | EditorIntent::Close => {}
        }

        EditorState::Open { lines, row, col }
    }
}

fn split_line(lines: &mut Vec<String>, row: &mut usize, col: &mut usize) {
    let at = byte_index(&lines[*row], *col);
    let tail = lines[*row].split_off(at);
    lines.insert(*row + 1, tail);
    *row += 1;
    *col = 0;
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(state: EditorState, intents: Vec<EditorIntent>) -> EditorState {
        intents.into_iter().fold(state, EditorReducer::reduce)
    }

    #[test]
    fn typing_and_newlines_build_text() {
        let state = apply(
            EditorState::Closed,
            vec![
                EditorIntent::Open {
                    text: String::new(),
                },
                EditorIntent::Insert('a'),
                EditorIntent::Newline,
                EditorIntent::Insert('b'),
            ],
        );
        assert_eq!(state.text().as_deref(), Some("a\nb"));
        assert_eq!(state.cursor(), Some((1, 1)));
    }

    #[test]
    fn backspace_at_line_start_joins_lines() {
        let state = apply(
            EditorState::open("ab\ncd"),
            vec![EditorIntent::Home, EditorIntent::Backspace],
        );
        assert_eq!(state.text().as_deref(), Some("abcd"));
        assert_eq!(state.cursor(), Some((0, 2)));
    }

    #[test]
    fn delete_at_line_end_joins_next_line() {
        let state = apply(
            EditorState::open("ab\ncd"),
            vec![EditorIntent::Up, EditorIntent::End, EditorIntent::Delete],
        );
        assert_eq!(state.text().as_deref(), Some("abcd"));
    }

    #[test]
    fn multibyte_characters_are_edited_by_char() {
        let state = apply(
            EditorState::open("héllo"),
            vec![
                EditorIntent::Home,
                EditorIntent::Right,
                EditorIntent::Right,
                EditorIntent::Backspace,
            ],
        );
        assert_eq!(state.text().as_deref(), Some("hllo"));
    }

    #[test]
    fn vertical_movement_clamps_column() {
        let state = apply(EditorState::open("long line\nab"), vec![EditorIntent::Up]);
        assert_eq!(state.cursor(), Some((0, 2)));
        let state = apply(state, vec![EditorIntent::End, EditorIntent::Down]);
        assert_eq!(state.cursor(), Some((1, 2)));
    }

    #[test]
    fn pasted_text_splits_on_newlines() {
        let state = apply(
            EditorState::open(""),
            vec![EditorIntent::InsertText("one\r\ntwo".into())],
        );
        assert_eq!(state.text().as_deref(), Some("one\ntwo"));
        assert_eq!(state.cursor(), Some((1, 3)));
    }

    #[test]
    fn edits_on_closed_editor_are_ignored() {
        let state = EditorReducer::reduce(EditorState::Closed, EditorIntent::Insert('x'));
        assert_eq!(state, EditorState::Closed);
    }
}
