use crate::export::ShareTarget;
use crate::session::{PoemStyle, Screen, SessionIntent};
use crate::storage::VOLUME_STEP;
use crate::ui::app::{App, PopupKind};
use crate::ui::editor::EditorIntent;
use crate::ui::library::LibraryIntent;
use crate::ui::prompt::PromptIntent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Action to take after processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// No further action needed (handled internally).
    None,
    /// Request image paste from clipboard.
    ImagePaste,
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::None;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return InputAction::None;
    }

    if app.prompt().is_active() {
        handle_prompt_key(app, key);
        return InputAction::None;
    }

    if app.editor().is_open() {
        handle_editor_key(app, key);
        return InputAction::None;
    }

    // Terminals cannot deliver image content as text, so Ctrl+V reads the
    // clipboard directly.
    if is_ctrl_char(key, 'v') || is_ctrl_shift_char(key, 'v') {
        return InputAction::ImagePaste;
    }

    if let Some(kind) = app.popup_kind() {
        handle_popup_key(app, kind, key);
        return InputAction::None;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.request_quit();
            return InputAction::None;
        }
        KeyCode::Char('?') => {
            app.toggle_popup(PopupKind::Help);
            return InputAction::None;
        }
        KeyCode::Char('m') => {
            app.toggle_mute();
            return InputAction::None;
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.adjust_volume(VOLUME_STEP);
            return InputAction::None;
        }
        KeyCode::Char('-') => {
            app.adjust_volume(-VOLUME_STEP);
            return InputAction::None;
        }
        KeyCode::Char('l') => {
            app.toggle_library();
            return InputAction::None;
        }
        _ => {}
    }

    if app.session().screen == Screen::Library {
        handle_library_key(app, key);
    } else {
        handle_compose_key(app, key);
    }
    InputAction::None
}

fn handle_compose_key(app: &mut App, key: KeyEvent) {
    let screen = app.session().screen;
    let has_error = app.session().error_message.is_some();

    match key.code {
        KeyCode::Enter if has_error => app.retry_after_error(),
        KeyCode::Esc if has_error => app.dispatch_session(SessionIntent::DismissError),
        KeyCode::Char('o') => app.open_image_prompt(),
        KeyCode::Char('r') => app.reset(),
        KeyCode::Char('i') => app.dispatch_session(SessionIntent::RequestInspiration),
        KeyCode::Char('g') | KeyCode::Enter => {
            app.dispatch_session(SessionIntent::StartGeneration)
        }
        KeyCode::Left => {
            let style = app.session().selected_style.prev();
            app.dispatch_session(SessionIntent::SelectStyle(style));
        }
        KeyCode::Right => {
            let style = app.session().selected_style.next();
            app.dispatch_session(SessionIntent::SelectStyle(style));
        }
        KeyCode::Char(ch @ '1'..='5') => {
            let position = ch.to_digit(10).unwrap_or(0) as usize;
            if let Some(style) = PoemStyle::from_position(position) {
                app.dispatch_session(SessionIntent::SelectStyle(style));
            }
        }
        KeyCode::Char('t') => {
            let theme = app.session().theme.next();
            app.dispatch_session(SessionIntent::SelectTheme(theme));
        }
        KeyCode::Char('T') if screen == Screen::Ready => app.open_title_prompt(),
        KeyCode::Char('e') if screen == Screen::Ready => app.open_editor(),
        KeyCode::Char('c') if screen == Screen::Ready => app.copy_poem(),
        KeyCode::Char('s') if screen == Screen::Ready => {
            app.save_poem();
        }
        KeyCode::Char('x') if screen == Screen::Ready => app.open_share_menu(),
        _ => {}
    }
}

fn handle_library_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.dispatch_library(LibraryIntent::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => app.dispatch_library(LibraryIntent::MoveDown),
        KeyCode::Char('d') => app.export_selected(),
        KeyCode::Delete | KeyCode::Char('x') => app.delete_selected(),
        KeyCode::Esc => app.close_library(),
        _ => {}
    }
}

fn handle_popup_key(app: &mut App, kind: PopupKind, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc) {
        app.close_popup();
        return;
    }
    match kind {
        PopupKind::Help => {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Enter) {
                app.close_popup();
            }
        }
        PopupKind::Share => match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.move_share_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => app.move_share_selection(1),
            KeyCode::Enter => app.share_selected(),
            KeyCode::Char('x') => app.close_popup(),
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                let index = ch.to_digit(10).unwrap_or(0) as usize;
                if let Some(target) = index.checked_sub(1).and_then(|i| ShareTarget::ALL.get(i)) {
                    app.share_to(*target);
                }
            }
            _ => {}
        },
    }
}

fn handle_prompt_key(app: &mut App, key: KeyEvent) {
    let intent = match key.code {
        KeyCode::Enter => {
            app.submit_prompt();
            return;
        }
        KeyCode::Esc => PromptIntent::Close,
        KeyCode::Backspace => PromptIntent::Backspace,
        KeyCode::Delete => PromptIntent::Delete,
        KeyCode::Left => PromptIntent::Left,
        KeyCode::Right => PromptIntent::Right,
        KeyCode::Home => PromptIntent::Home,
        KeyCode::End => PromptIntent::End,
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            PromptIntent::Insert(ch)
        }
        _ => return,
    };
    app.dispatch_prompt(intent);
}

fn handle_editor_key(app: &mut App, key: KeyEvent) {
    if is_ctrl_char(key, 's') {
        app.commit_editor();
        return;
    }
    let intent = match key.code {
        KeyCode::Esc => {
            app.cancel_editor();
            return;
        }
        KeyCode::Enter => EditorIntent::Newline,
        KeyCode::Backspace => EditorIntent::Backspace,
        KeyCode::Delete => EditorIntent::Delete,
        KeyCode::Left => EditorIntent::Left,
        KeyCode::Right => EditorIntent::Right,
        KeyCode::Up => EditorIntent::Up,
        KeyCode::Down => EditorIntent::Down,
        KeyCode::Home => EditorIntent::Home,
        KeyCode::End => EditorIntent::End,
        KeyCode::Tab => EditorIntent::InsertText("    ".to_string()),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            EditorIntent::Insert(ch)
        }
        _ => return,
    };
    app.dispatch_editor(intent);
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}

fn is_ctrl_shift_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && key.modifiers.contains(KeyModifiers::SHIFT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn ctrl_detection_ignores_case() {
        assert!(is_ctrl_char(
            key(KeyCode::Char('V'), KeyModifiers::CONTROL),
            'v'
        ));
        assert!(!is_ctrl_char(key(KeyCode::Char('v'), KeyModifiers::NONE), 'v'));
        assert!(is_ctrl_shift_char(
            key(
                KeyCode::Char('v'),
                KeyModifiers::CONTROL | KeyModifiers::SHIFT
            ),
            'v'
        ));
    }
}
