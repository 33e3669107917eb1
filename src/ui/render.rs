use crate::export::ShareTarget;
use crate::session::Screen;
use crate::ui::app::{App, PopupKind};
use crate::ui::compose::render_compose;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{centered_rect_by_size, layout_regions};
use crate::ui::library::render_library;
use crate::ui::prompt::PromptState;
use crate::ui::theme::{Palette, ACTIVE_HIGHLIGHT, HEADER_TEXT, POPUP_BORDER};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const HELP_LINES: &[(&str, &str)] = &[
    ("o", "Open a photograph by path"),
    ("Ctrl+V", "Paste a photograph from the clipboard"),
    ("i", "Glean inspiration from the scene"),
    ("1-5 ←/→", "Choose a poem style"),
    ("g / Enter", "Compose the poem"),
    ("T", "Name the poem"),
    ("e", "Edit the poem"),
    ("c", "Copy the poem"),
    ("s", "Save to the library and export"),
    ("x", "Share"),
    ("t", "Next visual theme"),
    ("r", "Start over"),
    ("l", "Library"),
    ("m  +/-", "Mute, volume"),
    ("q", "Quit"),
];

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);
    let palette = Palette::for_theme(app.session().theme);

    frame.render_widget(Header::new().widget(app.session()), header);
    frame.render_widget(Clear, body);
    if app.session().screen == Screen::Library {
        render_library(frame, body, app.library_view(), palette);
    } else {
        render_compose(frame, body, app, palette);
    }

    let hints = hints_for(app);
    frame.render_widget(
        Footer::new().widget(footer, hints, app.notice(), app.playback()),
        footer,
    );

    if let Some(kind) = app.popup_kind() {
        render_popup(frame, body, app, kind, palette);
    }
    if app.prompt().is_active() {
        render_prompt(frame, body, app.prompt(), palette);
    }
}

/// Key hints for the footer, by what currently has focus.
pub fn hints_for(app: &App) -> &'static str {
    if app.prompt().is_active() {
        return "Enter: confirm  Esc: cancel";
    }
    if app.editor().is_open() {
        return "Ctrl+S: keep  Esc: discard";
    }
    match app.popup_kind() {
        Some(PopupKind::Share) => return "↑/↓: move  Enter: share  Esc: close",
        Some(PopupKind::Help) => return "Esc: close",
        None => {}
    }
    let session = app.session();
    if session.error_message.is_some() {
        return "Enter: try again  Esc: dismiss";
    }
    match session.screen {
        Screen::Idle => "o: open  Ctrl+V: paste  l: library  ?: help  q: quit",
        Screen::ImageSelected => "i: inspire  ←/→: style  g: compose  r: reset  ?: help",
        Screen::Generating => "Composing…  q: quit",
        Screen::Ready => "e: edit  T: title  c: copy  s: save  x: share  g: again  ?: help",
        Screen::Library => "↑/↓: select  d: export  x: delete  Esc: back",
    }
}

fn render_popup(frame: &mut Frame<'_>, body: Rect, app: &App, kind: PopupKind, palette: Palette) {
    let (title, lines) = match kind {
        PopupKind::Share => {
            let mut lines: Vec<Line> = ShareTarget::ALL
                .iter()
                .enumerate()
                .map(|(idx, target)| {
                    let line = Line::from(vec![
                        Span::styled(format!("{:>2}. ", idx + 1), Style::default().fg(HEADER_TEXT)),
                        Span::styled(target.label(), Style::default().fg(HEADER_TEXT)),
                    ]);
                    if idx == app.share_selection() {
                        line.style(Style::default().bg(ACTIVE_HIGHLIGHT))
                    } else {
                        line
                    }
                })
                .collect();
            lines.push(Line::from(""));
            lines.push(Line::from("Up/Down: Move  Enter: Share  Esc: Close"));
            ("Share", lines)
        }
        PopupKind::Help => {
            let key_width = HELP_LINES.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
            let lines = HELP_LINES
                .iter()
                .map(|(key, action)| {
                    Line::from(vec![
                        Span::styled(
                            format!("{:<width$}  ", key, width = key_width),
                            Style::default().fg(palette.accent),
                        ),
                        Span::styled(*action, Style::default().fg(HEADER_TEXT)),
                    ])
                })
                .collect();
            ("Keys", lines)
        }
    };

    let content_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let popup_width = content_width.saturating_add(4).max(32);
    let popup_height = lines.len().saturating_add(2) as u16;
    let area = centered_rect_by_size(body, popup_width, popup_height);

    frame.render_widget(Clear, area);
    let popup = Block::default()
        .title(Span::styled(title, Style::default().fg(palette.accent)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(Paragraph::new(lines).block(popup), area);
}

fn render_prompt(frame: &mut Frame<'_>, body: Rect, prompt: &PromptState, palette: Palette) {
    let PromptState::Active {
        purpose,
        input,
        cursor,
    } = prompt
    else {
        return;
    };

    let width = body.width.saturating_sub(8).clamp(20, 72);
    let area = centered_rect_by_size(body, width, 3);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(purpose.title(), Style::default().fg(palette.accent)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    let inner = block.inner(area);
    // Keep the cursor visible on long input.
    let skip = cursor.saturating_sub(inner.width.saturating_sub(1) as usize);

    let line = if input.is_empty() {
        Line::from(Span::styled(
            purpose.placeholder(),
            Style::default().fg(palette.muted).add_modifier(Modifier::DIM),
        ))
    } else {
        let visible: String = input.chars().skip(skip).collect();
        Line::from(Span::styled(visible, Style::default().fg(HEADER_TEXT)))
    };
    frame.render_widget(Paragraph::new(line).block(block), area);

    if inner.width > 0 && inner.height > 0 {
        let offset = (cursor - skip).min(inner.width.saturating_sub(1) as usize) as u16;
        frame.set_cursor_position(Position::new(inner.x + offset, inner.y));
    }
}
