//! Compose screen: photograph, inspiration, style picker and the poem.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::session::{PoemStyle, Screen, SessionState};
use crate::ui::app::App;
use crate::ui::editor::EditorState;
use crate::ui::layout::{bottom_strip, centered_rect};
use crate::ui::theme::{Palette, ACTIVE_HIGHLIGHT, HEADER_TEXT, STATUS_ERROR};

/// Spinner animation frames.
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

pub fn render_compose(frame: &mut Frame, area: Rect, app: &App, palette: Palette) {
    let session = app.session();
    if session.screen == Screen::Idle {
        render_welcome(frame, area, palette);
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);
        render_sidebar(frame, columns[0], app, palette);
        render_poem_panel(frame, columns[1], app, palette);
    }

    if let Some(message) = &session.error_message {
        render_error_banner(frame, area, message, session.has_image());
    }
}

fn render_welcome(frame: &mut Frame, area: Rect, palette: Palette) {
    let lines = vec![
        Line::from(Span::styled(
            "PhotoPoet",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Where your moments find their voice",
            Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press o to open a photograph, or Ctrl+V to paste one.",
            Style::default().fg(palette.text),
        )),
        Line::from(Span::styled(
            "You can also drop an image file onto the terminal.",
            Style::default().fg(palette.muted),
        )),
    ];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, centered_rect(80, 50, area));
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App, palette: Palette) {
    let session = app.session();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(4),
            Constraint::Length(PoemStyle::ALL.len() as u16 + 2),
        ])
        .split(area);

    let photo = match &session.image {
        Some(image) => {
            let size_kb = image.byte_len().div_ceil(1024);
            let mut details = format!("{} · {} KB", image.mime_type, size_kb);
            if let Some((width, height)) = app.image_dimensions() {
                details.push_str(&format!(" · {}×{}", width, height));
            }
            vec![
                Line::from(Span::styled(
                    app.image_label().unwrap_or("Photograph").to_string(),
                    Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(details, Style::default().fg(palette.muted))),
            ]
        }
        None => vec![Line::from("No photograph")],
    };
    frame.render_widget(
        Paragraph::new(photo).block(panel("Photograph", palette)),
        rows[0],
    );

    let inspiration = if session.inspiration_loading {
        vec![Line::from(Span::styled(
            format!("{} Gleaning inspiration…", spinner(app.animation_tick())),
            Style::default().fg(palette.accent),
        ))]
    } else if let Some(text) = &session.inspiration_text {
        vec![Line::from(Span::styled(
            format!("“{}”", text),
            Style::default().fg(palette.text).add_modifier(Modifier::ITALIC),
        ))]
    } else {
        vec![Line::from(Span::styled(
            "Press i to glean inspiration from the scene.",
            Style::default().fg(palette.muted),
        ))]
    };
    frame.render_widget(
        Paragraph::new(inspiration)
            .wrap(Wrap { trim: true })
            .block(panel("Inspiration", palette)),
        rows[1],
    );

    frame.render_widget(style_picker(session, palette), rows[2]);
}

fn style_picker(session: &SessionState, palette: Palette) -> Paragraph<'static> {
    let lines: Vec<Line> = PoemStyle::ALL
        .iter()
        .enumerate()
        .map(|(idx, style)| {
            let selected = *style == session.selected_style;
            let marker = if selected { "●" } else { "○" };
            let line = Line::from(vec![
                Span::styled(
                    format!(" {} ", marker),
                    Style::default().fg(palette.accent),
                ),
                Span::styled(
                    format!("{} {}", idx + 1, style.label()),
                    Style::default().fg(if selected { palette.text } else { palette.muted }),
                ),
            ]);
            if selected {
                line.style(Style::default().bg(ACTIVE_HIGHLIGHT))
            } else {
                line
            }
        })
        .collect();
    Paragraph::new(lines).block(panel("Style  ←/→", palette))
}

fn render_poem_panel(frame: &mut Frame, area: Rect, app: &App, palette: Palette) {
    let session = app.session();

    if let EditorState::Open { lines, row, col } = app.editor() {
        render_editor(frame, area, lines, *row, *col, palette);
        return;
    }

    let lines: Vec<Line> = match session.screen {
        Screen::Generating => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "{} Composing your {}…",
                    spinner(app.animation_tick()),
                    session.selected_style.label()
                ),
                Style::default().fg(palette.accent),
            )),
        ],
        Screen::Ready => {
            let mut lines = vec![match &session.poem_title {
                Some(title) => Line::from(Span::styled(
                    title.clone(),
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                )),
                None => Line::from(Span::styled(
                    "Untitled · press T to name it",
                    Style::default().fg(palette.muted),
                )),
            }];
            lines.push(Line::from(""));
            let poem = session.poem_text.as_deref().unwrap_or_default();
            lines.extend(poem.lines().map(|l| {
                Line::from(Span::styled(
                    l.to_string(),
                    Style::default().fg(HEADER_TEXT).add_modifier(Modifier::ITALIC),
                ))
            }));
            lines
        }
        _ => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Press g to compose a {}.",
                    session.selected_style.label()
                ),
                Style::default().fg(palette.text),
            )),
        ],
    };

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(panel("The Composition", palette));
    frame.render_widget(widget, area);
}

fn render_editor(
    frame: &mut Frame,
    area: Rect,
    lines: &[String],
    row: usize,
    col: usize,
    palette: Palette,
) {
    let block = panel("Editing  Ctrl+S: keep  Esc: discard", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let height = inner.height as usize;
    let top = row.saturating_sub(height - 1);
    let visible: Vec<Line> = lines
        .iter()
        .skip(top)
        .take(height)
        .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(HEADER_TEXT))))
        .collect();
    frame.render_widget(Paragraph::new(visible), inner);

    let x = inner.x + (col as u16).min(inner.width.saturating_sub(1));
    let y = inner.y + (row - top) as u16;
    frame.set_cursor_position(Position::new(x, y));
}

fn render_error_banner(frame: &mut Frame, area: Rect, message: &str, can_retry: bool) {
    let strip = bottom_strip(area, 5);
    frame.render_widget(Clear, strip);

    let action = if can_retry {
        "Enter: try again  Esc: dismiss"
    } else {
        "Esc: dismiss"
    };
    let lines = vec![
        Line::from(Span::styled(
            "Something went wrong",
            Style::default()
                .fg(STATUS_ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(HEADER_TEXT),
        )),
        Line::from(Span::styled(
            action,
            Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM),
        )),
    ];
    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(STATUS_ERROR)),
    );
    frame.render_widget(widget, strip);
}

fn panel(title: &str, palette: Palette) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(palette.accent),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
}
