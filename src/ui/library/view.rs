//! Library screen: saved poems on the left, the highlighted one on the right.

use chrono::Local;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::storage::SavedPoemRecord;
use crate::ui::theme::{Palette, ACTIVE_HIGHLIGHT, HEADER_TEXT};

use super::state::LibraryViewState;

pub fn render_library(frame: &mut Frame, area: Rect, state: &LibraryViewState, palette: Palette) {
    if state.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Your library is empty.",
                Style::default().fg(palette.text),
            )),
            Line::from(Span::styled(
                "Compose a poem and press s to keep it here.",
                Style::default().fg(palette.muted),
            )),
        ];
        let widget = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(panel("Library", palette));
        frame.render_widget(widget, area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_list(frame, columns[0], state, palette);
    if let Some(record) = state.selected_record() {
        render_detail(frame, columns[1], record, palette);
    }
}

fn render_list(frame: &mut Frame, area: Rect, state: &LibraryViewState, palette: Palette) {
    let block = panel(&format!("Library ({})", state.records.len()), palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Two lines per record.
    let visible = (inner.height as usize / 2).max(1);
    let offset = state.selected.saturating_sub(visible - 1);

    let mut lines = Vec::new();
    for (idx, record) in state.records.iter().enumerate().skip(offset).take(visible) {
        let selected = idx == state.selected;
        let marker = if selected { "▶ " } else { "  " };
        let mut title_line = Line::from(vec![
            Span::styled(marker, Style::default().fg(palette.accent)),
            Span::styled(
                record.display_title().to_string(),
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", format_date(record)),
                Style::default().fg(palette.muted),
            ),
        ]);
        let mut preview_line = Line::from(Span::styled(
            format!("  {}", record.first_line()),
            Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
        ));
        if selected {
            let highlight = Style::default().bg(ACTIVE_HIGHLIGHT);
            title_line = title_line.style(highlight);
            preview_line = preview_line.style(highlight);
        }
        lines.push(title_line);
        lines.push(preview_line);
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_detail(frame: &mut Frame, area: Rect, record: &SavedPoemRecord, palette: Palette) {
    let mut lines = vec![
        Line::from(Span::styled(
            record.display_title().to_string(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Archived {}", format_date(record)),
            Style::default().fg(palette.muted),
        )),
        Line::from(""),
    ];

    if let Some(inspiration) = &record.inspiration {
        lines.push(Line::from(Span::styled(
            format!("“{}”", inspiration),
            Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
    }

    lines.extend(
        record
            .poem
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(HEADER_TEXT)))),
    );

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel("Poem", palette));
    frame.render_widget(widget, area);
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

fn format_date(record: &SavedPoemRecord) -> String {
    record
        .created_at
        .with_timezone(&Local)
        .format("%b %-d, %Y")
        .to_string()
}
