use crate::session::{Screen, SessionState};
use crate::ui::theme::{Palette, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, session: &SessionState) -> Paragraph<'static> {
        let palette = Palette::for_theme(session.theme);
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let view = if session.screen == Screen::Library {
            "Library"
        } else {
            "Compose"
        };

        let line = Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled(
                "PhotoPoet",
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(view, text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(format!("Theme: {}", session.theme.label()), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(
                format!("Style: {}", session.selected_style.label()),
                text_style,
            ),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
