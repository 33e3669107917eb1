use crate::storage::{PlaybackSettings, VolumeLevel};
use crate::ui::app::{Notice, NoticeKind};
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR, STATUS_OK};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer;

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self
    }

    /// Key hints (or the current notice), volume indicator and version.
    pub fn widget(
        &self,
        area: Rect,
        hints: &str,
        notice: Option<&Notice>,
        playback: &PlaybackSettings,
    ) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);

        let (left, left_style) = match notice {
            Some(notice) => {
                let color = match notice.kind {
                    NoticeKind::Info => STATUS_OK,
                    NoticeKind::Error => STATUS_ERROR,
                };
                (format!(" {}", notice.text), Style::default().fg(color))
            }
            None => (format!(" {}", hints), text_style),
        };
        let right = format!("{}  v{} ", volume_indicator(playback), VERSION);

        // Calculate padding using char count, not byte count (for Unicode)
        let content_width = area.width.saturating_sub(2) as usize; // minus borders
        let right_width = right.chars().count();
        let left: String = left
            .chars()
            .take(content_width.saturating_sub(right_width + 1))
            .collect();
        let padding = content_width
            .saturating_sub(left.chars().count())
            .saturating_sub(right_width);

        let line = Line::from(vec![
            Span::styled(left, left_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(right, text_style),
        ]);

        Paragraph::new(line)
            .style(text_style)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}

/// `♪ ▮▮▮▮▯▯▯▯▯▯ 40%`, or `♪ muted`.
pub fn volume_indicator(playback: &PlaybackSettings) -> String {
    if playback.level() == VolumeLevel::Silent {
        return "♪ muted".to_string();
    }
    let percent = (playback.effective_volume() * 100.0).round() as usize;
    let filled = (percent + 5) / 10;
    format!(
        "♪ {}{} {}%",
        "▮".repeat(filled.min(10)),
        "▯".repeat(10 - filled.min(10)),
        percent
    )
}
