use ratatui::style::Color;

use crate::session::VisualTheme;

pub const GLOBAL_BORDER: Color = Color::Rgb(0x40, 0x40, 0x40);
pub const HEADER_TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const HEADER_SEPARATOR: Color = Color::Rgb(0x6b, 0x72, 0x80);
pub const POPUP_BORDER: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const STATUS_OK: Color = Color::Rgb(0x22, 0xc5, 0x5e);
pub const STATUS_ERROR: Color = Color::Rgb(0xef, 0x44, 0x44);
pub const ACTIVE_HIGHLIGHT: Color = Color::Rgb(0x26, 0x26, 0x26);

/// Colours that follow the selected visual theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
}

impl Palette {
    pub fn for_theme(theme: VisualTheme) -> Self {
        match theme {
            VisualTheme::Serene => Palette {
                accent: Color::Rgb(0x10, 0xb9, 0x81),
                text: Color::Rgb(0xd1, 0xfa, 0xe5),
                muted: Color::Rgb(0x6e, 0xa8, 0x8f),
                border: Color::Rgb(0x06, 0x5f, 0x46),
            },
            VisualTheme::Midnight => Palette {
                accent: Color::Rgb(0x81, 0x8c, 0xf8),
                text: Color::Rgb(0xe0, 0xe7, 0xff),
                muted: Color::Rgb(0x7c, 0x83, 0xb0),
                border: Color::Rgb(0x31, 0x2e, 0x81),
            },
            VisualTheme::Parchment => Palette {
                accent: Color::Rgb(0xd9, 0x77, 0x06),
                text: Color::Rgb(0xfe, 0xf3, 0xc7),
                muted: Color::Rgb(0xb4, 0x9a, 0x6a),
                border: Color::Rgb(0x92, 0x40, 0x0e),
            },
            VisualTheme::Watercolor => Palette {
                accent: Color::Rgb(0xec, 0x48, 0x99),
                text: Color::Rgb(0xfc, 0xe7, 0xf3),
                muted: Color::Rgb(0xa8, 0x85, 0xb5),
                border: Color::Rgb(0x7e, 0x22, 0xce),
            },
        }
    }
}
