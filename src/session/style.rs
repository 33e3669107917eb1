use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Structural form the poem must follow.
///
/// The label is sent verbatim to the model, so it must stay human-readable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum PoemStyle {
    #[default]
    FreeVerse,
    Haiku,
    Sonnet,
    Limerick,
    Ode,
}

impl PoemStyle {
    pub const ALL: [PoemStyle; 5] = [
        PoemStyle::FreeVerse,
        PoemStyle::Haiku,
        PoemStyle::Sonnet,
        PoemStyle::Limerick,
        PoemStyle::Ode,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FreeVerse => "Free Verse",
            Self::Haiku => "Haiku",
            Self::Sonnet => "Sonnet",
            Self::Limerick => "Limerick",
            Self::Ode => "Ode",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    /// Style by 1-based position, as shown in the selector.
    pub fn from_position(position: usize) -> Option<Self> {
        position.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for PoemStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PoemStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| {
                style
                    .label()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect::<String>()
                    .eq_ignore_ascii_case(&normalized)
            })
            .ok_or_else(|| format!("unknown poem style '{}'", s))
    }
}

/// Cosmetic palette for the whole interface.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum VisualTheme {
    #[default]
    Serene,
    Midnight,
    Parchment,
    Watercolor,
}

impl VisualTheme {
    pub const ALL: [VisualTheme; 4] = [
        VisualTheme::Serene,
        VisualTheme::Midnight,
        VisualTheme::Parchment,
        VisualTheme::Watercolor,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Serene => "Serene",
            Self::Midnight => "Midnight",
            Self::Parchment => "Parchment",
            Self::Watercolor => "Watercolor",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for VisualTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
