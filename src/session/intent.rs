use crate::session::image::ImageSelection;
use crate::session::style::{PoemStyle, VisualTheme};
use crate::ui::mvi::Intent;

/// Top-level destination of the navigation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Compose,
    Library,
}

/// Outcome of a remote call; the error side is already a user-facing message.
pub type RemoteOutcome = Result<String, String>;

#[derive(Debug, Clone)]
pub enum SessionIntent {
    SelectImage(ImageSelection),
    RequestInspiration,
    InspirationResolved { epoch: u64, outcome: RemoteOutcome },
    StartGeneration,
    PoemResolved { epoch: u64, outcome: RemoteOutcome },
    /// User edit of the generated poem.
    UpdatePoemText(String),
    UpdateTitle(String),
    SelectStyle(PoemStyle),
    SelectTheme(VisualTheme),
    DismissError,
    Reset,
    Navigate(View),
}

impl Intent for SessionIntent {}
