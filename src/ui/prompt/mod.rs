//! One-line input used for image paths and poem titles (MVI).

pub mod intent;
pub mod reducer;
pub mod state;

pub use intent::PromptIntent;
pub use reducer::PromptReducer;
pub use state::{PromptPurpose, PromptState};
