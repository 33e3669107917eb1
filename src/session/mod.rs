//! Compose session state machine.
//!
//! ```text
//! Idle ──SelectImage──→ ImageSelected ──StartGeneration──→ Generating
//!                           ↑      │                           │
//!                           │      └─RequestInspiration (no    │ ok
//!                           │        screen change)            ↓
//!                           └───────────── err ─────────── Ready
//! ```
//!
//! `Library` is reachable from every compose screen; leaving it recomputes
//! the compose screen from the data present.

mod image;
mod intent;
mod reducer;
mod state;
mod style;

pub use image::{ImageError, ImageSelection, PREVIEW_MAX_DIMENSION};
pub use intent::{RemoteOutcome, SessionIntent, View};
pub use reducer::SessionReducer;
pub use state::{Screen, SessionState};
pub use style::{PoemStyle, VisualTheme};
