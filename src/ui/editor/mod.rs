//! Inline editor for the composed poem (MVI).

pub mod intent;
pub mod reducer;
pub mod state;

pub use intent::EditorIntent;
pub use reducer::EditorReducer;
pub use state::EditorState;
