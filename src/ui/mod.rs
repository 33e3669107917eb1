pub mod app;
pub mod compose;
pub mod editor;
pub mod effects;
pub mod events;
pub mod footer;
pub mod header;
pub mod input;
pub mod layout;
pub mod library;
pub mod mvi;
pub mod prompt;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;

pub use runtime::{run, LaunchOptions};
