pub mod intent;
pub mod reducer;
pub mod state;
pub mod view;

pub use intent::LibraryIntent;
pub use reducer::LibraryReducer;
pub use state::LibraryViewState;
pub use view::render_library;
