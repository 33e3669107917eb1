//! Model-View-Intent primitives shared by the session, library, editor and
//! prompt components.
//!
//! ```text
//! key / model reply ──→ Intent ──→ Reducer ──→ State ──→ render
//! ```
//!
//! Reducers never talk to the network or the disk. `App` dispatches, looks at
//! the state that came back, and issues effect commands itself.

/// Something that happened: a key press, a pasted photo, a model reply.
pub trait Intent: Send + 'static {}

/// A component's whole state. `Default` is the initial value.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// Pure `(State, Intent) -> State` transition.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
