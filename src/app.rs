//! Application state for llama.
//!
//! - [state]: the [AppState] that owns the whole browsing session
//! - [handlers]: key handling on top of it
//! - [keymap]: configurable key bindings
//! - [positions], [search_state], [preview_state]: the pieces of state the
//!   handlers keep consistent

pub mod handlers;
pub mod keymap;
pub mod positions;
pub mod preview_state;
pub mod search_state;
pub mod state;

pub use keymap::{Action, FileAction, Keymap, NavAction, SystemAction};
pub use positions::{Position, PositionMemory};
pub use preview_state::PreviewState;
pub use search_state::SearchState;
pub use state::{AppState, KeypressResult, Notification};
