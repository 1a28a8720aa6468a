//! Core runtime logic for llama.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [fm]: directory listing (see [browse_dir], [FileEntry]).
//! - [formatter]: sorting and filtering of entries, text sanitizing for display.
//! - [grid]: the column-major grid layout.
//! - [cursor]: cursor movement over the grid.
//! - [search]: fuzzy matching of entry names.
//! - [preview]: loading file and directory previews.
//! - [worker]: background work and message passing back into the app state.
//! - [proc]: running the external editor.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.

pub mod cursor;
pub mod fm;
pub mod formatter;
pub mod grid;
pub mod preview;
pub mod proc;
pub mod search;
pub mod terminal;
pub mod worker;

pub use cursor::{Cursor, Direction, GridShape};
pub use fm::{FileEntry, browse_dir};
pub use formatter::{Formatter, strip_control, truncate_left};
pub use grid::{GridLayout, GridName};
pub use preview::{PreviewContent, load_preview};
pub use search::{FuzzyMatch, SearchCase, best_match, find_matches};
