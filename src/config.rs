//! Configuration for llama.
//!
//! Settings are read once at startup from `llama.toml`:
//! - [general]: listing, search and preview behaviour
//! - [display]: grid and pane layout
//! - [theme]: colors
//! - [input]: key bindings and the editor command
//! - [load]: file lookup, parsing and `--init` generation

pub mod display;
pub mod general;
pub mod input;
pub mod load;
pub mod theme;

pub use display::Display;
pub use general::{General, InternalGeneral};
pub use input::{Editor, Keys};
pub use load::Config;
pub use theme::{ColorPair, Theme};
