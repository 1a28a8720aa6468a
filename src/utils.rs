//! Miscellaneous utility functions for llama.
//!
//! - [helpers]: color parsing and home directory handling
//! - [cli]: command line parsing, help and version output

pub mod cli;
pub mod helpers;

pub use helpers::{clean_path, get_home, parse_color, shorten_home_path};
