//! Display configuration options for llama
//!
//! This module defines the `[display]` table of llama.toml.

use crate::core::grid::COLUMN_SEPARATOR;

use serde::Deserialize;

const MAX_SEPARATOR_WIDTH: usize = 16;
const MAX_PREVIEW_PADDING: u16 = 8;

/// Display configuration options
///
/// Controls how the grid cells and the preview pane are laid out.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Display {
    dir_marker: bool,
    separator_width: usize,
    preview_padding: u16,
}

impl Default for Display {
    fn default() -> Self {
        Display {
            dir_marker: true,
            separator_width: COLUMN_SEPARATOR.len(),
            preview_padding: 2,
        }
    }
}

impl Display {
    /// Append `/` to directory names in the grid.
    #[inline]
    pub fn dir_marker(&self) -> bool {
        self.dir_marker
    }

    /// Spaces between two grid columns, at least one.
    #[inline]
    pub fn separator_width(&self) -> usize {
        self.separator_width.clamp(1, MAX_SEPARATOR_WIDTH)
    }

    /// Left padding of the preview pane.
    #[inline]
    pub fn preview_padding(&self) -> u16 {
        self.preview_padding.min(MAX_PREVIEW_PADDING)
    }
}
