//! Grid layout engine for llama.
//!
//! Packs an ordered list of entry names into a column-major grid that fits the
//! available width. Column 0 holds entries `0..rows`, column 1 holds
//! `rows..2*rows` and so on, so only the last column may be short.
//!
//! The layout holds no state between renders: terminal size and entry count are
//! its only inputs and it is recomputed every frame.

use crate::core::cursor::{Cursor, GridShape};
use crate::core::FileEntry;

use unicode_width::UnicodeWidthStr;

/// Separator placed between two columns of a rendered row.
pub const COLUMN_SEPARATOR: &str = "    ";

/// Marker appended to directory names before measuring.
pub const DIR_MARKER: char = '/';

/// A name as it appears in a grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridName {
    text: String,
    width: usize,
}

impl GridName {
    pub fn new(name: &str, is_dir: bool, dir_marker: bool) -> Self {
        let mut text = String::with_capacity(name.len() + 1);
        text.push_str(name);
        if is_dir && dir_marker {
            text.push(DIR_MARKER);
        }
        let width = text.width();
        Self { text, width }
    }

    pub fn from_entry(entry: &FileEntry, dir_marker: bool) -> Self {
        Self::new(&entry.name_str(), entry.is_dir(), dir_marker)
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
}

/// Result of packing names into the display area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    names: Vec<GridName>,
    columns: usize,
    rows: usize,
    column_widths: Vec<usize>,
    separator_width: usize,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            columns: 1,
            rows: 0,
            column_widths: vec![0],
            separator_width: COLUMN_SEPARATOR.len(),
        }
    }
}

impl GridLayout {
    /// Computes the grid for `names` inside a `width` x `height` list area.
    ///
    /// Starts from a column count that keeps a single column while everything fits
    /// in a third of the height, then drops columns until every row fits `width`.
    /// A single column is always accepted, whatever its width.
    pub fn compute(names: Vec<GridName>, width: usize, height: usize) -> Self {
        Self::compute_with_separator(names, width, height, COLUMN_SEPARATOR.len())
    }

    pub fn compute_with_separator(
        names: Vec<GridName>,
        width: usize,
        height: usize,
        separator_width: usize,
    ) -> Self {
        let len = names.len();
        if len == 0 {
            return Self {
                names,
                separator_width,
                ..Self::default()
            };
        }

        let third = (height / 3).max(1);
        let mut candidate = (len / third).clamp(1, len);

        loop {
            let rows = len.div_ceil(candidate);
            // Drop trailing columns that would stay completely empty.
            let columns = len.div_ceil(rows);
            let column_widths = column_widths(&names, columns, rows);
            let row_width = joined_width(&column_widths, separator_width);

            if columns == 1 || row_width <= width {
                return Self {
                    names,
                    columns,
                    rows,
                    column_widths,
                    separator_width,
                };
            }
            candidate = columns - 1;
        }
    }

    /// Convenience for laying out directory entries.
    pub fn for_entries(entries: &[FileEntry], width: usize, height: usize, dir_marker: bool) -> Self {
        let names = entries
            .iter()
            .map(|e| GridName::from_entry(e, dir_marker))
            .collect();
        Self::compute(names, width, height)
    }

    /// Gives back the names so the same list can be laid out again for a new size.
    pub fn into_names(self) -> Vec<GridName> {
        self.names
    }

    // Accessors

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    pub fn column_widths(&self) -> &[usize] {
        &self.column_widths
    }

    #[inline]
    pub fn separator_width(&self) -> usize {
        self.separator_width
    }

    pub fn shape(&self) -> GridShape {
        GridShape::new(self.columns, self.rows, self.names.len())
    }

    /// Linear entry index of the cell under `cursor`, if that cell holds an entry.
    pub fn index_of(&self, cursor: Cursor) -> Option<usize> {
        if cursor.column >= self.columns || cursor.row >= self.rows {
            return None;
        }
        let idx = cursor.column * self.rows + cursor.row;
        (idx < self.names.len()).then_some(idx)
    }

    /// Grid cell holding the entry at `index`.
    pub fn cursor_of(&self, index: usize) -> Option<Cursor> {
        if index >= self.names.len() || self.rows == 0 {
            return None;
        }
        Some(Cursor::new(index / self.rows, index % self.rows))
    }

    /// Name in a cell, `None` for the empty tail of the last column.
    pub fn cell(&self, column: usize, row: usize) -> Option<&GridName> {
        self.index_of(Cursor::new(column, row))
            .and_then(|idx| self.names.get(idx))
    }

    /// Cell text padded with spaces to its column width.
    pub fn padded_cell(&self, column: usize, row: usize) -> String {
        let col_width = self.column_widths.get(column).copied().unwrap_or(0);
        let (text, width) = match self.cell(column, row) {
            Some(name) => (name.text(), name.width()),
            None => ("", 0),
        };
        let mut out = String::with_capacity(col_width + text.len());
        out.push_str(text);
        out.push_str(&" ".repeat(col_width.saturating_sub(width)));
        out
    }

    /// Display width of a fully joined row. Every row has the same width.
    pub fn row_width(&self) -> usize {
        joined_width(&self.column_widths, self.separator_width)
    }

    /// A whole row as plain text, cells padded and joined by the separator.
    pub fn row_text(&self, row: usize) -> String {
        let separator = " ".repeat(self.separator_width);
        (0..self.columns)
            .map(|col| self.padded_cell(col, row))
            .collect::<Vec<_>>()
            .join(&separator)
    }

    /// Cell of the first entry whose name (without directory marker) equals `name`.
    pub fn position_of(&self, entries: &[FileEntry], name: &std::ffi::OsStr) -> Option<Cursor> {
        entries
            .iter()
            .position(|e| e.name() == name)
            .and_then(|idx| self.cursor_of(idx))
    }
}

fn column_widths(names: &[GridName], columns: usize, rows: usize) -> Vec<usize> {
    (0..columns)
        .map(|col| {
            let start = col * rows;
            let end = (start + rows).min(names.len());
            names
                .get(start..end)
                .map(|chunk| chunk.iter().map(GridName::width).max().unwrap_or(0))
                .unwrap_or(0)
        })
        .collect()
}

fn joined_width(column_widths: &[usize], separator_width: usize) -> usize {
    let cells: usize = column_widths.iter().sum();
    cells + separator_width * column_widths.len().saturating_sub(1)
}
