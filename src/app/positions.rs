//! Per-directory cursor memory for llama.
//!
//! Remembers where the cursor was in every visited directory for the lifetime
//! of the process. Stored coordinates belong to one grid geometry, so the whole
//! map is dropped whenever the geometry changes (resize, preview toggle).

use crate::core::Cursor;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Cursor cell and scroll offset of one directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub cursor: Cursor,
    pub offset: usize,
}

impl Position {
    pub fn new(cursor: Cursor, offset: usize) -> Self {
        Self { cursor, offset }
    }
}

#[derive(Debug, Default)]
pub struct PositionMemory {
    map: HashMap<PathBuf, Position>,
}

impl PositionMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores or overwrites the position for `dir`.
    pub fn save(&mut self, dir: &Path, position: Position) {
        if let Some(existing) = self.map.get_mut(dir) {
            *existing = position;
        } else {
            self.map.insert(dir.to_path_buf(), position);
        }
    }

    pub fn get(&self, dir: &Path) -> Option<Position> {
        self.map.get(dir).copied()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_overwrites_and_clear_drops_all() {
        let mut memory = PositionMemory::new();
        let dir = Path::new("/tmp/a");
        memory.save(dir, Position::new(Cursor::new(1, 2), 0));
        memory.save(dir, Position::new(Cursor::new(0, 5), 3));
        memory.save(Path::new("/tmp/b"), Position::default());

        assert_eq!(memory.len(), 2);
        assert_eq!(memory.get(dir), Some(Position::new(Cursor::new(0, 5), 3)));

        memory.clear();
        assert!(memory.is_empty());
        assert_eq!(memory.get(dir), None);
    }
}
