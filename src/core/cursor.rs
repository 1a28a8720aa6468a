//! Cursor movement over the column-major grid.
//!
//! The last column may hold fewer entries than the others (exactly
//! `columns * rows - len` fewer). Every move here keeps the cursor on a populated
//! cell, so `column * rows + row < len` holds after any transition on a
//! non-empty grid.

/// Selected cell of the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub column: usize,
    pub row: usize,
}

/// Dimensions the cursor moves within.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridShape {
    pub columns: usize,
    pub rows: usize,
    pub len: usize,
}

/// Directional intents understood by [Cursor::moved].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Top,
    Bottom,
    Leftmost,
    Rightmost,
}

impl GridShape {
    pub fn new(columns: usize, rows: usize, len: usize) -> Self {
        Self { columns, rows, len }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0 || self.rows == 0 || self.columns == 0
    }

    #[inline]
    fn last_column(&self) -> usize {
        self.columns - 1
    }

    /// Last row that holds an entry in the last column.
    #[inline]
    fn last_populated_row(&self) -> usize {
        let missing = self.columns * self.rows - self.len;
        (self.rows - 1).saturating_sub(missing)
    }

    #[inline]
    fn is_populated(&self, column: usize, row: usize) -> bool {
        column * self.rows + row < self.len
    }
}

impl Cursor {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Linear entry index of this cell.
    #[inline]
    pub fn index(&self, rows: usize) -> usize {
        self.column * rows + self.row
    }

    /// Returns the cursor after applying `direction`, wrapping around the grid edges.
    pub fn moved(self, direction: Direction, shape: GridShape) -> Cursor {
        if shape.is_empty() {
            return Cursor::default();
        }
        let mut next = self.clamped(shape);
        match direction {
            Direction::Down => next.step_down(shape),
            Direction::Up => next.step_up(shape),
            Direction::Left => {
                next.column = if next.column == 0 {
                    shape.last_column()
                } else {
                    next.column - 1
                };
                next.snap_into_last_column(shape);
            }
            Direction::Right => {
                next.column = (next.column + 1) % shape.columns;
                next.snap_into_last_column(shape);
            }
            Direction::Top => next.row = 0,
            Direction::Bottom => {
                next.row = shape.rows - 1;
                next.snap_into_last_column(shape);
            }
            Direction::Leftmost => next.column = 0,
            Direction::Rightmost => {
                next.column = shape.last_column();
                next.snap_into_last_column(shape);
            }
        }
        next
    }

    /// Brings a stale cursor (restored position, previous layout) back onto a populated cell.
    pub fn clamped(self, shape: GridShape) -> Cursor {
        if shape.is_empty() {
            return Cursor::default();
        }
        let mut next = Cursor {
            column: self.column.min(shape.last_column()),
            row: self.row.min(shape.rows - 1),
        };
        next.snap_into_last_column(shape);
        next
    }

    fn step_down(&mut self, shape: GridShape) {
        self.row += 1;
        if self.row >= shape.rows {
            self.row = 0;
            self.column += 1;
        }
        if self.column >= shape.columns {
            self.column = 0;
        }
        if self.column == shape.last_column() && !shape.is_populated(self.column, self.row) {
            *self = Cursor::default();
        }
    }

    fn step_up(&mut self, shape: GridShape) {
        if self.row > 0 {
            self.row -= 1;
        } else if self.column > 0 {
            self.column -= 1;
            self.row = shape.rows - 1;
        } else {
            self.column = shape.last_column();
            self.row = shape.last_populated_row();
        }
    }

    fn snap_into_last_column(&mut self, shape: GridShape) {
        if self.column == shape.last_column() && !shape.is_populated(self.column, self.row) {
            self.row = shape.last_populated_row();
        }
    }
}
