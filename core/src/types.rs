use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid rows, columns, and positions.
pub type Coord = u8;

/// Count type used for wall counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Orthogonal step between two cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Right,
    Up,
    Left,
}

impl Direction {
    /// Order in which the search tries neighbors. Changing it changes which path is found.
    pub const SEARCH_ORDER: [Direction; 4] = [
        Direction::Down,
        Direction::Right,
        Direction::Up,
        Direction::Left,
    ];

    /// `(row, col)` displacement.
    pub const fn delta(self) -> (i8, i8) {
        use Direction::*;
        match self {
            Down => (1, 0),
            Right => (0, 1),
            Up => (-1, 0),
            Left => (0, -1),
        }
    }

    /// Applies this step to `coords`, returning a value only when it remains in bounds.
    pub fn step(self, coords: Coord2, bounds: Coord2) -> Option<Coord2> {
        let (row, col) = coords;
        let (d_row, d_col) = self.delta();
        let (max_row, max_col) = bounds;

        let next_row = row.checked_add_signed(d_row)?;
        if next_row >= max_row {
            return None;
        }

        let next_col = col.checked_add_signed(d_col)?;
        if next_col >= max_col {
            return None;
        }

        Some((next_row, next_col))
    }
}
