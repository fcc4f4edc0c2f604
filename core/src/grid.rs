use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Wall layout of a rectangular maze. The start is always `(0, 0)` and the goal always the opposite corner, neither
/// can ever hold a wall.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    wall_mask: Array2<bool>,
}

#[derive(Deserialize)]
struct RawGrid {
    wall_mask: Array2<bool>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = MazeError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        Self::from_wall_mask(raw.wall_mask)
    }
}

impl Grid {
    /// Grid without any walls.
    pub fn open(size: Coord2) -> Self {
        Self {
            wall_mask: Array2::default(size.to_nd_index()),
        }
    }

    /// Builds a grid from an explicit mask, start and goal are cleared if set.
    ///
    /// Each dimension must be between 1 and `Coord::MAX`.
    pub fn from_wall_mask(wall_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = wall_mask.dim();
        let max = usize::from(Coord::MAX);
        if rows == 0 || cols == 0 || rows > max || cols > max {
            return Err(MazeError::InvalidBoardShape);
        }
        Ok(Self::from_mask_unchecked(wall_mask))
    }

    /// The mask dimensions must fit in `Coord`.
    pub(crate) fn from_mask_unchecked(wall_mask: Array2<bool>) -> Self {
        let mut grid = Self { wall_mask };
        if !grid.wall_mask.is_empty() {
            let (start, goal) = (grid.start(), grid.goal());
            grid.wall_mask[start.to_nd_index()] = false;
            grid.wall_mask[goal.to_nd_index()] = false;
        }
        grid
    }

    pub fn from_wall_coords(size: Coord2, wall_coords: &[Coord2]) -> Result<Self> {
        let mut wall_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in wall_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(MazeError::InvalidCoords);
            }
            wall_mask[coords.to_nd_index()] = true;
        }

        Self::from_wall_mask(wall_mask)
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.wall_mask.dim();
        (
            dim.0.try_into().unwrap_or(Coord::MAX),
            dim.1.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn wall_count(&self) -> CellCount {
        self.wall_mask
            .iter()
            .filter(|&&is_wall| is_wall)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub const fn start(&self) -> Coord2 {
        (0, 0)
    }

    pub fn goal(&self) -> Coord2 {
        let (rows, cols) = self.size();
        (rows.saturating_sub(1), cols.saturating_sub(1))
    }

    pub fn is_start(&self, coords: Coord2) -> bool {
        coords == self.start()
    }

    pub fn is_goal(&self, coords: Coord2) -> bool {
        coords == self.goal()
    }

    /// Signed so that a step off the top or left edge can be asked about directly.
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        let (rows, cols) = self.size();
        (0..rows as isize).contains(&row) && (0..cols as isize).contains(&col)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let (rows, cols) = self.size();
        coords.0 < rows && coords.1 < cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(MazeError::InvalidCoords)
        }
    }

    pub fn is_wall(&self, coords: Coord2) -> bool {
        self.contains(coords) && self[coords]
    }

    pub fn is_passable(&self, coords: Coord2) -> bool {
        self.contains(coords) && !self[coords]
    }

    pub fn toggle_wall(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.is_start(coords) || self.is_goal(coords) {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.wall_mask[coords.to_nd_index()];
        *cell = !*cell;
        log::trace!("wall at {:?} is now {}", coords, *cell);
        Ok(MarkOutcome::Changed)
    }

    /// Row-major iteration over every cell coordinate.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }
}

impl Index<Coord2> for Grid {
    type Output = bool;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.wall_mask[(row as usize, col as usize)]
    }
}
