use serde::{Deserialize, Serialize};

use crate::*;

/// Everything needed to build and animate one maze.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MazeConfig {
    pub size: Coord2,
    pub wall_probability: f64,
    pub visit_delay_ms: u32,
    pub user_path_delay_ms: u32,
}

impl MazeConfig {
    pub const DEFAULT_SIZE: Coord2 = (8, 8);
    pub const DEFAULT_WALL_PROBABILITY: f64 = 0.25;
    pub const DEFAULT_VISIT_DELAY_MS: u32 = 150;
    pub const DEFAULT_USER_PATH_DELAY_MS: u32 = 200;

    pub const fn new_unchecked(
        size: Coord2,
        wall_probability: f64,
        visit_delay_ms: u32,
        user_path_delay_ms: u32,
    ) -> Self {
        Self {
            size,
            wall_probability,
            visit_delay_ms,
            user_path_delay_ms,
        }
    }

    pub fn new(
        size: Coord2,
        wall_probability: f64,
        visit_delay_ms: u32,
        user_path_delay_ms: u32,
    ) -> Result<Self> {
        let config = Self::new_unchecked(size, wall_probability, visit_delay_ms, user_path_delay_ms);
        config.validate()?;
        Ok(config)
    }

    /// Same as the defaults but with a different grid size.
    pub fn with_size(size: Coord2) -> Result<Self> {
        Self {
            size,
            ..Self::default()
        }
        .validated()
    }

    /// Collapses both animation delays, used where nothing is rendered.
    pub const fn without_delays(self) -> Self {
        Self {
            visit_delay_ms: 0,
            user_path_delay_ms: 0,
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidSize(self.size));
        }
        // NaN fails both comparisons
        if !(0.0..=1.0).contains(&self.wall_probability) {
            return Err(MazeError::InvalidWallProbability(self.wall_probability));
        }
        Ok(())
    }

    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn start(&self) -> Coord2 {
        (0, 0)
    }

    pub const fn goal(&self) -> Coord2 {
        (self.size.0.saturating_sub(1), self.size.1.saturating_sub(1))
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self::new_unchecked(
            Self::DEFAULT_SIZE,
            Self::DEFAULT_WALL_PROBABILITY,
            Self::DEFAULT_VISIT_DELAY_MS,
            Self::DEFAULT_USER_PATH_DELAY_MS,
        )
    }
}
