use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum MazeError {
    #[error("Invalid grid size {0:?}, rows and columns must be at least 1")]
    InvalidSize(Coord2),
    #[error("Invalid board shape, rows and columns must be between 1 and 255")]
    InvalidBoardShape,
    #[error("Invalid wall probability {0}, must be within [0, 1]")]
    InvalidWallProbability(f64),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("A replay is in progress, the grid is locked")]
    ReplayInProgress,
}

pub type Result<T> = core::result::Result<T, MazeError>;
