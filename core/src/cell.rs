use serde::{Deserialize, Serialize};

/// What the rendering surface should show for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellRole {
    None,
    Wall,
    Visiting,
    SettledPath,
    GoalMarker,
    /// Recorded in the user path, not yet walked.
    Marked,
}

impl CellRole {
    pub const fn is_trail(self) -> bool {
        matches!(self, Self::Visiting | Self::SettledPath)
    }
}

impl Default for CellRole {
    fn default() -> Self {
        Self::None
    }
}

/// Animation mark left on a cell by a replay.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum TrailMark {
    Clear,
    Visiting,
    Settled,
}

impl Default for TrailMark {
    fn default() -> Self {
        Self::Clear
    }
}
