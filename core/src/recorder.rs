use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Candidate path drawn by the user, kept in the order the cells were marked.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathRecorder {
    path: Vec<Coord2>,
    recording: bool,
}

impl PathRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn enable(&mut self) {
        self.recording = true;
    }

    pub fn disable(&mut self) {
        self.recording = false;
    }

    pub fn clear(&mut self) {
        self.path.clear();
    }

    pub fn path(&self) -> &[Coord2] {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.path.contains(&coords)
    }

    /// Adds the cell, or removes it if already marked. Start, goal, walls, and anything while not recording are
    /// ignored. Connectivity is never checked.
    pub fn toggle(&mut self, grid: &Grid, coords: Coord2) -> MarkOutcome {
        use MarkOutcome::*;

        if !self.recording
            || !grid.contains(coords)
            || grid.is_start(coords)
            || grid.is_goal(coords)
            || grid.is_wall(coords)
        {
            return NoChange;
        }

        if let Some(index) = self.path.iter().position(|&marked| marked == coords) {
            self.path.remove(index);
        } else {
            self.path.push(coords);
        }
        Changed
    }

    pub fn finalize(&self) -> Vec<Coord2> {
        self.path.clone()
    }
}
