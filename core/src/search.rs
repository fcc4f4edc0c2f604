use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::iter;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchState {
    Idle,
    Running,
    Succeeded,
    Exhausted,
}

impl SearchState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Succeeded | Self::Exhausted)
    }

    pub const fn reached(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathEventKind {
    Visiting,
    SettledPath,
    GoalReached,
}

/// One animation step. `delay_ms` is how long the driver should wait after applying it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEvent {
    pub coords: Coord2,
    pub kind: PathEventKind,
    pub delay_ms: u32,
}

impl PathEvent {
    pub const fn visiting(coords: Coord2, delay_ms: u32) -> Self {
        Self {
            coords,
            kind: PathEventKind::Visiting,
            delay_ms,
        }
    }

    pub const fn settled(coords: Coord2) -> Self {
        Self {
            coords,
            kind: PathEventKind::SettledPath,
            delay_ms: 0,
        }
    }

    pub const fn goal_reached(coords: Coord2) -> Self {
        Self {
            coords,
            kind: PathEventKind::GoalReached,
            delay_ms: 0,
        }
    }

    /// Role the cell takes once this event is applied. The goal keeps its visiting marker when reached.
    pub const fn role(&self) -> CellRole {
        use PathEventKind::*;
        match self.kind {
            Visiting => CellRole::Visiting,
            SettledPath => CellRole::SettledPath,
            GoalReached => CellRole::Visiting,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Frame {
    coords: Coord2,
    next_direction: u8,
}

/// Depth-first search from the grid start to the grid goal.
///
/// Iterating yields the animation events in the order they happen, the search only advances as far as needed to
/// produce the next event. Each `Search` owns its visited set, so a new invocation always starts clean.
#[derive(Clone, Debug)]
pub struct Search<'a> {
    grid: &'a Grid,
    visited: Array2<bool>,
    visited_count: usize,
    stack: Vec<Frame>,
    pending: VecDeque<PathEvent>,
    state: SearchState,
    visit_delay_ms: u32,
    path: Vec<Coord2>,
}

impl<'a> Search<'a> {
    pub fn new(grid: &'a Grid, visit_delay_ms: u32) -> Self {
        Self {
            grid,
            visited: Array2::default(grid.size().to_nd_index()),
            visited_count: 0,
            stack: Vec::new(),
            pending: VecDeque::new(),
            state: SearchState::Idle,
            visit_delay_ms,
            path: Vec::new(),
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    pub fn is_visited(&self, coords: Coord2) -> bool {
        self.grid.contains(coords) && self.visited[coords.to_nd_index()]
    }

    /// Start-to-goal path, empty until the search succeeds.
    pub fn path(&self) -> &[Coord2] {
        &self.path
    }

    /// Drains the search, collecting every event.
    pub fn run(mut self) -> SearchOutcome {
        let events: Vec<_> = self.by_ref().collect();
        SearchOutcome {
            state: self.state,
            events,
            path: self.path,
        }
    }

    fn advance(&mut self) {
        let Some(frame) = self.stack.last_mut() else {
            self.state = SearchState::Exhausted;
            log::debug!(
                "search exhausted after visiting {} cells",
                self.visited_count
            );
            return;
        };

        let Some(&direction) = Direction::SEARCH_ORDER.get(usize::from(frame.next_direction))
        else {
            log::trace!("backtrack from {:?}", frame.coords);
            self.stack.pop();
            return;
        };
        frame.next_direction += 1;

        if let Some(next) = direction.step(frame.coords, self.grid.size()) {
            self.attempt(next);
        }
    }

    fn attempt(&mut self, coords: Coord2) -> bool {
        if !self.grid.is_passable(coords) || self.visited[coords.to_nd_index()] {
            return false;
        }

        self.visited[coords.to_nd_index()] = true;
        self.visited_count += 1;
        self.pending
            .push_back(PathEvent::visiting(coords, self.visit_delay_ms));

        if self.grid.is_goal(coords) {
            self.pending.push_back(PathEvent::goal_reached(coords));
            self.path = self
                .stack
                .iter()
                .map(|frame| frame.coords)
                .chain(iter::once(coords))
                .collect();
            self.state = SearchState::Succeeded;
            log::debug!(
                "goal reached in {} steps after visiting {} cells",
                self.path.len(),
                self.visited_count
            );
        } else {
            self.pending.push_back(PathEvent::settled(coords));
            self.stack.push(Frame {
                coords,
                next_direction: 0,
            });
        }

        true
    }
}

impl Iterator for Search<'_> {
    type Item = PathEvent;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }

            match self.state {
                SearchState::Idle => {
                    self.state = SearchState::Running;
                    let start = self.grid.start();
                    log::debug!("search from {:?} to {:?}", start, self.grid.goal());
                    if !self.attempt(start) {
                        self.state = SearchState::Exhausted;
                    }
                }
                SearchState::Running => self.advance(),
                SearchState::Succeeded | SearchState::Exhausted => return None,
            }
        }
    }
}

impl iter::FusedIterator for Search<'_> {}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub state: SearchState,
    pub events: Vec<PathEvent>,
    pub path: Vec<Coord2>,
}

impl SearchOutcome {
    pub fn reached(&self) -> bool {
        self.state.reached()
    }
}

pub fn solve(grid: &Grid, visit_delay_ms: u32) -> SearchOutcome {
    Search::new(grid, visit_delay_ms).run()
}
