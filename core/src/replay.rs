use alloc::collections::VecDeque;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplayMode {
    /// Animates the depth-first search.
    Search,
    /// Walks the path the user recorded.
    UserPath,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReplayStep {
    Event(PathEvent),
    /// Completion signal, only after the last event of a successful replay.
    Reached,
}

impl ReplayStep {
    pub const fn delay_ms(&self) -> u32 {
        match self {
            Self::Event(event) => event.delay_ms,
            Self::Reached => 0,
        }
    }
}

/// Timed presentation of a path, consumed once.
#[derive(Clone, Debug, PartialEq)]
pub struct Replay {
    mode: ReplayMode,
    events: VecDeque<PathEvent>,
    path: Vec<Coord2>,
    reached: bool,
    signalled: bool,
}

impl Replay {
    /// Runs the search to completion up front, then replays what it did.
    pub fn search(grid: &Grid, visit_delay_ms: u32) -> Self {
        let SearchOutcome {
            state,
            events,
            path,
        } = solve(grid, visit_delay_ms);
        log::debug!(
            "search replay ready: {:?}, {} events",
            state,
            events.len()
        );
        Self {
            mode: ReplayMode::Search,
            events: events.into(),
            path,
            reached: state.reached(),
            signalled: false,
        }
    }

    /// Succeeds exactly when the last recorded cell is the goal. Gaps and walls along the way are not checked.
    pub fn user_path(grid: &Grid, path: Vec<Coord2>, step_delay_ms: u32) -> Self {
        let reached = path.last().is_some_and(|&last| grid.is_goal(last));
        let events = path
            .iter()
            .flat_map(|&coords| {
                [
                    PathEvent::visiting(coords, step_delay_ms),
                    PathEvent::settled(coords),
                ]
            })
            .collect();
        log::debug!(
            "user path replay ready: {} cells, reaches goal: {}",
            path.len(),
            reached
        );
        Self {
            mode: ReplayMode::UserPath,
            events,
            path,
            reached,
            signalled: false,
        }
    }

    pub fn mode(&self) -> ReplayMode {
        self.mode
    }

    /// Whether this replay ends with the completion signal, known before it is played.
    pub fn reached(&self) -> bool {
        self.reached
    }

    pub fn path(&self) -> &[Coord2] {
        &self.path
    }

    /// Events not yet played.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    /// Nothing left to hand out, including the completion signal.
    pub fn is_finished(&self) -> bool {
        self.events.is_empty() && (!self.reached || self.signalled)
    }
}

impl Iterator for Replay {
    type Item = ReplayStep;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.events.pop_front() {
            return Some(ReplayStep::Event(event));
        }

        if self.reached && !self.signalled {
            self.signalled = true;
            return Some(ReplayStep::Reached);
        }

        None
    }
}

impl core::iter::FusedIterator for Replay {}

/// Collaborators a replay drives: the rendering surface and the completion surface.
pub trait ReplayObserver {
    fn on_role(&mut self, _coords: Coord2, _role: CellRole) {}

    fn notify_reached(&mut self) {}
}

/// Plays a replay without any delays. Returns whether the completion signal fired.
pub fn drive(replay: Replay, observer: &mut impl ReplayObserver) -> bool {
    let mut reached = false;
    for step in replay {
        match step {
            ReplayStep::Event(event) => observer.on_role(event.coords, event.role()),
            ReplayStep::Reached => {
                reached = true;
                observer.notify_reached();
            }
        }
    }
    reached
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Default)]
    pub(crate) struct Recording {
        pub(crate) roles: Vec<(Coord2, CellRole)>,
        pub(crate) reached: usize,
    }

    impl ReplayObserver for Recording {
        fn on_role(&mut self, coords: Coord2, role: CellRole) {
            self.roles.push((coords, role));
        }

        fn notify_reached(&mut self) {
            self.reached += 1;
        }
    }

    #[test]
    fn search_replay_signals_once_after_last_event() {
        let grid = Grid::open((3, 3));
        let steps: Vec<_> = Replay::search(&grid, 150).collect();

        assert_eq!(steps.len(), 11);
        assert_eq!(steps.last(), Some(&ReplayStep::Reached));
        assert_eq!(
            steps
                .iter()
                .filter(|&&step| step == ReplayStep::Reached)
                .count(),
            1
        );
        assert_eq!(
            steps[9],
            ReplayStep::Event(PathEvent::goal_reached((2, 2)))
        );
        assert_eq!(steps[0].delay_ms(), 150);
        assert_eq!(steps[1].delay_ms(), 0);
    }

    #[test]
    fn exhausted_search_never_signals() {
        let grid = Grid::from_wall_coords((3, 3), &[(1, 2), (2, 1)]).unwrap();
        let mut observer = Recording::default();

        let replay = Replay::search(&grid, 0);
        assert!(!replay.reached());
        assert!(replay.path().is_empty());

        assert!(!drive(replay, &mut observer));
        assert_eq!(observer.reached, 0);
        assert!(!observer.roles.is_empty());
    }

    #[test]
    fn search_replay_carries_explicit_path() {
        let replay = Replay::search(&Grid::open((2, 3)), 0);

        assert_eq!(replay.mode(), ReplayMode::Search);
        assert_eq!(replay.path(), [(0, 0), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn user_path_visits_then_settles_each_cell() {
        let grid = Grid::open((2, 2));
        let replay = Replay::user_path(&grid, alloc::vec![(0, 1), (1, 1)], 200);

        assert_eq!(replay.mode(), ReplayMode::UserPath);
        assert_eq!(replay.remaining(), 4);
        let steps: Vec<_> = replay.collect();
        assert_eq!(
            steps,
            [
                ReplayStep::Event(PathEvent::visiting((0, 1), 200)),
                ReplayStep::Event(PathEvent::settled((0, 1))),
                ReplayStep::Event(PathEvent::visiting((1, 1), 200)),
                ReplayStep::Event(PathEvent::settled((1, 1))),
                ReplayStep::Reached,
            ]
        );
    }

    #[test]
    fn user_path_succeeds_only_when_ending_on_goal() {
        let grid = Grid::open((3, 3));

        assert!(Replay::user_path(&grid, alloc::vec![(2, 2)], 0).reached());
        assert!(Replay::user_path(&grid, alloc::vec![(0, 1), (2, 2)], 0).reached());
        assert!(!Replay::user_path(&grid, alloc::vec![(2, 2), (2, 1)], 0).reached());
        assert!(!Replay::user_path(&grid, alloc::vec![(1, 1)], 0).reached());
    }

    #[test]
    fn empty_user_path_never_signals() {
        let grid = Grid::open((1, 1));
        let mut observer = Recording::default();

        assert!(!drive(Replay::user_path(&grid, Vec::new(), 0), &mut observer));
        assert_eq!(observer.reached, 0);
        assert!(observer.roles.is_empty());
    }

    #[test]
    fn user_path_jumps_and_walls_are_not_validated() {
        let grid = Grid::from_wall_coords((4, 4), &[(1, 1)]).unwrap();
        let mut observer = Recording::default();

        let replay = Replay::user_path(&grid, alloc::vec![(1, 1), (0, 3), (3, 3)], 0);

        assert!(drive(replay, &mut observer));
        assert_eq!(observer.reached, 1);
        assert_eq!(observer.roles.first(), Some(&((1, 1), CellRole::Visiting)));
        assert_eq!(observer.roles.last(), Some(&((3, 3), CellRole::SettledPath)));
    }
}
