use alloc::vec::Vec;
use ndarray::Array2;

use crate::cell::TrailMark;
use crate::*;

/// State of one maze from generation until it is replaced.
///
/// Owns the grid, the user path, and the trail left by replays. Input is locked while a replay is active, and a
/// replay cannot be aborted: it only ends by being stepped to completion. Regenerating means building a new
/// `Session` and dropping the old one.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    config: MazeConfig,
    grid: Grid,
    recorder: PathRecorder,
    trail: Array2<TrailMark>,
    replay: Option<Replay>,
    last_outcome: Option<bool>,
}

impl Session {
    pub fn generate(config: MazeConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let grid = RandomMazeGenerator::new(seed).generate(config);
        Self::with_grid(config, grid)
    }

    /// Session over a fixed layout, the config size is replaced by the grid size.
    pub fn with_grid(config: MazeConfig, grid: Grid) -> Result<Self> {
        let config = MazeConfig {
            size: grid.size(),
            ..config
        }
        .validated()?;

        let mut recorder = PathRecorder::new();
        recorder.enable();

        Ok(Self {
            config,
            trail: Array2::default(grid.size().to_nd_index()),
            grid,
            recorder,
            replay: None,
            last_outcome: None,
        })
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn user_path(&self) -> &[Coord2] {
        self.recorder.path()
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn is_replaying(&self) -> bool {
        self.replay.is_some()
    }

    pub fn replay_mode(&self) -> Option<ReplayMode> {
        self.replay.as_ref().map(Replay::mode)
    }

    /// Whether the last finished replay reached the goal, `None` before any replay finished.
    pub fn last_outcome(&self) -> Option<bool> {
        self.last_outcome
    }

    pub fn role_at(&self, coords: Coord2) -> CellRole {
        if !self.grid.contains(coords) {
            return CellRole::None;
        }
        if self.grid.is_wall(coords) {
            return CellRole::Wall;
        }

        match self.trail[coords.to_nd_index()] {
            TrailMark::Visiting => CellRole::Visiting,
            TrailMark::Settled => CellRole::SettledPath,
            TrailMark::Clear if self.grid.is_goal(coords) => CellRole::GoalMarker,
            TrailMark::Clear if self.recorder.contains(coords) => CellRole::Marked,
            TrailMark::Clear => CellRole::None,
        }
    }

    /// Wall toggle from the interaction source.
    pub fn primary_activate(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.check_idle()?;
        let outcome = self.grid.toggle_wall(coords)?;
        if outcome.has_update() {
            self.trail[coords.to_nd_index()] = TrailMark::Clear;
        }
        Ok(outcome)
    }

    /// User path toggle from the interaction source, ignored while recording is off or a replay is active.
    pub fn secondary_activate(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        if self.is_replaying() {
            log::trace!("ignoring path toggle at {:?} during replay", coords);
            return Ok(MarkOutcome::NoChange);
        }
        Ok(self.recorder.toggle(&self.grid, coords))
    }

    pub fn start_search(&mut self) -> Result<ReplayMode> {
        self.check_idle()?;
        self.clear_trail();
        self.recorder.clear();
        let replay = Replay::search(&self.grid, self.config.visit_delay_ms);
        Ok(self.install(replay))
    }

    /// Recording stays off afterwards, the path can only be drawn once per maze.
    pub fn start_user_path(&mut self) -> Result<ReplayMode> {
        self.check_idle()?;
        self.recorder.disable();
        let path = self.recorder.finalize();
        self.recorder.clear();
        self.clear_trail();
        let replay = Replay::user_path(&self.grid, path, self.config.user_path_delay_ms);
        Ok(self.install(replay))
    }

    /// Advances the active replay by one step and applies it to the trail. The returned step tells the driver how
    /// long to wait before the next call. Input unlocks as soon as the final step is handed out.
    pub fn step(&mut self) -> Option<ReplayStep> {
        let replay = self.replay.as_mut()?;
        let step = replay.next();
        let finished = replay.is_finished();

        if let Some(ReplayStep::Event(event)) = step {
            log::trace!("replay {:?}", event);
            self.trail[event.coords.to_nd_index()] = match event.kind {
                PathEventKind::Visiting | PathEventKind::GoalReached => TrailMark::Visiting,
                PathEventKind::SettledPath => TrailMark::Settled,
            };
        }

        if finished {
            self.finish_replay();
        }

        step
    }

    /// Plays the rest of the active replay without delays.
    pub fn run_to_end(&mut self, observer: &mut impl ReplayObserver) -> bool {
        let mut reached = false;
        while let Some(step) = self.step() {
            match step {
                ReplayStep::Event(event) => observer.on_role(event.coords, self.role_at(event.coords)),
                ReplayStep::Reached => {
                    reached = true;
                    observer.notify_reached();
                }
            }
        }
        reached
    }

    /// Coordinates currently showing a replay trail, row-major.
    pub fn trail_coords(&self) -> Vec<Coord2> {
        self.grid
            .iter_coords()
            .filter(|&coords| self.trail[coords.to_nd_index()] != TrailMark::Clear)
            .collect()
    }

    fn install(&mut self, replay: Replay) -> ReplayMode {
        let mode = replay.mode();
        log::debug!("starting {:?} replay", mode);
        if replay.is_finished() {
            self.last_outcome = Some(false);
            log::debug!("{:?} replay has nothing to play", mode);
        } else {
            self.replay = Some(replay);
        }
        mode
    }

    fn finish_replay(&mut self) {
        if let Some(replay) = self.replay.take() {
            log::debug!(
                "{:?} replay finished, reached: {}",
                replay.mode(),
                replay.reached()
            );
            self.last_outcome = Some(replay.reached());
        }
    }

    fn clear_trail(&mut self) {
        self.trail.fill(TrailMark::Clear);
    }

    fn check_idle(&self) -> Result<()> {
        if self.is_replaying() {
            log::warn!("grid is locked while a replay is running");
            Err(MazeError::ReplayInProgress)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::tests::Recording;

    fn session(size: Coord2, walls: &[Coord2]) -> Session {
        let grid = Grid::from_wall_coords(size, walls).unwrap();
        Session::with_grid(MazeConfig::default().without_delays(), grid).unwrap()
    }

    #[test]
    fn fresh_session_records_and_shows_goal() {
        let session = session((3, 3), &[(1, 1)]);

        assert!(session.is_recording());
        assert!(!session.is_replaying());
        assert_eq!(session.last_outcome(), None);
        assert_eq!(session.role_at((2, 2)), CellRole::GoalMarker);
        assert_eq!(session.role_at((1, 1)), CellRole::Wall);
        assert_eq!(session.role_at((0, 1)), CellRole::None);
    }

    #[test]
    fn generate_rejects_bad_config() {
        let config = MazeConfig::new_unchecked((0, 8), 0.25, 0, 0);

        assert_eq!(
            Session::generate(config, 1),
            Err(MazeError::InvalidSize((0, 8)))
        );
    }

    #[test]
    fn generate_uses_config_size() {
        let config = MazeConfig::with_size((4, 6)).unwrap();
        let session = Session::generate(config, 99).unwrap();

        assert_eq!(session.size(), (4, 6));
        assert_eq!(session.config().goal(), (3, 5));
        assert_eq!(session.role_at((3, 5)), CellRole::GoalMarker);
    }

    #[test]
    fn input_is_locked_during_replay() {
        let mut session = session((3, 3), &[]);
        session.secondary_activate((1, 1)).unwrap();

        assert_eq!(session.start_search(), Ok(ReplayMode::Search));
        assert!(session.is_replaying());
        assert!(session.user_path().is_empty());
        assert_eq!(
            session.primary_activate((1, 1)),
            Err(MazeError::ReplayInProgress)
        );
        assert_eq!(
            session.secondary_activate((1, 1)),
            Ok(MarkOutcome::NoChange)
        );
        assert_eq!(session.start_search(), Err(MazeError::ReplayInProgress));
        assert_eq!(
            session.start_user_path(),
            Err(MazeError::ReplayInProgress)
        );

        let mut observer = Recording::default();
        assert!(session.run_to_end(&mut observer));

        assert!(!session.is_replaying());
        assert_eq!(session.primary_activate((1, 1)), Ok(MarkOutcome::Changed));
    }

    #[test]
    fn search_replay_leaves_trail_and_signals_once() {
        let mut session = session((3, 3), &[]);
        let mut observer = Recording::default();

        session.start_search().unwrap();
        assert!(session.run_to_end(&mut observer));

        assert_eq!(observer.reached, 1);
        assert_eq!(session.last_outcome(), Some(true));
        assert_eq!(session.role_at((2, 2)), CellRole::Visiting);
        assert_eq!(session.role_at((1, 0)), CellRole::SettledPath);
        assert_eq!(session.role_at((1, 1)), CellRole::None);
        assert_eq!(
            session.trail_coords(),
            [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]
        );
        assert_eq!(session.step(), None);
    }

    #[test]
    fn exhausted_search_gives_no_completion() {
        let mut session = session((3, 3), &[(1, 2), (2, 1)]);
        let mut observer = Recording::default();

        session.start_search().unwrap();
        assert!(!session.run_to_end(&mut observer));

        assert_eq!(observer.reached, 0);
        assert_eq!(session.last_outcome(), Some(false));
        assert_eq!(session.role_at((2, 2)), CellRole::GoalMarker);
        assert_eq!(session.role_at((0, 2)), CellRole::SettledPath);
    }

    #[test]
    fn new_search_clears_previous_trail() {
        let mut session = session((3, 3), &[]);
        session.start_search().unwrap();
        session.run_to_end(&mut Recording::default());

        session.primary_activate((1, 0)).unwrap();
        session.start_search().unwrap();
        session.run_to_end(&mut Recording::default());

        assert_eq!(session.role_at((1, 0)), CellRole::Wall);
        assert_eq!(session.role_at((2, 0)), CellRole::None);
        assert_eq!(
            session.trail_coords(),
            [(0, 0), (0, 1), (1, 1), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn user_path_replay_disables_recording() {
        let mut session = session((3, 3), &[]);
        for coords in [(0, 1), (1, 1)] {
            assert_eq!(session.secondary_activate(coords), Ok(MarkOutcome::Changed));
        }
        assert_eq!(session.role_at((0, 1)), CellRole::Marked);

        assert_eq!(session.start_user_path(), Ok(ReplayMode::UserPath));
        assert!(!session.is_recording());
        assert!(session.user_path().is_empty());

        let mut observer = Recording::default();
        assert!(!session.run_to_end(&mut observer));
        assert_eq!(
            observer.roles,
            [
                ((0, 1), CellRole::Visiting),
                ((0, 1), CellRole::SettledPath),
                ((1, 1), CellRole::Visiting),
                ((1, 1), CellRole::SettledPath),
            ]
        );
        assert_eq!(session.last_outcome(), Some(false));
        assert_eq!(
            session.secondary_activate((1, 2)),
            Ok(MarkOutcome::NoChange)
        );
    }

    #[test]
    fn empty_user_path_finishes_immediately() {
        let mut session = session((2, 2), &[]);

        session.start_user_path().unwrap();

        assert!(!session.is_replaying());
        assert_eq!(session.last_outcome(), Some(false));
        assert_eq!(session.step(), None);
    }

    #[test]
    fn step_reports_delays() {
        let grid = Grid::open((2, 1));
        let mut session = Session::with_grid(MazeConfig::default(), grid).unwrap();

        session.start_search().unwrap();

        assert_eq!(session.step().map(|step| step.delay_ms()), Some(150));
        assert_eq!(session.role_at((0, 0)), CellRole::Visiting);
        assert_eq!(session.step().map(|step| step.delay_ms()), Some(0));
        assert_eq!(session.role_at((0, 0)), CellRole::SettledPath);
        assert_eq!(
            session.step(),
            Some(ReplayStep::Event(PathEvent::visiting((1, 0), 150)))
        );
        assert_eq!(
            session.step(),
            Some(ReplayStep::Event(PathEvent::goal_reached((1, 0))))
        );
        assert!(session.is_replaying());
        assert_eq!(session.step(), Some(ReplayStep::Reached));
        assert!(!session.is_replaying());
    }

    #[test]
    fn wall_toggle_ignores_start_and_goal() {
        let mut session = session((2, 2), &[]);

        assert_eq!(session.primary_activate((0, 0)), Ok(MarkOutcome::NoChange));
        assert_eq!(session.primary_activate((1, 1)), Ok(MarkOutcome::NoChange));
        assert_eq!(
            session.primary_activate((5, 5)),
            Err(MazeError::InvalidCoords)
        );
        assert_eq!(session.grid().wall_count(), 0);
    }
}
