//! Game round module.
//!
//! This module contains the [`Session`], which owns one round of play: the maze being carved, the
//! mouse steered by the player, the cat chasing it and the cheese it is after. The session does
//! not keep time on its own; the front-end feeds it the current instant and it catches up on
//! whatever generation steps and cat moves are due.

use std::time::{Duration, Instant};

use rand::{rngs::StdRng, seq::SliceRandom as _, SeedableRng as _};
use tracing::{debug, error, info, trace};

use crate::{
    carving::MazeGenerator,
    labyrinth::{Cell, Direction, Gates, MazeError, MazeGraph, Position},
    pursuit::Pursuer,
};

/// Cell the mouse starts every round on.
const MOUSE_START: Position = Position::new(0, 0);

/// Shortest interval a pacer accepts.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Knobs of a round.
///
/// These are filled in from the command line, and the options menu may toggle the gates before a
/// round starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Number of cells along the x axis.
    ///
    /// This field holds the width of the maze the next round is carved on.
    pub width: u16,
    /// Number of cells along the y axis.
    ///
    /// This field holds the height of the maze the next round is carved on.
    pub height: u16,
    /// Fixed seed for the random source, if any.
    ///
    /// Rounds without a seed draw one from the operating system.
    pub seed: Option<u64>,
    /// Whether the entrance and exit gates are opened.
    ///
    /// This field holds the flag the options menu toggles. The entrance sits south of the origin
    /// and the exit east of the far corner.
    pub gates: bool,
    /// Whether the maze is carved in one go instead of one step per interval.
    ///
    /// This field holds the switch between the animated carving and an immediately playable round.
    pub instant: bool,
    /// Delay between two generation steps.
    ///
    /// This field holds the pace of the carving animation.
    pub step_interval: Duration,
    /// Delay between two cat moves.
    ///
    /// This field holds the pace at which the cat walks its route.
    pub cat_interval: Duration,
    /// Number of cat moves between two route refreshes.
    ///
    /// This field holds how often the cat re-plans. One means a fresh route before every move.
    pub refresh_every: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            seed: None,
            gates: false,
            instant: false,
            step_interval: Duration::from_millis(20),
            cat_interval: Duration::from_millis(400),
            refresh_every: 1,
        }
    }
}

/// State of a round as far as the player is concerned.
///
/// This enumeration holds what the status line shows and which inputs a round accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// The maze is still being carved.
    #[default]
    Generating,
    /// The mouse is free to move.
    Playing,
    /// The mouse reached the cheese.
    Won,
    /// The cat reached the mouse.
    Caught,
}

/// Turns wall-clock time into a number of due ticks.
#[derive(Debug, Clone, Copy)]
struct Pacer {
    /// Time between two ticks.
    interval: Duration,
    /// Instant the last counted tick happened at.
    ///
    /// Unset until the pacer is first polled, so that the first tick only comes one interval
    /// after that.
    last: Option<Instant>,
}

impl Pacer {
    /// Creates a pacer ticking every `interval`.
    fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            last: None,
        }
    }

    /// Returns how many ticks elapsed up to `now` and consumes them.
    fn due(&mut self, now: Instant) -> u32 {
        let Some(last) = self.last else {
            self.last = Some(now);
            return 0;
        };

        let elapsed = now.saturating_duration_since(last);
        let ticks =
            u32::try_from(elapsed.as_nanos() / self.interval.as_nanos()).unwrap_or(u32::MAX);
        self.last = self
            .interval
            .checked_mul(ticks)
            .and_then(|span| last.checked_add(span))
            .or(Some(now));

        ticks
    }
}

/// One round of play.
///
/// A session starts carving as soon as it is created. Once the maze is complete the cat and the
/// cheese are dropped on random cells and the round is on.
#[derive(Debug, Clone)]
pub struct Session {
    /// Knobs the round was created with.
    settings: Settings,
    /// Maze being played on.
    maze: MazeGraph,
    /// Carving state machine.
    generator: MazeGenerator,
    /// Random source shared by carving and placement.
    rng: StdRng,
    /// Cell the mouse stands on.
    mouse: Position,
    /// The chasing cat, once placed.
    cat: Option<Pursuer>,
    /// Cell of the cheese, once placed.
    cheese: Option<Position>,
    /// State of the round.
    outcome: Outcome,
    /// Clock for generation steps.
    step_pacer: Pacer,
    /// Clock for cat moves.
    cat_pacer: Pacer,
}

impl Session {
    /// Creates a session and starts carving its maze.
    ///
    /// With [`Settings::instant`] the maze is carved right away and the round is already playable
    /// when this returns.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimension`] when either side of the grid is zero.
    pub fn new(settings: Settings) -> Result<Self, MazeError> {
        let mut maze = MazeGraph::new(settings.width, settings.height)?;
        if settings.gates {
            maze = maze.with_gates(Gates::corners(settings.width, settings.height))?;
        }
        let rng = settings
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        let mut session = Self {
            step_pacer: Pacer::new(settings.step_interval),
            cat_pacer: Pacer::new(settings.cat_interval),
            settings,
            maze,
            generator: MazeGenerator::new().with_start(MOUSE_START),
            rng,
            mouse: MOUSE_START,
            cat: None,
            cheese: None,
            outcome: Outcome::Generating,
        };
        let _ = session.regenerate()?;

        Ok(session)
    }

    /// Returns the knobs the round was created with.
    ///
    /// This function gives back the settings as they were when the round started, regardless of
    /// later menu changes.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the maze being played on.
    ///
    /// This function exposes the graph so that the interface can draw its walls.
    #[must_use]
    pub const fn maze(&self) -> &MazeGraph {
        &self.maze
    }

    /// Returns the carving state machine.
    ///
    /// This function exposes the generator so that the interface can draw the carving head.
    #[must_use]
    pub const fn generator(&self) -> &MazeGenerator {
        &self.generator
    }

    /// Returns the cell the mouse stands on.
    ///
    /// This function gives back the origin until the player first moves.
    #[must_use]
    pub const fn mouse(&self) -> Position {
        self.mouse
    }

    /// Returns the cat, once placed.
    ///
    /// This function returns `None` while the maze is being carved and in rounds too small for a
    /// cat.
    #[must_use]
    pub const fn cat(&self) -> Option<&Pursuer> {
        self.cat.as_ref()
    }

    /// Returns the cell of the cheese, once placed.
    ///
    /// This function returns `None` while the maze is being carved and in rounds too small for the
    /// cheese.
    #[must_use]
    pub const fn cheese(&self) -> Option<Position> {
        self.cheese
    }

    /// Returns the state of the round.
    ///
    /// This function tells whether the round is being carved, played, won or lost.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Starts a new round on a freshly carved maze.
    ///
    /// Returns `false` without doing anything when the current maze is still being carved.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`MazeGenerator::begin`].
    pub fn regenerate(&mut self) -> Result<bool, MazeError> {
        if self.generator.is_generating() {
            debug!("maze is still being carved, ignoring regeneration request");
            return Ok(false);
        }

        self.mouse = MOUSE_START;
        self.cat = None;
        self.cheese = None;
        self.outcome = Outcome::Generating;
        self.step_pacer = Pacer::new(self.settings.step_interval);

        if self.settings.instant {
            let _ = self.generator.create_maze(&mut self.maze, &mut self.rng)?;
            self.place_pieces();
        } else {
            let _ = self.generator.begin(&mut self.maze)?;
        }
        info!(
            width = self.maze.width(),
            height = self.maze.height(),
            instant = self.settings.instant,
            "new round"
        );

        Ok(true)
    }

    /// Catches up on everything due at `now`.
    ///
    /// While the maze is being carved this performs one generation step per elapsed step
    /// interval, and places the cat and the cheese once carving ends. During play it moves the cat
    /// once per elapsed cat interval. Finished rounds are left alone.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Pursuer::tick`].
    pub fn update(&mut self, now: Instant) -> Result<(), MazeError> {
        match self.outcome {
            Outcome::Generating => {
                for _ in 0..self.step_pacer.due(now) {
                    let _ = self.generator.step(&mut self.maze, &mut self.rng);
                    if !self.generator.is_generating() {
                        self.place_pieces();
                        break;
                    }
                }
            }
            Outcome::Playing => {
                for _ in 0..self.cat_pacer.due(now) {
                    let Some(cat) = self.cat.as_mut() else {
                        break;
                    };
                    let _ = cat.tick(&self.maze, self.mouse)?;
                    self.settle();
                    if self.outcome != Outcome::Playing {
                        break;
                    }
                }
            }
            Outcome::Won | Outcome::Caught => {}
        }

        Ok(())
    }

    /// Moves the mouse one cell in `direction`.
    ///
    /// Returns `true` when the mouse moved. Nothing happens outside of play, against a wall, or
    /// through an open gate since there is no cell beyond it.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        if self.outcome != Outcome::Playing || self.maze.has_wall(self.mouse, direction) {
            return false;
        }
        let Some(next) = self.maze.neighbor(self.mouse, direction) else {
            return false;
        };

        trace!(from = %self.mouse, to = %next, %direction, "mouse moved");
        self.mouse = next;
        self.settle();

        true
    }

    /// Drops the cat and the cheese on two random cells other than the mouse's.
    fn place_pieces(&mut self) {
        let mouse = self.mouse;
        let mut candidates: Vec<Position> = self
            .maze
            .cells()
            .map(Cell::position)
            .filter(|&position| position != mouse)
            .collect();
        candidates.shuffle(&mut self.rng);

        self.outcome = Outcome::Playing;
        self.cat_pacer = Pacer::new(self.settings.cat_interval);

        let (Some(&cat), Some(&cheese)) = (candidates.first(), candidates.get(1)) else {
            error!(
                free_cells = candidates.len(),
                "not enough free cells to place the cat and the cheese"
            );
            return;
        };
        self.cat = Some(Pursuer::new(cat, self.settings.refresh_every));
        self.cheese = Some(cheese);
        info!(%cat, %cheese, "placed the cat and the cheese");
    }

    /// Ends the round if the mouse met the cat or the cheese.
    fn settle(&mut self) {
        if self
            .cat
            .as_ref()
            .is_some_and(|cat| cat.position() == self.mouse)
        {
            self.outcome = Outcome::Caught;
            info!(at = %self.mouse, "the cat caught the mouse");
        } else if self.cheese == Some(self.mouse) {
            self.outcome = Outcome::Won;
            info!(at = %self.mouse, "the mouse found the cheese");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Settings for a seeded round carved in one go.
    fn instant(width: u16, height: u16, seed: u64) -> Settings {
        Settings {
            width,
            height,
            seed: Some(seed),
            instant: true,
            ..Settings::default()
        }
    }

    /// Finds a side of the mouse's cell it can walk through.
    fn open_side(session: &Session) -> (Direction, Position) {
        Direction::ALL
            .into_iter()
            .find_map(|direction| {
                if session.maze.has_wall(session.mouse, direction) {
                    return None;
                }
                session
                    .maze
                    .neighbor(session.mouse, direction)
                    .map(|next| (direction, next))
            })
            .expect("every cell of a perfect maze has an open side")
    }

    #[test]
    fn test_instant_round_is_ready_to_play() {
        let session = Session::new(instant(6, 5, 7)).expect("settings should be valid");

        assert_eq!(session.outcome(), Outcome::Playing);
        assert_eq!(session.maze().open_edge_count(), 29);
        assert_eq!(session.mouse(), Position::new(0, 0));

        let cat = session.cat().expect("cat should be placed").position();
        let cheese = session.cheese().expect("cheese should be placed");
        assert_ne!(cat, cheese);
        assert_ne!(cat, session.mouse());
        assert_ne!(cheese, session.mouse());
    }

    #[test]
    fn test_same_seed_plays_the_same_round() {
        let first = Session::new(instant(8, 8, 42)).expect("settings should be valid");
        let second = Session::new(instant(8, 8, 42)).expect("settings should be valid");

        assert_eq!(first.maze(), second.maze());
        assert_eq!(first.cat(), second.cat());
        assert_eq!(first.cheese(), second.cheese());
    }

    #[test]
    fn test_zero_sized_round_is_rejected() {
        assert!(Session::new(instant(0, 4, 1)).is_err());
    }

    #[test]
    fn test_gates_are_opened_when_requested() {
        let settings = Settings {
            gates: true,
            ..instant(4, 4, 3)
        };
        let session = Session::new(settings).expect("settings should be valid");

        assert!(!session.maze().has_wall(Position::new(0, 0), Direction::South));
        assert!(!session.maze().has_wall(Position::new(3, 3), Direction::East));
    }

    #[test]
    fn test_stepwise_generation_follows_the_clock() {
        let settings = Settings {
            instant: false,
            step_interval: Duration::from_millis(10),
            ..instant(3, 3, 5)
        };
        let mut session = Session::new(settings).expect("settings should be valid");
        let start = Instant::now();

        session.update(start).expect("generation does not fail");
        assert_eq!(session.maze().open_edge_count(), 0);

        session
            .update(start + Duration::from_millis(30))
            .expect("generation does not fail");
        assert_eq!(session.outcome(), Outcome::Generating);
        assert!(session.generator().is_generating());
        assert!(session.maze().open_edge_count() <= 3);
        assert!(session.maze().open_edge_count() >= 1);

        session
            .update(start + Duration::from_secs(1))
            .expect("generation does not fail");
        assert_eq!(session.outcome(), Outcome::Playing);
        assert_eq!(session.maze().open_edge_count(), 8);
        assert!(session.cat().is_some());
    }

    #[test]
    fn test_regenerate_is_ignored_while_carving() {
        let settings = Settings {
            instant: false,
            ..instant(5, 5, 9)
        };
        let mut session = Session::new(settings).expect("settings should be valid");

        assert!(!session.regenerate().expect("regeneration does not fail"));
        assert_eq!(session.outcome(), Outcome::Generating);
    }

    #[test]
    fn test_regenerate_starts_a_new_round() {
        let mut session = Session::new(instant(5, 5, 11)).expect("settings should be valid");
        let (direction, _) = open_side(&session);
        session.cheese = None;
        session.cat = None;
        assert!(session.move_player(direction));

        assert!(session.regenerate().expect("regeneration does not fail"));
        assert_eq!(session.mouse(), Position::new(0, 0));
        assert_eq!(session.outcome(), Outcome::Playing);
        assert_eq!(session.maze().open_edge_count(), 24);
    }

    #[test]
    fn test_mouse_cannot_walk_through_walls() {
        let mut session = Session::new(instant(6, 6, 13)).expect("settings should be valid");
        session.cat = None;
        session.cheese = None;

        for direction in Direction::ALL {
            let expected = !session.maze().has_wall(Position::new(0, 0), direction)
                && session
                    .maze()
                    .neighbor(Position::new(0, 0), direction)
                    .is_some();
            assert_eq!(session.move_player(direction), expected, "moving {direction}");
            if expected {
                assert!(session.move_player(direction.opposite()));
            }
            assert_eq!(session.mouse(), Position::new(0, 0));
        }
    }

    #[test]
    fn test_reaching_the_cheese_wins() {
        let mut session = Session::new(instant(5, 5, 17)).expect("settings should be valid");
        let (direction, next) = open_side(&session);
        session.cat = None;
        session.cheese = Some(next);

        assert!(session.move_player(direction));
        assert_eq!(session.outcome(), Outcome::Won);
        assert!(!session.move_player(direction.opposite()));
    }

    #[test]
    fn test_walking_into_the_cat_loses() {
        let mut session = Session::new(instant(5, 5, 19)).expect("settings should be valid");
        let (direction, next) = open_side(&session);
        session.cat = Some(Pursuer::new(next, 1));
        session.cheese = None;

        assert!(session.move_player(direction));
        assert_eq!(session.outcome(), Outcome::Caught);
    }

    #[test]
    fn test_cat_moves_on_its_own_clock() {
        let settings = Settings {
            cat_interval: Duration::from_millis(100),
            ..instant(7, 7, 23)
        };
        let mut session = Session::new(settings).expect("settings should be valid");
        let before = session.cat().expect("cat should be placed").position();
        let start = Instant::now();

        session.update(start).expect("cat ticks do not fail");
        session
            .update(start + Duration::from_millis(50))
            .expect("cat ticks do not fail");
        assert_eq!(
            session.cat().expect("cat should be placed").position(),
            before
        );

        session
            .update(start + Duration::from_millis(100))
            .expect("cat ticks do not fail");
        let after = session.cat().expect("cat should be placed").position();
        assert_eq!(before.manhattan(after), 1);
    }

    #[test]
    fn test_cat_eventually_catches_a_still_mouse() {
        let settings = Settings {
            cat_interval: Duration::from_millis(10),
            ..instant(6, 6, 29)
        };
        let mut session = Session::new(settings).expect("settings should be valid");
        session.cheese = None;
        let start = Instant::now();

        session.update(start).expect("cat ticks do not fail");
        session
            .update(start + Duration::from_secs(10))
            .expect("cat ticks do not fail");

        assert_eq!(session.outcome(), Outcome::Caught);
        assert_eq!(
            session.cat().expect("cat should be placed").position(),
            session.mouse()
        );
    }

    #[test]
    fn test_tiny_round_has_no_cat_or_cheese() {
        let session = Session::new(instant(2, 1, 31)).expect("settings should be valid");

        assert_eq!(session.outcome(), Outcome::Playing);
        assert!(session.cat().is_none());
        assert!(session.cheese().is_none());
    }

    #[test]
    fn test_pacer_counts_whole_intervals() {
        let mut pacer = Pacer::new(Duration::from_millis(10));
        let start = Instant::now();

        assert_eq!(pacer.due(start), 0);
        assert_eq!(pacer.due(start + Duration::from_millis(25)), 2);
        assert_eq!(pacer.due(start + Duration::from_millis(29)), 0);
        assert_eq!(pacer.due(start + Duration::from_millis(30)), 1);
    }
}
