//! Randomized depth-first maze carving module.
//!
//! This module contains the [`MazeGenerator`] state machine, which turns a fully walled
//! [`MazeGraph`] into a perfect maze one step at a time, and the [`RandomSource`] seam through
//! which it draws its choices.

use rand::Rng;
use tracing::{debug, trace, warn};

use crate::labyrinth::{Direction, MazeError, MazeGraph, Position};

/// Uniform integer source used to pick among candidate cells.
///
/// Every [`rand::Rng`] is a random source, so seeding a [`rand::rngs::StdRng`] is enough to get
/// reproducible mazes. Tests may implement the trait directly to script the choices.
pub trait RandomSource {
    /// Returns an integer drawn uniformly from `0..bound`.
    ///
    /// Callers never pass a `bound` of zero.
    fn below(&mut self, bound: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn below(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

/// Lifecycle of a generation run.
///
/// This enumeration holds where the generator stands. Only the `Generating` phase blocks new runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No run has started since the last reset.
    #[default]
    Idle,
    /// A run is in progress; further starts are ignored.
    Generating,
    /// The last run carved a complete maze.
    Complete,
}

/// Outcome of a single generation step.
///
/// This enumeration holds what [`MazeGenerator::step`] did, so that a driver can animate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A wall was carved and the cell behind it was pushed onto the frontier.
    Carved {
        /// Cell the passage was carved from.
        from: Position,
        /// Newly reached cell.
        to: Position,
        /// Side of `from` that was opened.
        direction: Direction,
    },
    /// The top of the frontier had nowhere left to go and was popped.
    Backtracked(Position),
    /// The frontier is empty; there is nothing left to carve.
    Finished,
}

impl Step {
    /// Tells whether this step ended the run.
    ///
    /// This function is only `true` for [`Step::Finished`]; the last backtrack of a run still
    /// reports [`Step::Backtracked`].
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

/// Iterative randomized depth-first carver.
///
/// The generator holds only the frontier stack, the start cell and the phase. The graph and the
/// random source are handed in on every call so that a driver can render or query the graph
/// between steps.
#[derive(Debug, Clone, Default)]
pub struct MazeGenerator {
    /// Cell the carving starts from.
    ///
    /// This field holds the first cell pushed onto the frontier, the grid origin unless set
    /// otherwise.
    start: Position,
    /// Depth-first frontier; the top is the cell being extended.
    ///
    /// This field holds the path from the start cell to the cell being carved from. It is empty
    /// outside of a run.
    stack: Vec<Position>,
    /// Where the current run stands.
    ///
    /// This field holds the phase the re-entrancy guard checks.
    phase: Phase,
}

impl MazeGenerator {
    /// Creates an idle generator starting from the grid origin.
    ///
    /// This function does not touch any graph; carving only starts with [`MazeGenerator::begin`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            start: Position::new(0, 0),
            stack: Vec::new(),
            phase: Phase::Idle,
        }
    }

    /// Sets the cell the carving starts from.
    ///
    /// This function only records the cell. It is checked against the graph when a run begins.
    #[must_use]
    pub const fn with_start(mut self, start: Position) -> Self {
        self.start = start;
        self
    }

    /// Returns the current phase.
    ///
    /// This function lets a driver tell an idle generator from a finished one.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Tells whether a run is in progress.
    ///
    /// This function is the guard drivers check before starting another run.
    #[must_use]
    pub const fn is_generating(&self) -> bool {
        matches!(self.phase, Phase::Generating)
    }

    /// Returns the frontier, bottom first.
    ///
    /// This function exposes the stack so that the interface can draw the carving head.
    #[must_use]
    pub fn frontier(&self) -> &[Position] {
        &self.stack
    }

    /// Returns the cell on top of the frontier.
    ///
    /// This function returns the cell the next step carves from, or `None` outside of a run.
    #[must_use]
    pub fn current(&self) -> Option<Position> {
        self.stack.last().copied()
    }

    /// Drops any run in progress and goes back to idle.
    ///
    /// This function leaves the graph as it is; the next run resets it.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.phase = Phase::Idle;
    }

    /// Starts a new run over `graph`.
    ///
    /// The graph is reset, its gates are opened and the start cell is marked and pushed. Returns
    /// `false` without touching anything when a run is already in progress.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when the start cell is not on the graph.
    pub fn begin(&mut self, graph: &mut MazeGraph) -> Result<bool, MazeError> {
        if self.is_generating() {
            debug!("maze generation already running, ignoring start request");
            return Ok(false);
        }

        if !graph.contains(self.start) {
            return Err(MazeError::OutOfBounds {
                position: self.start,
                width: graph.width(),
                height: graph.height(),
            });
        }

        graph.reset();
        graph.open_gates()?;
        graph.mark_visited(self.start)?;

        self.stack.clear();
        self.stack.push(self.start);
        self.phase = Phase::Generating;
        debug!(
            start = %self.start,
            width = graph.width(),
            height = graph.height(),
            "started maze generation"
        );

        Ok(true)
    }

    /// Performs one carve-and-push or one backtrack-pop.
    ///
    /// Outside of a run this only reports [`Step::Finished`].
    pub fn step<R: RandomSource + ?Sized>(&mut self, graph: &mut MazeGraph, rng: &mut R) -> Step {
        let Some(current) = self.current() else {
            self.finish();
            return Step::Finished;
        };

        let candidates = graph.neighbors_unvisited(current);
        let chosen = match candidates.len() {
            0 => None,
            count => candidates.get(rng.below(count)).copied(),
        };

        let step = if let Some((direction, next)) = chosen {
            if let Err(err) = graph.remove_wall(current, direction) {
                warn!(%current, %direction, %err, "could not carve towards unvisited neighbor");
            }
            if let Err(err) = graph.mark_visited(next) {
                warn!(%next, %err, "could not mark carved cell as visited");
            }
            self.stack.push(next);
            trace!(from = %current, to = %next, %direction, "carved");

            Step::Carved {
                from: current,
                to: next,
                direction,
            }
        } else {
            let _ = self.stack.pop();
            trace!(%current, "backtracked");

            Step::Backtracked(current)
        };

        if self.stack.is_empty() {
            self.finish();
        }

        step
    }

    /// Carves a whole maze in one call.
    ///
    /// Returns `false` without doing anything when a run is already in progress.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`MazeGenerator::begin`].
    pub fn create_maze<R: RandomSource + ?Sized>(
        &mut self,
        graph: &mut MazeGraph,
        rng: &mut R,
    ) -> Result<bool, MazeError> {
        if !self.begin(graph)? {
            return Ok(false);
        }

        while !self.step(graph, rng).is_finished() && self.is_generating() {}

        Ok(true)
    }

    /// Moves a running generator to the complete phase.
    fn finish(&mut self) {
        if self.is_generating() {
            self.phase = Phase::Complete;
            debug!("maze generation complete");
        }
    }
}
