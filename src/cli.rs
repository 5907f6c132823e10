//! Command-line interface module.
//!
//! This module contains the [`Args`] parsed from the command line and their conversion into the
//! [`Settings`] of a round.

use std::{path::PathBuf, time::Duration};

use clap::{value_parser, Parser};

use crate::game::Settings;

/// Command-line arguments of the game.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(version, about)]
pub struct Args {
    /// Number of maze cells along the x axis.
    #[arg(short = 'W', long, default_value_t = 10, value_parser = value_parser!(u16).range(1..))]
    pub width: u16,
    /// Number of maze cells along the y axis.
    #[arg(short = 'H', long, default_value_t = 10, value_parser = value_parser!(u16).range(1..))]
    pub height: u16,
    /// Fixed random seed, for reproducible mazes.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Open an entrance at the origin and an exit at the far corner.
    #[arg(long)]
    pub gates: bool,
    /// Carve the whole maze at once instead of step by step.
    #[arg(long)]
    pub instant: bool,
    /// Milliseconds between two generation steps.
    #[arg(long, default_value_t = 20)]
    pub step_ms: u64,
    /// Milliseconds between two cat moves.
    #[arg(long, default_value_t = 400, value_parser = value_parser!(u64).range(1..))]
    pub cat_ms: u64,
    /// Milliseconds between two cat route refreshes.
    #[arg(long, default_value_t = 500)]
    pub refresh_ms: u64,
    /// File to write logs to; nothing is logged without it.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Builds the settings of a round from the arguments.
    ///
    /// The refresh delay is turned into a number of cat moves, rounded down and never below one.
    #[must_use]
    pub fn settings(&self) -> Settings {
        let refresh_every = (self.refresh_ms / self.cat_ms.max(1)).max(1);

        Settings {
            width: self.width,
            height: self.height,
            seed: self.seed,
            gates: self.gates,
            instant: self.instant,
            step_interval: Duration::from_millis(self.step_ms),
            cat_interval: Duration::from_millis(self.cat_ms),
            refresh_every: u32::try_from(refresh_every).unwrap_or(u32::MAX),
        }
    }
}
