//! This crate contains the library behind the micromouse maze game.
//!
//! The core carves perfect mazes with a randomized depth-first search ([`carving`]) over a grid of
//! walled cells ([`labyrinth`]) and finds shortest routes through them with A* ([`pathfinding`]).
//! On top of it sit the cat that hunts the mouse ([`pursuit`]), the rules of a round ([`game`]) and
//! the terminal front-end driven by [`App`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
pub mod carving;
pub mod cli;
mod events;
pub mod game;
pub mod labyrinth;
pub mod logging;
pub mod pathfinding;
pub mod pursuit;
mod types;
mod ui;

pub use crate::app::App;
