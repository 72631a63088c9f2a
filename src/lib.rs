//! # 2048
//!
//! This library provides the rules engine for the 2048 tile-merging puzzle and a
//! small terminal front end for playing it.
//!
//! It is used by the `play_2048` binary, which wires the pieces together and runs an
//! interactive game in the terminal.
//!
//! ## Modules
//! - `engine`: Tile values, tiles, positions, dimensions and the `Board`.
//! - `moves`: `MoveDirection` and the `MoveEngine` that slides and merges tiles and keeps score.
//! - `spawner`: The `TileSpawner` trait and its random implementation.
//! - `game`: The `Game` controller, its `GameState` snapshots and win/lose evaluation.
//! - `presenter`: Turns a `GameState` into strings and colours for the terminal.
//! - `view`: Draws frames with crossterm and reads arrow keys in raw mode.
//! - `game_loop`: The start/move/display loop.
//! - `logger`: The logging port used by the loop.
//! - `config`: Session settings.
//! - `error`: The `GameError` type.
//! - `utils`: Parsing boards from text, handy for fixtures.

pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod game_loop;
pub mod logger;
pub mod moves;
pub mod presenter;
pub mod spawner;
pub mod utils;
pub mod view;

pub use error::GameError;
