//! Error type shared by every fallible operation in the library.

use crate::engine::TileValue;
use std::io;

/// Everything that can go wrong while building or playing a game.
///
/// Construction errors (`InvalidDimension`, `InvalidSpawnQuantity`, ...) are
/// raised where the offending value is supplied and are never retried.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("board must be square, got {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },
    #[error("board side must be at least {min}, got {size}")]
    DimensionTooSmall { size: usize, min: usize },
    #[error("spawn quantity must be 1 or 2, got {0}")]
    InvalidSpawnQuantity(usize),
    #[error("spawn chance must be within [0, 1], got {0}")]
    InvalidSpawnChance(f64),
    #[error("cannot spawn {requested} tile(s) into {available} empty cell(s)")]
    NotEnoughEmptyCells { requested: usize, available: usize },
    #[error("tile value {0} has no successor")]
    NoSuccessor(TileValue),
    #[error("tile width must be at least {min}, got {width}")]
    TileWidthTooSmall { width: usize, min: usize },
    #[error("game is already completed")]
    GameCompleted,
    #[error("parse error: {0}")]
    Parse(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
