//! Move application: sliding and merging tiles in one of four directions.
//!
//! Every direction is handled by the same line transform. A move splits the grid into
//! lines (rows for `Left`/`Right`, columns for `Up`/`Down`), each listed from the
//! travel-direction end towards the near end, and then runs two passes over every line:
//!
//! 1. Compaction: non-empty tiles are pushed towards the travel end, keeping their order.
//! 2. Merge: equal neighbours are combined into the next rung, the rest of the line
//!    shifts one step towards the travel end and an empty cell appears at the near end.
//!
//! A freshly merged tile never merges again within the same move.
use crate::engine::{Grid, Tile, TilePosition};
use crate::error::GameError;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// A player's swipe direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDirection {
    /// All four directions, in a fixed order.
    pub const ALL: [MoveDirection; 4] = [
        MoveDirection::Up,
        MoveDirection::Down,
        MoveDirection::Left,
        MoveDirection::Right,
    ];

    /// Lists the cells of line `index` starting at the travel-direction end.
    ///
    /// Rows are lines for horizontal moves, columns for vertical ones.
    fn line(self, index: usize, side: usize) -> Vec<TilePosition> {
        match self {
            MoveDirection::Left => (0..side).map(|c| TilePosition::new(index, c)).collect(),
            MoveDirection::Right => (0..side).rev().map(|c| TilePosition::new(index, c)).collect(),
            MoveDirection::Up => (0..side).map(|r| TilePosition::new(r, index)).collect(),
            MoveDirection::Down => (0..side).rev().map(|r| TilePosition::new(r, index)).collect(),
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveDirection::Up => "up",
            MoveDirection::Down => "down",
            MoveDirection::Left => "left",
            MoveDirection::Right => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for MoveDirection {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(MoveDirection::Up),
            "down" | "d" => Ok(MoveDirection::Down),
            "left" | "l" => Ok(MoveDirection::Left),
            "right" | "r" => Ok(MoveDirection::Right),
            _ => Err(GameError::Parse(format!("Unknown move direction '{}'", s))),
        }
    }
}

/// Applies moves to a grid and keeps the running score of the session.
///
/// The engine never holds on to the grid: it borrows it mutably for one call to
/// `apply_move` and gives it back. The only state it keeps is the score.
///
/// # Examples
/// ```
/// use twenty48::moves::{MoveDirection, MoveEngine};
/// use twenty48::utils::board_from_str_array;
///
/// let mut board = board_from_str_array(&[
///     "2 2 8 8",
///     ". . . .",
///     ". . . .",
///     ". . . .",
/// ])
/// .unwrap();
/// let mut engine = MoveEngine::new();
/// let changed = engine.apply_move(MoveDirection::Left, board.tiles_mut()).unwrap();
///
/// assert!(changed);
/// assert_eq!(engine.score(), 20);
/// assert_eq!(board.get_tile(0, 0).to_string(), "4");
/// assert_eq!(board.get_tile(0, 1).to_string(), "16");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveEngine {
    score: u32,
}

impl MoveEngine {
    pub fn new() -> Self {
        MoveEngine { score: 0 }
    }

    /// Total points collected from merges so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Sets the score back to zero for a fresh game.
    pub fn reset(&mut self) {
        self.score = 0;
    }

    /// Slides and merges every line of `grid` in `direction`.
    ///
    /// Each merge adds the value of the newly created tile to the score.
    ///
    /// # Arguments
    /// * `direction`: Which edge the tiles travel towards.
    /// * `grid`: A square grid, modified in place.
    ///
    /// # Returns
    /// `Ok(true)` if at least one cell differs from its value before the move, `Ok(false)`
    /// if the move left the grid untouched.
    ///
    /// # Errors
    /// `GameError::NoSuccessor` if two top-rung tiles meet. Normal play ends the game
    /// before that can happen.
    pub fn apply_move(
        &mut self,
        direction: MoveDirection,
        grid: &mut [Vec<Tile>],
    ) -> Result<bool, GameError> {
        let before: Grid = grid.to_vec();
        let side = grid.len();
        let lines: Vec<Vec<TilePosition>> = (0..side).map(|i| direction.line(i, side)).collect();

        for line in &lines {
            compact_line(grid, line);
        }

        let mut gained = 0;
        for line in &lines {
            gained += merge_line(grid, line)?;
        }
        self.score += gained;

        let changed = has_board_changed(&before, grid);
        debug!(
            "Move {}: changed={}, gained={}, score={}",
            direction, changed, gained, self.score
        );
        Ok(changed)
    }
}

/// Returns `true` if any cell of `after` holds a different value than in `before`.
pub fn has_board_changed(before: &[Vec<Tile>], after: &[Vec<Tile>]) -> bool {
    before
        .iter()
        .zip(after)
        .any(|(row_before, row_after)| row_before != row_after)
}

fn tile_at(grid: &[Vec<Tile>], pos: TilePosition) -> Tile {
    grid[pos.row][pos.col]
}

fn set_tile_at(grid: &mut [Vec<Tile>], pos: TilePosition, tile: Tile) {
    grid[pos.row][pos.col] = tile;
}

/// Pushes every non-empty tile of `line` towards its first cell, keeping their order.
///
/// `target` rests on the first empty cell, `source` looks for the next tile to pull in.
fn compact_line(grid: &mut [Vec<Tile>], line: &[TilePosition]) {
    let mut target = 0;
    let mut source = 1;
    while source < line.len() {
        if !tile_at(grid, line[target]).is_empty() {
            target += 1;
            source += 1;
            continue;
        }

        let moving = tile_at(grid, line[source]);
        if moving.is_empty() {
            source += 1;
        } else {
            set_tile_at(grid, line[source], Tile::EMPTY);
            set_tile_at(grid, line[target], moving);
            target += 1;
            source += 1;
        }
    }
}

/// Merges equal neighbours of an already compacted line and returns the points gained.
fn merge_line(grid: &mut [Vec<Tile>], line: &[TilePosition]) -> Result<u32, GameError> {
    let mut gained = 0;
    let mut target = 0;
    let mut source = 1;
    while source < line.len() {
        let current = tile_at(grid, line[target]);
        if !current.is_empty() && current == tile_at(grid, line[source]) {
            let merged = Tile::new(current.value().successor()?);
            set_tile_at(grid, line[target], merged);

            // Close the gap left at `source` and open one at the near end.
            for j in source..line.len() - 1 {
                let next = tile_at(grid, line[j + 1]);
                set_tile_at(grid, line[j], next);
            }
            set_tile_at(grid, line[line.len() - 1], Tile::EMPTY);

            gained += merged.value().points();
        }
        target += 1;
        source += 1;
    }
    Ok(gained)
}
