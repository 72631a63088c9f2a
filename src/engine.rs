//! Core board model for 2048.
//!
//! This module defines the game's fundamental components:
//! - `TileValue`: The fixed ladder of tile magnitudes, from `Empty` up to 2048.
//! - `Tile`: A single cell's content, wrapping one `TileValue`.
//! - `TilePosition`: A zero-based (row, column) coordinate.
//! - `Dimension`: The validated size of a square board.
//! - `Board`: The grid of tiles, owned by the game controller for the whole session.
use crate::error::GameError;
use std::fmt;

/// One rung of the tile-value progression.
///
/// `Empty` is the unique sentinel for "no tile"; every other variant is a power of two.
/// The variants are declared in ladder order, so the derived `Ord` follows the progression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileValue {
    /// No tile in this cell.
    Empty,
    Two,
    Four,
    Eight,
    Sixteen,
    ThirtyTwo,
    SixtyFour,
    OneTwentyEight,
    TwoFiftySix,
    FiveTwelve,
    TenTwentyFour,
    /// The top rung. Reaching it wins the game.
    TwentyFortyEight,
}

impl TileValue {
    /// The whole ladder in order. `successor` is an index lookup into this table.
    pub const LADDER: [TileValue; 12] = [
        TileValue::Empty,
        TileValue::Two,
        TileValue::Four,
        TileValue::Eight,
        TileValue::Sixteen,
        TileValue::ThirtyTwo,
        TileValue::SixtyFour,
        TileValue::OneTwentyEight,
        TileValue::TwoFiftySix,
        TileValue::FiveTwelve,
        TileValue::TenTwentyFour,
        TileValue::TwentyFortyEight,
    ];

    /// The highest rung on the ladder.
    pub const MAX: TileValue = TileValue::TwentyFortyEight;

    /// Returns the position of this value within `LADDER`.
    pub fn rung(self) -> usize {
        self as usize
    }

    /// Returns the numeric magnitude of the tile, `0` for `Empty`.
    ///
    /// # Examples
    /// ```
    /// use twenty48::engine::TileValue;
    /// assert_eq!(TileValue::Empty.points(), 0);
    /// assert_eq!(TileValue::Two.points(), 2);
    /// assert_eq!(TileValue::TwentyFortyEight.points(), 2048);
    /// ```
    pub fn points(self) -> u32 {
        match self {
            TileValue::Empty => 0,
            other => 1u32 << other.rung(),
        }
    }

    /// Looks up the rung whose magnitude equals `points`. `0` maps to `Empty`.
    pub fn from_points(points: u32) -> Option<TileValue> {
        TileValue::LADDER
            .iter()
            .copied()
            .find(|value| value.points() == points)
    }

    /// Returns the next rung on the ladder.
    ///
    /// # Errors
    /// Returns `GameError::NoSuccessor` when called on `TileValue::MAX`. The merge
    /// step only ever calls this on a value that equals a non-maximal neighbour,
    /// so hitting this error means the board was built outside normal play.
    ///
    /// # Examples
    /// ```
    /// use twenty48::engine::TileValue;
    /// assert_eq!(TileValue::Two.successor().unwrap(), TileValue::Four);
    /// assert!(TileValue::TwentyFortyEight.successor().is_err());
    /// ```
    pub fn successor(self) -> Result<TileValue, GameError> {
        TileValue::LADDER
            .get(self.rung() + 1)
            .copied()
            .ok_or(GameError::NoSuccessor(self))
    }
}

impl fmt::Display for TileValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.points(), f)
    }
}

/// The content of a single board cell.
///
/// A plain value type: equality and `Display` come straight from the wrapped `TileValue`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    value: TileValue,
}

impl Tile {
    /// A cell with no tile in it.
    pub const EMPTY: Tile = Tile {
        value: TileValue::Empty,
    };

    pub fn new(value: TileValue) -> Self {
        Tile { value }
    }

    pub fn value(&self) -> TileValue {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value == TileValue::Empty
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::EMPTY
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

/// A zero-based (row, column) coordinate on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TilePosition {
    pub row: usize,
    pub col: usize,
}

impl TilePosition {
    pub fn new(row: usize, col: usize) -> Self {
        TilePosition { row, col }
    }
}

impl fmt::Display for TilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Row-major grid of tiles. Always square once it lives inside a `Board`.
pub type Grid = Vec<Vec<Tile>>;

/// The size of a board: number of rows and columns.
///
/// The board is always square with a side of at least `Dimension::MIN_SIDE`.
/// Both rules are checked on construction, so a `Dimension` value is always valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimension {
    rows: usize,
    cols: usize,
}

impl Dimension {
    /// The smallest side length a board may have.
    pub const MIN_SIDE: usize = 4;

    /// Creates a validated dimension.
    ///
    /// # Errors
    /// * `GameError::InvalidDimension` if `rows != cols`.
    /// * `GameError::DimensionTooSmall` if the side is below `MIN_SIDE`.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GameError> {
        if rows != cols {
            return Err(GameError::InvalidDimension { rows, cols });
        }
        if rows < Self::MIN_SIDE {
            return Err(GameError::DimensionTooSmall {
                size: rows,
                min: Self::MIN_SIDE,
            });
        }
        Ok(Dimension { rows, cols })
    }

    /// Shorthand for a `side x side` dimension.
    pub fn square(side: usize) -> Result<Self, GameError> {
        Self::new(side, side)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Side length of the square board.
    pub fn side(&self) -> usize {
        self.rows
    }
}

impl Default for Dimension {
    /// The classic 4x4 board.
    fn default() -> Self {
        Dimension {
            rows: Self::MIN_SIDE,
            cols: Self::MIN_SIDE,
        }
    }
}

/// The square grid of tiles a game is played on.
///
/// A board is created once per game and mutated in place by the move engine and the
/// tile spawner, both of which borrow the grid mutably through `tiles_mut` for the
/// duration of a single operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    tiles: Grid,
}

impl Board {
    /// Creates a board of the given size with every cell set to `Tile::EMPTY`.
    ///
    /// # Examples
    /// ```
    /// use twenty48::engine::{Board, Dimension, Tile};
    /// let board = Board::create(Dimension::default());
    /// assert_eq!(board.get_tile(0, 0), Tile::EMPTY);
    /// assert_eq!(board.empty_tile_positions().len(), 16);
    /// ```
    pub fn create(dimension: Dimension) -> Self {
        Board {
            tiles: vec![vec![Tile::EMPTY; dimension.cols()]; dimension.rows()],
        }
    }

    /// Wraps an existing grid, checking that it forms a valid dimension.
    ///
    /// # Errors
    /// Fails when the grid is not square (including ragged rows) or is smaller than 4x4.
    pub fn from_tiles(tiles: Grid) -> Result<Self, GameError> {
        let rows = tiles.len();
        for row in &tiles {
            if row.len() != rows {
                return Err(GameError::InvalidDimension {
                    rows,
                    cols: row.len(),
                });
            }
        }
        Dimension::square(rows)?;
        Ok(Board { tiles })
    }

    /// Returns the board's dimension.
    pub fn dimension(&self) -> Dimension {
        Dimension {
            rows: self.tiles.len(),
            cols: self.tiles.len(),
        }
    }

    /// Read access to the whole grid.
    pub fn tiles(&self) -> &Grid {
        &self.tiles
    }

    /// Mutable access to the whole grid.
    ///
    /// Only the move engine and the tile spawner are expected to write through this.
    pub fn tiles_mut(&mut self) -> &mut Grid {
        &mut self.tiles
    }

    /// Returns an independent copy of the grid. Later changes to the board do not affect it.
    pub fn snapshot(&self) -> Grid {
        self.tiles.clone()
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the board.
    pub fn get_tile(&self, r: usize, c: usize) -> Tile {
        self.tiles[r][c]
    }

    /// Sets the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the board.
    pub fn set_tile(&mut self, r: usize, c: usize, tile: Tile) {
        self.tiles[r][c] = tile;
    }

    /// Returns every empty position, scanned row-major.
    pub fn empty_tile_positions(&self) -> Vec<TilePosition> {
        self.tiles
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, tile)| tile.is_empty())
                    .map(move |(c, _)| TilePosition::new(r, c))
            })
            .collect()
    }

    /// Returns `true` if any cell holds `value`.
    pub fn contains(&self, value: TileValue) -> bool {
        self.tiles
            .iter()
            .any(|row| row.iter().any(|tile| tile.value() == value))
    }

    /// Returns `true` if two horizontally or vertically adjacent cells hold the same
    /// non-empty value, i.e. some move would merge them.
    pub fn has_adjacent_pair(&self) -> bool {
        let side = self.tiles.len();
        for r in 0..side {
            for c in 0..side {
                let tile = self.tiles[r][c];
                if tile.is_empty() {
                    continue;
                }
                if c + 1 < side && self.tiles[r][c + 1] == tile {
                    return true;
                }
                if r + 1 < side && self.tiles[r + 1][c] == tile {
                    return true;
                }
            }
        }
        false
    }
}

impl fmt::Display for Board {
    /// Plain text rendering, one row per line, `.` for empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.tiles.iter().enumerate() {
            for (c, tile) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                if tile.is_empty() {
                    write!(f, "{:>4}", ".")?;
                } else {
                    write!(f, "{:>4}", tile)?;
                }
            }
            if r + 1 < self.tiles.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
