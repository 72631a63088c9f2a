use crate::engine::{Board, Grid, Tile, TileValue};
use crate::error::GameError;

/// Parses an array of string slices into a `Board`.
///
/// Each string slice represents one row, starting from row 0. A row is a list of
/// whitespace-separated cells, where each cell is either a tile value on the ladder
/// (`2`, `4`, ..., `2048`) or `.`/`0` for an empty cell.
///
/// The number of rows must equal the number of cells in every row, and the result
/// must satisfy the usual board rules (square, at least 4x4).
///
/// # Arguments
/// * `s`: A slice of string slices (`&[&str]`) representing the rows of the board.
///
/// # Returns
/// * `Ok(Board)` if parsing is successful.
/// * `Err(GameError::Parse)` if a cell is not a ladder value.
/// * `Err(GameError::InvalidDimension)` / `Err(GameError::DimensionTooSmall)` if the
///   shape is not a valid board.
///
/// # Examples
/// ```
/// use twenty48::utils::board_from_str_array;
/// use twenty48::engine::{Tile, TileValue};
///
/// let board = board_from_str_array(&[
///     "2 . . .",
///     ". 4 . .",
///     ". . 8 .",
///     ". . . 2048",
/// ])
/// .unwrap();
/// assert_eq!(board.get_tile(0, 0), Tile::new(TileValue::Two));
/// assert_eq!(board.get_tile(0, 1), Tile::EMPTY);
/// assert_eq!(board.get_tile(3, 3), Tile::new(TileValue::TwentyFortyEight));
///
/// assert!(board_from_str_array(&["3 . . .", ". . . .", ". . . .", ". . . ."]).is_err());
/// assert!(board_from_str_array(&["2 2 2", "2 2 2", "2 2 2"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, GameError> {
    let mut grid: Grid = Vec::with_capacity(s.len());

    for (r, row_str) in s.iter().enumerate() {
        let mut row = Vec::new();
        for (c, cell) in row_str.split_whitespace().enumerate() {
            row.push(parse_cell(cell).ok_or_else(|| {
                GameError::Parse(format!(
                    "Unrecognized cell '{}' in row {} col {}",
                    cell, r, c
                ))
            })?);
        }
        grid.push(row);
    }

    Board::from_tiles(grid)
}

fn parse_cell(cell: &str) -> Option<Tile> {
    if cell == "." {
        return Some(Tile::EMPTY);
    }
    let points = cell.parse::<u32>().ok()?;
    TileValue::from_points(points).map(Tile::new)
}
