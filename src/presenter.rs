//! Turns a `GameState` into render-ready strings and colours.
use crate::engine::TileValue;
use crate::error::GameError;
use crate::game::{GameOutcome, GameState};

/// Converts a game state into whatever its view needs.
pub trait Presenter {
    type Output;

    fn present(&self, state: &GameState) -> Self::Output;
}

/// Background and foreground colours of a tile, as ANSI 256-colour palette indices.
///
/// `None` means the terminal's default colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TilePalette {
    pub background: Option<u8>,
    pub foreground: Option<u8>,
}

impl TilePalette {
    const fn new(background: u8, foreground: u8) -> Self {
        TilePalette {
            background: Some(background),
            foreground: Some(foreground),
        }
    }

    /// Terminal defaults, used for empty cells.
    pub const DEFAULT: TilePalette = TilePalette {
        background: None,
        foreground: None,
    };

    /// The colours for a given rung. Warmer backgrounds for bigger tiles.
    pub fn for_value(value: TileValue) -> Self {
        match value {
            TileValue::Empty => TilePalette::DEFAULT,
            TileValue::Two => TilePalette::new(229, 94),
            TileValue::Four => TilePalette::new(223, 94),
            TileValue::Eight => TilePalette::new(216, 124),
            TileValue::Sixteen => TilePalette::new(203, 124),
            TileValue::ThirtyTwo => TilePalette::new(209, 124),
            TileValue::SixtyFour => TilePalette::new(208, 124),
            TileValue::OneTwentyEight => TilePalette::new(227, 94),
            TileValue::TwoFiftySix => TilePalette::new(226, 94),
            TileValue::FiveTwelve => TilePalette::new(221, 94),
            TileValue::TenTwentyFour => TilePalette::new(220, 94),
            TileValue::TwentyFortyEight => TilePalette::new(214, 94),
        }
    }
}

/// Everything the CLI view needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliRenderData {
    /// Per-cell text: the tile value, or an empty string for an empty cell.
    pub tiles: Vec<Vec<String>>,
    pub tile_colors: Vec<Vec<TilePalette>>,
    pub score: String,
    pub message: String,
    pub tile_width: usize,
}

pub const DEFAULT_IN_PROGRESS_MESSAGE: &str = "Merge the tiles and reach 2048!";
pub const DEFAULT_WIN_MESSAGE: &str = "Congratulations! You've won! Want to try for a higher score?";
pub const DEFAULT_LOSE_MESSAGE: &str = "Game over! Don't give up, try again and aim higher!";

/// Formats game states for the terminal.
#[derive(Clone, Debug)]
pub struct CliPresenter {
    tile_width: usize,
    in_progress_message: String,
    win_message: String,
    lose_message: String,
}

impl CliPresenter {
    /// Narrowest tile that still fits "2048".
    pub const MIN_TILE_WIDTH: usize = 4;
    pub const DEFAULT_TILE_WIDTH: usize = 6;

    /// Creates a presenter with the stock messages.
    ///
    /// # Errors
    /// `GameError::TileWidthTooSmall` if `tile_width` is below `MIN_TILE_WIDTH`.
    pub fn new(tile_width: usize) -> Result<Self, GameError> {
        Self::with_messages(
            tile_width,
            DEFAULT_IN_PROGRESS_MESSAGE,
            DEFAULT_WIN_MESSAGE,
            DEFAULT_LOSE_MESSAGE,
        )
    }

    /// Creates a presenter with custom status messages.
    pub fn with_messages(
        tile_width: usize,
        in_progress_message: impl Into<String>,
        win_message: impl Into<String>,
        lose_message: impl Into<String>,
    ) -> Result<Self, GameError> {
        if tile_width < Self::MIN_TILE_WIDTH {
            return Err(GameError::TileWidthTooSmall {
                width: tile_width,
                min: Self::MIN_TILE_WIDTH,
            });
        }
        Ok(CliPresenter {
            tile_width,
            in_progress_message: in_progress_message.into(),
            win_message: win_message.into(),
            lose_message: lose_message.into(),
        })
    }

    pub fn tile_width(&self) -> usize {
        self.tile_width
    }

    fn message_for(&self, outcome: Option<GameOutcome>) -> &str {
        match outcome {
            None => &self.in_progress_message,
            Some(GameOutcome::Win) => &self.win_message,
            Some(GameOutcome::Lose) => &self.lose_message,
        }
    }
}

impl Presenter for CliPresenter {
    type Output = CliRenderData;

    fn present(&self, state: &GameState) -> CliRenderData {
        let tiles = state
            .tiles()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|tile| {
                        if tile.is_empty() {
                            String::new()
                        } else {
                            tile.to_string()
                        }
                    })
                    .collect()
            })
            .collect();
        let tile_colors = state
            .tiles()
            .iter()
            .map(|row| row.iter().map(|tile| TilePalette::for_value(tile.value())).collect())
            .collect();

        CliRenderData {
            tiles,
            tile_colors,
            score: format!("Score: {}", state.score()),
            message: self.message_for(state.outcome()).to_string(),
            tile_width: self.tile_width,
        }
    }
}
