//! Settings for a game session.

use crate::engine::Dimension;
use crate::error::GameError;
use crate::presenter::{
    CliPresenter, DEFAULT_IN_PROGRESS_MESSAGE, DEFAULT_LOSE_MESSAGE, DEFAULT_WIN_MESSAGE,
};
use crate::spawner::RandomTileSpawner;
use rand::rngs::SmallRng;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Side length of the square board.
    pub size: usize,
    /// Probability that a spawned tile is a 2 rather than a 4.
    pub two_spawn_chance: f64,
    /// Character width of a tile's inner box.
    pub tile_width: usize,
    /// Fixed seed for the spawner. `None` draws from OS entropy.
    pub seed: Option<u64>,

    // Status line texts
    pub in_progress_message: String,
    pub win_message: String,
    pub lose_message: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: Dimension::MIN_SIDE,
            two_spawn_chance: RandomTileSpawner::<SmallRng>::DEFAULT_TWO_CHANCE,
            tile_width: CliPresenter::DEFAULT_TILE_WIDTH,
            seed: None,
            in_progress_message: DEFAULT_IN_PROGRESS_MESSAGE.to_string(),
            win_message: DEFAULT_WIN_MESSAGE.to_string(),
            lose_message: DEFAULT_LOSE_MESSAGE.to_string(),
        }
    }
}

impl GameConfig {
    /// Checks every setting, returning the first problem found.
    pub fn validate(&self) -> Result<(), GameError> {
        self.dimension()?;
        if !(0.0..=1.0).contains(&self.two_spawn_chance) {
            return Err(GameError::InvalidSpawnChance(self.two_spawn_chance));
        }
        if self.tile_width < CliPresenter::MIN_TILE_WIDTH {
            return Err(GameError::TileWidthTooSmall {
                width: self.tile_width,
                min: CliPresenter::MIN_TILE_WIDTH,
            });
        }
        Ok(())
    }

    pub fn dimension(&self) -> Result<Dimension, GameError> {
        Dimension::square(self.size)
    }

    /// Builds the spawner described by `seed` and `two_spawn_chance`.
    pub fn spawner(&self) -> Result<RandomTileSpawner<SmallRng>, GameError> {
        match self.seed {
            Some(seed) => RandomTileSpawner::seeded(seed, self.two_spawn_chance),
            None => RandomTileSpawner::from_entropy(self.two_spawn_chance),
        }
    }

    pub fn presenter(&self) -> Result<CliPresenter, GameError> {
        CliPresenter::with_messages(
            self.tile_width,
            self.in_progress_message.as_str(),
            self.win_message.as_str(),
            self.lose_message.as_str(),
        )
    }
}
