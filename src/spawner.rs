//! Placing new tiles on the board.
use crate::engine::{Tile, TilePosition, TileValue};
use crate::error::GameError;
use log::debug;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Something that can drop new tiles into empty cells of a grid.
pub trait TileSpawner {
    /// Places `qty` new tiles on distinct positions picked from `empty_cells`.
    ///
    /// # Errors
    /// * `GameError::InvalidSpawnQuantity` unless `qty` is 1 or 2.
    /// * `GameError::NotEnoughEmptyCells` if `empty_cells` holds fewer than `qty` positions.
    fn spawn(
        &mut self,
        grid: &mut [Vec<Tile>],
        qty: usize,
        empty_cells: &[TilePosition],
    ) -> Result<(), GameError>;
}

/// Spawns a `2` with probability `two_chance`, otherwise a `4`, at uniformly random
/// empty positions.
///
/// The random source is injected so tests and replays can use a seeded generator.
///
/// # Examples
/// ```
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use twenty48::engine::{Board, Dimension};
/// use twenty48::spawner::{RandomTileSpawner, TileSpawner};
///
/// let mut board = Board::create(Dimension::default());
/// let mut spawner = RandomTileSpawner::new(SmallRng::seed_from_u64(7), 0.9).unwrap();
/// let empty = board.empty_tile_positions();
/// spawner.spawn(board.tiles_mut(), 2, &empty).unwrap();
/// assert_eq!(board.empty_tile_positions().len(), 14);
/// ```
#[derive(Clone, Debug)]
pub struct RandomTileSpawner<R: Rng> {
    rng: R,
    two_chance: f64,
}

impl<R: Rng> RandomTileSpawner<R> {
    /// Default probability of spawning a `2` rather than a `4`.
    pub const DEFAULT_TWO_CHANCE: f64 = 0.9;

    /// Creates a spawner drawing from `rng`.
    ///
    /// # Errors
    /// `GameError::InvalidSpawnChance` if `two_chance` is not within `[0, 1]`.
    pub fn new(rng: R, two_chance: f64) -> Result<Self, GameError> {
        if !(0.0..=1.0).contains(&two_chance) {
            return Err(GameError::InvalidSpawnChance(two_chance));
        }
        Ok(RandomTileSpawner { rng, two_chance })
    }

    /// Probability of a new tile being a `2`.
    pub fn two_chance(&self) -> f64 {
        self.two_chance
    }

    /// Draws the value of one new tile: the lowest rung or, less often, the one above it.
    pub fn new_tile_value(&mut self) -> TileValue {
        if self.rng.gen_bool(self.two_chance) {
            TileValue::Two
        } else {
            TileValue::Four
        }
    }
}

impl RandomTileSpawner<SmallRng> {
    /// A spawner with a reproducible sequence for the given seed.
    pub fn seeded(seed: u64, two_chance: f64) -> Result<Self, GameError> {
        Self::new(SmallRng::seed_from_u64(seed), two_chance)
    }

    /// A spawner seeded from the operating system's entropy source.
    pub fn from_entropy(two_chance: f64) -> Result<Self, GameError> {
        Self::new(SmallRng::from_entropy(), two_chance)
    }
}

impl<R: Rng> TileSpawner for RandomTileSpawner<R> {
    fn spawn(
        &mut self,
        grid: &mut [Vec<Tile>],
        qty: usize,
        empty_cells: &[TilePosition],
    ) -> Result<(), GameError> {
        if !(1..=2).contains(&qty) {
            return Err(GameError::InvalidSpawnQuantity(qty));
        }

        // Distinct positions only: a repeated draw is thrown away and drawn again.
        let mut distinct: Vec<TilePosition> = empty_cells.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() < qty {
            return Err(GameError::NotEnoughEmptyCells {
                requested: qty,
                available: distinct.len(),
            });
        }

        let mut chosen: Vec<TilePosition> = Vec::with_capacity(qty);
        while chosen.len() < qty {
            let Some(&position) = empty_cells.choose(&mut self.rng) else {
                break;
            };
            if !chosen.contains(&position) {
                chosen.push(position);
            }
        }

        for position in chosen {
            let value = self.new_tile_value();
            debug!("Spawning {} at {}", value, position);
            grid[position.row][position.col] = Tile::new(value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Board, Dimension};
    use crate::utils::board_from_str_array;

    fn spawner(seed: u64) -> RandomTileSpawner<SmallRng> {
        RandomTileSpawner::seeded(seed, RandomTileSpawner::<SmallRng>::DEFAULT_TWO_CHANCE).unwrap()
    }

    fn spawned_tiles(before: &Board, after: &Board) -> Vec<Tile> {
        before
            .tiles()
            .iter()
            .flatten()
            .zip(after.tiles().iter().flatten())
            .filter(|(b, a)| b != a)
            .map(|(_, a)| *a)
            .collect()
    }

    #[test]
    fn test_spawn_on_empty_board() {
        for qty in [1, 2] {
            let before = Board::create(Dimension::default());
            let mut after = before.clone();
            let empty = after.empty_tile_positions();
            spawner(1).spawn(after.tiles_mut(), qty, &empty).unwrap();

            assert_eq!(after.empty_tile_positions().len() + qty, empty.len());
            let new_tiles = spawned_tiles(&before, &after);
            assert_eq!(new_tiles.len(), qty);
            for tile in new_tiles {
                assert!(tile.value() == TileValue::Two || tile.value() == TileValue::Four);
            }
        }
    }

    #[test]
    fn test_spawn_only_touches_empty_cells() {
        let before = board_from_str_array(&[
            "4 4 8 8", //
            "2 . 2 .",
            "8 8 4 4",
            ". 2 . 2",
        ])
        .unwrap();
        let mut after = before.clone();
        let empty = after.empty_tile_positions();
        spawner(3).spawn(after.tiles_mut(), 1, &empty).unwrap();

        assert_eq!(after.empty_tile_positions().len(), empty.len() - 1);
        for r in 0..4 {
            for c in 0..4 {
                if !before.get_tile(r, c).is_empty() {
                    assert_eq!(before.get_tile(r, c), after.get_tile(r, c));
                }
            }
        }
    }

    #[test]
    fn test_spawn_two_fills_last_two_cells() {
        let mut board = board_from_str_array(&[
            "2 4 2 4", //
            "4 2 4 2",
            "2 4 2 4",
            "4 2 . .",
        ])
        .unwrap();
        let empty = board.empty_tile_positions();
        spawner(11).spawn(board.tiles_mut(), 2, &empty).unwrap();

        assert!(board.empty_tile_positions().is_empty());
        for c in 2..4 {
            let value = board.get_tile(3, c).value();
            assert!(value == TileValue::Two || value == TileValue::Four);
        }
    }

    #[test]
    fn test_spawn_rejects_bad_quantity() {
        let mut board = Board::create(Dimension::default());
        let empty = board.empty_tile_positions();
        for qty in [0, 3] {
            let err = spawner(0).spawn(board.tiles_mut(), qty, &empty).unwrap_err();
            assert!(matches!(err, GameError::InvalidSpawnQuantity(q) if q == qty));
        }
        assert_eq!(board.empty_tile_positions().len(), 16);
    }

    #[test]
    fn test_spawn_without_enough_cells_fails() {
        let mut board = Board::create(Dimension::default());
        let one_cell = vec![TilePosition::new(0, 0)];
        let err = spawner(0).spawn(board.tiles_mut(), 2, &one_cell).unwrap_err();
        assert!(matches!(
            err,
            GameError::NotEnoughEmptyCells { requested: 2, available: 1 }
        ));

        let duplicates = vec![TilePosition::new(0, 0), TilePosition::new(0, 0)];
        assert!(spawner(0).spawn(board.tiles_mut(), 2, &duplicates).is_err());
    }

    #[test]
    fn test_invalid_chance_rejected() {
        assert!(matches!(
            RandomTileSpawner::seeded(0, 1.5),
            Err(GameError::InvalidSpawnChance(_))
        ));
        assert!(RandomTileSpawner::seeded(0, -0.1).is_err());
        assert!(RandomTileSpawner::seeded(0, 0.0).is_ok());
        assert!(RandomTileSpawner::seeded(0, 1.0).is_ok());
    }

    #[test]
    fn test_new_tile_value_distribution() {
        let iterations = 1000;
        let mut spawner = spawner(42);
        let twos = (0..iterations)
            .filter(|_| spawner.new_tile_value() == TileValue::Two)
            .count();
        // 0.9 * 1000 with a generous margin.
        assert!(twos > 800, "only {} twos", twos);
        assert!(twos < iterations);
    }

    #[test]
    fn test_extreme_chances() {
        let mut always_two = RandomTileSpawner::seeded(5, 1.0).unwrap();
        let mut always_four = RandomTileSpawner::seeded(5, 0.0).unwrap();
        for _ in 0..100 {
            assert_eq!(always_two.new_tile_value(), TileValue::Two);
            assert_eq!(always_four.new_tile_value(), TileValue::Four);
        }
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut first = Board::create(Dimension::default());
        let mut second = Board::create(Dimension::default());
        let empty = first.empty_tile_positions();
        spawner(99).spawn(first.tiles_mut(), 2, &empty).unwrap();
        spawner(99).spawn(second.tiles_mut(), 2, &empty).unwrap();
        assert_eq!(first, second);
    }
}
