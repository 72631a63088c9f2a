//! Game controller: the start/move lifecycle and win/lose evaluation.
use crate::engine::{Board, Dimension, Grid, TileValue};
use crate::error::GameError;
use crate::moves::{MoveDirection, MoveEngine};
use crate::spawner::TileSpawner;
use log::{debug, info, warn};

/// Number of tiles placed on the board when a game starts.
pub const INITIAL_TILES: usize = 2;
/// Number of tiles placed after every move that changed the board.
pub const TILES_PER_MOVE: usize = 1;

/// Whether a game can still be played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Completed,
}

/// How a completed game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    Win,
    Lose,
}

/// An immutable picture of the game taken after `start` or `make_move`.
///
/// The tiles are an independent copy of the board, so later moves never change a
/// state that was already handed out. The status is derived from the outcome, which
/// keeps `outcome.is_none()` equivalent to `status == InProgress`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    tiles: Grid,
    score: u32,
    outcome: Option<GameOutcome>,
}

impl GameState {
    pub fn new(tiles: Grid, score: u32, outcome: Option<GameOutcome>) -> Self {
        GameState {
            tiles,
            score,
            outcome,
        }
    }

    pub fn tiles(&self) -> &Grid {
        &self.tiles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        match self.outcome {
            Some(_) => GameStatus::Completed,
            None => GameStatus::InProgress,
        }
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_completed(&self) -> bool {
        self.status() == GameStatus::Completed
    }
}

/// The operations a front end needs to drive a game.
pub trait GameController {
    /// Starts a fresh game and returns its initial state.
    fn start(&mut self) -> Result<GameState, GameError>;

    /// Plays one move and returns the resulting state.
    fn make_move(&mut self, direction: MoveDirection) -> Result<GameState, GameError>;
}

/// Decides whether `board` is won, lost, or still open.
///
/// A board holding the top rung is a win, even when it could also be a loss.
/// Otherwise a full board with no equal neighbours is a loss.
pub fn evaluate_outcome(board: &Board) -> Option<GameOutcome> {
    if board.contains(TileValue::MAX) {
        return Some(GameOutcome::Win);
    }
    if board.empty_tile_positions().is_empty() && !board.has_adjacent_pair() {
        return Some(GameOutcome::Lose);
    }
    None
}

/// Manages one game session: the board, the move engine holding the score, and the
/// spawner that adds tiles.
///
/// # Examples
/// ```
/// use twenty48::engine::{Board, Dimension};
/// use twenty48::game::{Game, GameController, GameStatus};
/// use twenty48::moves::MoveDirection;
/// use twenty48::spawner::RandomTileSpawner;
///
/// let spawner = RandomTileSpawner::seeded(2048, 0.9).unwrap();
/// let mut game = Game::new(Board::create(Dimension::default()), spawner);
///
/// let state = game.start().unwrap();
/// assert_eq!(state.score(), 0);
/// assert_eq!(state.status(), GameStatus::InProgress);
///
/// let state = game.make_move(MoveDirection::Left).unwrap();
/// assert!(state.outcome().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Game<S: TileSpawner> {
    board: Board,
    spawner: S,
    engine: MoveEngine,
    outcome: Option<GameOutcome>,
}

impl<S: TileSpawner> Game<S> {
    /// Creates a game on `board`. The board is used as is until `start` is called.
    pub fn new(board: Board, spawner: S) -> Self {
        Game {
            board,
            spawner,
            engine: MoveEngine::new(),
            outcome: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    pub fn dimension(&self) -> Dimension {
        self.board.dimension()
    }

    fn spawn(&mut self, qty: usize) -> Result<(), GameError> {
        let empty = self.board.empty_tile_positions();
        self.spawner.spawn(self.board.tiles_mut(), qty, &empty)
    }

    fn state(&self) -> GameState {
        GameState::new(self.board.snapshot(), self.engine.score(), self.outcome)
    }
}

impl<S: TileSpawner> GameController for Game<S> {
    /// Replaces the board with an empty one of the same size, resets the score, and
    /// spawns the initial tiles.
    fn start(&mut self) -> Result<GameState, GameError> {
        self.board = Board::create(self.board.dimension());
        self.engine.reset();
        self.outcome = None;
        self.spawn(INITIAL_TILES)?;
        info!("Started a {0}x{0} game", self.board.dimension().side());
        Ok(self.state())
    }

    /// Processes a player move and updates game state.
    ///
    /// 1. The move engine slides and merges the board, adding to the score.
    /// 2. If any cell changed, one new tile is spawned.
    /// 3. The board is checked for a win, then for a loss.
    ///
    /// # Errors
    /// * `GameError::GameCompleted` if the game already ended.
    /// * Anything the move engine or the spawner reports.
    fn make_move(&mut self, direction: MoveDirection) -> Result<GameState, GameError> {
        if self.outcome.is_some() {
            warn!("Ignoring move {} on a completed game", direction);
            return Err(GameError::GameCompleted);
        }

        let changed = self.engine.apply_move(direction, self.board.tiles_mut())?;
        if changed {
            self.spawn(TILES_PER_MOVE)?;
        } else {
            debug!("Move {} left the board unchanged", direction);
        }

        self.outcome = evaluate_outcome(&self.board);
        if let Some(outcome) = self.outcome {
            info!(
                "Game completed with {:?}, score {}",
                outcome,
                self.engine.score()
            );
        }
        Ok(self.state())
    }
}
