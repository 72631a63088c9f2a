use std::collections::VecDeque;

use twenty48::engine::{Board, Dimension, Tile, TilePosition, TileValue};
use twenty48::game::{Game, GameOutcome, GameStatus};
use twenty48::game_loop::{GameLoop, LoopExit};
use twenty48::logger::LogLogger;
use twenty48::moves::MoveDirection;
use twenty48::presenter::{CliPresenter, CliRenderData};
use twenty48::spawner::{RandomTileSpawner, TileSpawner};
use twenty48::view::{PlayerCommand, View};
use twenty48::GameError;

/// Plays back a fixed list of commands and keeps every frame it was shown.
struct ScriptedView {
    commands: VecDeque<PlayerCommand>,
    frames: Vec<CliRenderData>,
}

impl ScriptedView {
    fn new(commands: &[PlayerCommand]) -> Self {
        ScriptedView {
            commands: commands.iter().copied().collect(),
            frames: Vec::new(),
        }
    }
}

impl View for ScriptedView {
    type Data = CliRenderData;

    fn display(&mut self, data: &CliRenderData) -> Result<(), GameError> {
        self.frames.push(data.clone());
        Ok(())
    }

    fn next_command(&mut self) -> Result<PlayerCommand, GameError> {
        Ok(self.commands.pop_front().unwrap_or(PlayerCommand::Quit))
    }
}

/// Fills every empty cell with a 2/4 checkerboard, leaving no move on the board.
struct CheckerboardSpawner;

impl TileSpawner for CheckerboardSpawner {
    fn spawn(
        &mut self,
        grid: &mut [Vec<Tile>],
        _qty: usize,
        empty_cells: &[TilePosition],
    ) -> Result<(), GameError> {
        for pos in empty_cells {
            let value = if (pos.row + pos.col) % 2 == 0 {
                TileValue::Two
            } else {
                TileValue::Four
            };
            grid[pos.row][pos.col] = Tile::new(value);
        }
        Ok(())
    }
}

fn seeded_game(seed: u64) -> Game<RandomTileSpawner<rand::rngs::SmallRng>> {
    Game::new(
        Board::create(Dimension::default()),
        RandomTileSpawner::seeded(seed, 0.9).unwrap(),
    )
}

fn moves(directions: &[MoveDirection]) -> Vec<PlayerCommand> {
    directions.iter().map(|d| PlayerCommand::Move(*d)).collect()
}

#[test]
fn test_quit_right_away_shows_only_the_start() {
    let view = ScriptedView::new(&[PlayerCommand::Quit]);
    let mut game_loop = GameLoop::new(
        seeded_game(1),
        CliPresenter::new(6).unwrap(),
        view,
        LogLogger::default(),
    );

    assert_eq!(game_loop.execute().unwrap(), LoopExit::Quit);

    let frames = &game_loop.view().frames;
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].score, "Score: 0");
    let shown: usize = frames[0]
        .tiles
        .iter()
        .flatten()
        .filter(|text| !text.is_empty())
        .count();
    assert_eq!(shown, 2);
}

#[test]
fn test_each_move_is_displayed() {
    let script = moves(&[
        MoveDirection::Left,
        MoveDirection::Up,
        MoveDirection::Right,
        MoveDirection::Down,
    ]);
    let mut game_loop = GameLoop::new(
        seeded_game(2),
        CliPresenter::new(6).unwrap(),
        ScriptedView::new(&script),
        LogLogger::default(),
    );

    assert_eq!(game_loop.execute().unwrap(), LoopExit::Quit);
    assert_eq!(game_loop.view().frames.len(), 1 + script.len());

    let last = game_loop.view().frames.last().unwrap();
    assert_eq!(last.score, format!("Score: {}", game_loop.game().score()));
    assert_eq!(
        game_loop.game().board().tiles().len(),
        last.tiles.len()
    );
}

#[test]
fn test_loop_stops_when_the_game_is_lost() {
    let game = Game::new(Board::create(Dimension::default()), CheckerboardSpawner);
    let presenter = CliPresenter::with_messages(6, "playing", "won", "lost").unwrap();
    let script = moves(&[MoveDirection::Left, MoveDirection::Right]);
    let mut game_loop = GameLoop::new(game, presenter, ScriptedView::new(&script), LogLogger::default());

    let state = match game_loop.execute().unwrap() {
        LoopExit::Completed(state) => state,
        other => panic!("expected the game to complete, got {:?}", other),
    };
    assert_eq!(state.status(), GameStatus::Completed);
    assert_eq!(state.outcome(), Some(GameOutcome::Lose));
    assert_eq!(state.score(), 0);

    // Start frame plus the one losing move; the second scripted move is never read.
    let frames = &game_loop.view().frames;
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].message, "playing");
    assert_eq!(frames[1].message, "lost");
}

#[test]
fn test_same_seed_same_game() {
    let script = moves(&[MoveDirection::Left, MoveDirection::Down, MoveDirection::Left]);
    let play = |seed| {
        let mut game_loop = GameLoop::new(
            seeded_game(seed),
            CliPresenter::new(6).unwrap(),
            ScriptedView::new(&script),
            LogLogger::default(),
        );
        game_loop.execute().unwrap();
        game_loop.view().frames.clone()
    };
    assert_eq!(play(77), play(77));
}
