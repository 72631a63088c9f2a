//! The play loop tying a game, a presenter and a view together.
use crate::error::GameError;
use crate::game::{GameController, GameState};
use crate::logger::Logger;
use crate::presenter::Presenter;
use crate::view::{PlayerCommand, View};

/// Why `GameLoop::execute` returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoopExit {
    /// The game reached a win or a loss; carries the final state.
    Completed(GameState),
    /// The player asked to leave before the game ended.
    Quit,
}

/// Runs a game from start to finish.
///
/// The loop only passes snapshots to the presenter and directions to the game; it never
/// touches the board itself.
pub struct GameLoop<G, P, V, L> {
    game: G,
    presenter: P,
    view: V,
    logger: L,
}

impl<G, P, V, L> GameLoop<G, P, V, L>
where
    G: GameController,
    P: Presenter,
    V: View<Data = P::Output>,
    L: Logger,
{
    pub fn new(game: G, presenter: P, view: V, logger: L) -> Self {
        GameLoop {
            game,
            presenter,
            view,
            logger,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Starts the game, shows it, then reads and applies moves until the game is
    /// completed or the player quits.
    ///
    /// # Errors
    /// Whatever the game or the view reports. Nothing is retried.
    pub fn execute(&mut self) -> Result<LoopExit, GameError> {
        let state = self.game.start()?;
        self.logger.info("Game started");
        self.show(&state)?;

        loop {
            let direction = match self.view.next_command()? {
                PlayerCommand::Move(direction) => direction,
                PlayerCommand::Quit => {
                    self.logger.info("Player quit");
                    return Ok(LoopExit::Quit);
                }
            };

            let state = match self.game.make_move(direction) {
                Ok(state) => state,
                Err(err) => {
                    self.logger.error(&format!("Move {} failed: {}", direction, err));
                    return Err(err);
                }
            };
            self.logger
                .debug(&format!("Moved {}, score {}", direction, state.score()));
            self.show(&state)?;

            if state.is_completed() {
                self.logger.info(&format!(
                    "Game completed with {:?}, final score {}",
                    state.outcome(),
                    state.score()
                ));
                return Ok(LoopExit::Completed(state));
            }
        }
    }

    fn show(&mut self, state: &GameState) -> Result<(), GameError> {
        let data = self.presenter.present(state);
        self.view.display(&data)
    }
}
