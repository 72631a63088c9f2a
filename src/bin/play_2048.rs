use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use twenty48::config::GameConfig;
use twenty48::engine::Board;
use twenty48::game::{Game, GameOutcome};
use twenty48::game_loop::{GameLoop, LoopExit};
use twenty48::logger::LogLogger;
use twenty48::view::CliView;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play 2048 in the terminal", long_about = None)]
struct Args {
    /// Side length of the square board (at least 4)
    #[clap(short, long, default_value_t = 4)]
    size: usize,

    /// Probability that a new tile is a 2 rather than a 4
    #[clap(long, default_value_t = 0.9)]
    two_chance: f64,

    /// Inner width of each tile, in characters (at least 4)
    #[clap(long, default_value_t = 6)]
    tile_width: usize,

    /// Seed for the tile spawner, for reproducible games
    #[clap(long)]
    seed: Option<u64>,
}

impl Args {
    fn into_config(self) -> GameConfig {
        GameConfig {
            size: self.size,
            two_spawn_chance: self.two_chance,
            tile_width: self.tile_width,
            seed: self.seed,
            ..GameConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = args.into_config();
    config.validate().context("Invalid game settings")?;
    info!("Starting with {:?}", config);

    let board = Board::create(config.dimension()?);
    let game = Game::new(board, config.spawner()?);
    let presenter = config.presenter()?;
    let view = CliView::stdout();

    let mut game_loop = GameLoop::new(game, presenter, view, LogLogger::default());
    match game_loop.execute().context("Game aborted")? {
        LoopExit::Quit => println!("Bye-bye!"),
        LoopExit::Completed(state) => match state.outcome() {
            Some(GameOutcome::Win) => println!("You reached 2048 with {} points.", state.score()),
            _ => println!("Final score: {}", state.score()),
        },
    }
    Ok(())
}
