use anyhow::{Context, Result};
use checkers_core::engine::config::{Difficulty, EngineConfig};
use checkers_core::engine::random::RandomSearcher;
use checkers_core::engine::{Action, SearchStats, Searcher};
use checkers_core::logic::board::{Color, Layout};
use checkers_core::logic::game::{GameState, MoveRecord};
use checkers_core::worker::{Output, SearchWorker};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Let the engine play a full game against itself.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Strength of the black side (moves first).
    #[arg(long, default_value_t = Difficulty::Beginner)]
    black: Difficulty,

    /// Strength of the white side.
    #[arg(long, default_value_t = Difficulty::Beginner)]
    white: Difficulty,

    /// JSON engine config shared by both sides. Its difficulty is replaced by
    /// --black/--white, a `cutoff_depth` in it applies to both.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LayoutArg::Reference)]
    layout: LayoutArg,

    /// Stop without a winner after this many plies.
    #[arg(long, default_value_t = 200)]
    max_plies: usize,

    /// Opening plies played by a random mover before the engines take over.
    #[arg(long, default_value_t = 0)]
    random_plies: usize,

    /// Seed for the random opening.
    #[arg(long)]
    seed: Option<u64>,

    /// Print a JSON summary instead of the board after every ply.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    Reference,
    Standard,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Reference => Self::Reference,
            LayoutArg::Standard => Self::Standard,
        }
    }
}

#[derive(Serialize)]
struct GameSummary<'a> {
    layout: Layout,
    winner: Option<Color>,
    plies: usize,
    history: &'a [MoveRecord],
}

struct Side {
    worker: SearchWorker,
    config: EngineConfig,
}

impl Side {
    fn new(base: &EngineConfig, difficulty: Difficulty) -> Self {
        Self {
            worker: SearchWorker::spawn(),
            config: EngineConfig {
                difficulty,
                ..base.clone()
            },
        }
    }

    fn play(&self, game: &GameState) -> Result<(Option<Action>, SearchStats)> {
        let output = self
            .worker
            .compute(game.board.clone(), game.turn, self.config.clone())?;
        Ok(match output {
            Output::MoveFound(result) => (result.action, result.stats),
            Output::NoMove(stats) => (None, stats),
        })
    }
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let Some(path) = &args.config else {
        return Ok(EngineConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    EngineConfig::load_from_json(&text)
        .with_context(|| format!("invalid engine config {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let base = load_config(&args)?;
    let layout = Layout::from(args.layout);

    let black = Side::new(&base, args.black);
    let white = Side::new(&base, args.white);
    let mut opener = args
        .seed
        .map_or_else(RandomSearcher::new, RandomSearcher::with_seed);

    let mut game = GameState::new(layout);
    tracing::info!(
        ?layout,
        black = %args.black,
        white = %args.white,
        "starting self-play"
    );
    if !args.json {
        println!("{}", game.board);
    }

    let mut plies = 0;
    while !game.is_over() && plies < args.max_plies {
        let turn = game.turn;
        let (action, stats) = if plies < args.random_plies {
            let result = opener.search(&game.board, turn);
            (result.action, result.stats)
        } else {
            match turn {
                Color::Black => black.play(&game)?,
                Color::White => white.play(&game)?,
            }
        };

        let Some(action) = action else {
            tracing::warn!(color = %turn, "no move available");
            break;
        };
        game.play_action(&action)
            .with_context(|| format!("{turn} produced an unplayable path {action}"))?;
        plies += 1;

        tracing::info!(
            ply = plies,
            color = %turn,
            %action,
            nodes = stats.nodes,
            max_depth = stats.max_depth,
            max_prunings = stats.max_prunings,
            min_prunings = stats.min_prunings,
        );
        if !args.json {
            println!("{turn}: {action}");
            println!("{}", game.board);
            println!("{stats}");
        }
    }

    let winner = game.winner();
    if args.json {
        let summary = GameSummary {
            layout,
            winner,
            plies,
            history: &game.history,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        match winner {
            Some(color) => println!("{color} wins after {plies} plies"),
            None => println!("no winner after {plies} plies"),
        }
    }
    Ok(())
}
