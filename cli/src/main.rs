use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use delve_core::*;
use std::io::{self, BufRead};

use command::{Command, HELP};

mod command;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Preset {
    /// 10x10 board with 8 mines
    Small,
    /// 20x20 board with 35 mines
    Meadow,
}

impl Preset {
    const fn config(self) -> BoardConfig {
        match self {
            Self::Small => BoardConfig::SMALL,
            Self::Meadow => BoardConfig::MEADOW,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset, --size and --mines override its values
    #[arg(short, long, value_enum, default_value_t = Preset::Meadow)]
    preset: Preset,

    /// Side length of the square board
    #[arg(long)]
    size: Option<Coord>,

    /// Number of mines
    #[arg(long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Objects buried under empty ground
    #[arg(long, default_value_t = 17)]
    decorations: usize,

    /// Print the board as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Args {
    fn board_config(&self) -> Result<BoardConfig> {
        let preset = self.preset.config();
        let config = BoardConfig::new(
            self.size.unwrap_or(preset.size),
            self.mines.unwrap_or(preset.mines),
        )?;
        Ok(config)
    }
}

fn time_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// What the game loop does after a command.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Flow {
    Redraw,
    Unchanged,
    Quit,
}

impl Flow {
    const fn redraw_if(changed: bool) -> Self {
        if changed {
            Self::Redraw
        } else {
            Self::Unchanged
        }
    }
}

struct Session {
    engine: BoardEngine,
    decorations: Decorations,
    decoration_count: usize,
    json: bool,
}

impl Session {
    fn new(args: &Args) -> Result<Self> {
        let config = args
            .board_config()
            .context("Could not set up the board")?;
        let seed = args.seed.unwrap_or_else(time_seed);
        log::debug!("seed: {seed}");

        let mut engine = BoardEngine::new(config, RandomMinePlacer::new(seed))?;
        let decorations = engine.scatter_decorations(args.decorations);
        Ok(Self {
            engine,
            decorations,
            decoration_count: args.decorations,
            json: args.json,
        })
    }

    fn apply(&mut self, command: Command) -> Result<Flow> {
        Ok(match command {
            Command::Reveal(coords) => {
                let outcome = self.engine.reveal(coords)?;
                log::debug!("reveal {coords:?}: {outcome:?}");
                Flow::redraw_if(outcome.has_update())
            }
            Command::Flag(coords) => {
                let outcome = self.engine.toggle_flag(coords)?;
                log::debug!("flag {coords:?}: {outcome:?}");
                Flow::redraw_if(outcome.has_update())
            }
            Command::Dig(coords) => {
                let dug = self.decorations.dig(&self.engine, coords)?;
                if dug {
                    println!("You dug something up!");
                } else {
                    println!("Nothing here.");
                }
                Flow::redraw_if(dug)
            }
            Command::New => {
                self.engine.reset()?;
                self.decorations = self.engine.scatter_decorations(self.decoration_count);
                Flow::Redraw
            }
            Command::Quit => Flow::Quit,
        })
    }

    fn print(&self) -> Result<()> {
        let view = BoardView::from_engine(&self.engine).with_decorations(&self.decorations);
        if self.json {
            println!("{}", serde_json::to_string(&view)?);
            return Ok(());
        }

        print!("{view}");
        match view.status {
            GameStatus::InProgress => println!("mines left: {}", view.mines_left),
            GameStatus::Won => println!("You won! n to play again, q to quit"),
            GameStatus::Lost => println!("Boom. n to play again, q to quit"),
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let mut session = Session::new(&args)?;
    println!("{HELP}");
    session.print()?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err:#}");
                println!("{HELP}");
                continue;
            }
        };

        match session.apply(command) {
            Ok(Flow::Redraw) => session.print()?,
            Ok(Flow::Unchanged) => {}
            Ok(Flow::Quit) => break,
            Err(err) => println!("{err:#}"),
        }
    }

    Ok(())
}
