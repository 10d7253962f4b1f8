// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. `clap` parses the
// command line; the menu session reads commands and renders
// results. Train logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `interactive` — menu on the terminal (default)
//   2. `script`      — menu input replayed from a file
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;
pub mod menu;
pub mod render;
pub mod session;

use std::{
    fs::File,
    io::{self, BufReader},
};

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, InteractiveArgs, ScriptArgs};
use session::{SessionConfig, TrainSession};

/// Command line of the freight train manager
#[derive(Parser, Debug)]
#[command(
    name = "freight-train",
    version,
    about = "Build and inspect a freight train car by car from a text menu."
)]
pub struct Cli {
    /// What to run; `interactive` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Some(Commands::Interactive(args)) => run_interactive(args),
            Some(Commands::Script(args))      => run_script(args),
            None                              => run_interactive(InteractiveArgs::default()),
        }
    }
}

fn run_interactive(args: InteractiveArgs) -> Result<()> {
    let stdin  = io::stdin();
    let stdout = io::stdout();
    TrainSession::new(stdin.lock(), stdout.lock(), SessionConfig::from(args)).run()?;
    Ok(())
}

fn run_script(args: ScriptArgs) -> Result<()> {
    tracing::info!("Replaying menu input from '{}'", args.path);

    let file = File::open(&args.path)
        .with_context(|| format!("Cannot open script '{}'", args.path))?;

    let train = TrainSession::new(BufReader::new(file), io::stdout().lock(), SessionConfig::from(&args))
        .run()?;

    tracing::info!("Script finished with {} cars on the train", train.size());
    Ok(())
}
