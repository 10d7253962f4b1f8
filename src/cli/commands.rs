// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two ways to drive the train:
//   1. `interactive` — the menu on stdin/stdout (the default)
//   2. `script`      — the same menu input, read from a file
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;

use crate::cli::session::SessionConfig;

/// The top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the menu interactively (default when no subcommand is given)
    Interactive(InteractiveArgs),

    /// Replay menu input from a file, one answer per line
    Script(ScriptArgs),
}

/// How results are printed
#[derive(ValueEnum, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed-width tables
    #[default]
    Table,
    /// One JSON document per result
    Json,
}

#[derive(Args, Debug, Default)]
pub struct InteractiveArgs {
    /// Output style for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Don't reprint the menu before every selection
    #[arg(long)]
    pub no_menu: bool,
}

#[derive(Args, Debug)]
pub struct ScriptArgs {
    /// File holding the lines a user would type
    pub path: String,

    /// Output style for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// The session layer never sees clap types
impl From<InteractiveArgs> for SessionConfig {
    fn from(a: InteractiveArgs) -> Self {
        SessionConfig {
            format:    a.format,
            show_menu: !a.no_menu,
        }
    }
}

impl From<&ScriptArgs> for SessionConfig {
    fn from(a: &ScriptArgs) -> Self {
        SessionConfig {
            format:    a.format,
            show_menu: false,
        }
    }
}
