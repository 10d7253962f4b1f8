mod application;
mod cli;
mod domain;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the menu on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("freight_train=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    cli.run()
}
