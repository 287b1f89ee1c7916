use anyhow::Result;
use clap::Parser;

use hubbridge_cli::Cli;

fn main() -> Result<()> {
    // Logs go to stderr, generated source may go to stdout
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    hubbridge_cli::run(Cli::parse())
}
