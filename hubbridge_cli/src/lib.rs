pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Commands, Overrides};

use anyhow::Result;

use crate::commands::{generate_command, inspect_command};

/// Execute a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            snapshot,
            config,
            out,
            overrides,
        } => generate_command(&snapshot, config.as_deref(), out.as_deref(), &overrides),
        Commands::Inspect {
            snapshot,
            config,
            overrides,
        } => inspect_command(&snapshot, config.as_deref(), &overrides),
    }
}
