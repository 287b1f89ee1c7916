use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use hubbridge::{LineEnding, OptionsFile};

/// Generate SignalR hub bridges from a declaration snapshot
#[derive(Parser, Debug)]
#[command(name = "hubbridge")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the bridge source for all hubs in a snapshot
    #[command(visible_alias = "g")]
    Generate {
        /// Path to the declaration snapshot (JSON)
        snapshot: PathBuf,

        /// Generator options (TOML). Defaults to `hubbridge.toml` in the current directory, if present
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory to write the generated file to. Prints to stdout when absent
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print the discovered hubs as JSON
    #[command(visible_alias = "i")]
    Inspect {
        /// Path to the declaration snapshot (JSON)
        snapshot: PathBuf,

        /// Generator options (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: Overrides,
    },
}

/// Options given on the command line, taking precedence over the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Name of the generated file
    #[arg(long)]
    pub hint_name: Option<String>,

    /// Identifier of the hub base class
    #[arg(long)]
    pub hub_base_name: Option<String>,

    /// Assembly declaring the hub base class
    #[arg(long)]
    pub hub_assembly: Option<String>,

    /// Prefix of the dispatcher actor path
    #[arg(long)]
    pub dispatcher_path_prefix: Option<String>,

    /// Line terminator of the generated file
    #[arg(long, value_enum)]
    pub newline: Option<Newline>,

    /// Use C# keywords for built-in types. `--keyword-types=false` turns off a config `true`
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub keyword_types: Option<bool>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Newline {
    Lf,
    Crlf,
}

impl From<Newline> for LineEnding {
    fn from(value: Newline) -> Self {
        match value {
            Newline::Lf => LineEnding::Lf,
            Newline::Crlf => LineEnding::CrLf,
        }
    }
}

impl Overrides {
    pub fn to_options_file(&self) -> OptionsFile {
        OptionsFile {
            hub_base_name: self.hub_base_name.clone(),
            hub_assembly: self.hub_assembly.clone(),
            dispatcher_path_prefix: self.dispatcher_path_prefix.clone(),
            hint_name: self.hint_name.clone(),
            indent: None,
            newline: self.newline.map(LineEnding::from),
            keyword_types: self.keyword_types,
        }
    }
}
