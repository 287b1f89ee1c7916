use std::path::Path;

use anyhow::{Context, Result};
use hubbridge::{GeneratorOptions, OptionsFile};
use tracing::debug;

use crate::cli::Overrides;

/// Config file looked up in the current directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "hubbridge.toml";

/// Read generator options from a TOML file.
pub fn load_options_file(path: &Path) -> Result<OptionsFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;

    toml::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

/// Resolve options from command line overrides, the config file and defaults, in that order.
pub fn resolve_options(config: Option<&Path>, overrides: &Overrides) -> Result<GeneratorOptions> {
    let file = match config {
        Some(path) => load_options_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            debug!("Using {}", DEFAULT_CONFIG_FILE);
            load_options_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => OptionsFile::default(),
    };

    let options = overrides.to_options_file().merge(&file).resolve();
    debug!("Resolved options: {:?}", options);

    Ok(options)
}
