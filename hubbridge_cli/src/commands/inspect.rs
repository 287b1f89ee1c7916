use std::path::Path;

use anyhow::Result;
use hubbridge::{discovery, Cancellation};
use tracing::warn;

use super::load_snapshot;
use crate::cli::Overrides;
use crate::config::resolve_options;

pub fn inspect_command(snapshot: &Path, config: Option<&Path>, overrides: &Overrides) -> Result<()> {
    let options = resolve_options(config, overrides)?;
    let model = load_snapshot(snapshot)?;

    let discovery = discovery::discover(&model, model.candidates(), &options, &Cancellation::new())?;

    for failure in &discovery.failures {
        warn!("{} was not extracted: {}", failure.candidate, failure.error);
    }

    println!("{}", serde_json::to_string_pretty(&discovery.hubs)?);

    Ok(())
}
