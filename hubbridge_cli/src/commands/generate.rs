use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::load_snapshot;
use crate::cli::Overrides;
use crate::config::resolve_options;

pub fn generate_command(
    snapshot: &Path,
    config: Option<&Path>,
    out: Option<&Path>,
    overrides: &Overrides,
) -> Result<()> {
    let options = resolve_options(config, overrides)?;
    let model = load_snapshot(snapshot)?;

    let generated = hubbridge::generate_from_snapshot(&model, &options)?;

    for failure in &generated.discovery.failures {
        warn!("{} was not generated: {}", failure.candidate, failure.error);
    }

    let source = generated.source;
    match out {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;

            let path = dir.join(&source.hint_name);
            std::fs::write(&path, &source.text)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            info!(
                "Generated {} hubs into {}",
                generated.discovery.hubs.len(),
                path.display()
            );
        }
        None => print!("{}", source.text),
    }

    Ok(())
}
