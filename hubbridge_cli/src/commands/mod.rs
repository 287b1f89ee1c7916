mod generate;
mod inspect;

pub use generate::generate_command;
pub use inspect::inspect_command;

use std::path::Path;

use anyhow::{Context, Result};
use hubbridge::SnapshotModel;
use tracing::debug;

fn load_snapshot(path: &Path) -> Result<SnapshotModel> {
    debug!("Loading snapshot: {}", path.display());

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;

    SnapshotModel::from_json(&json).with_context(|| format!("Invalid snapshot {}", path.display()))
}
