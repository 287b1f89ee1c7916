//! Implementation of `hubbridge`: hub discovery, the hub model and C# emission.

pub mod discovery;
pub mod emit;
pub mod error;
pub mod model;
pub mod options;
pub mod snapshot;

use crate::discovery::{Cancellation, Discovery, SemanticModel};
use crate::emit::GeneratedSource;
use crate::options::GeneratorOptions;

pub use crate::error::{Error, Result};

/// Output of a full generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub source: GeneratedSource,
    pub discovery: Discovery,
}

/// Discover hubs among `candidates` and render them into one document.
///
/// Candidates failing extraction are left out of the document and listed in
/// [`Discovery::failures`].
pub fn generate<'a, M, I>(
    model: &M,
    candidates: I,
    options: &GeneratorOptions,
    cancellation: &Cancellation,
) -> Result<Generated>
where
    M: SemanticModel,
    M::Node: 'a,
    I: IntoIterator<Item = &'a M::Node>,
{
    let discovery = discovery::discover(model, candidates, options, cancellation)?;
    let source = emit::render(&discovery.hubs, options);

    Ok(Generated { source, discovery })
}
