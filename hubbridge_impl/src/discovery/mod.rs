//! Discovery of bridge classes in a host's declaration graph.
//!
//! Discovery runs in two phases. [`is_hub_candidate`] looks only at the local syntax of a
//! declaration and rejects most types cheaply. [`extract_hub`] resolves the survivors through
//! the host's [`SemanticModel`], verifies the remaining conditions and builds the [`Hub`].
//!
//! The host is abstracted by the traits in this module, so any front end able to answer these
//! questions (a compiler, a declaration snapshot) can drive the generator.

mod semantic;
mod syntax;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hubbridge_syntax::TypeSyntax;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::Hub;
use crate::options::GeneratorOptions;

pub use semantic::{extract_hub, MAX_GENERIC_DEPTH};
pub use syntax::is_hub_candidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Class,
    Interface,
    Struct,
    Record,
}

/// Syntactic view of a type declaration.
pub trait DeclarationSyntax {
    fn kind(&self) -> DeclarationKind;

    /// Base list entries as written, in order.
    fn base_list(&self) -> &[TypeSyntax];
}

/// Resolved type, as seen by the host.
pub trait TypeSymbol: Sized {
    /// Name without namespace and type arguments.
    fn name(&self) -> &str;

    /// Dotted containing namespace, empty for the global namespace.
    fn namespace(&self) -> String;

    /// Name of the containing assembly, `None` for types outside any assembly
    /// (type parameters, arrays, unresolved names).
    fn assembly(&self) -> Option<&str>;

    /// Human readable name, for diagnostics.
    fn display(&self) -> String;

    /// Check, if this is a class, interface, struct or other named type
    /// (and not a type parameter or an array).
    fn is_named_type(&self) -> bool;

    /// Element type and rank, if this is an array type.
    fn array_element(&self) -> Option<(Self, usize)>;

    fn type_parameters(&self) -> Vec<String>;

    fn type_arguments(&self) -> Vec<Self>;

    fn base_type(&self) -> Option<Self>;

    /// Directly implemented interfaces.
    fn interfaces(&self) -> Vec<Self>;

    /// Declared members, in declaration order.
    fn members(&self) -> Vec<Member<Self>>;
}

/// Declared member of a type.
#[derive(Debug, Clone)]
pub enum Member<S> {
    Method(MethodSymbol<S>),
    /// Any other member (property, event, field), by name.
    Other(String),
}

#[derive(Debug, Clone)]
pub struct MethodSymbol<S> {
    pub name: String,
    pub return_type: S,
    pub parameters: Vec<ParameterSymbol<S>>,
}

#[derive(Debug, Clone)]
pub struct ParameterSymbol<S> {
    pub name: String,
    pub ty: S,
}

/// Resolution of declarations into symbols.
pub trait SemanticModel {
    type Node: DeclarationSyntax;
    type Symbol<'m>: TypeSymbol
    where
        Self: 'm;

    fn declared_symbol<'m>(&'m self, node: &Self::Node) -> Option<Self::Symbol<'m>>;
}

/// Cooperative cancellation flag, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of a discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Discovered hubs, in candidate order
    pub hubs: Vec<Hub>,
    /// Candidates whose extraction failed
    pub failures: Vec<CandidateFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFailure {
    /// Position of the candidate in the input
    pub index: usize,
    /// Display name of the candidate
    pub candidate: String,
    pub error: Error,
}

/// Find and extract every hub among `candidates`, in input order.
///
/// A candidate that fails extraction is recorded in [`Discovery::failures`] and
/// doesn't affect the others. The only error is [`Error::Cancelled`].
pub fn discover<'a, M, I>(
    model: &M,
    candidates: I,
    options: &GeneratorOptions,
    cancellation: &Cancellation,
) -> Result<Discovery>
where
    M: SemanticModel,
    M::Node: 'a,
    I: IntoIterator<Item = &'a M::Node>,
{
    let mut discovery = Discovery::default();

    for (index, node) in candidates.into_iter().enumerate() {
        if cancellation.is_cancelled() {
            debug!("Discovery cancelled after {} candidates", index);
            return Err(Error::Cancelled);
        }

        if !is_hub_candidate(node, options) {
            continue;
        }

        match extract_hub(model, node, options) {
            Ok(Some(hub)) => {
                debug!("Found hub {}", hub.bridge_type);
                discovery.hubs.push(hub);
            }
            Ok(None) => {}
            Err(error) => {
                let candidate = model
                    .declared_symbol(node)
                    .map_or_else(|| format!("#{index}"), |symbol| symbol.display());

                warn!("Skipping hub candidate {}: {}", candidate, error);
                discovery.failures.push(CandidateFailure {
                    index,
                    candidate,
                    error,
                });
            }
        }
    }

    debug!(
        "Discovered {} hubs, {} failed candidates",
        discovery.hubs.len(),
        discovery.failures.len()
    );

    Ok(discovery)
}
