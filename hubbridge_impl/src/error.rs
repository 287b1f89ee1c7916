/// Errors that can occur while extracting hubs
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Type arguments nest deeper than [`MAX_GENERIC_DEPTH`](crate::discovery::MAX_GENERIC_DEPTH).
    ///
    /// `chain` lists the enclosing types, innermost first.
    #[error("generic type arguments nest too deep at `{ty}`{}", render_chain(.chain))]
    GenericRecursion { ty: String, chain: Vec<String> },

    #[error("discovery was cancelled")]
    Cancelled,
}

impl Error {
    /// Record an enclosing type of the failing type argument.
    pub(crate) fn within(mut self, enclosing: impl Into<String>) -> Self {
        if let Self::GenericRecursion { chain, .. } = &mut self {
            chain.push(enclosing.into());
        }

        self
    }
}

fn render_chain(chain: &[String]) -> String {
    chain.iter().map(|ty| format!(" <- `{ty}`")).collect()
}

/// Result type alias for hub extraction
pub type Result<T, E = Error> = std::result::Result<T, E>;
