use tracing::trace;

use super::{DeclarationKind, DeclarationSyntax};
use crate::options::GeneratorOptions;

/// Cheap syntactic filter: a class with exactly two base list entries, the first one
/// being a generic name with the hub base identifier.
///
/// Qualified names are judged by their right-most part, so `Hub<T>`,
/// `Microsoft.AspNetCore.SignalR.Hub<T>` and `global::Hub<T>` all pass.
/// No names are resolved here.
pub fn is_hub_candidate(node: &impl DeclarationSyntax, options: &GeneratorOptions) -> bool {
    if node.kind() != DeclarationKind::Class {
        return false;
    }

    let [base, _] = node.base_list() else {
        return false;
    };

    let matches = base.is_generic_name(&options.hub_base_name);
    if !matches {
        trace!("First base `{}` is not a generic `{}`", base, options.hub_base_name);
    }

    matches
}
