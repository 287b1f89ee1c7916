//! Declaration snapshot: a serialized description of a program's declared types.
//!
//! A snapshot lists assemblies and the types they declare, with base lists and member
//! signatures written as C# type syntax. [`SnapshotModel`] indexes a snapshot and implements
//! the discovery host traits over it, resolving written names the way a C# compiler would
//! for the simple cases: keywords, qualified names, enclosing namespaces, `using`
//! directives and type parameters.
//!
//! ```json
//! { "assemblies": [ { "name": "App", "types": [
//!     { "kind": "class", "namespace": "App", "name": "ChatHub",
//!       "usings": ["Microsoft.AspNetCore.SignalR"],
//!       "base_list": ["Hub<IChatClient>", "IChatServer"] }
//! ] } ] }
//! ```

mod symbol;

use std::collections::HashMap;

use hubbridge_syntax::TypeSyntax;
use serde::{Deserialize, Serialize};

use crate::discovery::{DeclarationKind, DeclarationSyntax, SemanticModel};

pub use symbol::Symbol;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    pub assemblies: Vec<AssemblyDecl>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssemblyDecl {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

/// Declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
    pub kind: DeclarationKind,
    /// Dotted namespace, empty for the global namespace
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    /// Namespaces imported with `using` in the declaring file
    #[serde(default)]
    pub usings: Vec<String>,
    #[serde(default)]
    pub base_list: Vec<TypeSyntax>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

impl TypeDecl {
    fn key(&self) -> TypeKey {
        TypeKey::new(&self.namespace, &self.name, self.type_parameters.len())
    }
}

impl DeclarationSyntax for TypeDecl {
    fn kind(&self) -> DeclarationKind {
        self.kind
    }

    fn base_list(&self) -> &[TypeSyntax] {
        &self.base_list
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberDecl {
    Method(MethodDecl),
    Property(PropertyDecl),
    Event(PropertyDecl),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default = "void")]
    pub returns: TypeSyntax,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
}

fn void() -> TypeSyntax {
    TypeSyntax::Predefined("void".into())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeSyntax,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeSyntax,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid namespace `{namespace}`: {source}")]
    Syntax {
        namespace: String,
        source: hubbridge_syntax::Error,
    },

    /// Two declarations share namespace, name and arity.
    #[error("type `{0}` is declared more than once")]
    DuplicateType(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TypeKey {
    namespace: String,
    name: String,
    arity: usize,
}

impl TypeKey {
    fn new(namespace: &str, name: &str, arity: usize) -> Self {
        Self {
            namespace: namespace.to_owned(),
            name: name.to_owned(),
            arity,
        }
    }
}

/// Indexed snapshot, implementing [`SemanticModel`].
#[derive(Debug)]
pub struct SnapshotModel {
    snapshot: Snapshot,
    /// (assembly, type) positions by full name and arity
    index: HashMap<TypeKey, (usize, usize)>,
}

impl SnapshotModel {
    pub fn new(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        let mut index = HashMap::new();

        for (a, assembly) in snapshot.assemblies.iter().enumerate() {
            for (t, decl) in assembly.types.iter().enumerate() {
                for namespace in std::iter::once(&decl.namespace).chain(&decl.usings) {
                    validate_namespace(namespace)?;
                }

                if index.insert(decl.key(), (a, t)).is_some() {
                    return Err(SnapshotError::DuplicateType(full_name(decl)));
                }
            }
        }

        Ok(Self { snapshot, index })
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Self::new(Snapshot::from_json(json)?)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Every declaration, in assembly order.
    pub fn candidates(&self) -> impl Iterator<Item = &TypeDecl> {
        self.snapshot
            .assemblies
            .iter()
            .flat_map(|assembly| assembly.types.iter())
    }

    fn lookup(&self, namespace: &str, name: &str, arity: usize) -> Option<(&str, &TypeDecl)> {
        let &(a, t) = self.index.get(&TypeKey::new(namespace, name, arity))?;
        let assembly = self.snapshot.assemblies.get(a)?;

        Some((&assembly.name, assembly.types.get(t)?))
    }
}

impl SemanticModel for SnapshotModel {
    type Node = TypeDecl;
    type Symbol<'m> = Symbol<'m>;

    fn declared_symbol<'m>(&'m self, node: &TypeDecl) -> Option<Symbol<'m>> {
        let (assembly, decl) = self.lookup(&node.namespace, &node.name, node.type_parameters.len())?;
        Some(Symbol::declared(self, assembly, decl, vec![]))
    }
}

fn validate_namespace(namespace: &str) -> Result<(), SnapshotError> {
    if namespace.is_empty() {
        return Ok(());
    }

    TypeSyntax::parse(namespace)
        .map(drop)
        .map_err(|source| SnapshotError::Syntax {
            namespace: namespace.to_owned(),
            source,
        })
}

fn full_name(decl: &TypeDecl) -> String {
    let mut name = if decl.namespace.is_empty() {
        decl.name.clone()
    } else {
        format!("{}.{}", decl.namespace, decl.name)
    };

    if !decl.type_parameters.is_empty() {
        name.push('<');
        name.push_str(&decl.type_parameters.join(", "));
        name.push('>');
    }

    name
}
