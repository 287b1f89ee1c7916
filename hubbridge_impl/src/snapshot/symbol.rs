use hubbridge_syntax::{keywords, TypeSyntax};

use super::{MemberDecl, SnapshotModel, TypeDecl};
use crate::discovery::{DeclarationKind, Member, MethodSymbol, ParameterSymbol, TypeSymbol};

/// Type resolved against a [`SnapshotModel`].
#[derive(Debug, Clone)]
pub struct Symbol<'m> {
    model: &'m SnapshotModel,
    kind: SymbolKind<'m>,
}

#[derive(Debug, Clone)]
enum SymbolKind<'m> {
    /// Declared in the snapshot
    Declared {
        assembly: &'m str,
        decl: &'m TypeDecl,
        arguments: Vec<Symbol<'m>>,
    },
    /// Referenced, but not declared in the snapshot
    External {
        namespace: String,
        name: String,
        arguments: Vec<Symbol<'m>>,
    },
    TypeParameter(String),
    Array {
        element: Box<Symbol<'m>>,
        rank: usize,
    },
}

impl<'m> Symbol<'m> {
    pub(super) fn declared(
        model: &'m SnapshotModel,
        assembly: &'m str,
        decl: &'m TypeDecl,
        arguments: Vec<Symbol<'m>>,
    ) -> Self {
        Self {
            model,
            kind: SymbolKind::Declared {
                assembly,
                decl,
                arguments,
            },
        }
    }

    /// Named type by full name, declared or external.
    fn named(model: &'m SnapshotModel, namespace: &str, name: &str, arguments: Vec<Symbol<'m>>) -> Self {
        match model.lookup(namespace, name, arguments.len()) {
            Some((assembly, decl)) => Self::declared(model, assembly, decl, arguments),
            None => Self {
                model,
                kind: SymbolKind::External {
                    namespace: namespace.to_owned(),
                    name: name.to_owned(),
                    arguments,
                },
            },
        }
    }

    /// Resolve a type as written inside `scope`.
    fn resolve(model: &'m SnapshotModel, syntax: &TypeSyntax, scope: &'m TypeDecl) -> Self {
        match syntax {
            TypeSyntax::Predefined(keyword) => {
                let name = keywords::keyword_type(keyword).unwrap_or(keyword.as_str());
                Self::named(model, keywords::SYSTEM, name, vec![])
            }
            TypeSyntax::Array { element, rank } => Self {
                model,
                kind: SymbolKind::Array {
                    element: Box::new(Self::resolve(model, element, scope)),
                    rank: *rank,
                },
            },
            TypeSyntax::Nullable(inner) => {
                let inner = Self::resolve(model, inner, scope);
                if inner.is_value_type() {
                    Self::named(model, keywords::SYSTEM, "Nullable", vec![inner])
                } else {
                    // Nullable reference annotations don't change the type.
                    inner
                }
            }
            _ => Self::resolve_name(model, syntax, scope),
        }
    }

    fn resolve_name(model: &'m SnapshotModel, syntax: &TypeSyntax, scope: &'m TypeDecl) -> Self {
        let Some(path) = syntax.path() else {
            return Self::named(model, "", &syntax.to_string(), vec![]);
        };

        let name = path.name.identifier.trim_start_matches('@');
        let arguments: Vec<_> = path
            .name
            .arguments
            .iter()
            .map(|arg| Self::resolve(model, arg, scope))
            .collect();
        let arity = arguments.len();

        if arity == 0 && !path.is_qualified() && scope.type_parameters.iter().any(|p| p == name) {
            return Self {
                model,
                kind: SymbolKind::TypeParameter(name.to_owned()),
            };
        }

        let written = path.qualifier();

        // Innermost namespace first, then its parents and the global namespace.
        // Usings of the compilation unit come last.
        let namespaces: Vec<String> = if path.alias.is_some() {
            vec![written.clone()]
        } else if path.is_qualified() {
            enclosing(&scope.namespace)
                .map(|outer| format!("{outer}.{written}"))
                .chain(std::iter::once(written.clone()))
                .collect()
        } else {
            enclosing(&scope.namespace)
                .map(str::to_owned)
                .chain(std::iter::once(String::new()))
                .chain(scope.usings.iter().cloned())
                .collect()
        };

        let resolved = namespaces
            .iter()
            .find_map(|namespace| model.lookup(namespace, name, arity));

        if let Some((assembly, decl)) = resolved {
            return Self::declared(model, assembly, decl, arguments);
        }

        Self {
            model,
            kind: SymbolKind::External {
                namespace: written,
                name: name.to_owned(),
                arguments,
            },
        }
    }

    fn is_value_type(&self) -> bool {
        match &self.kind {
            SymbolKind::Declared { decl, .. } => decl.kind == DeclarationKind::Struct,
            SymbolKind::External { namespace, name, .. } => keywords::is_framework_struct(namespace, name),
            _ => false,
        }
    }

    /// Check, if this resolves to an interface. Undeclared types are judged by the
    /// `I` prefix naming convention (`IDisposable`).
    fn is_interface(&self) -> bool {
        match &self.kind {
            SymbolKind::Declared { decl, .. } => decl.kind == DeclarationKind::Interface,
            SymbolKind::External { name, .. } => {
                let mut chars = name.chars();
                chars.next() == Some('I') && chars.next().is_some_and(char::is_uppercase)
            }
            _ => false,
        }
    }

    fn declaration(&self) -> Option<&'m TypeDecl> {
        match self.kind {
            SymbolKind::Declared { decl, .. } => Some(decl),
            _ => None,
        }
    }

    fn resolved_bases(&self) -> Vec<Symbol<'m>> {
        let Some(decl) = self.declaration() else {
            return vec![];
        };

        decl.base_list
            .iter()
            .map(|base| Self::resolve(self.model, base, decl))
            .collect()
    }
}

/// `A.B.C` yields `A.B.C`, `A.B`, `A`.
fn enclosing(namespace: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(namespace).filter(|ns| !ns.is_empty());

    std::iter::from_fn(move || {
        let current = rest?;
        rest = current.rfind('.').map(|dot| &current[..dot]);
        Some(current)
    })
}

impl<'m> TypeSymbol for Symbol<'m> {
    fn name(&self) -> &str {
        match &self.kind {
            SymbolKind::Declared { decl, .. } => &decl.name,
            SymbolKind::External { name, .. } => name,
            SymbolKind::TypeParameter(name) => name,
            SymbolKind::Array { element, .. } => element.name(),
        }
    }

    fn namespace(&self) -> String {
        match &self.kind {
            SymbolKind::Declared { decl, .. } => decl.namespace.clone(),
            SymbolKind::External { namespace, .. } => namespace.clone(),
            SymbolKind::TypeParameter(_) => String::new(),
            SymbolKind::Array { element, .. } => element.namespace(),
        }
    }

    fn assembly(&self) -> Option<&str> {
        match &self.kind {
            SymbolKind::Declared { assembly, .. } => Some(assembly),
            _ => None,
        }
    }

    fn display(&self) -> String {
        match &self.kind {
            SymbolKind::TypeParameter(name) => name.clone(),
            SymbolKind::Array { element, rank } => {
                format!("{}[{}]", element.display(), ",".repeat(rank.saturating_sub(1)))
            }
            _ => {
                let arguments = self.type_arguments();
                if arguments.is_empty() {
                    if let Some(keyword) = keywords::type_keyword(&self.namespace(), self.name()) {
                        return keyword.to_owned();
                    }
                    return self.name().to_owned();
                }

                let arguments: Vec<_> = arguments.iter().map(Symbol::display).collect();
                format!("{}<{}>", self.name(), arguments.join(", "))
            }
        }
    }

    fn is_named_type(&self) -> bool {
        matches!(
            self.kind,
            SymbolKind::Declared { .. } | SymbolKind::External { .. }
        )
    }

    fn array_element(&self) -> Option<(Self, usize)> {
        match &self.kind {
            SymbolKind::Array { element, rank } => Some((element.as_ref().clone(), *rank)),
            _ => None,
        }
    }

    fn type_parameters(&self) -> Vec<String> {
        match &self.kind {
            SymbolKind::Declared { decl, .. } => decl.type_parameters.clone(),
            SymbolKind::External { arguments, .. } => {
                (1..=arguments.len()).map(|i| format!("T{i}")).collect()
            }
            _ => vec![],
        }
    }

    fn type_arguments(&self) -> Vec<Self> {
        match &self.kind {
            SymbolKind::Declared { arguments, .. } | SymbolKind::External { arguments, .. } => {
                arguments.clone()
            }
            _ => vec![],
        }
    }

    fn base_type(&self) -> Option<Self> {
        let decl = self.declaration()?;
        if matches!(decl.kind, DeclarationKind::Interface | DeclarationKind::Struct) {
            return None;
        }

        self.resolved_bases()
            .into_iter()
            .next()
            .filter(|first| !first.is_interface())
    }

    fn interfaces(&self) -> Vec<Self> {
        let mut bases = self.resolved_bases();

        if self.base_type().is_some() {
            bases.remove(0);
        }

        bases.retain(|base| base.is_interface());
        bases
    }

    fn members(&self) -> Vec<Member<Self>> {
        let Some(decl) = self.declaration() else {
            return vec![];
        };
        let resolve = |syntax: &TypeSyntax| Self::resolve(self.model, syntax, decl);

        decl.members
            .iter()
            .map(|member| match member {
                MemberDecl::Method(method) => Member::Method(MethodSymbol {
                    name: method.name.clone(),
                    return_type: resolve(&method.returns),
                    parameters: method
                        .parameters
                        .iter()
                        .map(|param| ParameterSymbol {
                            name: param.name.clone(),
                            ty: resolve(&param.ty),
                        })
                        .collect(),
                }),
                MemberDecl::Property(property) | MemberDecl::Event(property) => {
                    Member::Other(property.name.clone())
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::discovery::SemanticModel;

    const SNAPSHOT: &str = r#"{ "assemblies": [
        { "name": "Lib", "types": [
            { "kind": "class", "namespace": "Lib.Core", "name": "Base" },
            { "kind": "struct", "namespace": "Lib.Core", "name": "Point" },
            { "kind": "interface", "namespace": "Lib", "name": "IShared" },
            { "kind": "interface", "namespace": "Lib", "name": "ILocal" },
            { "kind": "class", "namespace": "Lib.Core", "name": "Shared" },
            { "kind": "class", "namespace": "", "name": "Everywhere" },
            { "kind": "class", "namespace": "", "name": "Shared" },
            { "kind": "interface", "namespace": "", "name": "Helper" }
        ] },
        { "name": "App", "types": [
            { "kind": "class", "namespace": "App.Feature", "name": "Widget", "type_parameters": ["T"],
              "usings": ["Lib.Core"],
              "base_list": ["Base", "Lib.IShared", "IDisposable"],
              "members": [
                  { "method": { "name": "Use", "returns": "T", "parameters": [
                      { "name": "point", "type": "Point?" },
                      { "name": "count", "type": "int?" },
                      { "name": "text", "type": "string?" }
                  ] } },
                  { "event": { "name": "Changed", "type": "System.EventHandler" } }
              ] },
            { "kind": "interface", "namespace": "App", "name": "Helper" },
            { "kind": "interface", "namespace": "App.Lib", "name": "ILocal" }
        ] }
    ] }"#;

    fn model() -> SnapshotModel {
        SnapshotModel::from_json(SNAPSHOT).unwrap()
    }

    fn widget(model: &SnapshotModel) -> Symbol<'_> {
        let node = model.candidates().find(|decl| decl.name == "Widget").unwrap();
        model.declared_symbol(node).unwrap()
    }

    fn resolve_in_widget<'m>(model: &'m SnapshotModel, expr: &str) -> Symbol<'m> {
        let node = model.candidates().find(|decl| decl.name == "Widget").unwrap();
        Symbol::resolve(model, &expr.parse::<TypeSyntax>().unwrap(), node)
    }

    #[rstest]
    #[case("Base", "Lib.Core", Some("Lib"))]
    #[case::enclosing_shadows_global("Helper", "App", Some("App"))]
    #[case("Everywhere", "", Some("Lib"))]
    #[case::global_shadows_using("Shared", "", Some("Lib"))]
    #[case::qualified_under_enclosing("Lib.ILocal", "App.Lib", Some("App"))]
    #[case::alias_skips_enclosing("global::Lib.ILocal", "Lib", Some("Lib"))]
    #[case("Lib.IShared", "Lib", Some("Lib"))]
    #[case("global::Lib.Core.Base", "Lib.Core", Some("Lib"))]
    #[case("Unknown", "", None)]
    #[case("Some.Where.Unknown", "Some.Where", None)]
    #[case("int", "System", None)]
    fn test_resolution(
        #[case] expr: &str,
        #[case] namespace: &str,
        #[case] assembly: Option<&str>,
    ) {
        let model = model();
        let symbol = resolve_in_widget(&model, expr);

        assert_eq!(symbol.namespace(), namespace);
        assert_eq!(symbol.assembly(), assembly);
    }

    #[test]
    fn test_keyword_resolves_to_system_type() {
        let model = model();
        let symbol = resolve_in_widget(&model, "int");

        assert_eq!(symbol.name(), "Int32");
        assert_eq!(symbol.display(), "int");
    }

    #[test]
    fn test_type_parameter() {
        let model = model();
        let symbol = resolve_in_widget(&model, "T");

        assert!(!symbol.is_named_type());
        assert_eq!(symbol.display(), "T");
    }

    #[test]
    fn test_nullable_value_types_only() {
        let model = model();

        assert_eq!(resolve_in_widget(&model, "int?").display(), "Nullable<int>");
        assert_eq!(resolve_in_widget(&model, "Point?").display(), "Nullable<Point>");
        assert_eq!(resolve_in_widget(&model, "string?").display(), "string");
        assert_eq!(
            resolve_in_widget(&model, "System.DateTime?").display(),
            "Nullable<DateTime>"
        );
        assert_eq!(resolve_in_widget(&model, "System.Guid?").display(), "Nullable<Guid>");
        assert_eq!(resolve_in_widget(&model, "System.Uri?").display(), "Uri");
    }

    #[test]
    fn test_type_parameter_shadows_types() {
        let model = SnapshotModel::from_json(
            r#"{ "assemblies": [ { "name": "A", "types": [
                { "kind": "class", "name": "T" },
                { "kind": "class", "name": "Box", "type_parameters": ["T"] }
            ] } ] }"#,
        )
        .unwrap();
        let node = model.candidates().find(|decl| decl.name == "Box").unwrap();
        let symbol = Symbol::resolve(&model, &TypeSyntax::parse("T").unwrap(), node);

        assert!(!symbol.is_named_type());
    }

    #[test]
    fn test_generic_external() {
        let model = model();
        let symbol = resolve_in_widget(&model, "System.Collections.Generic.List<Base>[]");

        let (element, rank) = symbol.array_element().unwrap();
        assert_eq!(rank, 1);
        assert_eq!(element.namespace(), "System.Collections.Generic");
        assert_eq!(element.type_parameters().len(), 1);
        assert_eq!(symbol.display(), "List<Base>[]");
    }

    #[test]
    fn test_base_type_and_interfaces() {
        let model = model();
        let widget = widget(&model);

        assert_eq!(widget.base_type().unwrap().name(), "Base");

        let interfaces: Vec<_> = widget.interfaces().iter().map(|i| i.display()).collect();
        assert_eq!(interfaces, ["IShared", "IDisposable"]);
    }

    #[test]
    fn test_interface_first_is_not_base_type() {
        let model = SnapshotModel::from_json(
            r#"{ "assemblies": [ { "name": "A", "types": [
                { "kind": "interface", "name": "IOne" },
                { "kind": "class", "name": "C", "base_list": ["IOne", "ITwo"] }
            ] } ] }"#,
        )
        .unwrap();
        let node = model.candidates().find(|decl| decl.name == "C").unwrap();
        let symbol = model.declared_symbol(node).unwrap();

        assert!(symbol.base_type().is_none());
        assert_eq!(symbol.interfaces().len(), 2);
    }

    #[test]
    fn test_members() {
        let model = model();
        let members = widget(&model).members();

        assert_eq!(members.len(), 2);
        let Member::Method(method) = &members[0] else {
            panic!("expected a method");
        };
        assert_eq!(method.return_type.display(), "T");
        assert_eq!(method.parameters.len(), 3);
        assert!(matches!(&members[1], Member::Other(name) if name == "Changed"));
    }

    #[test]
    fn test_enclosing_namespaces() {
        assert_eq!(enclosing("A.B.C").collect::<Vec<_>>(), ["A.B.C", "A.B", "A"]);
        assert_eq!(enclosing("").count(), 0);
    }
}
