use std::fmt::Display;

use hubbridge_syntax::keywords;
use serde::{Deserialize, Serialize};

/// Resolved, generic-aware reference to a named type.
///
/// Two references are equal when namespace, name and every type argument are
/// equal, recursively. Array types keep their rank suffix on the name
/// (`String[]`), so `System.String[]` and `System.String` stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeRef {
    namespace: String,
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    type_arguments: Vec<TypeRef>,
}

impl TypeRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::generic(namespace, name, vec![])
    }

    pub fn generic(
        namespace: impl Into<String>,
        name: impl Into<String>,
        type_arguments: Vec<TypeRef>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            type_arguments,
        }
    }

    /// Dotted containing namespace, empty for the global namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_arguments(&self) -> &[TypeRef] {
        &self.type_arguments
    }

    pub fn is_generic(&self) -> bool {
        !self.type_arguments.is_empty()
    }

    /// Check, if this is exactly `namespace.name` without type arguments.
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.namespace == namespace && self.name == name && !self.is_generic()
    }

    pub fn is_void(&self) -> bool {
        self.is(keywords::SYSTEM, "Void")
    }

    /// Reference to an array of this type.
    pub fn array_of(&self, rank: usize) -> Self {
        Self {
            namespace: self.namespace.clone(),
            name: format!("{}[{}]", self.name, ",".repeat(rank.saturating_sub(1))),
            type_arguments: self.type_arguments.clone(),
        }
    }

    /// Fully qualified C# name (`global::System.Threading.Tasks.Task<global::System.String>`).
    ///
    /// `System.Void` can't be named in C# and renders as `void`.
    pub fn global_name(&self) -> String {
        self.render(Style::Global)
    }

    /// Like [`global_name`](Self::global_name), but with `{}` around type arguments,
    /// as documentation `cref` attributes require.
    pub fn cref_name(&self) -> String {
        self.render(Style::Cref)
    }

    /// C# keyword for built-in types (`string`, `int[]`), otherwise the fully qualified name.
    pub fn keyword_or_global_name(&self) -> String {
        self.render(Style::Keyword)
    }

    fn render(&self, style: Style) -> String {
        let mut out = String::new();
        self.render_into(style, &mut out);
        out
    }

    fn render_into(&self, style: Style, out: &mut String) {
        let (name, suffix) = split_array_suffix(&self.name);

        let keyword = match style {
            _ if self.is_generic() => None,
            _ if self.is_void() => Some("void"),
            Style::Keyword | Style::Short => keywords::type_keyword(&self.namespace, name),
            _ => None,
        };

        match keyword {
            Some(keyword) => out.push_str(keyword),
            None => {
                if style != Style::Short {
                    out.push_str("global::");
                    if !self.namespace.is_empty() {
                        out.push_str(&self.namespace);
                        out.push('.');
                    }
                }
                out.push_str(name);
                self.render_arguments(style, out);
            }
        }

        out.push_str(suffix);
    }

    fn render_arguments(&self, style: Style, out: &mut String) {
        if !self.is_generic() {
            return;
        }

        let (open, close) = match style {
            Style::Cref => ('{', '}'),
            _ => ('<', '>'),
        };
        let separator = match style {
            Style::Cref => ",",
            _ => ", ",
        };

        out.push(open);
        for (i, arg) in self.type_arguments.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            arg.render_into(style, out);
        }
        out.push(close);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Global,
    Cref,
    Keyword,
    Short,
}

fn split_array_suffix(name: &str) -> (&str, &str) {
    name.split_at(name.find('[').unwrap_or(name.len()))
}

/// Short display form (`Task<string>`), for diagnostics.
impl Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = String::new();
        self.render_into(Style::Short, &mut out);
        f.write_str(&out)
    }
}
