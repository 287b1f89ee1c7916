//! C# type syntax and built-in type keywords, used by `hubbridge` crate

pub mod keywords;
pub mod type_syntax;

pub use type_syntax::{Error, NameSegment, QualifiedPath, TypeSyntax, MAX_NESTING};

/// Parse a C# type as written in source (`global::System.Collections.Generic.List<string>`,
/// `Hub<ITestClient>`, `int?`, `string[]`).
pub fn parse(expr: &str) -> Result<TypeSyntax, Error> {
    TypeSyntax::parse(expr)
}
