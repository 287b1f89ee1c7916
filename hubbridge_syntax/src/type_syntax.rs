use std::fmt::Display;
use std::str::FromStr;

use crate::keywords;

type Result<T> = std::result::Result<T, Error>;

/// Deepest accepted type expression, counting every name, type argument list,
/// qualifier and suffix on the way down.
pub const MAX_NESTING: usize = 128;

/// A C# type as written in source, before any name resolution.
///
/// The shape follows the compiler's own syntax nodes: a dotted name is a left-nested
/// chain of [`TypeSyntax::Qualified`] whose right side is always a simple or generic
/// name, and `global::` is an alias qualifier on the left-most name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSyntax {
    /// Built-in type keyword (`int`, `string`, `void`).
    Predefined(String),
    /// Simple name (`ITestClient`).
    Identifier(String),
    /// Generic name (`Hub<ITestClient>`).
    Generic {
        identifier: String,
        arguments: Vec<TypeSyntax>,
    },
    /// Dotted name (`System.DateTime`).
    Qualified {
        left: Box<TypeSyntax>,
        right: Box<TypeSyntax>,
    },
    /// Alias qualified name (`global::System`).
    AliasQualified { alias: String, name: Box<TypeSyntax> },
    /// Array (`string[]`, `int[,]`).
    Array { element: Box<TypeSyntax>, rank: usize },
    /// Nullable type (`int?`).
    Nullable(Box<TypeSyntax>),
}

impl TypeSyntax {
    /// Parse a type expression. Surrounding and inner whitespace is ignored.
    pub fn parse(expr: &str) -> Result<Self> {
        let mut parser = Parser {
            src: expr,
            pos: 0,
            open_arguments: 0,
        };
        let (ty, _) = parser.ty()?;

        parser.skip_ws();
        match parser.peek() {
            None => Ok(ty),
            Some(found) => Err(Error::UnexpectedChar {
                found,
                offset: parser.pos,
            }),
        }
    }

    /// The right-most simple or generic name of a (possibly qualified) name.
    ///
    /// `Microsoft.AspNetCore.SignalR.Hub<T>` and `global::Hub<T>` both yield `Hub<T>`.
    pub fn rightmost(&self) -> &TypeSyntax {
        match self {
            Self::Qualified { right, .. } => right,
            Self::AliasQualified { name, .. } => name,
            other => other,
        }
    }

    /// Check, if the right-most name is a generic name with given identifier.
    pub fn is_generic_name(&self, identifier: &str) -> bool {
        matches!(
            self.rightmost(),
            Self::Generic { identifier: id, .. } if id == identifier
        )
    }

    /// Get the name path of an identifier, generic or qualified name.
    ///
    /// Returns `None` for keywords, arrays and nullable types.
    pub fn path(&self) -> Option<QualifiedPath<'_>> {
        let mut namespace = vec![];
        let alias = collect_qualifiers(self, &mut namespace)?;
        let name = NameSegment::of(self.rightmost())?;

        // The right-most name was collected along with the qualifiers.
        namespace.pop();

        Some(QualifiedPath {
            alias,
            namespace,
            name,
        })
    }
}

fn collect_qualifiers<'a>(ty: &'a TypeSyntax, out: &mut Vec<&'a str>) -> Option<Option<&'a str>> {
    match ty {
        TypeSyntax::Identifier(identifier) | TypeSyntax::Generic { identifier, .. } => {
            out.push(identifier);
            Some(None)
        }
        TypeSyntax::AliasQualified { alias, name } => {
            collect_qualifiers(name, out)?;
            Some(Some(alias))
        }
        TypeSyntax::Qualified { left, right } => {
            let alias = collect_qualifiers(left, out)?;
            collect_qualifiers(right, out)?;
            Some(alias)
        }
        _ => None,
    }
}

/// Name path of a type, split into qualifier and the named segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedPath<'a> {
    /// Alias qualifier (`global`), if written.
    pub alias: Option<&'a str>,
    /// Qualifying identifiers, outermost first.
    pub namespace: Vec<&'a str>,
    /// The named (right-most) segment.
    pub name: NameSegment<'a>,
}

impl QualifiedPath<'_> {
    /// Check, if the name was written with any qualifier.
    pub fn is_qualified(&self) -> bool {
        self.alias.is_some() || !self.namespace.is_empty()
    }

    /// Dot-joined qualifier (`System.Collections.Generic`).
    pub fn qualifier(&self) -> String {
        self.namespace.join(".")
    }
}

/// A simple or generic name segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSegment<'a> {
    pub identifier: &'a str,
    pub arguments: &'a [TypeSyntax],
}

impl<'a> NameSegment<'a> {
    fn of(ty: &'a TypeSyntax) -> Option<Self> {
        match ty {
            TypeSyntax::Identifier(identifier) => Some(Self {
                identifier,
                arguments: &[],
            }),
            TypeSyntax::Generic {
                identifier,
                arguments,
            } => Some(Self {
                identifier,
                arguments,
            }),
            _ => None,
        }
    }
}

impl Display for TypeSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Predefined(keyword) => f.write_str(keyword),
            Self::Identifier(identifier) => f.write_str(identifier),
            Self::Generic {
                identifier,
                arguments,
            } => {
                write!(f, "{identifier}<")?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            Self::Qualified { left, right } => write!(f, "{left}.{right}"),
            Self::AliasQualified { alias, name } => write!(f, "{alias}::{name}"),
            Self::Array { element, rank } => {
                write!(f, "{element}[{}]", ",".repeat(rank.saturating_sub(1)))
            }
            Self::Nullable(inner) => write!(f, "{inner}?"),
        }
    }
}

impl FromStr for TypeSyntax {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TypeSyntax {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TypeSyntax {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let expr = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::parse(&expr).map_err(|err| {
            serde::de::Error::custom(format_args!("invalid type syntax `{expr}`: {err}"))
        })
    }
}

/// An error type for parsing type syntax.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unexpected end of type expression")]
    UnexpectedEnd,
    #[error("unexpected `{found}` at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },
    /// A name was expected, but something else was found.
    #[error("expected an identifier at offset {offset}")]
    ExpectedIdentifier { offset: usize },
    /// `<>` with nothing in between.
    #[error("empty type argument list at offset {offset}")]
    EmptyTypeArguments { offset: usize },
    /// Nesting beyond [`MAX_NESTING`].
    #[error("type expression nests deeper than {MAX_NESTING} levels at offset {offset}")]
    TooDeep { offset: usize },
}

/// Parsed node and the height of its tree.
type Node = (TypeSyntax, usize);

struct Parser<'s> {
    src: &'s str,
    pos: usize,
    /// Unclosed `<` before the current position
    open_arguments: usize,
}

impl<'s> Parser<'s> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn eat(&mut self, ch: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, s: &str) -> bool {
        self.skip_ws();
        if self.src[self.pos..].starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, ch: char) -> Result<()> {
        if self.eat(ch) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn unexpected(&self) -> Error {
        match self.peek() {
            Some(found) => Error::UnexpectedChar {
                found,
                offset: self.pos,
            },
            None => Error::UnexpectedEnd,
        }
    }

    fn identifier(&mut self) -> Result<&'s str> {
        self.skip_ws();
        let start = self.pos;
        let rest = &self.src[start..];
        let mut chars = rest.char_indices();

        match chars.next() {
            Some((_, ch)) if ch == '@' || ch == '_' || ch.is_alphabetic() => {}
            Some(_) => return Err(Error::ExpectedIdentifier { offset: start }),
            None => return Err(Error::UnexpectedEnd),
        }

        let len = chars
            .find(|(_, ch)| !(ch.is_alphanumeric() || *ch == '_'))
            .map_or(rest.len(), |(i, _)| i);

        self.pos += len;
        Ok(&rest[..len])
    }

    /// Height of a node wrapping a subtree of `height`.
    fn wrap(&self, height: usize, offset: usize) -> Result<usize> {
        if height >= MAX_NESTING {
            return Err(Error::TooDeep { offset });
        }
        Ok(height + 1)
    }

    fn ty(&mut self) -> Result<Node> {
        let (mut ty, mut height) = self.name()?;

        loop {
            let offset = self.pos;
            if self.eat('?') {
                ty = TypeSyntax::Nullable(Box::new(ty));
            } else if self.eat('[') {
                let mut rank = 1;
                while self.eat(',') {
                    rank += 1;
                }
                self.expect(']')?;
                ty = TypeSyntax::Array {
                    element: Box::new(ty),
                    rank,
                };
            } else {
                return Ok((ty, height));
            }
            height = self.wrap(height, offset)?;
        }
    }

    fn name(&mut self) -> Result<Node> {
        let identifier = self.identifier()?;

        if keywords::is_keyword(identifier) {
            return Ok((TypeSyntax::Predefined(identifier.to_owned()), 1));
        }

        let offset = self.pos;
        let (mut ty, mut height) = if self.eat_str("::") {
            let (name, height) = self.simple_name()?;
            let ty = TypeSyntax::AliasQualified {
                alias: identifier.to_owned(),
                name: Box::new(name),
            };
            (ty, self.wrap(height, offset)?)
        } else {
            self.type_arguments(identifier)?
        };

        loop {
            let offset = self.pos;
            if !self.eat('.') {
                return Ok((ty, height));
            }

            let (right, right_height) = self.simple_name()?;
            ty = TypeSyntax::Qualified {
                left: Box::new(ty),
                right: Box::new(right),
            };
            height = self.wrap(height.max(right_height), offset)?;
        }
    }

    fn simple_name(&mut self) -> Result<Node> {
        let identifier = self.identifier()?;
        self.type_arguments(identifier)
    }

    fn type_arguments(&mut self, identifier: &str) -> Result<Node> {
        if !self.eat('<') {
            return Ok((TypeSyntax::Identifier(identifier.to_owned()), 1));
        }

        let offset = self.pos;
        if self.eat('>') {
            return Err(Error::EmptyTypeArguments { offset });
        }

        // Arguments are parsed recursively, so the bound applies before descending.
        if self.open_arguments >= MAX_NESTING {
            return Err(Error::TooDeep { offset });
        }
        self.open_arguments += 1;

        let mut arguments = vec![];
        let mut height = 0;
        loop {
            let (argument, argument_height) = self.ty()?;
            arguments.push(argument);
            height = height.max(argument_height);

            if !self.eat(',') {
                break;
            }
        }
        self.expect('>')?;
        self.open_arguments -= 1;

        let ty = TypeSyntax::Generic {
            identifier: identifier.to_owned(),
            arguments,
        };
        Ok((ty, self.wrap(height, offset)?))
    }
}
