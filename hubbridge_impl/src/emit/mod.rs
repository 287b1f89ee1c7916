//! Rendering of discovered hubs into C# source.

mod bridge;
mod code_writer;
mod csharp;
mod dispatch;

pub use bridge::{render, Direction, GeneratedSource};
pub use code_writer::{CodeWriter, Scope};
pub use csharp::CSharpWriter;
pub use dispatch::DispatchVariant;
