//! Normalized description of discovered hubs.
//!
//! Built once by discovery and only read by emission.

mod hub;
mod type_ref;

pub use hub::{Hub, Interface, Method, Parameter};
pub use type_ref::TypeRef;
