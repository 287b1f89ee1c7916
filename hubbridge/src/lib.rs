//! # `hubbridge`: message-bus bridges for SignalR hubs
//!
//! Writing a SignalR hub that only hands every call over to an actor system is routine:
//! one forwarding method per server call, one message type per call, and a set of helpers
//! to deliver client calls to all connections, a group, a user and so on.
//!
//! `hubbridge` generates all of it from the contracts. A *bridge class* is declared as
//!
//! ```csharp
//! public partial class ChatHub : Hub<IChatClient>, IChatServer { }
//! ```
//!
//! and for each one the generator emits the other half of the partial class:
//!
//! - a constructor taking the `ActorSystem`,
//! - an implementation of every `IChatServer` method, posting a `ToServer` message
//!   to the hub dispatcher actor,
//! - `ToClient` and `ToServer` message records, one per contract method, each with nine
//!   `CallOn*` methods delivering the call through `IHubClients<T>`.
//!
//! ## How does it work
//!
//! Discovery reads the declared types through the [`SemanticModel`](discovery::SemanticModel)
//! family of traits, so any host able to describe declarations can drive it. The crate ships
//! one host, the [declaration snapshot](snapshot), a JSON description of a program's types.
//!
//! ```
//! use hubbridge::GeneratorOptions;
//!
//! let json = r#"{ "assemblies": [
//!     { "name": "Microsoft.AspNetCore.SignalR.Core", "types": [
//!         { "kind": "class", "namespace": "Microsoft.AspNetCore.SignalR", "name": "Hub",
//!           "type_parameters": ["T"] }
//!     ] },
//!     { "name": "Chat", "types": [
//!         { "kind": "interface", "namespace": "Chat", "name": "IChatClient" },
//!         { "kind": "interface", "namespace": "Chat", "name": "IChatServer" },
//!         { "kind": "class", "namespace": "Chat", "name": "ChatHub",
//!           "usings": ["Microsoft.AspNetCore.SignalR"],
//!           "base_list": ["Hub<IChatClient>", "IChatServer"] }
//!     ] }
//! ] }"#;
//!
//! let generated = hubbridge::generate_from_json(json, &GeneratorOptions::default()).unwrap();
//!
//! assert_eq!(generated.discovery.hubs.len(), 1);
//! assert!(generated.source.text.contains("public partial class ChatHub"));
//! ```

pub use hubbridge_impl::discovery::{self, Cancellation, Discovery};
pub use hubbridge_impl::emit::{self, render, GeneratedSource};
pub use hubbridge_impl::model::{self, Hub, Interface, Method, Parameter, TypeRef};
pub use hubbridge_impl::options::{GeneratorOptions, LineEnding, OptionsFile};
pub use hubbridge_impl::snapshot::{self, Snapshot, SnapshotError, SnapshotModel};
pub use hubbridge_impl::{generate, Error as GenerateError, Generated};
pub use serde;
pub use syntax;

/// Errors of the one-call pipeline
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Generate(#[from] hubbridge_impl::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Read a declaration snapshot and generate bridges for all hubs it declares.
pub fn generate_from_json(json: &str, options: &GeneratorOptions) -> Result<Generated> {
    generate_from_snapshot(&SnapshotModel::from_json(json)?, options)
}

/// Generate bridges for all hubs declared in an indexed snapshot.
pub fn generate_from_snapshot(model: &SnapshotModel, options: &GeneratorOptions) -> Result<Generated> {
    Ok(generate(
        model,
        model.candidates(),
        options,
        &Cancellation::new(),
    )?)
}
