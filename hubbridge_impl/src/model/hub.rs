use serde::{Deserialize, Serialize};

use super::TypeRef;

/// Method parameter, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// Contract method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub return_type: TypeRef,
    /// Contract interface declaring this method
    pub declaring_type: TypeRef,
    pub parameters: Vec<Parameter>,
}

impl Method {
    /// Documentation reference to this method (`global::Ns.IContract.Name(global::System.String)`).
    pub fn cref(&self) -> String {
        let parameters = self
            .parameters
            .iter()
            .map(|param| param.ty.cref_name())
            .collect::<Vec<_>>()
            .join(",");

        format!(
            "{}.{}({parameters})",
            self.declaring_type.cref_name(),
            self.name
        )
    }
}

/// Client or server contract of a hub.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interface {
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub methods: Vec<Method>,
}

/// Discovered bridge class with both of its contracts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hub {
    pub bridge_type: TypeRef,
    /// Contract of the calls sent to connected clients
    pub client: Interface,
    /// Contract of the calls received from clients
    pub server: Interface,
}
