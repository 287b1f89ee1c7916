use tracing::trace;

use super::{Member, MethodSymbol, SemanticModel, TypeSymbol};
use crate::error::{Error, Result};
use crate::model::{Hub, Interface, Method, Parameter, TypeRef};
use crate::options::GeneratorOptions;

/// Deepest accepted nesting of type arguments. The type itself is at depth 0.
pub const MAX_GENERIC_DEPTH: usize = 10;

/// Verify a syntactic candidate against its resolved symbol and extract both contracts.
///
/// The candidate is a hub if its base type is the hub base class from the configured assembly,
/// with a single type parameter bound to a named type (the client contract), and the candidate
/// implements exactly one interface (the server contract). Anything else is `Ok(None)`.
pub fn extract_hub<M: SemanticModel>(
    model: &M,
    node: &M::Node,
    options: &GeneratorOptions,
) -> Result<Option<Hub>> {
    let Some(symbol) = model.declared_symbol(node) else {
        trace!("Candidate has no declared symbol");
        return Ok(None);
    };

    let Some(base) = symbol.base_type() else {
        return rejected(&symbol, "no base type");
    };

    if base.assembly() != Some(options.hub_assembly.as_str()) {
        return rejected(&symbol, "base type is not from the hub assembly");
    }

    if base.name() != options.hub_base_name {
        return rejected(&symbol, "base type is not the hub base");
    }

    if base.type_parameters().len() != 1 {
        return rejected(&symbol, "hub base doesn't have exactly one type parameter");
    }

    let Ok([client]) = <[_; 1]>::try_from(base.type_arguments()) else {
        return rejected(&symbol, "hub base doesn't have exactly one type argument");
    };

    if !client.is_named_type() {
        return rejected(&symbol, "client contract is not a named type");
    }

    let Ok([server]) = <[_; 1]>::try_from(symbol.interfaces()) else {
        return rejected(&symbol, "doesn't implement exactly one interface");
    };

    Ok(Some(Hub {
        bridge_type: type_ref(&symbol)?,
        client: extract_interface(&client)?,
        server: extract_interface(&server)?,
    }))
}

fn rejected<S: TypeSymbol>(symbol: &S, reason: &str) -> Result<Option<Hub>> {
    trace!("Rejected {}: {}", symbol.display(), reason);
    Ok(None)
}

fn extract_interface<S: TypeSymbol>(symbol: &S) -> Result<Interface> {
    let ty = type_ref(symbol)?;

    let methods = symbol
        .members()
        .into_iter()
        .filter_map(|member| match member {
            Member::Method(method) => Some(method),
            Member::Other(name) => {
                trace!("Skipping non-method member {}.{}", ty, name);
                None
            }
        })
        .map(|method| extract_method(method, &ty))
        .collect::<Result<_>>()?;

    Ok(Interface { ty, methods })
}

fn extract_method<S: TypeSymbol>(method: MethodSymbol<S>, declaring_type: &TypeRef) -> Result<Method> {
    let parameters = method
        .parameters
        .into_iter()
        .map(|param| {
            Ok(Parameter {
                ty: type_ref(&param.ty)?,
                name: param.name,
            })
        })
        .collect::<Result<_>>()?;

    Ok(Method {
        return_type: type_ref(&method.return_type)?,
        name: method.name,
        declaring_type: declaring_type.clone(),
        parameters,
    })
}

pub(crate) fn type_ref<S: TypeSymbol>(symbol: &S) -> Result<TypeRef> {
    type_ref_at(symbol, 0)
}

fn type_ref_at<S: TypeSymbol>(symbol: &S, depth: usize) -> Result<TypeRef> {
    if depth > MAX_GENERIC_DEPTH {
        return Err(Error::GenericRecursion {
            ty: symbol.display(),
            chain: vec![],
        });
    }

    if let Some((element, rank)) = symbol.array_element() {
        return Ok(type_ref_at(&element, depth)?.array_of(rank));
    }

    let type_arguments = symbol
        .type_arguments()
        .iter()
        .map(|arg| type_ref_at(arg, depth + 1).map_err(|err| err.within(symbol.display())))
        .collect::<Result<_>>()?;

    Ok(TypeRef::generic(
        symbol.namespace(),
        symbol.name(),
        type_arguments,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotModel;

    const SIGNALR: &str = r#"{
        "name": "Microsoft.AspNetCore.SignalR.Core",
        "types": [
            { "kind": "class", "namespace": "Microsoft.AspNetCore.SignalR", "name": "Hub", "type_parameters": ["T"] }
        ]
    }"#;

    fn model(app_types: &str) -> SnapshotModel {
        let json = format!(
            r#"{{ "assemblies": [ {SIGNALR}, {{ "name": "App", "types": [ {app_types} ] }} ] }}"#
        );
        SnapshotModel::from_json(&json).unwrap()
    }

    fn extract(model: &SnapshotModel, name: &str) -> Result<Option<Hub>> {
        let node = model.candidates().find(|decl| decl.name == name).unwrap();
        extract_hub(model, node, &GeneratorOptions::default())
    }

    const CONTRACTS: &str = r#"
        { "kind": "interface", "namespace": "App", "name": "IClient", "members": [
            { "method": { "name": "Notify", "returns": "System.Threading.Tasks.Task",
                          "parameters": [ { "name": "text", "type": "string" } ] } },
            { "property": { "name": "Count", "type": "int" } }
        ] },
        { "kind": "interface", "namespace": "App", "name": "IServer", "members": [
            { "method": { "name": "Send", "parameters": [ { "name": "ids", "type": "int[]" } ] } }
        ] }
    "#;

    #[test]
    fn test_extracts_contracts() {
        let model = model(&format!(
            r#"{CONTRACTS}, {{ "kind": "class", "namespace": "App", "name": "ChatHub",
                "usings": ["Microsoft.AspNetCore.SignalR"], "base_list": ["Hub<IClient>", "IServer"] }}"#
        ));

        let hub = extract(&model, "ChatHub").unwrap().unwrap();

        assert_eq!(hub.bridge_type, TypeRef::new("App", "ChatHub"));
        assert_eq!(hub.client.ty, TypeRef::new("App", "IClient"));
        assert_eq!(hub.client.methods.len(), 1);
        assert_eq!(hub.client.methods[0].parameters[0].ty, TypeRef::new("System", "String"));
        assert_eq!(hub.server.methods[0].return_type, TypeRef::new("System", "Void"));
        assert_eq!(
            hub.server.methods[0].parameters[0].ty,
            TypeRef::new("System", "Int32").array_of(1)
        );
        assert_eq!(hub.server.methods[0].declaring_type, hub.server.ty);
    }

    #[test]
    fn test_rejects_hub_from_other_assembly() {
        let model = model(&format!(
            r#"{CONTRACTS},
            {{ "kind": "class", "namespace": "App", "name": "Hub", "type_parameters": ["T"] }},
            {{ "kind": "class", "namespace": "App", "name": "FakeHub", "base_list": ["Hub<IClient>", "IServer"] }}"#
        ));

        assert_eq!(extract(&model, "FakeHub"), Ok(None));
    }

    #[test]
    fn test_rejects_non_named_client() {
        let model = model(&format!(
            r#"{CONTRACTS}, {{ "kind": "class", "namespace": "App", "name": "ArrayHub",
                "base_list": ["Microsoft.AspNetCore.SignalR.Hub<IClient[]>", "IServer"] }}"#
        ));

        assert_eq!(extract(&model, "ArrayHub"), Ok(None));
    }

    fn nested(depth: usize) -> String {
        let mut ty = "int".to_owned();
        for _ in 0..depth {
            ty = format!("System.Collections.Generic.List<{ty}>");
        }
        ty
    }

    fn deep_model(depth: usize) -> SnapshotModel {
        model(&format!(
            r#"{{ "kind": "interface", "namespace": "App", "name": "IClient" }},
            {{ "kind": "interface", "namespace": "App", "name": "IServer", "members": [
                {{ "method": {{ "name": "Deep", "parameters": [ {{ "name": "value", "type": "{}" }} ] }} }}
            ] }},
            {{ "kind": "class", "namespace": "App", "name": "DeepHub",
                "base_list": ["Microsoft.AspNetCore.SignalR.Hub<IClient>", "IServer"] }}"#,
            nested(depth)
        ))
    }

    #[test]
    fn test_generic_depth_limit_accepted() {
        let model = deep_model(MAX_GENERIC_DEPTH);
        assert!(extract(&model, "DeepHub").unwrap().is_some());
    }

    #[test]
    fn test_generic_depth_limit_exceeded() {
        let model = deep_model(MAX_GENERIC_DEPTH + 1);

        let Err(Error::GenericRecursion { ty, chain }) = extract(&model, "DeepHub") else {
            panic!("expected generic recursion error");
        };

        assert_eq!(ty, "int");
        assert_eq!(chain.len(), MAX_GENERIC_DEPTH + 1);
        assert_eq!(chain[0], "List<int>");
    }
}
