#[cfg(test)]
mod properties;
#[cfg(test)]
mod scenarios;

use serde_json::{json, Value};

pub const HUB_ASSEMBLY: &str = "Microsoft.AspNetCore.SignalR.Core";
pub const SIGNALR: &str = "Microsoft.AspNetCore.SignalR";
pub const TASK: &str = "System.Threading.Tasks.Task";

/// The SignalR assembly, declaring `Hub`, `Hub<T>` and `Hub<T1, T2>`.
pub fn signalr_assembly() -> Value {
    json!({
        "name": HUB_ASSEMBLY,
        "types": [
            { "kind": "class", "namespace": SIGNALR, "name": "Hub" },
            { "kind": "class", "namespace": SIGNALR, "name": "Hub", "type_parameters": ["T"] },
            { "kind": "class", "namespace": SIGNALR, "name": "Hub", "type_parameters": ["T1", "T2"] }
        ]
    })
}

pub fn method(name: &str, returns: &str, parameters: &[(&str, &str)]) -> Value {
    let parameters: Vec<_> = parameters
        .iter()
        .map(|(name, ty)| json!({ "name": name, "type": ty }))
        .collect();

    json!({ "method": { "name": name, "returns": returns, "parameters": parameters } })
}

pub fn interface(namespace: &str, name: &str, members: Vec<Value>) -> Value {
    json!({ "kind": "interface", "namespace": namespace, "name": name, "members": members })
}

/// Class importing the SignalR namespace.
pub fn class(namespace: &str, name: &str, base_list: &[&str]) -> Value {
    json!({
        "kind": "class",
        "namespace": namespace,
        "name": name,
        "usings": [SIGNALR],
        "base_list": base_list
    })
}

/// Snapshot of the SignalR assembly and an `App` assembly declaring `types`.
pub fn snapshot(types: Vec<Value>) -> String {
    json!({
        "assemblies": [
            signalr_assembly(),
            { "name": "App", "types": types }
        ]
    })
    .to_string()
}

/// Client and server contracts of the `Test` namespace.
pub fn test_contracts() -> Vec<Value> {
    vec![
        interface(
            "Test",
            "ITestClient",
            vec![
                method("SayHello", TASK, &[("name", "string")]),
                method(
                    "SayCongratulation",
                    TASK,
                    &[("name", "string"), ("dateOfBirth", "System.DateTime")],
                ),
            ],
        ),
        interface(
            "Test",
            "ITestServer",
            vec![
                method("SayHello", TASK, &[("name", "string")]),
                method("SayBye", TASK, &[("name", "string")]),
            ],
        ),
    ]
}

/// Generate with default options.
pub fn generate(json: &str) -> hubbridge::Generated {
    generate_with(json, &hubbridge::GeneratorOptions::default())
}

pub fn generate_with(json: &str, options: &hubbridge::GeneratorOptions) -> hubbridge::Generated {
    match hubbridge::generate_from_json(json, options) {
        Ok(generated) => generated,
        Err(err) => panic!("generation failed: {err}"),
    }
}
