use hubbridge::GeneratorOptions;
use insta::assert_snapshot;

use crate::*;

const HEADER_ONLY: &str = "// <auto-generated />\n// 0 hubs found\n";

#[test]
fn test_hub_bridge() {
    let mut types = test_contracts();
    types.push(class("Test", "TestHub", &["Hub<ITestClient>", "ITestServer"]));

    let generated = generate(&snapshot(types));

    assert_eq!(generated.source.hint_name, "HubBridgeGenerator.g.cs");
    assert_snapshot!("test_hub", generated.source.text);
}

#[test]
fn test_global_namespace_keyword_types() {
    let types = vec![
        interface(
            "",
            "IGameClient",
            vec![method("Tick", "void", &[("frame", "long")])],
        ),
        interface(
            "",
            "IGameServer",
            vec![
                method(
                    "Join",
                    "System.Threading.Tasks.Task<bool>",
                    &[("player_name", "string"), ("scores", "int[]")],
                ),
                method("Ping", "System.Threading.Tasks.ValueTask", &[]),
                method("Leave", "void", &[]),
            ],
        ),
        class(
            "",
            "GameHub",
            &["Microsoft.AspNetCore.SignalR.Hub<IGameClient>", "IGameServer"],
        ),
    ];
    let options = GeneratorOptions {
        keyword_types: true,
        ..Default::default()
    };

    let generated = generate_with(&snapshot(types), &options);

    assert_snapshot!("game_hub", generated.source.text);
}

#[test]
fn test_no_declarations() {
    let generated = generate(&snapshot(vec![]));

    assert!(generated.discovery.hubs.is_empty());
    assert_eq!(generated.source.text, HEADER_ONLY);
}

#[test]
fn test_single_base_entry_is_not_a_hub() {
    let mut types = test_contracts();
    types.push(class("Test", "TestHub", &["Hub<ITestClient>"]));

    let generated = generate(&snapshot(types));

    assert_eq!(generated.source.text, HEADER_ONLY);
}

#[test]
fn test_two_type_argument_hub_is_not_a_hub() {
    let mut types = test_contracts();
    types.push(class(
        "Test",
        "TestHub",
        &["Hub<ITestClient, ITestServer>", "ITestServer"],
    ));

    let generated = generate(&snapshot(types));

    assert!(generated.discovery.failures.is_empty());
    assert_eq!(generated.source.text, HEADER_ONLY);
}
