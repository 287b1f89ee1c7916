use hubbridge::{Cancellation, GenerateError, GeneratorOptions, SnapshotModel};
use rstest::rstest;
use serde_json::Value;

use crate::*;

fn test_hub(name: &str) -> Value {
    class("Test", name, &["Hub<ITestClient>", "ITestServer"])
}

fn with_contracts(extra: Vec<Value>) -> String {
    let mut types = test_contracts();
    types.extend(extra);
    snapshot(types)
}

#[test]
fn test_output_is_deterministic() {
    let json = with_contracts(vec![test_hub("TestHub"), test_hub("OtherHub")]);

    assert_eq!(generate(&json).source, generate(&json).source);
}

#[test]
fn test_hubs_keep_declaration_order() {
    let generated = generate(&with_contracts(vec![test_hub("ZetaHub"), test_hub("AlphaHub")]));
    let text = &generated.source.text;

    assert!(text.starts_with("// <auto-generated />\n// 2 hubs found\n"));

    let names: Vec<_> = generated
        .discovery
        .hubs
        .iter()
        .map(|hub| hub.bridge_type.name())
        .collect();
    assert_eq!(names, ["ZetaHub", "AlphaHub"]);

    let zeta = text.find("public partial class ZetaHub").unwrap();
    let alpha = text.find("public partial class AlphaHub").unwrap();
    assert!(zeta < alpha);
}

#[rstest]
#[case::local_hub_base(vec![
    serde_json::json!({ "kind": "class", "namespace": "Test", "name": "Hub", "type_parameters": ["T"] }),
    test_hub("TestHub"),
])]
#[case::no_interface(vec![
    serde_json::json!({ "kind": "class", "namespace": "Test", "name": "Service" }),
    class("Test", "TestHub", &["Hub<ITestClient>", "Service"]),
])]
#[case::two_interfaces(vec![
    class("Test", "TestHub", &["Hub<ITestClient>", "ITestServer", "ITestClient"]),
])]
#[case::interface_declaration(vec![
    serde_json::json!({ "kind": "interface", "namespace": "Test", "name": "ITestHub",
                        "usings": [SIGNALR], "base_list": ["Hub<ITestClient>", "ITestServer"] }),
])]
#[case::non_generic_hub(vec![
    class("Test", "TestHub", &["Hub", "ITestServer"]),
])]
#[case::type_parameter_client(vec![
    serde_json::json!({ "kind": "class", "namespace": "Test", "name": "TestHub", "type_parameters": ["TClient"],
                        "usings": [SIGNALR], "base_list": ["Hub<TClient>", "ITestServer"] }),
])]
fn test_not_a_hub(#[case] types: Vec<Value>) {
    let generated = generate(&with_contracts(types));

    assert!(generated.discovery.hubs.is_empty());
    assert!(generated.discovery.failures.is_empty());
    assert!(generated.source.text.ends_with("// 0 hubs found\n"));
}

#[test]
fn test_configured_hub_assembly() {
    let json = with_contracts(vec![test_hub("TestHub")]);
    let options = GeneratorOptions {
        hub_assembly: "Other.Assembly".into(),
        ..Default::default()
    };

    assert!(generate_with(&json, &options).discovery.hubs.is_empty());
}

#[test]
fn test_to_server_context_fields_come_first() {
    let text = generate(&with_contracts(vec![test_hub("TestHub")])).source.text;

    assert!(text.contains(
        "public record SayBye(string ConnectionId, string UserIdentifier, global::System.Security.Claims.ClaimsPrincipal User, global::System.String Name)"
    ));
    assert!(text.contains("public record SayHello(string ConnectionId, global::System.String Name)"));
}

#[test]
fn test_every_message_has_all_variants() {
    let text = generate(&with_contracts(vec![test_hub("TestHub")])).source.text;

    let records = text.matches("public record ").count();
    assert_eq!(records, 4);

    for variant in [
        "All", "AllExcept", "Client", "Clients", "Group", "Groups", "GroupExcept", "User", "Users",
    ] {
        let signature = format!(" CallOn{variant}(");
        assert_eq!(text.matches(&signature).count(), records, "{variant}");
    }
}

#[test]
fn test_dispatcher_path_prefix() {
    let options = GeneratorOptions {
        dispatcher_path_prefix: "/user/hubs/".into(),
        ..Default::default()
    };

    let text = generate_with(&with_contracts(vec![test_hub("TestHub")]), &options)
        .source
        .text;

    assert!(text.contains("HubDispatcherActorSelection = \"/user/hubs/testhub\";"));
}

#[test]
fn test_deep_generics_fail_only_their_candidate() {
    let depth = hubbridge::discovery::MAX_GENERIC_DEPTH + 1;
    let deep = format!(
        "{}int{}",
        "System.Collections.Generic.List<".repeat(depth),
        ">".repeat(depth)
    );

    let json = with_contracts(vec![
        interface(
            "Test",
            "IDeepServer",
            vec![method("Load", TASK, &[("items", deep.as_str())])],
        ),
        class("Test", "DeepHub", &["Hub<ITestClient>", "IDeepServer"]),
        test_hub("TestHub"),
    ]);

    let generated = generate(&json);

    assert_eq!(generated.discovery.hubs.len(), 1);
    assert_eq!(generated.discovery.hubs[0].bridge_type.name(), "TestHub");

    let [failure] = generated.discovery.failures.as_slice() else {
        panic!("expected one failure, got {:?}", generated.discovery.failures);
    };
    assert!(failure.candidate.contains("DeepHub"));
    assert!(matches!(failure.error, GenerateError::GenericRecursion { .. }));

    assert!(generated.source.text.contains("// 1 hub found\n"));
    assert!(!generated.source.text.contains("DeepHub"));
}

#[test]
fn test_cancelled_run_returns_no_document() {
    let model = SnapshotModel::from_json(&with_contracts(vec![test_hub("TestHub")])).unwrap();
    let cancellation = Cancellation::new();
    cancellation.cancel();

    let result = hubbridge::generate(
        &model,
        model.candidates(),
        &GeneratorOptions::default(),
        &cancellation,
    );

    assert_eq!(result, Err(GenerateError::Cancelled));
}

#[test]
fn test_crlf_line_endings() {
    let options = GeneratorOptions {
        newline: hubbridge::LineEnding::CrLf,
        ..Default::default()
    };

    let text = generate_with(&with_contracts(vec![test_hub("TestHub")]), &options)
        .source
        .text;

    assert!(text.starts_with("// <auto-generated />\r\n// 1 hub found\r\n\r\nnamespace Test\r\n"));
    assert!(!text.replace("\r\n", "").contains('\n'));
}
