use std::collections::HashSet;

use serde::Serialize;

use super::code_writer::CodeWriter;
use super::csharp::CSharpWriter;
use super::dispatch::DispatchVariant;
use crate::model::{Hub, Interface, Method, TypeRef};
use crate::options::GeneratorOptions;

const ACTOR_SYSTEM: &str = "global::Akka.Actor.ActorSystem";
const HUB_CLIENTS: &str = "global::Microsoft.AspNetCore.SignalR.IHubClients";
const TASKS: &str = "System.Threading.Tasks";

/// Generated document, named for the build system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSource {
    pub hint_name: String,
    pub text: String,
}

/// Message family of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToClient,
    ToServer,
}

impl Direction {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::ToClient => "ToClient",
            Self::ToServer => "ToServer",
        }
    }

    /// Connection context carried by every message before the method parameters, as `(type, name)`.
    fn context_fields(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::ToClient => &[("string", "ConnectionId")],
            Self::ToServer => &[
                ("string", "ConnectionId"),
                ("string", "UserIdentifier"),
                ("global::System.Security.Claims.ClaimsPrincipal", "User"),
            ],
        }
    }
}

/// Record property names for the parameters of `method`, in parameter order.
///
/// A parameter name gets its first character upper-cased (`dateOfBirth` -> `DateOfBirth`,
/// `user_id` -> `User_id`). A name already taken by the record itself, a context field or
/// an earlier parameter gets the lowest free numeric suffix (`Name2`).
fn field_names(direction: Direction, method: &Method) -> Vec<String> {
    let mut taken: HashSet<String> = direction
        .context_fields()
        .iter()
        .map(|(_, name)| name.to_string())
        .chain(std::iter::once(method.name.clone()))
        .collect();

    method
        .parameters
        .iter()
        .map(|param| {
            let base = upper_first(param.name.trim_start_matches('@'));
            let mut name = base.clone();
            let mut suffix = 1;
            while taken.contains(&name) {
                suffix += 1;
                name = format!("{base}{suffix}");
            }

            taken.insert(name.clone());
            name
        })
        .collect()
}

fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render all hubs into one document. The same hubs and options always yield the same text.
pub fn render(hubs: &[Hub], options: &GeneratorOptions) -> GeneratedSource {
    let mut w = CodeWriter::from_options(options);
    let generator = BridgeGenerator { options };

    w.comment("<auto-generated />");
    w.comment(&format!(
        "{} hub{} found",
        hubs.len(),
        if hubs.len() == 1 { "" } else { "s" }
    ));

    for hub in hubs {
        w.blank_line();
        generator.hub(&mut w, hub);
    }

    GeneratedSource {
        hint_name: options.hint_name.clone(),
        text: w.finish(),
    }
}

struct BridgeGenerator<'o> {
    options: &'o GeneratorOptions,
}

impl BridgeGenerator<'_> {
    fn type_name(&self, ty: &TypeRef) -> String {
        if self.options.keyword_types {
            ty.keyword_or_global_name()
        } else {
            ty.global_name()
        }
    }

    fn hub(&self, w: &mut CodeWriter, hub: &Hub) {
        let namespace = hub.bridge_type.namespace().trim_start_matches("global::");
        let _namespace = (!namespace.is_empty()).then(|| w.namespace(namespace));

        let name = hub.bridge_type.name();
        let _class = w.class(name, &["public", "partial"]);

        writeln!(
            w,
            "public const string HubDispatcherActorSelection = \"{}{}\";",
            self.options.dispatcher_path_prefix,
            name.to_lowercase()
        );
        w.blank_line();

        writeln!(w, "private readonly {ACTOR_SYSTEM} _actorSystem;");
        w.blank_line();

        writeln!(w, "public {name}({ACTOR_SYSTEM} actorSystem)");
        {
            let _ctor = w.block();
            w.write_line(
                "_actorSystem = actorSystem ?? throw new global::System.ArgumentNullException(nameof(actorSystem));",
            );
        }
        w.blank_line();

        for method in &hub.server.methods {
            self.forwarding_method(w, method);
            w.blank_line();
        }

        self.messages(w, Direction::ToClient, &hub.client);
        w.blank_line();
        self.messages(w, Direction::ToServer, &hub.server);
    }

    /// Server contract implementation, posting the call to the dispatcher actor.
    fn forwarding_method(&self, w: &mut CodeWriter, method: &Method) {
        let parameters: Vec<_> = method
            .parameters
            .iter()
            .map(|param| format!("{} {}", self.type_name(&param.ty), param.name))
            .collect();

        writeln!(
            w,
            "public {} {}({})",
            self.type_name(&method.return_type),
            method.name,
            parameters.join(", ")
        );
        let _body = w.block();

        let arguments: Vec<_> = ["Context.ConnectionId", "Context.UserIdentifier", "Context.User"]
            .into_iter()
            .chain(method.parameters.iter().map(|param| param.name.as_str()))
            .collect();

        writeln!(
            w,
            "var msg = new {}.{}({});",
            Direction::ToServer.class_name(),
            method.name,
            arguments.join(", ")
        );
        w.write_line("_actorSystem.ActorSelection(HubDispatcherActorSelection).Tell(msg);");

        if let Some(value) = self.completion(&method.return_type) {
            writeln!(w, "return {value};");
        }
    }

    /// Value returned by a forwarding method once the message is posted.
    fn completion(&self, return_type: &TypeRef) -> Option<String> {
        if return_type.is_void() {
            return None;
        }

        let value = match (return_type.namespace(), return_type.name(), return_type.type_arguments()) {
            (TASKS, "Task", []) => format!("global::{TASKS}.Task.CompletedTask"),
            (TASKS, "Task", [result]) => {
                format!("global::{TASKS}.Task.FromResult<{}>(default!)", self.type_name(result))
            }
            (TASKS, "ValueTask", [] | [_]) => "default".to_owned(),
            _ => "default!".to_owned(),
        };

        Some(value)
    }

    fn messages(&self, w: &mut CodeWriter, direction: Direction, contract: &Interface) {
        let _class = w.class(direction.class_name(), &["public", "static"]);

        for (i, method) in contract.methods.iter().enumerate() {
            if i > 0 {
                w.blank_line();
            }
            self.message(w, direction, method);
        }
    }

    /// Message record for one contract method, with its dispatch variants.
    fn message(&self, w: &mut CodeWriter, direction: Direction, method: &Method) {
        {
            let _doc = w.xml_doc();
            let _summary = w.summary();
            w.see(&method.name);
            w.write(" is derived from ");
            w.see(&method.cref());
            w.blank_line();
        }

        let names = field_names(direction, method);
        let fields: Vec<_> = direction
            .context_fields()
            .iter()
            .map(|(ty, name)| format!("{ty} {name}"))
            .chain(
                method
                    .parameters
                    .iter()
                    .zip(&names)
                    .map(|(param, name)| format!("{} {name}", self.type_name(&param.ty))),
            )
            .collect();

        writeln!(w, "public record {}({})", method.name, fields.join(", "));
        let _body = w.block();

        let return_type = self.type_name(&method.return_type);
        let hub_clients = format!(
            "{HUB_CLIENTS}<{}> hubClients",
            self.type_name(&method.declaring_type)
        );
        let arguments = names.join(", ");

        for (i, variant) in DispatchVariant::ALL.into_iter().enumerate() {
            if i > 0 {
                w.blank_line();
            }

            let parameters: Vec<_> = std::iter::once(hub_clients.clone())
                .chain(
                    variant
                        .parameters()
                        .iter()
                        .map(|(ty, name)| format!("{ty} {name}")),
                )
                .collect();

            writeln!(
                w,
                "public {return_type} {}({})",
                variant.method_name(),
                parameters.join(", ")
            );
            let _indent = w.indent();
            writeln!(
                w,
                "=> hubClients.{}.{}({arguments});",
                variant.address(),
                method.name
            );
        }
    }
}
