use serde::{Deserialize, Serialize};

/// Resolved generator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Identifier of the generic base class (`Hub`)
    pub hub_base_name: String,
    /// Assembly that must contain the base class
    pub hub_assembly: String,
    /// Prefix of the dispatcher actor path, followed by the lowercase bridge name
    pub dispatcher_path_prefix: String,
    /// Name of the generated document
    pub hint_name: String,
    /// One level of indentation
    pub indent: String,
    pub newline: LineEnding,
    /// Render built-in types with C# keywords (`string`) instead of `global::System.String`
    pub keyword_types: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            hub_base_name: "Hub".into(),
            hub_assembly: "Microsoft.AspNetCore.SignalR.Core".into(),
            dispatcher_path_prefix: "/user/signalr/".into(),
            hint_name: "HubBridgeGenerator.g.cs".into(),
            indent: "    ".into(),
            newline: LineEnding::Lf,
            keyword_types: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Partially specified settings, as read from a config file or command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsFile {
    pub hub_base_name: Option<String>,
    pub hub_assembly: Option<String>,
    pub dispatcher_path_prefix: Option<String>,
    pub hint_name: Option<String>,
    pub indent: Option<String>,
    pub newline: Option<LineEnding>,
    pub keyword_types: Option<bool>,
}

impl OptionsFile {
    /// Fill unset values from `defaults`.
    pub fn merge(mut self, defaults: &Self) -> Self {
        self.hub_base_name = self.hub_base_name.or(defaults.hub_base_name.clone());
        self.hub_assembly = self.hub_assembly.or(defaults.hub_assembly.clone());
        self.dispatcher_path_prefix = self
            .dispatcher_path_prefix
            .or(defaults.dispatcher_path_prefix.clone());
        self.hint_name = self.hint_name.or(defaults.hint_name.clone());
        self.indent = self.indent.or(defaults.indent.clone());
        self.newline = self.newline.or(defaults.newline);
        self.keyword_types = self.keyword_types.or(defaults.keyword_types);

        self
    }

    /// Resolve into full settings, using [`GeneratorOptions::default`] for unset values.
    pub fn resolve(self) -> GeneratorOptions {
        let defaults = GeneratorOptions::default();

        GeneratorOptions {
            hub_base_name: self.hub_base_name.unwrap_or(defaults.hub_base_name),
            hub_assembly: self.hub_assembly.unwrap_or(defaults.hub_assembly),
            dispatcher_path_prefix: self
                .dispatcher_path_prefix
                .unwrap_or(defaults.dispatcher_path_prefix),
            hint_name: self.hint_name.unwrap_or(defaults.hint_name),
            indent: self.indent.unwrap_or(defaults.indent),
            newline: self.newline.unwrap_or(defaults.newline),
            keyword_types: self.keyword_types.unwrap_or(defaults.keyword_types),
        }
    }
}
