//! Core configuration types
//!
//! This module defines the data structures that represent a rebound.yml build file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level build file structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Project name (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Project usage description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    /// Named inputs supplied on the command line
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, Parameter>,

    /// Tasks defined in the build file
    #[serde(default)]
    pub tasks: BTreeMap<String, Task>,

    /// Targets selectable from the command line; every task when empty
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub targets: BTreeMap<String, TargetTasks>,

    /// Interpreter for commands (e.g., ["sh", "-c"])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<Vec<String>>,

    /// Dotenv file whose entries become variables, relative to the build file
    #[serde(rename = "env-file", default, skip_serializing_if = "Option::is_none")]
    pub env_file: Option<String>,
}

/// A task definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Task {
    /// Description shown when listing targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Commands run by `build`
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_commands"
    )]
    pub build: Vec<Command>,

    /// Commands run by `clean`
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_commands"
    )]
    pub clean: Vec<Command>,

    /// Whether runs of this task are reported
    #[serde(default = "default_logged")]
    pub logged: bool,

    /// Dependency members: each value names a task or parameter, or lists several
    ///
    /// Kept as raw YAML; names are resolved when the task is introspected.
    #[serde(default, skip_serializing_if = "serde_yaml::Mapping::is_empty")]
    pub deps: serde_yaml::Mapping,
}

fn default_logged() -> bool {
    true
}

impl Default for Task {
    fn default() -> Self {
        Task {
            description: None,
            build: Vec::new(),
            clean: Vec::new(),
            logged: default_logged(),
            deps: serde_yaml::Mapping::new(),
        }
    }
}

/// A command to execute
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Command {
    /// Simple string command
    Simple(String),

    /// Complex command with additional options
    Complex(CommandDetail),
}

/// Detailed command specification
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandDetail {
    /// The command to execute
    pub exec: String,

    /// What to print when running (defaults to exec)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print: Option<String>,

    /// Whether to suppress the echo of the command
    #[serde(default)]
    pub quiet: bool,

    /// Working directory for the command, relative to the build file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

/// A parameter definition
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Parameter {
    /// Usage description for listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    /// Default value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Required parameter
    #[serde(default)]
    pub required: bool,
}

/// The task or tasks a target runs
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TargetTasks {
    One(String),
    Many(Vec<String>),
}

impl TargetTasks {
    pub fn names(&self) -> Vec<&str> {
        match self {
            TargetTasks::One(name) => vec![name.as_str()],
            TargetTasks::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// Custom deserializer for commands that handles both single values and arrays
fn deserialize_commands<'de, D>(deserializer: D) -> Result<Vec<Command>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;

    match value {
        Value::String(s) => Ok(vec![Command::Simple(s)]),
        Value::Mapping(_) => {
            let cmd = Command::deserialize(value).map_err(D::Error::custom)?;
            Ok(vec![cmd])
        }
        Value::Sequence(seq) => seq
            .into_iter()
            .map(|item| Command::deserialize(item).map_err(D::Error::custom))
            .collect(),
        Value::Null => Ok(Vec::new()),
        _ => Err(D::Error::custom("commands must be a string, object, or array")),
    }
}
