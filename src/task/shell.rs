//! Tasks defined in a build file
//!
//! A shell task runs its build or clean commands through the context's
//! interpreter. Its `deps` mapping is kept as written and resolved against the
//! registry each time the task is introspected, so tasks may refer to names
//! defined later in the file.

use crate::config;
use crate::error::{ConfigError, ConfigResult, ExecutionResult};
use crate::runner::{execute_command, Context, ShellCommand};
use crate::task::{Dependency, DependencyValue, Task, TaskRegistry};
use serde_yaml::Value;
use std::borrow::Cow;
use std::fmt;
use std::rc::Weak;

pub struct ShellTask {
    name: String,
    description: Option<String>,
    build: Vec<ShellCommand>,
    clean: Vec<ShellCommand>,
    logged: bool,
    deps: serde_yaml::Mapping,
    registry: Weak<TaskRegistry>,
}

impl ShellTask {
    pub fn from_config(name: String, config: &config::Task, registry: Weak<TaskRegistry>) -> Self {
        ShellTask {
            name,
            description: config.description.clone(),
            build: config.build.iter().cloned().map(ShellCommand::from_config).collect(),
            clean: config.clean.iter().cloned().map(ShellCommand::from_config).collect(),
            logged: config.logged,
            deps: config.deps.clone(),
            registry,
        }
    }

    fn member_value(&self, registry: &TaskRegistry, value: &Value) -> ConfigResult<DependencyValue> {
        Ok(match value {
            Value::Null => DependencyValue::Single(None),
            Value::String(name) => DependencyValue::Single(Some(registry.resolve(name)?)),
            Value::Sequence(items) => {
                let mut tasks = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(name) => tasks.push(registry.resolve(name)?),
                        other => {
                            let found = format!("list containing a {}", yaml_kind(other));
                            return Ok(DependencyValue::Unsupported(found));
                        }
                    }
                }
                DependencyValue::List(tasks)
            }
            other => DependencyValue::Unsupported(yaml_kind(other).to_string()),
        })
    }

    fn run(&self, commands: &[ShellCommand], ctx: &mut Context) -> ExecutionResult<()> {
        for cmd in commands {
            execute_command(cmd, ctx)?;
        }
        Ok(())
    }
}

impl Task for ShellTask {
    fn dependency_members(&self) -> ConfigResult<Vec<Dependency>> {
        let registry = self.registry.upgrade().ok_or_else(|| {
            ConfigError::Invalid(format!("task '{}' outlived its build file", self.name))
        })?;

        let mut members = Vec::with_capacity(self.deps.len());
        for (key, value) in &self.deps {
            let name = key.as_str().ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "dependency names of task '{}' must be strings",
                    self.name
                ))
            })?;
            members.push(Dependency {
                name: name.to_string(),
                value: self.member_value(&registry, value)?,
            });
        }
        Ok(members)
    }

    fn build(&self, ctx: &mut Context) -> ExecutionResult<()> {
        self.run(&self.build, ctx)
    }

    fn clean(&self, ctx: &mut Context) -> ExecutionResult<()> {
        self.run(&self.clean, ctx)
    }

    fn is_logged(&self) -> bool {
        self.logged
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }

    fn describe(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match &self.description {
            Some(description) => out.write_str(description),
            None => out.write_str(&self.name),
        }
    }
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
