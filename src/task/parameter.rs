//! Build parameters
//!
//! A parameter is a named input supplied on the command line. It is also a
//! task: building it resolves its value from the context variables, so tasks
//! that depend on a parameter can read it as a [`Future`].

use crate::error::{ConfigError, ConfigResult, ExecutionError, ExecutionResult};
use crate::runner::Context;
use crate::task::{Future, Task, TaskId, TaskRef};
use std::borrow::Cow;
use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Declaration of a parameter, as shown when listing targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub usage: Option<String>,
    pub required: bool,
    pub default: Option<String>,
}

impl ParameterSpec {
    /// Whether a value can be found without the user supplying one
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

pub struct Parameter {
    spec: ParameterSpec,
    value: OnceCell<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Parameter::from_spec(ParameterSpec {
            name: name.into(),
            usage: None,
            required: false,
            default: None,
        })
    }

    pub fn from_spec(spec: ParameterSpec) -> Self {
        Parameter {
            spec,
            value: OnceCell::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.spec.required = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.spec.default = Some(default.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.spec.usage = Some(usage.into());
        self
    }

    pub fn spec(&self) -> &ParameterSpec {
        &self.spec
    }
}

impl Task for Parameter {
    fn build(&self, ctx: &mut Context) -> ExecutionResult<()> {
        if self.value.get().is_some() {
            return Ok(());
        }

        let supplied = ctx.var(&self.spec.name).map(str::to_string);
        let value = match (supplied, &self.spec.default) {
            (Some(value), _) => value,
            (None, Some(default)) => {
                ctx.export(self.spec.name.as_str(), default.as_str());
                default.clone()
            }
            (None, None) if self.spec.required => {
                return Err(ExecutionError::InvalidValue {
                    name: self.spec.name.clone(),
                    error: "required parameter has no value".to_string(),
                });
            }
            (None, None) => String::new(),
        };

        ctx.print_debug(&format!("Parameter {} = {}", self.spec.name, value));
        self.value.get_or_init(|| value);
        Ok(())
    }

    fn is_logged(&self) -> bool {
        false
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.spec.name)
    }

    fn describe(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "parameter {}", self.spec.name)?;
        if let Some(usage) = &self.spec.usage {
            write!(out, ": {}", usage)?;
        }
        Ok(())
    }

    fn as_parameter(&self) -> Option<&Parameter> {
        Some(self)
    }
}

impl Future<String> for Parameter {
    fn value(&self) -> ExecutionResult<String> {
        self.value
            .get()
            .cloned()
            .ok_or_else(|| ExecutionError::Unresolved(self.spec.name.clone()))
    }

    fn is_resolved(&self) -> bool {
        self.value.get().is_some()
    }
}

/// Every parameter reachable from `roots`, in discovery order, each listed once
pub fn find_parameters(roots: &[TaskRef]) -> ConfigResult<Vec<ParameterSpec>> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    let mut pending: Vec<TaskRef> = roots.iter().rev().cloned().collect();

    while let Some(task) = pending.pop() {
        if !seen.insert(TaskId::of(&task)) {
            continue;
        }
        if let Some(parameter) = task.as_parameter() {
            found.push(parameter.spec().clone());
        }
        let deps = task.dependencies()?;
        pending.extend(deps.into_iter().rev());
    }

    Ok(found)
}

/// Fail with the first required parameter that has neither a value nor a default
pub fn ensure_required_parameters(
    roots: &[TaskRef],
    values: &HashMap<String, String>,
) -> ConfigResult<()> {
    for spec in find_parameters(roots)? {
        if spec.required && !spec.has_default() && !values.contains_key(&spec.name) {
            return Err(ConfigError::MissingParameter(spec.name));
        }
    }
    Ok(())
}
