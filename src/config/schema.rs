//! Build file validation
//!
//! Checks what can be checked before any task exists. Dependency names are
//! resolved later, when tasks are introspected.

use crate::config::types::{Command, Config, Parameter};
use crate::error::{ConfigError, ConfigResult};

/// Validate a complete build file
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    if let Some(interpreter) = &config.interpreter {
        if interpreter.is_empty() {
            return Err(ConfigError::Invalid(
                "interpreter must name a program".to_string(),
            ));
        }
    }

    for (name, parameter) in &config.parameters {
        validate_parameter(name, parameter)?;
    }

    for (name, task) in &config.tasks {
        if config.parameters.contains_key(name) {
            return Err(ConfigError::DuplicateNames(name.clone()));
        }
        for command in task.build.iter().chain(task.clean.iter()) {
            validate_command(name, command)?;
        }
    }

    for (target, tasks) in &config.targets {
        let names = tasks.names();
        if names.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "target '{}' does not name any task",
                target
            )));
        }
        for name in names {
            if !config.tasks.contains_key(name) {
                return Err(ConfigError::TaskNotFound(name.to_string()));
            }
        }
    }

    Ok(())
}

fn validate_parameter(name: &str, parameter: &Parameter) -> ConfigResult<()> {
    if parameter.required && parameter.default.is_some() {
        return Err(ConfigError::Invalid(format!(
            "parameter '{}' is required and cannot have a default",
            name
        )));
    }
    Ok(())
}

fn validate_command(task: &str, command: &Command) -> ConfigResult<()> {
    let exec = match command {
        Command::Simple(exec) => exec,
        Command::Complex(detail) => &detail.exec,
    };
    if exec.trim().is_empty() {
        return Err(ConfigError::Invalid(format!(
            "task '{}' has an empty command",
            task
        )));
    }
    Ok(())
}
