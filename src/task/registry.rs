//! Task registry
//!
//! Turns a parsed build file into shared task instances and targets. Tasks and
//! parameters share one namespace.

use crate::config::{self, Config, TargetTasks};
use crate::error::{ConfigError, ConfigResult};
use crate::task::{All, Parameter, ParameterSpec, ShellTask, Target, TaskRef};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
pub struct TaskRegistry {
    tasks: RefCell<HashMap<String, TaskRef>>,
    targets: RefCell<Vec<Target>>,
}

impl TaskRegistry {
    pub fn from_config(config: &Config) -> ConfigResult<Rc<Self>> {
        let registry = Rc::new(TaskRegistry::default());

        for (name, parameter) in &config.parameters {
            registry.insert(name, Rc::new(parameter_from_config(name, parameter)))?;
        }
        for (name, task) in &config.tasks {
            let task = ShellTask::from_config(name.clone(), task, Rc::downgrade(&registry));
            registry.insert(name, Rc::new(task))?;
        }

        let targets = if config.targets.is_empty() {
            config
                .tasks
                .keys()
                .map(|name| -> ConfigResult<Target> {
                    Ok(Target::new(name.clone(), registry.resolve(name)?))
                })
                .collect::<ConfigResult<Vec<_>>>()?
        } else {
            config
                .targets
                .iter()
                .map(|(name, tasks)| -> ConfigResult<Target> {
                    Ok(Target::new(name.clone(), registry.target_task(tasks)?))
                })
                .collect::<ConfigResult<Vec<_>>>()?
        };
        *registry.targets.borrow_mut() = targets;

        Ok(registry)
    }

    fn insert(&self, name: &str, task: TaskRef) -> ConfigResult<()> {
        let mut tasks = self.tasks.borrow_mut();
        if tasks.contains_key(name) {
            return Err(ConfigError::DuplicateNames(name.to_string()));
        }
        tasks.insert(name.to_string(), task);
        Ok(())
    }

    fn target_task(&self, tasks: &TargetTasks) -> ConfigResult<TaskRef> {
        match tasks {
            TargetTasks::One(name) => self.resolve(name),
            TargetTasks::Many(names) => {
                let tasks = names
                    .iter()
                    .map(|name| self.resolve(name))
                    .collect::<ConfigResult<Vec<_>>>()?;
                let all: TaskRef = All::new(tasks);
                Ok(all)
            }
        }
    }

    /// Look up a task or parameter by name
    pub fn resolve(&self, name: &str) -> ConfigResult<TaskRef> {
        self.tasks
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::TaskNotFound(name.to_string()))
    }

    /// Targets in name order
    pub fn targets(&self) -> Vec<Target> {
        self.targets.borrow().clone()
    }

    pub fn target(&self, name: &str) -> ConfigResult<Target> {
        self.targets
            .borrow()
            .iter()
            .find(|t| t.name == name)
            .cloned()
            .ok_or_else(|| ConfigError::TargetNotFound(name.to_string()))
    }
}

fn parameter_from_config(name: &str, parameter: &config::Parameter) -> Parameter {
    Parameter::from_spec(ParameterSpec {
        name: name.to_string(),
        usage: parameter.usage.clone(),
        required: parameter.required,
        default: parameter.default.clone(),
    })
}
