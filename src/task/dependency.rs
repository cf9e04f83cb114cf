//! Dependency declaration and introspection
//!
//! Tasks expose their dependency-bearing members through
//! [`Task::dependency_members`]. The functions here turn those members into a
//! labelled mapping and a flat dependency list.

use crate::error::{ConfigError, ConfigResult};
use crate::task::{describe, Task, TaskRef};
use std::fmt;

/// The current value of a dependency-bearing member
pub enum DependencyValue {
    /// Zero or one task. `None` is an absent optional dependency.
    Single(Option<TaskRef>),

    /// An ordered collection of tasks
    List(Vec<TaskRef>),

    /// Something that is neither a task nor a list of tasks, with a short
    /// name of what was found
    Unsupported(String),
}

/// A member of a task that participates in the dependency graph
pub struct Dependency {
    pub name: String,
    pub value: DependencyValue,
}

impl Dependency {
    pub fn single(name: impl Into<String>, task: impl Into<Option<TaskRef>>) -> Self {
        Dependency {
            name: name.into(),
            value: DependencyValue::Single(task.into()),
        }
    }

    pub fn list(name: impl Into<String>, tasks: impl IntoIterator<Item = TaskRef>) -> Self {
        Dependency {
            name: name.into(),
            value: DependencyValue::List(tasks.into_iter().collect()),
        }
    }

    pub fn unsupported(name: impl Into<String>, found: impl Into<String>) -> Self {
        Dependency {
            name: name.into(),
            value: DependencyValue::Unsupported(found.into()),
        }
    }
}

/// Labelled dependencies of a task, in declaration order
///
/// Single members are labelled with the member name, list elements with
/// `name[index]`.
#[derive(Default, Clone)]
pub struct DependencyFields {
    entries: Vec<(String, TaskRef)>,
}

impl DependencyFields {
    pub fn get(&self, label: &str) -> Option<&TaskRef> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, task)| task)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TaskRef)> {
        self.entries.iter().map(|(label, task)| (label.as_str(), task))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_tasks(self) -> Vec<TaskRef> {
        self.entries.into_iter().map(|(_, task)| task).collect()
    }
}

impl fmt::Debug for DependencyFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(l, t)| (l, t.name())))
            .finish()
    }
}

/// Labelled dependency mapping of a task
pub fn dependency_fields<T: Task + ?Sized>(task: &T) -> ConfigResult<DependencyFields> {
    let mut entries = Vec::new();

    for member in task.dependency_members()? {
        match member.value {
            DependencyValue::Single(Some(dep)) => entries.push((member.name, dep)),
            DependencyValue::Single(None) => {}
            DependencyValue::List(deps) => {
                for (index, dep) in deps.into_iter().enumerate() {
                    entries.push((format!("{}[{}]", member.name, index), dep));
                }
            }
            DependencyValue::Unsupported(found) => {
                return Err(ConfigError::UnsupportedDependency {
                    task: describe(task),
                    member: member.name,
                    found,
                });
            }
        }
    }

    Ok(DependencyFields { entries })
}

/// Flattened dependencies of a task
pub fn dependencies<T: Task + ?Sized>(task: &T) -> ConfigResult<Vec<TaskRef>> {
    Ok(dependency_fields(task)?.into_tasks())
}
