//! Task abstraction
//!
//! A task is a unit of work with a build action, a clean action and a set of
//! dependencies it declares through its own members. Tasks are shared through
//! [`TaskRef`] and compared by identity, never by value.

pub mod all;
pub mod dependency;
pub mod future;
pub mod parameter;
pub mod registry;
pub mod shell;

pub use all::*;
pub use dependency::*;
pub use future::*;
pub use parameter::*;
pub use registry::*;
pub use shell::*;

use crate::error::{ConfigError, ConfigResult, ExecutionResult};
use crate::runner::Context;
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Shared handle to a task
pub type TaskRef = Rc<dyn Task>;

/// The two actions a task can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Build,
    Clean,
}

impl FromStr for Command {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build" => Ok(Command::Build),
            "clean" => Ok(Command::Clean),
            other => Err(ConfigError::UnknownCommand(other.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Build => f.write_str("build"),
            Command::Clean => f.write_str("clean"),
        }
    }
}

/// Identity of a task instance
///
/// Two structurally identical tasks are still distinct; only clones of the same
/// [`TaskRef`] share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(usize);

impl TaskId {
    pub fn of(task: &TaskRef) -> Self {
        TaskId(Rc::as_ptr(task) as *const () as usize)
    }
}

/// A unit of work in the build graph
pub trait Task {
    /// Members of this task that carry dependencies
    ///
    /// Evaluated every time the task is introspected, so values may reflect
    /// state set after construction.
    fn dependency_members(&self) -> ConfigResult<Vec<Dependency>> {
        Ok(Vec::new())
    }

    /// All tasks this task depends on
    ///
    /// Override to take full control of the task's graph edges.
    fn dependencies(&self) -> ConfigResult<Vec<TaskRef>> {
        dependency::dependencies(self)
    }

    /// Produce whatever this task is responsible for
    fn build(&self, _ctx: &mut Context) -> ExecutionResult<()> {
        Ok(())
    }

    /// Undo what [`Task::build`] produced
    fn clean(&self, _ctx: &mut Context) -> ExecutionResult<()> {
        Ok(())
    }

    /// Whether executions of this task are tracked in a scope
    fn is_logged(&self) -> bool {
        true
    }

    /// Short name used in scope reports and cycle errors
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(short_type_name(std::any::type_name::<Self>()))
    }

    /// Human description of the task
    fn describe(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str(&self.name())
    }

    /// Downcast hook used by parameter discovery
    fn as_parameter(&self) -> Option<&Parameter> {
        None
    }
}

/// Render [`Task::describe`] into a string
pub fn describe<T: Task + ?Sized>(task: &T) -> String {
    let mut out = String::new();
    match task.describe(&mut out) {
        Ok(()) => out,
        Err(_) => task.name().into_owned(),
    }
}

/// A named root task that can be selected from the command line
#[derive(Clone)]
pub struct Target {
    pub name: String,
    pub task: TaskRef,
}

impl Target {
    pub fn new(name: impl Into<String>, task: TaskRef) -> Self {
        Target {
            name: name.into(),
            task,
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("name", &self.name)
            .field("task", &self.task.name())
            .finish()
    }
}

// `a::b::Foo<c::Bar>` -> `Foo`
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl Task for Plain {}

    #[test]
    fn test_command_from_str() {
        assert_eq!("build".parse::<Command>().unwrap(), Command::Build);
        assert_eq!("clean".parse::<Command>().unwrap(), Command::Clean);
        assert!(matches!(
            "deploy".parse::<Command>(),
            Err(ConfigError::UnknownCommand(name)) if name == "deploy"
        ));
    }

    #[test]
    fn test_command_display() {
        assert_eq!(Command::Build.to_string(), "build");
        assert_eq!(Command::Clean.to_string(), "clean");
    }

    #[test]
    fn test_identity_is_by_reference() {
        let a: TaskRef = Rc::new(Plain);
        let b: TaskRef = Rc::new(Plain);
        let a2 = a.clone();

        assert_eq!(TaskId::of(&a), TaskId::of(&a2));
        assert_ne!(TaskId::of(&a), TaskId::of(&b));
    }

    #[test]
    fn test_default_name_and_description() {
        let task = Plain;
        assert_eq!(task.name(), "Plain");
        assert_eq!(describe(&task), "Plain");
        assert!(task.is_logged());
        assert!(task.as_parameter().is_none());
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("rebound::task::all::All<i32>"), "All");
        assert_eq!(short_type_name("Plain"), "Plain");
    }
}
