//! Graph executor
//!
//! Walks the dependency graph of each root depth-first and runs every task's
//! action after all of its dependencies. Each task runs a given command at
//! most once per executor, however many paths lead to it.

use crate::error::{CycleError, ExecutionError, Result};
use crate::runner::{Context, ScopeTracker};
use crate::task::{Command, TaskId, TaskRef};
use std::collections::HashSet;

pub struct Executor {
    context: Context,
    tracker: ScopeTracker,
    built: HashSet<TaskId>,
    cleaned: HashSet<TaskId>,
}

impl Executor {
    pub fn new(context: Context) -> Self {
        let tracker = ScopeTracker::new(context.verbosity);
        Executor {
            context,
            tracker,
            built: HashSet::new(),
            cleaned: HashSet::new(),
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn tracker(&self) -> &ScopeTracker {
        &self.tracker
    }

    /// Whether `task` already ran `command` on this executor
    pub fn has_executed(&self, command: Command, task: &TaskRef) -> bool {
        self.memo(command).contains(&TaskId::of(task))
    }

    /// Run `command` on every root and everything they depend on
    ///
    /// Stops at the first error; tasks that already ran stay recorded, so a
    /// later call does not run them again.
    pub fn execute(&mut self, command: Command, roots: &[TaskRef]) -> Result<()> {
        for root in roots {
            let mut path = Vec::new();
            self.visit(command, root, &mut path)?;
        }
        Ok(())
    }

    fn visit(&mut self, command: Command, task: &TaskRef, path: &mut Vec<TaskRef>) -> Result<()> {
        let id = TaskId::of(task);

        if let Some(start) = path.iter().position(|t| TaskId::of(t) == id) {
            let mut tasks: Vec<String> =
                path[start..].iter().map(|t| t.name().into_owned()).collect();
            tasks.push(task.name().into_owned());
            return Err(CycleError { tasks }.into());
        }

        if self.memo(command).contains(&id) {
            return Ok(());
        }

        path.push(task.clone());
        let result = self.visit_dependencies(command, task, path);
        path.pop();
        result?;

        self.run_action(command, task)?;
        self.memo_mut(command).insert(id);
        Ok(())
    }

    fn visit_dependencies(
        &mut self,
        command: Command,
        task: &TaskRef,
        path: &mut Vec<TaskRef>,
    ) -> Result<()> {
        for dep in task.dependencies()? {
            self.visit(command, &dep, path)?;
        }
        Ok(())
    }

    fn run_action(&mut self, command: Command, task: &TaskRef) -> Result<()> {
        let scope = task
            .is_logged()
            .then(|| self.tracker.open(&task.name(), command));

        let result = match command {
            Command::Build => task.build(&mut self.context),
            Command::Clean => task.clean(&mut self.context),
        };
        result.map_err(|source| ExecutionError::TaskFailed {
            task: task.name().into_owned(),
            source: Box::new(source),
        })?;

        if let Some(scope) = scope {
            scope.succeed();
        }
        Ok(())
    }

    fn memo(&self, command: Command) -> &HashSet<TaskId> {
        match command {
            Command::Build => &self.built,
            Command::Clean => &self.cleaned,
        }
    }

    fn memo_mut(&mut self, command: Command) -> &mut HashSet<TaskId> {
        match command {
            Command::Build => &mut self.built,
            Command::Clean => &mut self.cleaned,
        }
    }
}
