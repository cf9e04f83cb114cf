//! Aggregate task
//!
//! [`All`] groups sibling tasks. Its own build runs after every listed task
//! and stores the combiner's value, which [`All::result`] exposes as a future.

use crate::error::{ConfigResult, ExecutionResult};
use crate::runner::Context;
use crate::task::{DependentFuture, Dependency, Task, TaskRef};
use std::borrow::Cow;
use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};

pub struct All<T = ()> {
    tasks: Vec<TaskRef>,
    combine: Box<dyn Fn() -> T>,
    value: Rc<OnceCell<T>>,
    // handed out futures hold the All, never the other way round
    future: RefCell<Weak<DependentFuture<T>>>,
}

impl All<()> {
    pub fn new(tasks: impl IntoIterator<Item = TaskRef>) -> Rc<Self> {
        All::with_result(|| (), tasks)
    }
}

impl<T: Clone + 'static> All<T> {
    /// Group `tasks`; building the group stores `combine()` for `result()`
    pub fn with_result(
        combine: impl Fn() -> T + 'static,
        tasks: impl IntoIterator<Item = TaskRef>,
    ) -> Rc<Self> {
        Rc::new(All {
            tasks: tasks.into_iter().collect(),
            combine: Box::new(combine),
            value: Rc::new(OnceCell::new()),
            future: RefCell::new(Weak::new()),
        })
    }

    pub fn tasks(&self) -> &[TaskRef] {
        &self.tasks
    }

    /// Future of the combined value
    ///
    /// The future depends on this group, so holding only the future still
    /// builds every grouped task first.
    pub fn result(self: &Rc<Self>) -> Rc<DependentFuture<T>> {
        if let Some(future) = self.future.borrow().upgrade() {
            return future;
        }
        let source: TaskRef = self.clone();
        let future = Rc::new(DependentFuture::filled_by(source, self.value.clone()));
        *self.future.borrow_mut() = Rc::downgrade(&future);
        future
    }
}

impl<T: Clone + 'static> Task for All<T> {
    fn dependency_members(&self) -> ConfigResult<Vec<Dependency>> {
        Ok(vec![Dependency::list("tasks", self.tasks.iter().cloned())])
    }

    fn build(&self, _ctx: &mut Context) -> ExecutionResult<()> {
        self.value.get_or_init(|| (self.combine)());
        Ok(())
    }

    fn is_logged(&self) -> bool {
        false
    }

    fn name(&self) -> Cow<'_, str> {
        let names: Vec<String> = self.tasks.iter().map(|t| t.name().into_owned()).collect();
        Cow::Owned(format!("all({})", names.join(", ")))
    }
}
