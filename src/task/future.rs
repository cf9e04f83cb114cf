//! Values produced by tasks
//!
//! A [`Future`] is a task whose value becomes available once it has been
//! built. Depending on a future therefore orders the reader after the producer.

use crate::error::{ConfigResult, ExecutionError, ExecutionResult};
use crate::runner::Context;
use crate::task::{Dependency, Task, TaskRef};
use std::borrow::Cow;
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

/// A read-only value resolved exactly once by building its task
///
/// Reading an unresolved future is a mistake in the build definition: it means
/// the reader did not declare the future as a dependency.
pub trait Future<T>: Task {
    fn value(&self) -> ExecutionResult<T>;

    fn is_resolved(&self) -> bool;
}

/// A value available once its source task has been built
///
/// The future depends on its source, so the executor builds the source first.
/// Either the source writes the shared cell from its own build, or the future
/// runs its producer once during its own build.
pub struct DependentFuture<T> {
    source: TaskRef,
    producer: Option<Box<dyn Fn() -> T>>,
    value: Rc<OnceCell<T>>,
}

impl<T: Clone + 'static> DependentFuture<T> {
    pub fn new(source: TaskRef, producer: impl Fn() -> T + 'static) -> Self {
        DependentFuture {
            source,
            producer: Some(Box::new(producer)),
            value: Rc::new(OnceCell::new()),
        }
    }

    /// Future over a cell the source fills itself
    pub(crate) fn filled_by(source: TaskRef, value: Rc<OnceCell<T>>) -> Self {
        DependentFuture {
            source,
            producer: None,
            value,
        }
    }

    pub fn source(&self) -> &TaskRef {
        &self.source
    }
}

impl<T: Clone + 'static> Task for DependentFuture<T> {
    fn dependency_members(&self) -> ConfigResult<Vec<Dependency>> {
        Ok(vec![Dependency::single("source", self.source.clone())])
    }

    fn build(&self, _ctx: &mut Context) -> ExecutionResult<()> {
        match &self.producer {
            Some(producer) => {
                self.value.get_or_init(|| producer());
                Ok(())
            }
            None if self.value.get().is_some() => Ok(()),
            None => Err(ExecutionError::Unresolved(self.source.name().into_owned())),
        }
    }

    fn is_logged(&self) -> bool {
        false
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("future of {}", self.source.name()))
    }

    fn describe(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str(&self.name())
    }
}

impl<T: Clone + 'static> Future<T> for DependentFuture<T> {
    fn value(&self) -> ExecutionResult<T> {
        self.value
            .get()
            .cloned()
            .ok_or_else(|| ExecutionError::Unresolved(self.name().into_owned()))
    }

    fn is_resolved(&self) -> bool {
        self.value.get().is_some()
    }
}

/// Convenience for binding a future to a concrete task type
pub fn depend_on<S, T>(source: &Rc<S>, producer: impl Fn() -> T + 'static) -> Rc<DependentFuture<T>>
where
    S: Task + 'static,
    T: Clone + 'static,
{
    let source: TaskRef = source.clone();
    Rc::new(DependentFuture::new(source, producer))
}
