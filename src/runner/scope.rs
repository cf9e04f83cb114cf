//! Execution scopes
//!
//! A [`Scope`] wraps one task's execution of one command. It records a
//! failure unless [`Scope::succeed`] is called before it closes, which makes
//! early returns through `?` report correctly. Scopes only observe; they never
//! change control flow.

use crate::runner::Verbosity;
use crate::task::Command;
use crate::ui;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

/// What a closed scope left behind
#[derive(Debug, Clone)]
pub struct ScopeRecord {
    /// Task name, or target name for target scopes
    pub label: String,
    pub command: Command,
    /// Whether this scope wrapped a whole target rather than a single task
    pub target: bool,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

struct TrackerState {
    verbosity: Verbosity,
    records: Vec<ScopeRecord>,
}

/// Opens scopes and collects their records in closing order
#[derive(Clone)]
pub struct ScopeTracker {
    state: Rc<RefCell<TrackerState>>,
}

impl ScopeTracker {
    pub fn new(verbosity: Verbosity) -> Self {
        ScopeTracker {
            state: Rc::new(RefCell::new(TrackerState {
                verbosity,
                records: Vec::new(),
            })),
        }
    }

    /// Scope around a single task action
    pub fn open(&self, task: &str, command: Command) -> Scope {
        self.open_scope(task, command, false)
    }

    /// Scope around everything a selected target runs
    pub fn open_target(&self, target: &str, command: Command) -> Scope {
        self.open_scope(target, command, true)
    }

    fn open_scope(&self, label: &str, command: Command, target: bool) -> Scope {
        if self.state.borrow().verbosity >= Verbosity::Normal {
            let kind = if target { "target " } else { "" };
            eprintln!("{} {}{}", ui::command_tag(&command.to_string()), kind, label);
        }

        Scope {
            tracker: self.clone(),
            label: label.to_string(),
            command,
            target,
            started: Instant::now(),
            succeeded: false,
        }
    }

    pub fn records(&self) -> Vec<ScopeRecord> {
        self.state.borrow().records.clone()
    }

    pub fn failures(&self) -> Vec<ScopeRecord> {
        self.state
            .borrow()
            .records
            .iter()
            .filter(|r| r.outcome == Outcome::Failed)
            .cloned()
            .collect()
    }

    fn close(&self, record: ScopeRecord) {
        let mut state = self.state.borrow_mut();

        let show = match record.outcome {
            Outcome::Succeeded => state.verbosity >= Verbosity::Verbose,
            Outcome::Failed => state.verbosity >= Verbosity::Quiet,
        };
        if show {
            let status = match record.outcome {
                Outcome::Succeeded => ui::succeeded(),
                Outcome::Failed => ui::failed(),
            };
            eprintln!(
                "{} {} {} ({:.2?})",
                ui::command_tag(&record.command.to_string()),
                record.label,
                status,
                record.elapsed
            );
        }

        state.records.push(record);
    }
}

/// An open execution scope; see the module docs
pub struct Scope {
    tracker: ScopeTracker,
    label: String,
    command: Command,
    target: bool,
    started: Instant,
    succeeded: bool,
}

impl Scope {
    /// Mark the wrapped execution as successful and close the scope
    pub fn succeed(mut self) {
        self.succeeded = true;
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        let outcome = if self.succeeded {
            Outcome::Succeeded
        } else {
            Outcome::Failed
        };
        self.tracker.close(ScopeRecord {
            label: std::mem::take(&mut self.label),
            command: self.command,
            target: self.target,
            outcome,
            elapsed: self.started.elapsed(),
        });
    }
}
