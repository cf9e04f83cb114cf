//! Common test utilities

#![allow(dead_code)]

use rebound::error::{ConfigResult, ExecutionError, ExecutionResult};
use rebound::runner::{Context, Executor, Verbosity};
use rebound::task::{Dependency, Task, TaskRef};
use std::borrow::Cow;
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use tempfile::TempDir;

/// Create a temporary directory with a rebound.yml file
pub fn create_test_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rebound.yml");
    fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}

/// Create a test config with an empty subdirectory next to it
pub fn create_test_config_in_subdir(content: &str) -> (TempDir, PathBuf, PathBuf) {
    let (temp_dir, config_path) = create_test_config(content);
    let sub_dir = temp_dir.path().join("subdir");
    fs::create_dir(&sub_dir).unwrap();
    (temp_dir, config_path, sub_dir)
}

/// Contents of a log file written by build commands, or empty if none ran
pub fn read_log(temp_dir: &TempDir) -> String {
    fs::read_to_string(temp_dir.path().join("log.txt")).unwrap_or_default()
}

pub type Log = Rc<RefCell<Vec<String>>>;

/// Task that records its builds and cleans into a shared log
pub struct Step {
    pub name: String,
    pub log: Log,
    pub fail: bool,
    pub members: RefCell<Vec<(String, TaskRef)>>,
}

impl Step {
    pub fn new(name: &str, log: &Log) -> Rc<Self> {
        Rc::new(Step {
            name: name.to_string(),
            log: log.clone(),
            fail: false,
            members: RefCell::new(Vec::new()),
        })
    }

    pub fn failing(name: &str, log: &Log) -> Rc<Self> {
        Rc::new(Step {
            name: name.to_string(),
            log: log.clone(),
            fail: true,
            members: RefCell::new(Vec::new()),
        })
    }

    pub fn depends_on(&self, member: &str, task: TaskRef) {
        self.members.borrow_mut().push((member.to_string(), task));
    }
}

impl Task for Step {
    fn dependency_members(&self) -> ConfigResult<Vec<Dependency>> {
        Ok(self
            .members
            .borrow()
            .iter()
            .map(|(name, task)| Dependency::single(name.as_str(), task.clone()))
            .collect())
    }

    fn build(&self, _ctx: &mut Context) -> ExecutionResult<()> {
        if self.fail {
            return Err(ExecutionError::CommandFailed(Some(1)));
        }
        self.log.borrow_mut().push(format!("build {}", self.name));
        Ok(())
    }

    fn clean(&self, _ctx: &mut Context) -> ExecutionResult<()> {
        self.log.borrow_mut().push(format!("clean {}", self.name));
        Ok(())
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

pub fn task(step: &Rc<Step>) -> TaskRef {
    step.clone()
}

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn silent_executor() -> Executor {
    Executor::new(Context::new().with_verbosity(Verbosity::Silent))
}
