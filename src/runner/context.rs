//! Execution context handed to task actions
//!
//! Holds what shell commands need while a command runs: where they run, the
//! variables they can interpolate, the interpreter and the output level.

use crate::ui;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

pub struct Context {
    /// Directory commands run in
    pub working_dir: PathBuf,

    /// Parameter values and env file entries, also exported to commands
    pub vars: HashMap<String, String>,

    /// Program and leading arguments commands are passed to
    pub interpreter: Vec<String>,

    pub verbosity: Verbosity,
}

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

impl Context {
    /// Context running in the current directory through `sh -c`
    pub fn new() -> Self {
        Context {
            working_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            vars: HashMap::new(),
            interpreter: vec!["sh".to_string(), "-c".to_string()],
            verbosity: Verbosity::Normal,
        }
    }

    /// Context running next to `build_file`
    ///
    /// A bare file name keeps the current directory.
    pub fn for_build_file(build_file: &Path) -> Self {
        let context = Context::new();
        match build_file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            Some(dir) => context.with_working_dir(dir.to_path_buf()),
            None => context,
        }
    }

    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = dir;
        self
    }

    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars = vars;
        self
    }

    pub fn with_interpreter(mut self, interpreter: Vec<String>) -> Self {
        self.interpreter = interpreter;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Make `value` visible to every later command as `name`
    pub fn export(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn print_debug(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            eprintln!("{} {}", ui::debug_tag(), message);
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
