//! Error types for Rebound

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Rebound operations
pub type Result<T> = std::result::Result<T, ReboundError>;

/// Main error type for Rebound
#[derive(Error, Debug)]
pub enum ReboundError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A dependency cycle found while walking the task graph
    #[error("{0}")]
    Cycle(#[from] CycleError),

    /// Task execution errors
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// Variable interpolation errors
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Build file, command line and dependency declaration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find build file (searched: {0})")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("no such command {0}, try build or clean")]
    UnknownCommand(String),

    #[error("Dependency '{member}' of task '{task}' holds a {found}, expected a task or a list of tasks")]
    UnsupportedDependency {
        task: String,
        member: String,
        found: String,
    },

    #[error("Task '{0}' is not defined")]
    TaskNotFound(String),

    #[error("Target '{0}' is not defined")]
    TargetNotFound(String),

    #[error("Parameter '{0}' is required but not provided")]
    MissingParameter(String),

    #[error("Name '{0}' is used by more than one task or parameter")]
    DuplicateNames(String),

    #[error("Failed to include file '{path}': {error}")]
    IncludeFile { path: PathBuf, error: String },
}

/// A dependency cycle, naming the tasks on it in traversal order
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Dependency cycle detected: {}", .tasks.join(" -> "))]
pub struct CycleError {
    pub tasks: Vec<String>,
}

/// Task execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command failed with exit code {0:?}")]
    CommandFailed(Option<i32>),

    #[error("Task '{task}' failed: {source}")]
    TaskFailed {
        task: String,
        #[source]
        source: Box<ExecutionError>,
    },

    #[error("Value of '{0}' was read before its task was built")]
    Unresolved(String),

    #[error("Invalid value for '{name}': {error}")]
    InvalidValue { name: String, error: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

/// Variable interpolation errors
#[derive(Error, Debug)]
pub enum InterpolationError {
    #[error("Variable '{0}' is not defined")]
    UndefinedVariable(String),

    #[error("Recursive interpolation detected")]
    RecursiveInterpolation,
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;

/// Specialized result type for interpolation operations
pub type InterpolationResult<T> = std::result::Result<T, InterpolationError>;

impl ReboundError {
    /// Whether this error came from the build definition rather than from running it
    pub fn is_configuration(&self) -> bool {
        matches!(self, ReboundError::Config(_) | ReboundError::Yaml(_))
    }
}
