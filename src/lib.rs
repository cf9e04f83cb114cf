//! Rebound - a build engine driven by task dependencies
//!
//! Tasks declare their dependencies through their own members. The executor
//! discovers the graph from those members, runs each task after everything it
//! depends on, and runs shared dependencies only once.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod task;
pub mod ui;

// Re-export commonly used types
pub use error::{ReboundError, Result};

/// Current version of Rebound
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
