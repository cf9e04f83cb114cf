//! CLI interface and argument parsing
//!
//! Loads the build file, selects targets and parameters from the command
//! line, and runs the selected command on each target.

pub mod app;

pub use app::*;
