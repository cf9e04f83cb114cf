//! Task execution engine
//!
//! This module walks task graphs and runs their actions, tracking every
//! execution in a scope.

pub mod command;
pub mod context;
pub mod executor;
pub mod interpolate;
pub mod scope;

pub use command::*;
pub use context::*;
pub use executor::*;
pub use interpolate::*;
pub use scope::*;
