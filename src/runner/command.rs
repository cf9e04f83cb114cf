//! Shell command execution

use crate::config;
use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::{interpolate, Context, Verbosity};
use crate::ui;
use std::process::{Command as StdCommand, Stdio};

/// Runtime representation of a shell command
#[derive(Debug, Clone)]
pub enum ShellCommand {
    Simple(String),

    Complex {
        exec: String,
        print: String,
        quiet: bool,
        dir: Option<String>,
    },
}

impl ShellCommand {
    pub fn from_config(config: config::Command) -> Self {
        match config {
            config::Command::Simple(cmd) => ShellCommand::Simple(cmd),
            config::Command::Complex(detail) => ShellCommand::Complex {
                print: detail.print.clone().unwrap_or_else(|| detail.exec.clone()),
                exec: detail.exec,
                quiet: detail.quiet,
                dir: detail.dir,
            },
        }
    }

    pub fn exec(&self) -> &str {
        match self {
            ShellCommand::Simple(cmd) => cmd,
            ShellCommand::Complex { exec, .. } => exec,
        }
    }

    pub fn print(&self) -> &str {
        match self {
            ShellCommand::Simple(cmd) => cmd,
            ShellCommand::Complex { print, .. } => print,
        }
    }

    pub fn is_quiet(&self) -> bool {
        match self {
            ShellCommand::Simple(_) => false,
            ShellCommand::Complex { quiet, .. } => *quiet,
        }
    }

    pub fn dir(&self) -> Option<&str> {
        match self {
            ShellCommand::Simple(_) => None,
            ShellCommand::Complex { dir, .. } => dir.as_deref(),
        }
    }
}

/// Execute a command in the given context
pub fn execute_command(cmd: &ShellCommand, ctx: &Context) -> ExecutionResult<()> {
    let exec_str = interpolate(cmd.exec(), &ctx.vars).map_err(|e| ExecutionError::InvalidValue {
        name: "command".to_string(),
        error: e.to_string(),
    })?;

    if !cmd.is_quiet() && ctx.verbosity >= Verbosity::Normal {
        let print_str =
            interpolate(cmd.print(), &ctx.vars).unwrap_or_else(|_| cmd.print().to_string());
        eprintln!("{} {}", ui::run_tag(), print_str);
    }

    let working_dir = match cmd.dir() {
        Some(dir) => {
            let dir = interpolate(dir, &ctx.vars).map_err(|e| ExecutionError::InvalidValue {
                name: "dir".to_string(),
                error: e.to_string(),
            })?;
            ctx.working_dir.join(dir)
        }
        None => ctx.working_dir.clone(),
    };

    let (program, interpreter_args) = ctx
        .interpreter
        .split_first()
        .ok_or_else(|| ExecutionError::Environment("no interpreter configured".to_string()))?;

    let mut command = StdCommand::new(program);
    command
        .args(interpreter_args)
        .arg(&exec_str)
        .current_dir(&working_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .envs(&ctx.vars);

    let status = command.status().map_err(|e| {
        ExecutionError::Environment(format!("failed to start '{}': {}", program, e))
    })?;

    if !status.success() {
        return Err(ExecutionError::CommandFailed(status.code()));
    }

    Ok(())
}
