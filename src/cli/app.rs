//! Main CLI application

use crate::config::{load_env_file, parse_config_auto, parse_config_file, validate_config, Config};
use crate::error::{ConfigError, ConfigResult, Result};
use crate::runner::{Context, Executor, Verbosity};
use crate::task::{
    describe, ensure_required_parameters, find_parameters, Command as TaskCommand, Target,
    TaskRef, TaskRegistry,
};
use crate::ui;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::collections::HashMap;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

/// How a run ended when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The selected targets were executed
    Completed,
    /// Targets were listed on request
    Listed,
    /// Nothing usable was selected; usage and targets were printed
    Usage,
}

/// CLI application
pub struct App {
    /// Parsed build file
    config: Config,
    /// Build file path
    config_path: PathBuf,
    /// Tasks and targets of the build file
    registry: Rc<TaskRegistry>,
}

impl App {
    /// Create a new app from the build file found in the current or a parent directory
    pub fn new() -> Result<Self> {
        let (config, config_path) = parse_config_auto()?;
        Self::from_config(config, config_path)
    }

    /// Create app with a specific build file
    pub fn with_config_file(path: PathBuf) -> Result<Self> {
        let config = parse_config_file(&path)?;
        Self::from_config(config, path)
    }

    pub fn from_config(config: Config, config_path: PathBuf) -> Result<Self> {
        validate_config(&config)?;
        let registry = TaskRegistry::from_config(&config)?;

        Ok(App {
            config,
            config_path,
            registry,
        })
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Run the application with parsed command line arguments
    pub fn run(&self, matches: &ArgMatches) -> Result<Outcome> {
        let verbosity = get_verbosity(matches);
        let mut stdout = io::stdout();

        if matches.get_flag("list") {
            self.write_targets(&mut stdout)?;
            return Ok(Outcome::Listed);
        }

        let Some(command_name) = matches.get_one::<String>("command") else {
            self.write_usage(&mut stdout)?;
            return Ok(Outcome::Usage);
        };
        let command: TaskCommand = command_name.parse()?;

        let names: Vec<&String> = matches
            .get_many::<String>("targets")
            .map(|values| values.collect())
            .unwrap_or_default();
        if names.is_empty() {
            self.write_usage(&mut stdout)?;
            return Ok(Outcome::Usage);
        }

        let targets = match names
            .iter()
            .map(|name| self.registry.target(name))
            .collect::<ConfigResult<Vec<_>>>()
        {
            Ok(targets) => targets,
            Err(e @ ConfigError::TargetNotFound(_)) => {
                self.write_usage(&mut stdout)?;
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };

        let mut vars = load_env_file(&self.config, &self.config_path)?;
        vars.extend(parse_params(matches)?);

        let roots: Vec<TaskRef> = targets.iter().map(|t| t.task.clone()).collect();
        ensure_required_parameters(&roots, &vars)?;

        let mut ctx = Context::for_build_file(&self.config_path)
            .with_verbosity(verbosity)
            .with_vars(vars);
        if let Some(interpreter) = &self.config.interpreter {
            ctx = ctx.with_interpreter(interpreter.clone());
        }

        let mut executor = Executor::new(ctx);
        build_targets(&mut executor, command, &targets)?;

        executor.context().print_debug(&format!(
            "{} {} task(s)",
            command,
            executor.tracker().records().iter().filter(|r| !r.target).count()
        ));
        Ok(Outcome::Completed)
    }

    fn write_usage(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "usage: rebound build|clean target-name")?;
        self.write_targets(out)
    }

    /// Print every target with its description and the parameters it needs
    pub fn write_targets(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", ui::heading("targets:"))?;

        for target in self.registry.targets() {
            let description = describe(target.task.as_ref());
            if description == target.name {
                writeln!(out, "  {}", target.name)?;
            } else {
                writeln!(out, "  {} - {}", target.name, description)?;
            }

            for param in find_parameters(std::slice::from_ref(&target.task))? {
                write!(out, "    /{}", param.name)?;
                if param.required {
                    write!(out, " required")?;
                }
                if let Some(default) = &param.default {
                    write!(out, " default: {}", default)?;
                }
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

/// Run every target in its own scope, stopping at the first failure
pub fn build_targets(executor: &mut Executor, command: TaskCommand, targets: &[Target]) -> Result<()> {
    for target in targets {
        let scope = executor.tracker().open_target(&target.name, command);
        executor.execute(command, std::slice::from_ref(&target.task))?;
        scope.succeed();
    }
    Ok(())
}

/// Build the clap command
pub fn build_command() -> Command {
    Command::new("rebound")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build tasks that declare their dependencies through their own members")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Path to rebound.yml build file"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print command output and errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("param")
                .short('p')
                .long("param")
                .value_name("NAME=VALUE")
                .help("Set a build parameter")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .help("List targets and their parameters")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("command")
                .value_name("COMMAND")
                .help("build or clean"),
        )
        .arg(
            Arg::new("targets")
                .value_name("TARGET")
                .help("Targets to run the command on")
                .num_args(0..),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Parse `-p NAME=VALUE` arguments
fn parse_params(matches: &ArgMatches) -> ConfigResult<HashMap<String, String>> {
    let mut params = HashMap::new();

    for raw in matches.get_many::<String>("param").into_iter().flatten() {
        match raw.split_once('=') {
            Some((name, value)) if !name.is_empty() => {
                params.insert(name.to_string(), value.to_string());
            }
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "parameter '{}' must look like NAME=VALUE",
                    raw
                )))
            }
        }
    }

    Ok(params)
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<Outcome> {
    run_from(std::env::args_os())
}

/// Run the CLI application with provided arguments
pub fn run_from<I, T>(args: I) -> Result<Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command().get_matches_from(args);

    let app = match matches.get_one::<String>("file") {
        Some(path) => App::with_config_file(PathBuf::from(path))?,
        None => App::new()?,
    };

    app.run(&matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::error::ReboundError;
    use std::fs;
    use tempfile::TempDir;

    const BUILD_FILE: &str = r#"
parameters:
  version:
    required: true
  profile:
    default: debug
tasks:
  generate:
    description: Generate sources
    build: echo "generate ${profile}" >> log.txt
    deps:
      profile: profile
  compile:
    build: echo "compile ${version}" >> log.txt
    clean: echo "clean compile" >> log.txt
    deps:
      sources: generate
      version: version
      profile: profile
"#;

    fn app_in(temp_dir: &TempDir) -> App {
        let config_path = temp_dir.path().join("rebound.yml");
        fs::write(&config_path, BUILD_FILE).unwrap();
        App::from_config(parse_config(BUILD_FILE).unwrap(), config_path).unwrap()
    }

    fn matches(args: &[&str]) -> ArgMatches {
        let mut full = vec!["rebound", "-s"];
        full.extend_from_slice(args);
        build_command().get_matches_from(full)
    }

    fn log(temp_dir: &TempDir) -> String {
        fs::read_to_string(temp_dir.path().join("log.txt")).unwrap_or_default()
    }

    #[test]
    fn test_get_verbosity() {
        assert_eq!(
            get_verbosity(&build_command().get_matches_from(vec!["rebound"])),
            Verbosity::Normal
        );
        assert_eq!(
            get_verbosity(&build_command().get_matches_from(vec!["rebound", "-v"])),
            Verbosity::Verbose
        );
        assert_eq!(
            get_verbosity(&build_command().get_matches_from(vec!["rebound", "-q", "-v"])),
            Verbosity::Quiet
        );
    }

    #[test]
    fn test_parse_params() {
        let params = parse_params(&matches(&["-p", "version=1.2", "--param", "empty="])).unwrap();
        assert_eq!(params.get("version"), Some(&"1.2".to_string()));
        assert_eq!(params.get("empty"), Some(&String::new()));

        assert!(matches!(
            parse_params(&matches(&["-p", "novalue"])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(parse_params(&matches(&["-p", "=x"])).is_err());
    }

    #[test]
    fn test_build_runs_dependencies_first() {
        let temp_dir = TempDir::new().unwrap();
        let app = app_in(&temp_dir);

        let outcome = app
            .run(&matches(&["-p", "version=2.0", "build", "compile"]))
            .unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(log(&temp_dir), "generate debug\ncompile 2.0\n");
    }

    #[test]
    fn test_missing_required_parameter() {
        let temp_dir = TempDir::new().unwrap();
        let app = app_in(&temp_dir);

        let result = app.run(&matches(&["build", "compile"]));

        assert!(matches!(
            result,
            Err(ReboundError::Config(ConfigError::MissingParameter(name))) if name == "version"
        ));
        assert_eq!(log(&temp_dir), "");
    }

    #[test]
    fn test_unknown_command() {
        let temp_dir = TempDir::new().unwrap();
        let app = app_in(&temp_dir);

        let result = app.run(&matches(&["deploy", "compile"]));
        assert!(matches!(
            result,
            Err(ReboundError::Config(ConfigError::UnknownCommand(_)))
        ));
    }

    #[test]
    fn test_selection_without_targets() {
        let temp_dir = TempDir::new().unwrap();
        let app = app_in(&temp_dir);

        assert_eq!(app.run(&matches(&[])).unwrap(), Outcome::Usage);
        assert_eq!(app.run(&matches(&["build"])).unwrap(), Outcome::Usage);
        assert_eq!(app.run(&matches(&["--list"])).unwrap(), Outcome::Listed);
        assert!(matches!(
            app.run(&matches(&["build", "nope"])),
            Err(ReboundError::Config(ConfigError::TargetNotFound(name))) if name == "nope"
        ));
    }

    #[test]
    fn test_write_targets() {
        let temp_dir = TempDir::new().unwrap();
        let app = app_in(&temp_dir);
        colored::control::set_override(false);

        let mut out = Vec::new();
        app.write_targets(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "\ntargets:\n  compile\n    /profile default: debug\n    /version required\n  generate - Generate sources\n    /profile default: debug\n"
        );
    }

    #[test]
    fn test_clean_only_runs_clean_commands() {
        let temp_dir = TempDir::new().unwrap();
        let app = app_in(&temp_dir);

        app.run(&matches(&["-p", "version=1", "clean", "compile"]))
            .unwrap();
        assert_eq!(log(&temp_dir), "clean compile\n");
    }
}
