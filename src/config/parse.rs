//! Build file parsing and discovery

use crate::config::types::Config;
use crate::error::{ConfigError, ConfigResult, ReboundError};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default build file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["rebound.yml", "rebound.yaml"];

/// Find the build file by searching current and parent directories
pub fn find_config_file() -> ConfigResult<PathBuf> {
    find_config_file_from(env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?)
}

/// Find the build file starting from a specific directory
pub fn find_config_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        for file_name in CONFIG_FILE_NAMES {
            let config_path = current_dir.join(file_name);
            searched_paths.push(config_path.display().to_string());

            if config_path.is_file() {
                return Ok(config_path);
            }
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(ConfigError::NotFound(searched_paths.join(", "))),
        }
    }
}

/// Parse a build file from a path
pub fn parse_config_file(path: &Path) -> Result<Config, ReboundError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("Failed to read {}: {}", path.display(), e)))?;

    parse_config(&contents)
}

/// Parse a build file from a string
pub fn parse_config(yaml: &str) -> Result<Config, ReboundError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Parse a build file with automatic discovery
pub fn parse_config_auto() -> Result<(Config, PathBuf), ReboundError> {
    let config_path = find_config_file()?;
    let config = parse_config_file(&config_path)?;
    Ok((config, config_path))
}

/// Read the variables of the build file's `env-file`, if it names one
pub fn load_env_file(config: &Config, config_path: &Path) -> ConfigResult<HashMap<String, String>> {
    let Some(env_file) = &config.env_file else {
        return Ok(HashMap::new());
    };

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let path = base_dir.join(env_file);
    let include_error = |error: String| ConfigError::IncludeFile {
        path: path.clone(),
        error,
    };

    let mut vars = HashMap::new();
    for item in dotenvy::from_path_iter(&path).map_err(|e| include_error(e.to_string()))? {
        let (key, value) = item.map_err(|e| include_error(e.to_string()))?;
        vars.insert(key, value);
    }
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SIMPLE: &str = r#"
tasks:
  test:
    build: echo "test"
"#;

    #[test]
    fn test_parse_simple_config() {
        let config = parse_config(SIMPLE).unwrap();
        assert_eq!(config.tasks.len(), 1);
        assert!(config.tasks.contains_key("test"));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_config("tasks: [unclosed");
        assert!(matches!(result, Err(ReboundError::Yaml(_))));
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("rebound.yml");
        fs::write(&config_path, SIMPLE).unwrap();

        let found = find_config_file_from(temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("rebound.yaml");
        let sub_dir = temp_dir.path().join("subdir");
        fs::create_dir(&sub_dir).unwrap();
        fs::write(&config_path, SIMPLE).unwrap();

        let found = find_config_file_from(sub_dir).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_config_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result = find_config_file_from(temp_dir.path().to_path_buf());
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_env_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("rebound.yml");
        fs::write(temp_dir.path().join("build.env"), "PROFILE=release\nTARGET_DIR=out\n").unwrap();

        let config = parse_config("env-file: build.env\n").unwrap();
        let vars = load_env_file(&config, &config_path).unwrap();
        assert_eq!(vars.get("PROFILE"), Some(&"release".to_string()));
        assert_eq!(vars.get("TARGET_DIR"), Some(&"out".to_string()));
    }

    #[test]
    fn test_missing_env_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("rebound.yml");

        let config = parse_config("env-file: missing.env\n").unwrap();
        let result = load_env_file(&config, &config_path);
        assert!(matches!(result, Err(ConfigError::IncludeFile { .. })));
    }

    #[test]
    fn test_no_env_file() {
        let config = parse_config(SIMPLE).unwrap();
        let vars = load_env_file(&config, Path::new("rebound.yml")).unwrap();
        assert!(vars.is_empty());
    }
}
