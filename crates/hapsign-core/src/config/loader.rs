//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    info!(path = %path.display(), "loading config");

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound(path.to_path_buf())
        } else {
            ConfigError::Io(e)
        }
    })?;

    let config: Config = toml::from_str(&content).map_err(ConfigError::TomlError)?;

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// Parents are walked until the filesystem root; the first match wins.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    search_config(start_dir, None)
}

/// Walk from `start_dir` towards the root, stopping after `boundary` if given
fn search_config(start_dir: &Path, boundary: Option<&Path>) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.is_file() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }
        }

        if boundary == Some(current.as_path()) || !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration, falling back to defaults when no file exists.
///
/// A config file that exists but fails to parse or validate is still an error.
pub fn load_config_or_default(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    load_or_default(dir, None)
}

fn load_or_default(dir: &Path, boundary: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    match search_config(dir, boundary) {
        Some(path) => {
            let config = load_config(&path)?;
            Ok((config, Some(path)))
        }
        None => {
            debug!(dir = %dir.display(), "no config found, using defaults");
            Ok((Config::default(), None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HapsignError;
    use tempfile::TempDir;

    #[test]
    fn test_find_config() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("hapsign.toml");
        std::fs::write(&config_path, "[decrypt]\nprogram = \"node\"").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_visible_file() {
        let temp = TempDir::new().unwrap();
        let visible = temp.path().join("hapsign.toml");
        let hidden = temp.path().join(".hapsign.toml");
        std::fs::write(&visible, "").unwrap();
        std::fs::write(&hidden, "").unwrap();

        assert_eq!(find_config(temp.path()).unwrap(), visible);
    }

    #[test]
    fn test_find_config_in_parent() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(".hapsign.toml");
        std::fs::write(&config_path, "").unwrap();

        let nested = temp.path().join("entry").join("src");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config(&nested).unwrap(), config_path);
    }

    #[test]
    fn test_load_config_partial_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("hapsign.toml");
        std::fs::write(
            &config_path,
            "[decrypt]\nprogram = \"decrypt-pwd\"\nargs = []\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.decrypt.program, "decrypt-pwd");
        assert!(config.decrypt.args.is_empty());
        assert_eq!(config.script, Config::default().script);
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("hapsign.toml");
        std::fs::write(&config_path, "[decrypt\nprogram = ").unwrap();

        let err = load_config(&config_path).unwrap_err();
        assert!(matches!(
            err,
            HapsignError::Config(ConfigError::TomlError(_))
        ));
    }

    #[test]
    fn test_load_config_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_config(&temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, HapsignError::Config(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("entry");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = load_or_default(&nested, Some(temp.path())).unwrap();
        assert!(path.is_none());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_search_stops_at_boundary() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("hapsign.toml"), "").unwrap();

        let project = temp.path().join("project");
        let nested = project.join("entry");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(search_config(&nested, Some(project.as_path())), None);
        assert_eq!(
            search_config(&nested, Some(temp.path())),
            Some(temp.path().join("hapsign.toml"))
        );
    }

    #[test]
    fn test_load_or_default_with_file() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("hapsign.toml");
        std::fs::write(&config_path, "[script]\noutput = \"out.sh\"\n").unwrap();

        let (config, path) = load_or_default(temp.path(), Some(temp.path())).unwrap();
        assert_eq!(path, Some(config_path));
        assert_eq!(config.script.output, PathBuf::from("out.sh"));
    }

    #[test]
    fn test_load_config_or_default_propagates_invalid_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("hapsign.toml"),
            "[script]\noutput = \"\"\n",
        )
        .unwrap();

        assert!(load_config_or_default(temp.path()).is_err());
    }
}
