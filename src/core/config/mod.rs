//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! refmap has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides and predefined refspec lists
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$REFMAP_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/refmap/config.toml`
//! 3. `~/.refmap/config.toml` (canonical write location)
//!
//! # Repo Config Location
//!
//! `<git-dir>/refmap/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use refmap::core::config::Config;
//! use refmap::core::validate::Mode;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/repo/.git"))).unwrap();
//! let config = result.config;
//!
//! println!("Remote: {}", config.remote());
//! for spec in config.predefined(Mode::Fetch) {
//!     println!("{}", spec);
//! }
//! ```

pub mod schema;

pub use schema::{GlobalConfig, RepoConfig, SpecList};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::spec::RefSpec;
use crate::core::types::RemoteName;
use crate::core::validate::Mode;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence rules automatically. Repo config overrides
/// global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    global_path: Option<PathBuf>,
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `git_dir` is provided, also loads repo-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load(git_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let global_path = Self::find_global();
        let repo_path = git_dir
            .map(Self::repo_config_path)
            .filter(|path| path.exists());
        Self::from_files(global_path.as_deref(), repo_path.as_deref())
    }

    /// Load configuration from explicit file paths.
    ///
    /// `None` means the scope has no file and its defaults apply.
    pub fn from_files(
        global_path: Option<&Path>,
        repo_path: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let global: GlobalConfig = match global_path {
            Some(path) => Self::read_config(path)?,
            None => GlobalConfig::default(),
        };
        let repo: Option<RepoConfig> = repo_path.map(Self::read_config).transpose()?;

        global.validate()?;
        let mut warnings = Vec::new();
        if let (Some(repo), Some(path)) = (&repo, repo_path) {
            repo.validate()?;
            warnings.extend(Self::lint_specs(repo, path));
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path: global_path.map(Path::to_path_buf),
                repo_path: repo_path.map(Path::to_path_buf),
            },
            warnings,
        })
    }

    /// Locate the global config file, if one exists.
    fn find_global() -> Option<PathBuf> {
        // 1. Check $REFMAP_CONFIG
        if let Ok(path) = std::env::var("REFMAP_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/refmap/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("refmap/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.refmap/config.toml
        dirs::home_dir()
            .map(|home| home.join(".refmap/config.toml"))
            .filter(|path| path.exists())
    }

    /// Read and parse a config file.
    fn read_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Warn about predefined specs whose shape is inconsistent.
    ///
    /// Such specs still load; the validator rejects them when used.
    fn lint_specs(repo: &RepoConfig, path: &Path) -> Vec<ConfigWarning> {
        [Mode::Push, Mode::Fetch]
            .into_iter()
            .flat_map(move |mode| {
                repo.specs(mode)
                    .into_iter()
                    .flat_map(|list| list.specs.iter())
                    .filter(|spec| !spec.is_shape_consistent())
                    .map(move |spec| ConfigWarning {
                        message: format!(
                            "{mode} spec '{spec}' mixes a wildcard with a concrete name"
                        ),
                        path: path.to_path_buf(),
                    })
            })
            .collect()
    }

    /// Get the canonical path for global config.
    ///
    /// Returns `~/.refmap/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".refmap/config.toml"))
    }

    /// Get the path for repo config inside `git_dir`.
    pub fn repo_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("refmap/config.toml")
    }

    /// Write global config atomically.
    pub fn write_global(config: &GlobalConfig) -> Result<PathBuf, ConfigError> {
        let path = Self::global_config_path()?;
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write repo config atomically.
    ///
    /// Creates parent directories if needed.
    pub fn write_repo(git_dir: &Path, config: &RepoConfig) -> Result<PathBuf, ConfigError> {
        let path = Self::repo_config_path(git_dir);
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write a config file atomically (temp file, then rename).
    fn write_config_atomic<T: serde::Serialize>(
        path: &Path,
        config: &T,
    ) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the remote name, if either scope sets one.
    pub fn configured_remote(&self) -> Option<RemoteName> {
        self.repo
            .as_ref()
            .and_then(|r| r.remote.as_deref())
            .or(self.global.remote.as_deref())
            .and_then(|name| RemoteName::new(name).ok())
    }

    /// Get the remote name.
    ///
    /// Defaults to "origin" if not configured.
    pub fn remote(&self) -> RemoteName {
        self.configured_remote().unwrap_or_default()
    }

    /// Get the default mode.
    ///
    /// Defaults to push if not configured.
    pub fn default_mode(&self) -> Mode {
        self.repo
            .as_ref()
            .and_then(|r| r.default_mode)
            .or(self.global.default_mode)
            .unwrap_or(Mode::Push)
    }

    /// Predefined specs for `mode`, in configured order.
    pub fn predefined(&self, mode: Mode) -> Vec<RefSpec> {
        self.repo
            .as_ref()
            .and_then(|r| r.specs(mode))
            .map(|list| list.specs.clone())
            .unwrap_or_default()
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_files() {
        let result = Config::from_files(None, None).unwrap();
        let config = result.config;

        assert_eq!(config.configured_remote(), None);
        assert_eq!(config.remote().as_str(), "origin");
        assert_eq!(config.default_mode(), Mode::Push);
        assert!(config.predefined(Mode::Fetch).is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn load_global_from_env() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "default_mode = \"fetch\"\n").unwrap();

        std::env::set_var("REFMAP_CONFIG", config_path.to_str().unwrap());
        let result = Config::load(None);
        std::env::remove_var("REFMAP_CONFIG");

        let config = result.unwrap().config;
        assert_eq!(config.default_mode(), Mode::Fetch);
        assert_eq!(config.global_config_loaded_from(), Some(config_path.as_path()));
    }

    #[test]
    fn load_repo_config() {
        let temp = TempDir::new().unwrap();
        let path = Config::repo_config_path(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"
            remote = "upstream"

            [fetch]
            specs = ["+refs/heads/*:refs/remotes/upstream/*"]
            "#,
        )
        .unwrap();

        let result = Config::from_files(None, Some(&path)).unwrap();
        let config = result.config;

        assert_eq!(config.remote().as_str(), "upstream");
        assert_eq!(config.predefined(Mode::Fetch).len(), 1);
        assert!(config.predefined(Mode::Push).is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn inconsistent_spec_warns() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [push]
            specs = ["refs/heads/*:refs/heads/main"]
            "#,
        )
        .unwrap();

        let result = Config::from_files(None, Some(&path)).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("refs/heads/*:refs/heads/main"));
    }

    #[test]
    fn write_repo_config_atomic() {
        let temp = TempDir::new().unwrap();

        let mut config = RepoConfig {
            remote: Some("origin".to_string()),
            ..Default::default()
        };
        config
            .specs_mut(Mode::Push)
            .specs
            .push(RefSpec::parse(":refs/heads/old").unwrap());

        let path = Config::write_repo(temp.path(), &config).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());

        let loaded = Config::from_files(None, Some(&path)).unwrap();
        assert_eq!(
            loaded.config.predefined(Mode::Push),
            vec![RefSpec::deletion("refs/heads/old")]
        );
    }

    #[test]
    fn invalid_remote_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "remote = \"bad remote\"").unwrap();

        assert!(Config::from_files(None, Some(&path)).is_err());
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            remote = "origin"
            unknown_field = true
            "#,
        )
        .unwrap();

        let result = Config::from_files(None, Some(&path));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn precedence_repo_overrides_global() {
        let config = Config {
            global: GlobalConfig {
                remote: Some("global".to_string()),
                default_mode: Some(Mode::Fetch),
            },
            repo: Some(RepoConfig {
                remote: Some("upstream".to_string()),
                ..Default::default()
            }),
            global_path: None,
            repo_path: None,
        };

        assert_eq!(config.remote().as_str(), "upstream");
        assert_eq!(config.default_mode(), Mode::Fetch);
    }
}
