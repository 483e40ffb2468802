//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$REFMAP_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/refmap/config.toml`
//! 3. `~/.refmap/config.toml` (canonical write location)
//!
//! # Repo Config
//!
//! Located at `<git-dir>/refmap/config.toml`.
//!
//! # Validation
//!
//! Refspec lists are parsed while deserializing, so a list entry that is not
//! a refspec at all fails the load. Entries that parse but would not pass
//! validation are reported as warnings by the loader.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::spec::RefSpec;
use crate::core::types::RemoteName;
use crate::core::validate::Mode;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// default_mode = "fetch"
/// remote = "origin"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Mode used when a command does not say
    pub default_mode: Option<Mode>,

    /// Remote used for naming conventions
    pub remote: Option<String>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_remote(self.remote.as_deref())
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// remote = "upstream"
///
/// [push]
/// specs = ["refs/heads/*:refs/for/*"]
///
/// [fetch]
/// specs = ["+refs/heads/*:refs/remotes/upstream/*", "+refs/tags/*:refs/tags/*"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Remote name (default: "origin")
    pub remote: Option<String>,

    /// Mode used when a command does not say
    pub default_mode: Option<Mode>,

    /// Predefined push specs
    pub push: Option<SpecList>,

    /// Predefined fetch specs
    pub fetch: Option<SpecList>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_remote(self.remote.as_deref())
    }

    /// The predefined list for `mode`, if configured.
    pub fn specs(&self, mode: Mode) -> Option<&SpecList> {
        match mode {
            Mode::Push => self.push.as_ref(),
            Mode::Fetch => self.fetch.as_ref(),
        }
    }

    /// Mutable access to the predefined list for `mode`, creating it if needed.
    pub fn specs_mut(&mut self, mode: Mode) -> &mut SpecList {
        let slot = match mode {
            Mode::Push => &mut self.push,
            Mode::Fetch => &mut self.fetch,
        };
        slot.get_or_insert_with(SpecList::default)
    }
}

/// An ordered list of predefined refspecs, persisted as strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SpecList {
    pub specs: Vec<RefSpec>,
}

fn validate_remote(remote: Option<&str>) -> Result<(), ConfigError> {
    if let Some(remote) = remote {
        RemoteName::new(remote)
            .map_err(|e| ConfigError::InvalidValue(format!("invalid remote: {}", e)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod global_config {
        use super::*;

        #[test]
        fn defaults() {
            let config = GlobalConfig::default();
            assert!(config.default_mode.is_none());
            assert!(config.remote.is_none());
        }

        #[test]
        fn parses_mode() {
            let config: GlobalConfig = toml::from_str("default_mode = \"fetch\"").unwrap();
            assert_eq!(config.default_mode, Some(Mode::Fetch));
            assert!(toml::from_str::<GlobalConfig>("default_mode = \"pull\"").is_err());
        }

        #[test]
        fn invalid_remote() {
            let config = GlobalConfig {
                remote: Some("a/b".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }
    }

    mod repo_config {
        use super::*;

        #[test]
        fn defaults() {
            let config = RepoConfig::default();
            assert!(config.remote.is_none());
            assert!(config.specs(Mode::Push).is_none());
        }

        #[test]
        fn empty_remote_rejected() {
            let config = RepoConfig {
                remote: Some("".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn spec_lists() {
            let config: RepoConfig = toml::from_str(
                r#"
                [fetch]
                specs = ["+refs/heads/*:refs/remotes/origin/*", ":refs/heads/old"]
                "#,
            )
            .unwrap();
            let fetch = config.specs(Mode::Fetch).unwrap();
            assert_eq!(fetch.specs.len(), 2);
            assert!(fetch.specs[0].is_force());
            assert!(fetch.specs[1].is_deletion());
        }

        #[test]
        fn unparseable_spec_rejected() {
            let result: Result<RepoConfig, _> = toml::from_str(
                r#"
                [push]
                specs = ["a:b:c"]
                "#,
            );
            assert!(result.is_err());
        }

        #[test]
        fn specs_mut_creates_list() {
            let mut config = RepoConfig::default();
            config
                .specs_mut(Mode::Push)
                .specs
                .push(RefSpec::new("refs/heads/a", "refs/heads/a"));
            assert_eq!(config.specs(Mode::Push).unwrap().specs.len(), 1);
            assert!(config.specs(Mode::Fetch).is_none());
        }

        #[test]
        fn roundtrip() {
            let config = RepoConfig {
                remote: Some("upstream".to_string()),
                default_mode: Some(Mode::Push),
                push: Some(SpecList {
                    specs: vec![RefSpec::parse("refs/heads/*:refs/for/*").unwrap()],
                }),
                fetch: Some(SpecList {
                    specs: vec![RefSpec::parse("+refs/tags/*:refs/tags/*").unwrap()],
                }),
            };

            let toml = toml::to_string_pretty(&config).unwrap();
            let parsed: RepoConfig = toml::from_str(&toml).unwrap();
            assert_eq!(config, parsed);
        }

        #[test]
        fn reject_unknown_fields() {
            let toml = r#"
                remote = "origin"
                unknown_field = true
            "#;

            let result: Result<RepoConfig, _> = toml::from_str(toml);
            assert!(result.is_err());
        }
    }
}
