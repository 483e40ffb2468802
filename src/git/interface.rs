//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module is the **single doorway** to repositories in refmap. It reads
//! reference names and remote configuration and turns them into the strong
//! types the core works with. It never writes to the repository.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::RemoteNotFound`]: The named remote is not configured
//! - [`GitError::InvalidRefSpec`]: A configured refspec cannot be parsed
//! - [`GitError::Internal`]: Anything else libgit2 reports
//!
//! # Example
//!
//! ```ignore
//! use refmap::git::Git;
//! use refmap::core::types::RemoteName;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let catalog = git.catalog(&RemoteName::default())?;
//! println!("{} local refs", catalog.len(Partition::Local));
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::catalog::{CatalogSource, ReferenceCatalog};
use crate::core::spec::RefSpec;
use crate::core::types::{RefName, RemoteName, TypeError, HEADS_PREFIX, TAGS_PREFIX};
use crate::core::validate::Mode;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// The requested remote is not configured.
    #[error("remote not found: {name}")]
    RemoteNotFound {
        /// The remote that was looked up
        name: String,
    },

    /// A refspec configured on a remote cannot be parsed.
    #[error("remote '{remote}' has an unreadable refspec: {source}")]
    InvalidRefSpec {
        /// The remote carrying the refspec
        remote: String,
        source: TypeError,
    },

    /// Permission or filesystem error.
    #[error("repository access error: {message}")]
    AccessError {
        /// Description of the error
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::Locked => GitError::AccessError {
                message: format!("repository is locked: {}", err.message()),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

/// A Git repository opened for reading references.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover` to find the repository root,
    /// so `path` can be any directory within the repository. Bare
    /// repositories are accepted; only references are read.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        Ok(Self { repo })
    }

    /// Get direct access to the .git directory path.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    // =========================================================================
    // Reference Listing
    // =========================================================================

    /// List reference names under `prefix`, sorted.
    ///
    /// Names that are not valid UTF-8 or fail Git's refname rules are skipped.
    pub fn list_ref_names(&self, prefix: &str) -> Result<Vec<String>, GitError> {
        let pattern = format!("{}*", prefix);
        let refs = self
            .repo
            .references_glob(&pattern)
            .map_err(|e| GitError::from_git2(e, prefix))?;

        let mut names = Vec::new();
        for reference in refs {
            let reference = reference.map_err(|e| GitError::from_git2(e, prefix))?;

            // Skip refs with non-UTF8 names
            let Some(name) = reference.name() else {
                continue;
            };

            if let Ok(name) = RefName::new(name) {
                names.push(String::from(name));
            }
        }

        names.sort();
        Ok(names)
    }

    /// Local branches and tags, fully qualified.
    pub fn local_ref_names(&self) -> Result<Vec<String>, GitError> {
        let mut names = self.list_ref_names(HEADS_PREFIX)?;
        names.extend(self.list_ref_names(TAGS_PREFIX)?);
        Ok(names)
    }

    /// Branches known on `remote`, as the remote itself names them.
    ///
    /// Reads the remote-tracking refs `refs/remotes/<remote>/<x>` and maps
    /// each back to `refs/heads/<x>`. The symbolic `HEAD` entry is skipped.
    pub fn remote_ref_names(&self, remote: &RemoteName) -> Result<Vec<String>, GitError> {
        let prefix = remote.tracking_prefix();
        let names = self
            .list_ref_names(&prefix)?
            .into_iter()
            .filter_map(|name| {
                let branch = name.strip_prefix(&prefix)?;
                (branch != "HEAD").then(|| format!("{HEADS_PREFIX}{branch}"))
            })
            .collect();
        Ok(names)
    }

    /// Build a catalog snapshot for `remote`.
    pub fn catalog(&self, remote: &RemoteName) -> Result<ReferenceCatalog, GitError> {
        Ok(ReferenceCatalog::new(
            self.local_ref_names()?,
            self.remote_ref_names(remote)?,
        ))
    }

    // =========================================================================
    // Remote Operations
    // =========================================================================

    /// Get the default remote name (usually "origin").
    ///
    /// Returns the first remote found, or `None` if no remotes exist.
    pub fn default_remote(&self) -> Result<Option<String>, GitError> {
        let remotes = self
            .repo
            .remotes()
            .map_err(|e| GitError::from_git2(e, "remotes"))?;

        // Prefer "origin" if it exists
        for name in remotes.iter().flatten() {
            if name == "origin" {
                return Ok(Some(name.to_string()));
            }
        }

        // Otherwise return first remote
        Ok(remotes.iter().flatten().next().map(String::from))
    }

    /// Refspecs configured on `remote` for `mode`, in configured order.
    ///
    /// Negative refspecs (`^refs/...`) have no counterpart in a mapping set
    /// and are skipped.
    ///
    /// # Errors
    ///
    /// - [`GitError::RemoteNotFound`] if the remote is not configured
    /// - [`GitError::InvalidRefSpec`] if a configured entry cannot be parsed
    pub fn configured_specs(
        &self,
        remote: &RemoteName,
        mode: Mode,
    ) -> Result<Vec<RefSpec>, GitError> {
        let found = self
            .repo
            .find_remote(remote.as_str())
            .map_err(|e| match e.code() {
                git2::ErrorCode::NotFound | git2::ErrorCode::InvalidSpec => {
                    GitError::RemoteNotFound {
                        name: remote.to_string(),
                    }
                }
                _ => GitError::from_git2(e, remote.as_str()),
            })?;

        let entries = match mode {
            Mode::Push => found.push_refspecs(),
            Mode::Fetch => found.fetch_refspecs(),
        }
        .map_err(|e| GitError::from_git2(e, remote.as_str()))?;

        entries
            .iter()
            .flatten()
            .filter(|entry| !entry.starts_with('^'))
            .map(|entry| {
                RefSpec::parse(entry).map_err(|source| GitError::InvalidRefSpec {
                    remote: remote.to_string(),
                    source,
                })
            })
            .collect()
    }

    /// A catalog supplier bound to `remote`.
    pub fn source_for(&self, remote: RemoteName) -> RepoCatalog<'_> {
        RepoCatalog { git: self, remote }
    }
}

/// [`CatalogSource`] that lists references from an open repository.
#[derive(Debug)]
pub struct RepoCatalog<'a> {
    git: &'a Git,
    remote: RemoteName,
}

impl RepoCatalog<'_> {
    pub fn remote(&self) -> &RemoteName {
        &self.remote
    }
}

impl CatalogSource for RepoCatalog<'_> {
    type Error = GitError;

    fn catalog(&self) -> Result<ReferenceCatalog, GitError> {
        self.git.catalog(&self.remote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod git_error {
        use super::*;

        #[test]
        fn error_display_formatting() {
            let err = GitError::RemoteNotFound {
                name: "upstream".to_string(),
            };
            assert_eq!(err.to_string(), "remote not found: upstream");

            let err = GitError::InvalidRefSpec {
                remote: "origin".to_string(),
                source: TypeError::InvalidRefSpec {
                    spec: "a:b:c".to_string(),
                    reason: "more than one ':'".to_string(),
                },
            };
            assert!(err.to_string().contains("origin"));
            assert!(err.to_string().contains("a:b:c"));
        }

        #[test]
        fn locked_maps_to_access_error() {
            let err = git2::Error::new(
                git2::ErrorCode::Locked,
                git2::ErrorClass::Reference,
                "index.lock exists",
            );
            assert!(matches!(
                GitError::from_git2(err, "refs/heads/"),
                GitError::AccessError { .. }
            ));
        }
    }

    mod open {
        use super::*;

        #[test]
        fn not_a_repo() {
            let dir = tempfile::TempDir::new().unwrap();
            let result = Git::open(dir.path());
            assert!(matches!(result, Err(GitError::NotARepo { .. })));
        }

        #[test]
        fn empty_repo_has_empty_catalog() {
            let dir = tempfile::TempDir::new().unwrap();
            git2::Repository::init(dir.path()).unwrap();

            let git = Git::open(dir.path()).unwrap();
            let catalog = git.catalog(&RemoteName::default()).unwrap();
            assert!(catalog.is_empty());
            assert_eq!(git.default_remote().unwrap(), None);
        }

        #[test]
        fn missing_remote() {
            let dir = tempfile::TempDir::new().unwrap();
            git2::Repository::init(dir.path()).unwrap();

            let git = Git::open(dir.path()).unwrap();
            let result = git.configured_specs(&RemoteName::default(), Mode::Fetch);
            assert!(matches!(result, Err(GitError::RemoteNotFound { .. })));
        }
    }
}
