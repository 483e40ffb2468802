//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. No other module should import
//! `git2`. The core never sees a repository; it receives a
//! [`ReferenceCatalog`](crate::core::catalog::ReferenceCatalog) built here.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Listing local branches and tags
//! - Listing a remote's branches through its remote-tracking refs
//! - Reading a remote's configured fetch and push refspecs
//!
//! # Invariants
//!
//! - Read-only: nothing here writes refs or config
//! - Listings are sorted, so catalogs built from the same repository agree
//!
//! # Example
//!
//! ```ignore
//! use refmap::core::types::RemoteName;
//! use refmap::core::validate::Mode;
//! use refmap::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let origin = RemoteName::default();
//!
//! let catalog = git.catalog(&origin)?;
//! let configured = git.configured_specs(&origin, Mode::Fetch)?;
//! ```

mod interface;

pub use interface::{Git, GitError, RepoCatalog};
