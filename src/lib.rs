//! refmap - refspec resolution and validation
//!
//! refmap takes a set of user-authored refspecs (`[+]source:destination`
//! mappings between local and remote references) and checks them against a
//! snapshot of the references that actually exist, before anything is pushed
//! or fetched.
//!
//! # Architecture
//!
//! - [`core`] - Domain types, wildcard algebra, validation, collision detection
//! - [`git`] - Catalog supplier backed by a Git repository
//! - [`cli`] - Command-line interface layer
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! 1. A set with a blocking diagnostic never yields mappings
//! 2. No two specs in a valid set write the same destination
//! 3. Evaluation is deterministic for a given set and catalog
//! 4. The core never touches a repository; it only reads a catalog

pub mod cli;
pub mod core;
pub mod git;
pub mod ui;
