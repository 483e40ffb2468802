//! core
//!
//! Core domain types and operations for refmap.
//!
//! # Modules
//!
//! - [`types`] - Strong types: RefName, RemoteName, namespace prefixes
//! - [`pattern`] - Reference patterns and the wildcard algebra
//! - [`spec`] - RefSpec: a source/destination mapping with a force flag
//! - [`set`] - Ordered, editable collection of specs with stable ids
//! - [`catalog`] - Snapshot of known local and remote reference names
//! - [`validate`] - Per-spec diagnostics and warnings
//! - [`collision`] - Expansion to concrete mappings and duplicate detection
//! - [`propose`] - Auto-completion of the second side of a spec
//! - [`presets`] - Predefined spec templates
//! - [`report`] - Whole-set evaluation
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Diagnostics are returned as data, never raised
//! - Every operation is a pure function of its inputs
//! - Iteration order is deterministic (list order, then sorted catalog order)

pub mod catalog;
pub mod collision;
pub mod config;
pub mod pattern;
pub mod presets;
pub mod propose;
pub mod report;
pub mod set;
pub mod spec;
pub mod types;
pub mod validate;
