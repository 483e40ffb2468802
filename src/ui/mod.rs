//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All terminal output goes through this module so that quiet and debug
//! modes behave the same in every command. The core layer never prints.

pub mod output;
