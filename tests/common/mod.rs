#![allow(dead_code)]
//! Shared test utilities for CLI integration tests.
//!
//! # Modules
//!
//! - `fixtures`: Descriptor bundle and layout fixtures written into temp directories

pub mod fixtures;

pub use fixtures::{module_ref_cmd, write_json, Workspace};
