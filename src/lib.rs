//! Module Reference Analyzer
//!
//! Static linkage analysis for multi-module JVM/Android builds:
//!
//! - **Dependency graph**: which module's code links against which other module
//! - **Unresolved symbols**: references nothing in the build supplies
//! - **Abstract gaps**: concrete classes missing overrides of inherited abstract methods
//!
//! The engine lives in [`modref_resolver`]; input loading in [`modref_extractor`]. This crate
//! adds the [`config`] layers, the [`runner`] that ties a run together, and [`output`]
//! rendering for the `module-ref` binary.

pub mod config;
pub mod output;
pub mod runner;

pub use config::{AnalysisConfig, ConfigOverrides};
pub use runner::{run_analysis, RunOutcome, RunRequest};
