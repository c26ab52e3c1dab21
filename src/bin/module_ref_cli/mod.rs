//! CLI subcommand implementations for module-ref

pub mod analyze;
pub mod output;
pub mod scan_layout;
