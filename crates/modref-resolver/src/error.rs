//! Errors raised by the resolution engine.
//!
//! Only faults about the engine's own input are errors. Unresolved symbols and abstract
//! gaps are findings and end up in the [`AnalysisReport`](crate::report::AnalysisReport).

use modref_types::ModuleId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Two subject modules contribute a class with the same name.
    #[error("Duplicate class {class}: {first_module} and {second_module}")]
    DuplicateClass {
        class: String,
        first_module: ModuleId,
        second_module: ModuleId,
    },

    /// A filter pattern failed to compile.
    #[error("Invalid filter pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
