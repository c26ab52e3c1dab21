use std::path::PathBuf;

use thiserror::Error;

/// Failure to read collaborator input. Raised before the engine runs.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed XML in {}: {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("invalid layout spec `{0}`, expected MODULE=DIR")]
    InvalidLayoutSpec(String),
}

impl ExtractError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
