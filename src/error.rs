// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// A hierarchical project name contained an empty segment (leading,
    /// trailing, or doubled delimiter). An empty-named node would silently
    /// break the unique-sibling-name invariant, so we reject instead.
    #[error("malformed project path: {name:?}")]
    MalformedPath { name: String },

    /// Rollup reached a childless node whose scores or issues were never
    /// authored. Well-formed trees only hold raw data on leaves, so this
    /// means the tree was rolled up before insertion finished.
    #[error("aggregation incomplete at {path:?}: node carries no raw data")]
    IncompleteAggregation { path: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;

// Allow `?` on std::io::Error by converting to ReportError::Io with unknown path.
impl From<std::io::Error> for ReportError {
    fn from(source: std::io::Error) -> Self {
        ReportError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl ReportError {
    /// Attaches a concrete path to a bare I/O error.
    #[must_use]
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        ReportError::Io {
            source,
            path: path.into(),
        }
    }
}
