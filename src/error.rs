//! Error types for post loading

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while listing or loading posts
#[derive(Debug, Error)]
pub enum Error {
    /// No post file matches the requested identifier
    #[error("post `{id}` not found")]
    NotFound { id: String },

    /// The posts directory or a post file could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A post's front-matter block is malformed
    #[error("invalid front-matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    /// Markdown body could not be converted to HTML
    #[error("markdown rendering failed: {0}")]
    Render(#[from] syntect::Error),

    /// A store configuration file is malformed
    #[error("invalid config file {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

/// Why a front-matter block failed to parse
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("malformed YAML block: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("malformed JSON block: {0}")]
    Json(#[from] serde_json::Error),
}
