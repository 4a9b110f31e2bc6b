//! Error types for runbook operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a runbook site.
///
/// Markdown rendering and typographic replacement never fail; every error
/// comes from reading inputs, parsing templates or manifests, or writing
/// output.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("template: {name}:{line}: {message}")]
    TemplateParse {
        name: String,
        line: usize,
        message: String,
    },

    #[error("template: {name}:{line}: executing: {message}")]
    TemplateExec {
        name: String,
        line: usize,
        message: String,
    },

    #[error("page URL {url:?} points outside the output directory")]
    PageUrl { url: String },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
