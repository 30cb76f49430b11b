use std::path::PathBuf;

use autoapi_core::error::{ParseError, TransformError};
use autoapi_typescript::TypeScriptError;
use thiserror::Error;

/// Failure to obtain the resource listing or a document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to reset the output root or write a file.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to reset output directory {}: {source}", .path.display())]
    Reset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of one document's build, tagged with its location.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{location}: {source}")]
    Fetch {
        location: String,
        #[source]
        source: FetchError,
    },

    #[error("{location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: ParseError,
    },

    #[error("{location}: {source}")]
    Transform {
        location: String,
        #[source]
        source: TransformError,
    },

    #[error("{location}: {source}")]
    Render {
        location: String,
        #[source]
        source: TypeScriptError,
    },

    #[error("{location}: {source}")]
    Write {
        location: String,
        #[source]
        source: WriteError,
    },
}

impl DocumentError {
    pub fn location(&self) -> &str {
        match self {
            DocumentError::Fetch { location, .. }
            | DocumentError::Parse { location, .. }
            | DocumentError::Transform { location, .. }
            | DocumentError::Render { location, .. }
            | DocumentError::Write { location, .. } => location,
        }
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to list swagger resources: {0}")]
    Resources(#[source] FetchError),

    #[error(transparent)]
    Reset(WriteError),

    #[error("{} of {total} documents failed", .failures.len())]
    Documents {
        failures: Vec<DocumentError>,
        total: usize,
    },
}
