//! Error types for loading a sheet snapshot.
//!
//! Loading is all-or-nothing: any of these aborts initialization and leaves
//! the caller without a model. Nothing is retried.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for sheet loading.
pub type Result<T> = std::result::Result<T, LoadError>;

#[derive(Error, Diagnostic, Debug)]
pub enum LoadError {
    // =========================================================================
    // Retrieval
    // =========================================================================

    /// The request could not be sent or the body could not be read.
    #[error("Failed to fetch {url}: {source}")]
    #[diagnostic(
        code("SHEET::FETCH_ERROR"),
        help("Check that the document server is reachable")
    )]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Fetching {url} returned HTTP {status}")]
    #[diagnostic(code("SHEET::HTTP_STATUS"))]
    Status { url: String, status: u16 },

    #[error("Failed to read {}: {source}", .path.display())]
    #[diagnostic(code("SHEET::IO_ERROR"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid document URL: {0}")]
    #[diagnostic(code("SHEET::INVALID_URL"))]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    #[diagnostic(code("SHEET::CLIENT_ERROR"))]
    Client(#[source] reqwest::Error),

    // =========================================================================
    // Document Shape
    // =========================================================================

    #[error("Document is not valid JSON: {0}")]
    #[diagnostic(
        code("SHEET::PARSE_ERROR"),
        help("Re-export the snapshot; the file may be truncated")
    )]
    Parse(#[from] serde_json::Error),

    /// A required top-level key is absent.
    #[error("Document is missing required section '{0}'")]
    #[diagnostic(code("SHEET::MISSING_SECTION"))]
    MissingSection(&'static str),

    #[error("Section '{section}' has an unexpected shape: {reason}")]
    #[diagnostic(code("SHEET::INVALID_SHAPE"))]
    InvalidShape { section: String, reason: String },
}

impl LoadError {
    /// Whether the document was retrieved but rejected.
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            Self::Parse(_) | Self::MissingSection(_) | Self::InvalidShape { .. }
        )
    }
}
