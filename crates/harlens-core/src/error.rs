//! Error taxonomy for loading and querying archives.
//!
//! Source acquisition, document decoding and identifier lookups fail in
//! distinct ways; callers that only need a message can rely on `Display`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fetching or opening the document failed. The caller may retry or fix the path.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read HAR file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read HAR data: {0}")]
    Stream(#[source] io::Error),

    #[error("failed to fetch HAR from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: curl::Error,
    },

    #[error("failed to fetch HAR: HTTP {status} from {url}")]
    Http { url: String, status: u32 },

    #[error("invalid HAR URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl SourceError {
    /// True if the fetch hit the connect or overall deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, SourceError::Fetch { source, .. } if source.is_operation_timedout())
    }
}

/// Every decode strategy rejected the document.
///
/// `source` is the error from the last (most permissive) strategy; earlier
/// failures are expected for non-conformant documents and are dropped.
#[derive(Debug, Error)]
#[error("failed to parse HAR file: {reason}: {source}")]
pub struct ParseError {
    pub reason: &'static str,
    #[source]
    pub source: serde_json::Error,
}

/// Loading an archive into a session failed; the previous archive stays current.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A query against the current archive could not be answered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid request ID format: {0}")]
    InvalidId(String),

    #[error("request ID out of range: {id} (archive has {len} entries)")]
    OutOfRange { id: String, len: usize },

    #[error("No HAR file loaded. Please load a HAR file first using load_har.")]
    NoArchiveLoaded,
}
