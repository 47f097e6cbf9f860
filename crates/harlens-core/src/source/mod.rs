//! Where a HAR document comes from: a local file or an `http`/`https` URL.

mod fetch;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::SourceError;

/// Limits applied to network fetches. The overall `timeout` is the caller's
/// deadline for the whole transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_redirections: u32,
    pub user_agent: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
            max_redirections: 10,
            user_agent: None,
        }
    }
}

/// A resolved source designator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(Url),
    Path(PathBuf),
}

impl Source {
    /// Anything that parses as an `http` or `https` URL is fetched; everything
    /// else is a local path.
    pub fn classify(designator: &str) -> Self {
        match Url::parse(designator) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Source::Url(url),
            _ => Source::Path(PathBuf::from(designator)),
        }
    }

    /// Read the whole document.
    pub fn read(&self, opts: &FetchOptions) -> Result<Vec<u8>, SourceError> {
        match self {
            Source::Url(url) => {
                tracing::debug!(%url, timeout = ?opts.timeout, "fetching HAR");
                fetch::fetch(url, opts)
            }
            Source::Path(path) => {
                tracing::debug!(path = %path.display(), "reading HAR");
                std::fs::read(path).map_err(|source| SourceError::Read {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{url}"),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}
