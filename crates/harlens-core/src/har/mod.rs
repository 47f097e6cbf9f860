//! HAR (HTTP Archive) ingestion: turn bytes from any source into an [`Archive`].
//!
//! Decoding is an ordered chain of strategies; the first one that accepts the
//! document wins. The default chain tries [`StrictDecoder`] and falls back to
//! [`TolerantDecoder`] for the deviations real producers emit.

mod number;
mod strict;
mod tolerant;

use std::io::Read;

use crate::error::{LoadError, ParseError, SourceError};
use crate::model::Archive;
use crate::source::{FetchOptions, Source};

pub use strict::StrictDecoder;
pub use tolerant::TolerantDecoder;

/// One way of decoding a HAR document.
pub trait DecodeStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn decode(&self, bytes: &[u8]) -> Result<Archive, serde_json::Error>;
}

/// Parses HAR documents from bytes, readers, files and URLs.
pub struct ArchiveParser {
    strategies: Vec<Box<dyn DecodeStrategy>>,
    fetch: FetchOptions,
}

impl Default for ArchiveParser {
    fn default() -> Self {
        Self::new(FetchOptions::default())
    }
}

impl std::fmt::Debug for ArchiveParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("ArchiveParser")
            .field("strategies", &names)
            .field("fetch", &self.fetch)
            .finish()
    }
}

impl ArchiveParser {
    /// Strict-then-tolerant parser using `fetch` for URL sources.
    pub fn new(fetch: FetchOptions) -> Self {
        Self::with_strategies(
            vec![Box::new(StrictDecoder), Box::new(TolerantDecoder)],
            fetch,
        )
    }

    /// Parser with a custom strategy chain, tried in order.
    pub fn with_strategies(strategies: Vec<Box<dyn DecodeStrategy>>, fetch: FetchOptions) -> Self {
        Self { strategies, fetch }
    }

    /// Decode a complete document held in memory.
    ///
    /// When every strategy fails, the error of the last one is returned: the
    /// earlier, stricter strategies are expected to reject non-conformant input.
    pub fn parse(&self, bytes: &[u8]) -> Result<Archive, ParseError> {
        let mut last_err = None;
        for strategy in &self.strategies {
            match strategy.decode(bytes) {
                Ok(archive) => {
                    tracing::debug!(
                        strategy = strategy.name(),
                        entries = archive.len(),
                        "decoded HAR document"
                    );
                    return Ok(archive);
                }
                Err(e) => {
                    tracing::debug!(strategy = strategy.name(), "decode failed: {}", e);
                    last_err = Some(e);
                }
            }
        }
        let source = last_err.unwrap_or_else(|| {
            <serde_json::Error as serde::de::Error>::custom("no decode strategy configured")
        });
        Err(ParseError {
            reason: "unparseable document",
            source,
        })
    }

    /// Read a stream to the end, then decode it.
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Archive, LoadError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(SourceError::Stream)?;
        Ok(self.parse(&bytes)?)
    }

    /// Acquire the document from `source`, then decode it.
    pub fn parse_source(&self, source: &Source) -> Result<Archive, LoadError> {
        let bytes = source.read(&self.fetch)?;
        Ok(self.parse(&bytes)?)
    }

    /// Parse from a file path or `http`/`https` URL given as text.
    pub fn parse_designator(&self, designator: &str) -> Result<Archive, LoadError> {
        self.parse_source(&Source::classify(designator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FLOAT_TIMES: &str = r#"{
        "log": {
            "version": "1.2",
            "creator": {"name": "proxy", "version": "0.9"},
            "entries": [{
                "startedDateTime": "2023-01-01T00:00:00Z",
                "time": 12.75,
                "request": {"method": "GET", "url": "https://example.com/a", "headers": []},
                "response": {
                    "status": 200,
                    "content": {"size": 11, "mimeType": "text/plain", "text": "SGVsbG8gV29ybGQ=", "encoding": "base64"}
                }
            }]
        }
    }"#;

    struct Reject;

    impl DecodeStrategy for Reject {
        fn name(&self) -> &'static str {
            "reject"
        }

        fn decode(&self, bytes: &[u8]) -> Result<Archive, serde_json::Error> {
            serde_json::from_slice::<Vec<u8>>(bytes)?;
            unreachable!("test documents are never byte arrays")
        }
    }

    #[test]
    fn falls_back_to_tolerant_decoder() {
        let archive = ArchiveParser::default().parse(FLOAT_TIMES.as_bytes()).unwrap();
        assert_eq!(archive.entries[0].time, 12);
        let content = &archive.entries[0].response.as_ref().unwrap().content;
        assert_eq!(content.body, b"Hello World");
    }

    #[test]
    fn parse_invalid_json_reports_unparseable() {
        let err = ArchiveParser::default().parse(br#"{"log": invalid}"#).unwrap_err();
        assert_eq!(err.reason, "unparseable document");
        assert!(err.to_string().contains("failed to parse HAR file"));
    }

    #[test]
    fn empty_entries_parse() {
        let doc = r#"{"log":{"version":"1.2","creator":{"name":"t","version":"1"},"entries":[]}}"#;
        let archive = ArchiveParser::default().parse(doc.as_bytes()).unwrap();
        assert!(archive.is_empty());
        assert_eq!(archive.version, "1.2");
    }

    #[test]
    fn custom_chain_runs_in_order() {
        let parser = ArchiveParser::with_strategies(
            vec![Box::new(Reject), Box::new(TolerantDecoder)],
            FetchOptions::default(),
        );
        assert_eq!(parser.parse(FLOAT_TIMES.as_bytes()).unwrap().len(), 1);
        assert!(format!("{parser:?}").contains("reject"));
    }

    #[test]
    fn empty_chain_fails() {
        let parser = ArchiveParser::with_strategies(Vec::new(), FetchOptions::default());
        let err = parser.parse(FLOAT_TIMES.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("no decode strategy configured"));
    }

    #[test]
    fn parse_reader_reads_stream() {
        let archive = ArchiveParser::default()
            .parse_reader(std::io::Cursor::new(FLOAT_TIMES))
            .unwrap();
        assert_eq!(archive.creator.name, "proxy");
    }

    #[test]
    fn parse_designator_reads_file() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(FLOAT_TIMES.as_bytes()).unwrap();
        f.flush().unwrap();
        let designator = f.path().to_str().unwrap();
        let archive = ArchiveParser::default().parse_designator(designator).unwrap();
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn missing_file_is_source_error() {
        let err = ArchiveParser::default()
            .parse_designator("/nonexistent/harlens/test.har")
            .unwrap_err();
        assert!(matches!(err, LoadError::Source(SourceError::Read { .. })));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"not json").unwrap();
        f.flush().unwrap();
        let err = ArchiveParser::default()
            .parse_source(&Source::Path(f.path().to_path_buf()))
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }
}
