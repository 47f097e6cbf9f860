//! A session holds at most one current archive and answers queries on it.
//!
//! A failed load never replaces the current archive. The index is built on
//! the first query after a load and reused until the next successful load.
//! Sessions are not synchronized; hosts that share one across threads must
//! serialize access themselves.

use std::cell::OnceCell;
use std::io::Read;

use crate::details::RequestDetails;
use crate::error::{LoadError, ParseError, QueryError};
use crate::har::ArchiveParser;
use crate::index::{positional_id, resolve_id, RequestIndex, UrlMethodEntry};
use crate::model::Archive;

struct Loaded {
    archive: Archive,
    index: OnceCell<RequestIndex>,
}

impl Loaded {
    fn index(&self) -> &RequestIndex {
        self.index.get_or_init(|| RequestIndex::build(&self.archive))
    }
}

#[derive(Default)]
pub struct Session {
    parser: ArchiveParser,
    current: Option<Loaded>,
}

impl Session {
    pub fn new(parser: ArchiveParser) -> Self {
        Self {
            parser,
            current: None,
        }
    }

    /// Load from a file path or `http`/`https` URL.
    pub fn load(&mut self, designator: &str) -> Result<&Archive, LoadError> {
        let archive = self.parser.parse_designator(designator)?;
        tracing::info!(source = designator, entries = archive.len(), "loaded HAR");
        Ok(self.replace(archive))
    }

    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<&Archive, ParseError> {
        let archive = self.parser.parse(bytes)?;
        Ok(self.replace(archive))
    }

    pub fn load_reader<R: Read>(&mut self, reader: R) -> Result<&Archive, LoadError> {
        let archive = self.parser.parse_reader(reader)?;
        Ok(self.replace(archive))
    }

    fn replace(&mut self, archive: Archive) -> &Archive {
        let loaded = self.current.insert(Loaded {
            archive,
            index: OnceCell::new(),
        });
        &loaded.archive
    }

    /// The current archive, if any load has succeeded.
    pub fn archive(&self) -> Option<&Archive> {
        self.current.as_ref().map(|l| &l.archive)
    }

    fn loaded(&self) -> Result<&Loaded, QueryError> {
        self.current.as_ref().ok_or(QueryError::NoArchiveLoaded)
    }

    pub fn list_urls_and_methods(&self) -> Result<Vec<UrlMethodEntry>, QueryError> {
        let loaded = self.loaded()?;
        Ok(loaded.index().list(&loaded.archive))
    }

    pub fn find_ids(&self, url: &str, method: &str) -> Result<Vec<String>, QueryError> {
        let loaded = self.loaded()?;
        Ok(loaded.index().find(&loaded.archive, url, method))
    }

    /// Redacted details for a positional id such as `request_3`.
    pub fn details(&self, request_id: &str) -> Result<RequestDetails, QueryError> {
        let loaded = self.loaded()?;
        let index = resolve_id(request_id, loaded.archive.len())?;
        let entry = &loaded.archive.entries[index];
        Ok(RequestDetails::project(positional_id(index), entry))
    }
}
