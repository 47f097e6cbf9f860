pub mod config;
pub mod logging;

pub mod details;
pub mod error;
pub mod har;
pub mod index;
pub mod model;
pub mod redact;
pub mod session;
pub mod source;

pub use details::RequestDetails;
pub use error::{LoadError, ParseError, QueryError, SourceError};
pub use har::ArchiveParser;
pub use index::{RequestIndex, UrlMethodEntry};
pub use model::Archive;
pub use session::Session;
pub use source::{FetchOptions, Source};
