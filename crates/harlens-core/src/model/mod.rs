//! Canonical in-memory model of a parsed HTTP Archive.
//!
//! Both decoders produce these types. Field names serialize the way HAR 1.2
//! spells them, so a parsed archive can be written back out as HAR-shaped JSON.

mod content;
mod message;
mod timings;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub use content::{BodyDecoding, Content};
pub(crate) use message::unknown_size;
pub use message::{Cookie, Header, PostData, PostParam, QueryParam, Request, Response};
pub use timings::Timings;

/// Root of a parsed archive: the HAR `log` object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Archive {
    pub version: String,
    pub creator: Creator,
    pub entries: Vec<Entry>,
}

impl Archive {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Name and version of the tool that wrote the archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// One recorded request/response exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub started_date_time: DateTime<FixedOffset>,
    /// Total elapsed time in whole milliseconds.
    pub time: i64,
    /// Absent only for damaged captures; such entries never match a URL/method lookup.
    pub request: Option<Request>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Response>,
    /// Passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timings: Option<Timings>,
    #[serde(rename = "serverIPAddress", skip_serializing_if = "Option::is_none")]
    pub server_ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pageref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Entry {
    /// True if this entry's request has exactly this URL and method.
    pub fn matches(&self, url: &str, method: &str) -> bool {
        self.request
            .as_ref()
            .map_or(false, |r| r.url == url && r.method == method)
    }
}
