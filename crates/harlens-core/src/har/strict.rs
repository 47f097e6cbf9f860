//! Strict decoding: the document as HAR 1.2 describes it.
//!
//! Time fields must be JSON integers and content must not carry an
//! `encoding` tag. Anything else is left to the tolerant decoder.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::Value;

use crate::model::{
    unknown_size, Archive, BodyDecoding, Content, Cookie, Creator, Entry, Header, Request,
    Response, Timings,
};

use super::DecodeStrategy;

/// Fast path for well-formed archives.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrictDecoder;

impl DecodeStrategy for StrictDecoder {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Archive, serde_json::Error> {
        let har: StrictHar = serde_json::from_slice(bytes)?;
        Ok(har.log.into())
    }
}

#[derive(Debug, Deserialize)]
struct StrictHar {
    log: StrictLog,
}

#[derive(Debug, Deserialize)]
struct StrictLog {
    version: String,
    creator: Creator,
    entries: Vec<StrictEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StrictEntry {
    #[serde(default, rename = "_id")]
    id: Option<String>,
    started_date_time: DateTime<FixedOffset>,
    time: i64,
    request: Request,
    #[serde(default)]
    response: Option<StrictResponse>,
    #[serde(default)]
    cache: Option<Value>,
    #[serde(default)]
    timings: Option<StrictTimings>,
    #[serde(default, rename = "serverIPAddress")]
    server_ip_address: Option<String>,
    #[serde(default)]
    connection: Option<String>,
    #[serde(default)]
    pageref: Option<String>,
    #[serde(default)]
    comment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StrictResponse {
    status: i64,
    #[serde(default)]
    status_text: String,
    #[serde(default)]
    http_version: String,
    #[serde(default)]
    cookies: Vec<Cookie>,
    #[serde(default)]
    headers: Vec<Header>,
    content: StrictContent,
    #[serde(default, rename = "redirectURL")]
    redirect_url: String,
    #[serde(default = "unknown_size")]
    headers_size: i64,
    #[serde(default = "unknown_size")]
    body_size: i64,
}

#[derive(Debug, Deserialize)]
#[serde(try_from = "RawStrictContent")]
struct StrictContent(Content);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStrictContent {
    #[serde(default)]
    size: i64,
    #[serde(default)]
    compression: Option<i64>,
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
}

impl TryFrom<RawStrictContent> for StrictContent {
    type Error = String;

    fn try_from(raw: RawStrictContent) -> Result<Self, Self::Error> {
        if let Some(tag) = raw.encoding.as_deref().filter(|t| !t.is_empty()) {
            return Err(format!("content encoding `{tag}` needs tolerant decoding"));
        }
        let (body, decoding) = match raw.text {
            Some(text) => (text.into_bytes(), BodyDecoding::Text),
            None => (Vec::new(), BodyDecoding::Empty),
        };
        Ok(StrictContent(Content {
            size: raw.size,
            compression: raw.compression,
            mime_type: raw.mime_type,
            encoding: None,
            body,
            decoding,
        }))
    }
}

#[derive(Debug, Default, Deserialize)]
struct StrictTimings {
    #[serde(default)]
    blocked: i64,
    #[serde(default)]
    dns: i64,
    #[serde(default)]
    connect: i64,
    #[serde(default)]
    send: i64,
    #[serde(default)]
    wait: i64,
    #[serde(default)]
    receive: i64,
    #[serde(default)]
    ssl: i64,
}

impl From<StrictLog> for Archive {
    fn from(log: StrictLog) -> Self {
        Archive {
            version: log.version,
            creator: log.creator,
            entries: log.entries.into_iter().map(Entry::from).collect(),
        }
    }
}

impl From<StrictEntry> for Entry {
    fn from(e: StrictEntry) -> Self {
        Entry {
            id: e.id,
            started_date_time: e.started_date_time,
            time: e.time,
            request: Some(e.request),
            response: e.response.map(Response::from),
            cache: e.cache,
            timings: e.timings.map(|t| Timings {
                blocked: t.blocked,
                dns: t.dns,
                connect: t.connect,
                send: t.send,
                wait: t.wait,
                receive: t.receive,
                ssl: t.ssl,
            }),
            server_ip_address: e.server_ip_address,
            connection: e.connection,
            pageref: e.pageref,
            comment: e.comment,
        }
    }
}

impl From<StrictResponse> for Response {
    fn from(r: StrictResponse) -> Self {
        Response {
            status: r.status,
            status_text: r.status_text,
            http_version: r.http_version,
            cookies: r.cookies,
            headers: r.headers,
            content: r.content.0,
            redirect_url: r.redirect_url,
            headers_size: r.headers_size,
            body_size: r.body_size,
        }
    }
}
