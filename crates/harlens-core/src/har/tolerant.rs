//! Tolerant decoding for what browsers, proxies and home-grown tools
//! actually write.
//!
//! Time fields may be floats, content may be base64 (or claim to be),
//! whole sections may be missing and unknown fields are ignored. Every
//! coercion happens while deserializing, so turning the result into the
//! canonical model cannot fail.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::model::{
    unknown_size, Archive, BodyDecoding, Content, Cookie, Creator, Entry, Header, Request,
    Response, Timings,
};

use super::number::{loose_id, millis};
use super::DecodeStrategy;

/// Fallback for archives the strict decoder rejects.
#[derive(Debug, Default, Clone, Copy)]
pub struct TolerantDecoder;

impl DecodeStrategy for TolerantDecoder {
    fn name(&self) -> &'static str {
        "tolerant"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Archive, serde_json::Error> {
        let har: FlexHar = serde_json::from_slice(bytes)?;
        Ok(har.log.into())
    }
}

#[derive(Debug, Deserialize)]
struct FlexHar {
    log: FlexLog,
}

#[derive(Debug, Deserialize)]
struct FlexLog {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    creator: Option<Creator>,
    #[serde(default)]
    entries: Option<Vec<FlexEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlexEntry {
    #[serde(default, rename = "_id", deserialize_with = "loose_id")]
    id: Option<String>,
    #[serde(default)]
    started_date_time: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "millis")]
    time: i64,
    #[serde(default)]
    request: Option<Request>,
    #[serde(default)]
    response: Option<FlexResponse>,
    #[serde(default)]
    cache: Option<Value>,
    #[serde(default)]
    timings: Option<FlexTimings>,
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
struct FlexResponse {
    #[serde(default)]
    status: i64,
    #[serde(default)]
    status_text: Option<String>,
    #[serde(default)]
    http_version: Option<String>,
    #[serde(default)]
    cookies: Option<Vec<Cookie>>,
    #[serde(default)]
    headers: Option<Vec<Header>>,
    #[serde(default)]
    content: Option<FlexContent>,
    #[serde(default, rename = "redirectURL")]
    redirect_url: Option<String>,
    #[serde(default = "unknown_size")]
    headers_size: i64,
    #[serde(default = "unknown_size")]
    body_size: i64,
}

#[derive(Debug, Default, Deserialize)]
struct FlexTimings {
    #[serde(default, deserialize_with = "millis")]
    blocked: i64,
    #[serde(default, deserialize_with = "millis")]
    dns: i64,
    #[serde(default, deserialize_with = "millis")]
    connect: i64,
    #[serde(default, deserialize_with = "millis")]
    send: i64,
    #[serde(default, deserialize_with = "millis")]
    wait: i64,
    #[serde(default, deserialize_with = "millis")]
    receive: i64,
    #[serde(default, deserialize_with = "millis")]
    ssl: i64,
}

#[derive(Debug, Deserialize)]
#[serde(from = "RawContent")]
struct FlexContent(Content);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContent {
    #[serde(default)]
    size: i64,
    #[serde(default)]
    compression: Option<i64>,
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    text: Option<Value>,
    #[serde(default)]
    encoding: Option<String>,
}

impl From<RawContent> for FlexContent {
    fn from(raw: RawContent) -> Self {
        let (body, decoding) = decode_body(raw.text, raw.encoding.as_deref());
        if decoding == BodyDecoding::Base64Fallback {
            tracing::warn!(
                mime_type = raw.mime_type.as_deref().unwrap_or(""),
                "content tagged base64 is not valid base64; keeping literal text"
            );
        }
        FlexContent(Content {
            size: raw.size,
            compression: raw.compression,
            mime_type: raw.mime_type.unwrap_or_default(),
            encoding: raw.encoding,
            body,
            decoding,
        })
    }
}

/// Resolve a content `text` value into body bytes.
fn decode_body(text: Option<Value>, encoding: Option<&str>) -> (Vec<u8>, BodyDecoding) {
    match text {
        None | Some(Value::Null) => (Vec::new(), BodyDecoding::Empty),
        Some(Value::String(s)) if encoding == Some("base64") => {
            let compact: String = s.chars().filter(|c| !c.is_ascii_whitespace()).collect();
            match STANDARD.decode(compact.as_bytes()) {
                Ok(bytes) => (bytes, BodyDecoding::Base64),
                Err(_) => (s.into_bytes(), BodyDecoding::Base64Fallback),
            }
        }
        Some(Value::String(s)) => (s.into_bytes(), BodyDecoding::Text),
        // Some tools inline JSON bodies as JSON rather than as a string.
        Some(other) => (other.to_string().into_bytes(), BodyDecoding::Text),
    }
}

impl From<FlexLog> for Archive {
    fn from(log: FlexLog) -> Self {
        Archive {
            version: log.version.unwrap_or_default(),
            creator: log.creator.unwrap_or_default(),
            entries: log
                .entries
                .unwrap_or_default()
                .into_iter()
                .map(Entry::from)
                .collect(),
        }
    }
}

impl From<FlexEntry> for Entry {
    fn from(e: FlexEntry) -> Self {
        Entry {
            id: e.id,
            started_date_time: e
                .started_date_time
                .unwrap_or_else(|| DateTime::<Utc>::default().into()),
            time: e.time,
            request: e.request,
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

impl From<FlexResponse> for Response {
    fn from(r: FlexResponse) -> Self {
        Response {
            status: r.status,
            status_text: r.status_text.unwrap_or_default(),
            http_version: r.http_version.unwrap_or_default(),
            cookies: r.cookies.unwrap_or_default(),
            headers: r.headers.unwrap_or_default(),
            content: r.content.map(|c| c.0).unwrap_or_default(),
            redirect_url: r.redirect_url.unwrap_or_default(),
            headers_size: r.headers_size,
            body_size: r.body_size,
        }
    }
}
