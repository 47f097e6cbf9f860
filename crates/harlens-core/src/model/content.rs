//! Response body descriptor.
//!
//! The body is always held decoded. How it was recovered is kept in
//! [`BodyDecoding`] so a base64 body that failed to decode and was kept as
//! literal text can still be told apart from a clean one.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Serialize, Serializer};

/// How `Content::body` was recovered from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyDecoding {
    /// No `text` in the document.
    #[default]
    Empty,
    /// Plain string; body is its UTF-8 bytes.
    Text,
    /// Tagged `base64` and decoded.
    Base64,
    /// Tagged `base64` but not valid base64; body is the literal string.
    Base64Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Content {
    pub size: i64,
    pub compression: Option<i64>,
    pub mime_type: String,
    /// Encoding tag as declared by the producer.
    pub encoding: Option<String>,
    pub body: Vec<u8>,
    pub decoding: BodyDecoding,
}

impl Content {
    /// Body as UTF-8, if it is valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    pub fn is_fallback(&self) -> bool {
        self.decoding == BodyDecoding::Base64Fallback
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentRepr<'a> {
    size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    compression: Option<i64>,
    mime_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    encoding: Option<&'a str>,
    #[serde(rename = "_bodyDecoding")]
    decoding: BodyDecoding,
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Decoded base64 bodies go back out as base64 so binary payloads survive JSON.
        let (text, encoding) = match self.decoding {
            BodyDecoding::Empty => (None, self.encoding.as_deref()),
            BodyDecoding::Base64 => (Some(STANDARD.encode(&self.body)), Some("base64")),
            BodyDecoding::Text | BodyDecoding::Base64Fallback => (
                Some(String::from_utf8_lossy(&self.body).into_owned()),
                self.encoding.as_deref(),
            ),
        };
        ContentRepr {
            size: self.size,
            compression: self.compression,
            mime_type: &self.mime_type,
            text,
            encoding,
            decoding: self.decoding,
        }
        .serialize(serializer)
    }
}
