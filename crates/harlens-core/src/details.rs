//! Redacted view of a single entry, as returned by detail lookups.

use chrono::SecondsFormat;
use serde::Serialize;

use crate::model::{Entry, Request, Response, Timings};
use crate::redact::redact;

/// One entry with its request headers passed through [`redact`].
/// Response, cache and timings are returned as captured.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDetails {
    pub request_id: String,
    /// RFC 3339, second precision.
    pub started_datetime: String,
    /// Milliseconds.
    pub time: i64,
    pub request: Option<Request>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Response>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timings: Option<Timings>,
    #[serde(rename = "serverIPAddress", skip_serializing_if = "Option::is_none")]
    pub server_ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl RequestDetails {
    pub fn project(request_id: String, entry: &Entry) -> Self {
        let request = entry.request.as_ref().map(|r| Request {
            headers: redact(&r.headers),
            ..r.clone()
        });
        Self {
            request_id,
            started_datetime: entry
                .started_date_time
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            time: entry.time,
            request,
            response: entry.response.clone(),
            cache: entry.cache.clone(),
            timings: entry.timings,
            server_ip_address: entry.server_ip_address.clone(),
            connection: entry.connection.clone(),
            comment: entry.comment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Content, Header};
    use crate::redact::REDACTED;

    fn sample_entry() -> Entry {
        Entry {
            id: Some("abc".to_string()),
            started_date_time: "2023-01-01T00:00:00.250+02:00".parse().unwrap(),
            time: 100,
            request: Some(Request {
                method: "GET".to_string(),
                url: "https://example.com".to_string(),
                http_version: "HTTP/1.1".to_string(),
                cookies: vec![],
                headers: vec![
                    Header::new("User-Agent", "Test"),
                    Header::new("Authorization", "Bearer token123"),
                ],
                query_string: vec![],
                post_data: None,
                headers_size: 150,
                body_size: 0,
            }),
            response: Some(Response {
                status: 200,
                status_text: "OK".to_string(),
                http_version: "HTTP/1.1".to_string(),
                cookies: vec![],
                headers: vec![Header::new("Set-Cookie", "session=1")],
                content: Content::default(),
                redirect_url: String::new(),
                headers_size: 200,
                body_size: 1024,
            }),
            cache: Some(serde_json::json!({})),
            timings: Some(Timings::default()),
            server_ip_address: Some("93.184.216.34".to_string()),
            connection: None,
            pageref: None,
            comment: None,
        }
    }

    #[test]
    fn request_headers_are_redacted() {
        let entry = sample_entry();
        let details = RequestDetails::project("request_0".to_string(), &entry);
        let request = details.request.as_ref().unwrap();
        assert_eq!(request.headers[0], Header::new("User-Agent", "Test"));
        assert_eq!(request.headers[1].name, "Authorization");
        assert_eq!(request.headers[1].value, REDACTED);
        // Source entry keeps the secret.
        let original = entry.request.as_ref().unwrap();
        assert_eq!(original.headers[1].value, "Bearer token123");
    }

    #[test]
    fn response_passes_through_unredacted() {
        let details = RequestDetails::project("request_0".to_string(), &sample_entry());
        let response = details.response.unwrap();
        assert_eq!(response.headers[0].value, "session=1");
    }

    #[test]
    fn serializes_expected_shape() {
        let details = RequestDetails::project("request_0".to_string(), &sample_entry());
        let v = serde_json::to_value(&details).unwrap();
        assert_eq!(v["request_id"], "request_0");
        assert_eq!(v["started_datetime"], "2023-01-01T00:00:00+02:00");
        assert_eq!(v["time"], 100);
        assert_eq!(v["request"]["httpVersion"], "HTTP/1.1");
        assert_eq!(v["request"]["headers"][1]["value"], REDACTED);
        assert_eq!(v["response"]["status"], 200);
        assert_eq!(v["serverIPAddress"], "93.184.216.34");
        assert!(v.get("connection").is_none());
        assert_eq!(v["timings"]["wait"], 0);
    }

    #[test]
    fn utc_times_use_z_suffix() {
        let mut entry = sample_entry();
        entry.started_date_time = "2023-01-01T00:00:00.000Z".parse().unwrap();
        let details = RequestDetails::project("request_0".to_string(), &entry);
        assert_eq!(details.started_datetime, "2023-01-01T00:00:00Z");
    }
}
