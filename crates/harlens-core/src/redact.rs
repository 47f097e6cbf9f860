//! Masking of credential-bearing request headers.

use crate::model::Header;

/// Value substituted for a sensitive header.
pub const REDACTED: &str = "[REDACTED]";

const SENSITIVE_HEADERS: [&str; 6] = [
    "authorization",
    "x-api-key",
    "x-auth-token",
    "cookie",
    "set-cookie",
    "proxy-authorization",
];

/// True if a header with this name has its value masked (ASCII case-insensitive).
pub fn is_sensitive(name: &str) -> bool {
    SENSITIVE_HEADERS
        .iter()
        .any(|sensitive| sensitive.eq_ignore_ascii_case(name))
}

/// Copy of `headers` with sensitive values replaced by [`REDACTED`].
/// Order, length and every name are preserved.
pub fn redact(headers: &[Header]) -> Vec<Header> {
    headers
        .iter()
        .map(|h| {
            if is_sensitive(&h.name) {
                Header::new(h.name.clone(), REDACTED)
            } else {
                h.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Header> {
        vec![
            Header::new("User-Agent", "Mozilla/5.0"),
            Header::new("Authorization", "Bearer secret-token"),
            Header::new("X-API-Key", "api-key-123"),
            Header::new("Cookie", "session=abc123"),
            Header::new("Content-Type", "application/json"),
        ]
    }

    #[test]
    fn masks_only_sensitive_values() {
        let headers = sample();
        let redacted = redact(&headers);
        assert_eq!(redacted.len(), headers.len());
        for (before, after) in headers.iter().zip(&redacted) {
            assert_eq!(before.name, after.name);
            match before.name.as_str() {
                "User-Agent" | "Content-Type" => assert_eq!(before, after),
                _ => assert_eq!(after.value, REDACTED),
            }
        }
        // Input is untouched.
        assert_eq!(headers[1].value, "Bearer secret-token");
    }

    #[test]
    fn matching_ignores_case() {
        let headers = vec![
            Header::new("authorization", "a"),
            Header::new("X-API-KEY", "b"),
            Header::new("x-auth-token", "c"),
            Header::new("SET-COOKIE", "d"),
            Header::new("Proxy-Authorization", "e"),
            Header::new("cOoKiE", "f"),
        ];
        assert!(redact(&headers).iter().all(|h| h.value == REDACTED));
        assert_eq!(redact(&headers)[3].name, "SET-COOKIE");
    }

    #[test]
    fn redaction_is_idempotent() {
        let once = redact(&sample());
        assert_eq!(redact(&once), once);
    }

    #[test]
    fn lookalike_names_pass_through() {
        let headers = vec![
            Header::new("X-Authorization-Hint", "keep"),
            Header::new("Cookie2", "keep"),
            Header::new("Authorization ", "keep"),
        ];
        assert_eq!(redact(&headers), headers);
    }

    #[test]
    fn empty_list() {
        assert!(redact(&[]).is_empty());
    }
}
