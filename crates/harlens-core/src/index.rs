//! Positional request identifiers and (URL, method) grouping.
//!
//! The index stores entry positions only. It is only meaningful together with
//! the archive it was built from; [`crate::Session`] keeps the two paired and
//! drops the index when a new archive is loaded.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::QueryError;
use crate::model::Archive;

const ID_PREFIX: &str = "request_";

/// One distinct URL and method with the ids of every matching entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlMethodEntry {
    pub url: String,
    pub method: String,
    pub request_ids: Vec<String>,
}

/// `request_<index>` for the entry at zero-based `index`.
pub fn positional_id(index: usize) -> String {
    format!("{ID_PREFIX}{index}")
}

/// Resolve a positional id against an archive of `len` entries.
///
/// `InvalidId` unless the id is `request_` followed by an optionally signed
/// decimal integer; `OutOfRange` if that integer is not a valid position.
pub fn resolve_id(id: &str, len: usize) -> Result<usize, QueryError> {
    let digits = id
        .strip_prefix(ID_PREFIX)
        .ok_or_else(|| QueryError::InvalidId(id.to_string()))?;
    let unsigned = digits.strip_prefix(['-', '+']).unwrap_or(digits);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QueryError::InvalidId(id.to_string()));
    }
    let out_of_range = || QueryError::OutOfRange {
        id: id.to_string(),
        len,
    };
    if digits.starts_with('-') && unsigned.bytes().any(|b| b != b'0') {
        return Err(out_of_range());
    }
    match unsigned.parse::<usize>() {
        Ok(index) if index < len => Ok(index),
        _ => Err(out_of_range()),
    }
}

/// Entry positions grouped by exact (URL, method), in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestIndex {
    groups: Vec<Vec<usize>>,
    entries: usize,
}

impl RequestIndex {
    pub fn build(archive: &Archive) -> Self {
        let mut slots: HashMap<(&str, &str), usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (i, entry) in archive.entries.iter().enumerate() {
            let Some(request) = entry.request.as_ref() else {
                continue;
            };
            let key = (request.url.as_str(), request.method.as_str());
            match slots.get(&key) {
                Some(&slot) => groups[slot].push(i),
                None => {
                    slots.insert(key, groups.len());
                    groups.push(vec![i]);
                }
            }
        }
        tracing::debug!(
            entries = archive.len(),
            groups = groups.len(),
            "built request index"
        );
        Self {
            groups,
            entries: archive.len(),
        }
    }

    /// Number of distinct (URL, method) pairs.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Every distinct URL and method of `archive` with its ids.
    pub fn list(&self, archive: &Archive) -> Vec<UrlMethodEntry> {
        debug_assert_eq!(self.entries, archive.len());
        self.groups
            .iter()
            .filter_map(|positions| {
                let request = archive.entries[*positions.first()?].request.as_ref()?;
                Some(UrlMethodEntry {
                    url: request.url.clone(),
                    method: request.method.clone(),
                    request_ids: positions.iter().copied().map(positional_id).collect(),
                })
            })
            .collect()
    }

    /// Ids of entries whose request has exactly this URL and method, ascending.
    pub fn find(&self, archive: &Archive, url: &str, method: &str) -> Vec<String> {
        debug_assert_eq!(self.entries, archive.len());
        self.groups
            .iter()
            .find(|positions| {
                positions
                    .first()
                    .map_or(false, |&i| archive.entries[i].matches(url, method))
            })
            .map(|positions| positions.iter().copied().map(positional_id).collect())
            .unwrap_or_default()
    }
}
