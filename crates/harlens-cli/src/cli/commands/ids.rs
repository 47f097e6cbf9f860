//! `harlens ids` – request IDs for one URL and method.

use anyhow::Result;
use harlens_core::ArchiveParser;

use super::{load_session, print_json};

pub async fn run_ids(
    parser: ArchiveParser,
    source: String,
    url: String,
    method: String,
) -> Result<()> {
    let session = load_session(parser, source).await?;
    let ids = session.find_ids(&url, &method)?;
    if ids.is_empty() {
        tracing::debug!(%url, %method, "no matching requests");
    }
    print_json(&ids)
}
