//! `harlens urls` – list URL/method groups.

use anyhow::Result;
use harlens_core::ArchiveParser;

use super::{load_session, print_json};

pub async fn run_urls(parser: ArchiveParser, source: String) -> Result<()> {
    let session = load_session(parser, source).await?;
    print_json(&session.list_urls_and_methods()?)
}
