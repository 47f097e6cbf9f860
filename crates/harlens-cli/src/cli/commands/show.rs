//! `harlens show` – redacted details of one request.

use anyhow::Result;
use harlens_core::ArchiveParser;

use super::{load_session, print_json};

pub async fn run_show(parser: ArchiveParser, source: String, request_id: String) -> Result<()> {
    let session = load_session(parser, source).await?;
    print_json(&session.details(&request_id)?)
}
