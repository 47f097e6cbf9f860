//! `harlens serve` – JSON-RPC tool server on stdio.

use anyhow::{Context, Result};
use harlens_core::{ArchiveParser, Session};
use std::io;

use crate::mcp::{run_server, HarServer};

pub async fn run_serve(parser: ArchiveParser) -> Result<()> {
    tokio::task::spawn_blocking(move || {
        let mut server = HarServer::new(Session::new(parser));
        run_server(&mut server, io::stdin().lock(), io::stdout().lock())
    })
    .await
    .context("tool server task panicked")?
}
