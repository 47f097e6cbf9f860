//! CLI command handlers, one per file.

mod completions;
mod ids;
mod serve;
mod show;
mod urls;

pub use completions::run_completions;
pub use ids::run_ids;
pub use serve::run_serve;
pub use show::run_show;
pub use urls::run_urls;

use anyhow::{Context, Result};
use harlens_core::{ArchiveParser, Session};

/// Load `source` into a fresh session off the async runtime.
async fn load_session(parser: ArchiveParser, source: String) -> Result<Session> {
    tokio::task::spawn_blocking(move || {
        let mut session = Session::new(parser);
        session
            .load(&source)
            .with_context(|| format!("loading {}", source))?;
        Ok::<_, anyhow::Error>(session)
    })
    .await
    .context("load task panicked")?
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
