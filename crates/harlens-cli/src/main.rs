use harlens_core::logging;

mod cli;
mod mcp;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // stdout belongs to command output and the tool server, so logs go to
    // the state file, or stderr when that cannot be opened.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("harlens error: {:#}", err);
        std::process::exit(1);
    }
}
