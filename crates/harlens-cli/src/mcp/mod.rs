//! Line-oriented JSON-RPC 2.0 tool server over stdio.
//!
//! One request per input line, one response per output line. Tools operate
//! on a single [`harlens_core::Session`] owned by the server.

mod server;
mod tools;

pub use server::{run_server, HarServer};
