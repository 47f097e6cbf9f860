//! Tool handlers. Each returns the reply text or a message for an `isError` result.

use harlens_core::Session;
use schemars::{schema_for, JsonSchema};
use serde::Deserialize;
use serde_json::{json, Value};

/// Load a HAR file from a file path or HTTP URL.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LoadHarArgs {
    /// File path or HTTP URL to the HAR file
    pub source: String,
}

/// Get all request IDs for a specific URL and HTTP method.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetRequestIdsArgs {
    /// The URL to filter by
    pub url: String,
    /// The HTTP method to filter by (GET, POST, etc.)
    pub method: String,
}

/// Get full request details by request ID.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetRequestDetailsArgs {
    /// The request ID to retrieve details for
    pub request_id: String,
}

pub fn tool_definitions() -> Value {
    json!([
        {
            "name": "load_har",
            "description": "Load a HAR file from a file path or HTTP URL",
            "inputSchema": schema_for!(LoadHarArgs).to_value(),
        },
        {
            "name": "list_urls_methods",
            "description": "List all accessed URLs and their HTTP methods from the loaded HAR file",
            "inputSchema": {"type": "object", "properties": {}}
        },
        {
            "name": "get_request_ids",
            "description": "Get all request IDs for a specific URL and HTTP method",
            "inputSchema": schema_for!(GetRequestIdsArgs).to_value(),
        },
        {
            "name": "get_request_details",
            "description": "Get full request details by request ID (authentication headers will be redacted)",
            "inputSchema": schema_for!(GetRequestDetailsArgs).to_value(),
        }
    ])
}

pub fn handle_load_har(session: &mut Session, args: LoadHarArgs) -> Result<String, String> {
    match session.load(&args.source) {
        Ok(archive) => Ok(format!(
            "Successfully loaded HAR file with {} entries",
            archive.len()
        )),
        Err(e) => {
            tracing::warn!(source = %args.source, "load_har failed: {e}");
            Err(format!("Error loading HAR file: {e}"))
        }
    }
}

pub fn handle_list_urls_methods(session: &Session) -> Result<String, String> {
    let groups = session.list_urls_and_methods().map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&groups)
        .map_err(|e| format!("Failed to marshal URLs and methods: {e}"))
}

pub fn handle_get_request_ids(session: &Session, args: GetRequestIdsArgs) -> Result<String, String> {
    let ids = session
        .find_ids(&args.url, &args.method)
        .map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&ids).map_err(|e| format!("Failed to marshal request IDs: {e}"))
}

pub fn handle_get_request_details(
    session: &Session,
    args: GetRequestDetailsArgs,
) -> Result<String, String> {
    let details = session.details(&args.request_id).map_err(|e| match e {
        harlens_core::QueryError::NoArchiveLoaded => e.to_string(),
        other => format!("Error getting request details: {other}"),
    })?;
    serde_json::to_string_pretty(&details)
        .map_err(|e| format!("Failed to marshal request details: {e}"))
}
