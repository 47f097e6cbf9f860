use serde::Serialize;

/// Per-phase durations in whole milliseconds. Phases the producer left out
/// are zero; HAR's `-1` ("not applicable") is kept as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Timings {
    pub blocked: i64,
    pub dns: i64,
    pub connect: i64,
    pub send: i64,
    pub wait: i64,
    pub receive: i64,
    pub ssl: i64,
}
