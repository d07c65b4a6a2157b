use serde::Serialize;

use super::tracing::TracingLevel;
use crate::error::Result;
use crate::tool::ToolOutput;

/// Where trace output goes and whether anything has been written yet
#[derive(Debug, Clone, Serialize)]
pub struct TraceLogInfo {
    /// Full path to the trace log file
    log_path:        String,
    /// Whether the log file currently exists
    exists:          bool,
    /// Size of the log file in bytes (if it exists)
    #[serde(skip_serializing_if = "Option::is_none")]
    file_size_bytes: Option<u64>,
    tracing_level:   String,
}

pub fn get_trace_log_path() -> Result<ToolOutput> {
    let log_path = TracingLevel::trace_log_path();

    // The file is created lazily on first write
    let (exists, file_size_bytes) = std::fs::metadata(&log_path)
        .map_or((false, None), |metadata| (true, Some(metadata.len())));

    ToolOutput::report(&TraceLogInfo {
        log_path: log_path.to_string_lossy().to_string(),
        exists,
        file_size_bytes,
        tracing_level: TracingLevel::current().as_ref().to_string(),
    })
}
