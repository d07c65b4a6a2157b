use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::tracing::TracingLevel;
use crate::error::Result;
use crate::tool::ToolOutput;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SetTracingLevelParams {
    /// Tracing level to set (error, warn, info, debug, trace)
    pub level: String,
}

#[derive(Debug, Clone, Serialize)]
struct SetTracingLevelResult {
    tracing_level:    String,
    tracing_log_file: String,
}

pub fn set_tracing_level(params: &SetTracingLevelParams) -> Result<ToolOutput> {
    let level = TracingLevel::parse(&params.level)?;
    TracingLevel::set(level);

    ToolOutput::report(&SetTracingLevelResult {
        tracing_level:    level.as_ref().to_string(),
        tracing_log_file: TracingLevel::trace_log_path().to_string_lossy().to_string(),
    })
}
