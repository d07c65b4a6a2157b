use error_stack::{Report, ResultExt};
use json_pretty_compact::PrettyCompactFormatter;
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::{Serializer, Value};

use super::tool_name::ToolName;
use crate::error::{Error, Result};

/// What an operation hands back to the caller
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// A short human readable line
    Message(String),
    /// A structured JSON report
    Report(Value),
}

impl ToolOutput {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }

    /// Build a report from any serializable value
    pub fn report(value: &impl Serialize) -> Result<Self> {
        serde_json::to_value(value)
            .map(Self::Report)
            .map_err(|e| Report::new(Error::failed_to("serialize report", e)))
    }

    /// Render as text; reports use `PrettyCompactFormatter` for readable structure with compact
    /// arrays
    pub fn to_text(&self) -> Result<String> {
        match self {
            Self::Message(text) => Ok(text.clone()),
            Self::Report(value) => {
                let mut buf = Vec::new();
                let mut ser = Serializer::with_formatter(&mut buf, PrettyCompactFormatter::new());
                value
                    .serialize(&mut ser)
                    .map_err(|e| Error::failed_to("serialize report", e))?;
                String::from_utf8(buf)
                    .change_context(Error::General("Report was not valid UTF-8".to_string()))
            },
        }
    }

    /// Convert an operation result into the MCP result
    ///
    /// Operation failures never escape as protocol errors; they become error results carrying
    /// "Error <doing X>: <reason>".
    pub fn into_call_tool_result(result: Result<Self>, tool: ToolName) -> CallToolResult {
        match result.and_then(|output| output.to_text()) {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(report) => {
                tracing::warn!("{tool} failed: {report:?}");
                CallToolResult::error(vec![Content::text(render_error(tool, &report))])
            },
        }
    }
}

pub fn render_error(tool: ToolName, report: &Report<Error>) -> String {
    format!("Error {}: {}", tool.action(), report.current_context())
}
