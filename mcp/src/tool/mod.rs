//! Tool plumbing shared by the MCP service: names, argument schemas, and result rendering

mod output;
mod params;
mod tool_name;

pub use output::ToolOutput;
pub use params::KwargsParams;
pub use tool_name::ToolName;
