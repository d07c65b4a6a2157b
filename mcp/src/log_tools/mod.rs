mod get_trace_log_path;
mod lazy_file_writer;
mod set_tracing_level;
mod tracing;

pub use get_trace_log_path::get_trace_log_path;
pub use set_tracing_level::{SetTracingLevelParams, set_tracing_level};
pub use tracing::TracingLevel;
