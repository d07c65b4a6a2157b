use thiserror::Error;

// Error message prefixes
const MSG_FAILED_TO_PREFIX: &str = "Failed to";
const MSG_INVALID_PREFIX: &str = "Invalid";

/// Result type for the `unreal_rc_mcp` server
pub type Result<T> = std::result::Result<T, error_stack::Report<Error>>;

// Internal error types for detailed error categorization
#[derive(Error)]
pub enum Error {
    /// The engine endpoint could not be reached or failed its liveness probe
    #[error("Could not connect to Unreal Engine: {0}")]
    Connection(String),

    /// A remote call never completed its HTTP exchange (timeout, refused, broken body)
    #[error("Communication error with Unreal Engine: {0}")]
    Transport(String),

    /// The engine answered with a non-success status
    #[error("Unreal Engine rejected the call: {0}")]
    Rejected(String),

    /// The engine answered, but not with something we could decode
    #[error("Unexpected response from Unreal Engine: {0}")]
    InvalidResponse(String),

    #[error("Parameter parse error: {0}")]
    ParameterParse(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    General(String),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(s) => f.debug_tuple("Connection").field(s).finish(),
            Self::Transport(s) => f.debug_tuple("Transport").field(s).finish(),
            Self::Rejected(s) => f.debug_tuple("Rejected").field(s).finish(),
            Self::InvalidResponse(s) => f.debug_tuple("InvalidResponse").field(s).finish(),
            Self::ParameterParse(s) => f.debug_tuple("ParameterParse").field(s).finish(),
            Self::InvalidArgument(s) => f.debug_tuple("InvalidArgument").field(s).finish(),
            Self::General(s) => f.debug_tuple("General").field(s).finish(),
        }
    }
}

impl Error {
    // Builder methods for common patterns

    /// Create a "Failed to X" error
    pub fn failed_to(action: &str, details: impl std::fmt::Display) -> Self {
        Self::General(format!("{MSG_FAILED_TO_PREFIX} {action}: {details}"))
    }

    /// Create an "Invalid X" error
    pub fn invalid(what: &str, details: impl std::fmt::Display) -> Self {
        Self::InvalidArgument(format!("{MSG_INVALID_PREFIX} {what}: {details}"))
    }

    /// Create a transport error for a failed remote function call
    pub fn transport(function: &str, details: impl std::fmt::Display) -> Self {
        Self::Transport(format!("{function}: {details}"))
    }

    /// Create an error for a call the engine answered with a non-success status
    pub fn rejected(function: &str, details: impl std::fmt::Display) -> Self {
        Self::Rejected(format!("{function}: {details}"))
    }

    /// Whether this error means the cached connection handle can no longer be trusted
    pub const fn invalidates_connection(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
