//! Exit codes for the `reason-relay` CLI.
//!
//! Scripts and editor integrations can tell "nothing to do" apart from
//! configuration, schema and I/O failures.

/// Exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// No matching action, or files that still need formatting
    NothingApplied = 1,
    /// Missing or invalid GraphQL config
    ConfigError = 2,
    /// The workspace schema could not be loaded
    SchemaError = 3,
    /// File read/write failure
    IoError = 4,
    /// Invalid arguments, such as a bad component name
    InvalidInput = 5,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }

    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::NothingApplied => write!(f, "nothing applied"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SchemaError => write!(f, "schema load error"),
            Self::IoError => write!(f, "I/O error"),
            Self::InvalidInput => write!(f, "invalid input"),
        }
    }
}
