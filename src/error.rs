//! Error handling for the setup tool
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Library code returns these types; the binary layer adds context with anyhow.

use thiserror::Error;

/// Main error type for the setup tool
#[derive(Error, Debug)]
pub enum SetupError {
    /// IO errors (file staging, directory creation, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A collaborator binary could not be started at all
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A collaborator command ran and reported failure
    #[error("`{program}` exited with status {code}: {message}")]
    Command {
        program: String,
        code: i32,
        message: String,
    },

    /// The package source tree could not be located
    #[error("package root not found: {0}")]
    PackageRoot(String),

    /// Home directory resolution failed (no $HOME, no passwd entry)
    #[error("home directory could not be determined")]
    NoHome,

    /// Required tools are missing from PATH
    #[error("missing required tools: {0}")]
    Preflight(String),

    /// JSON serialization errors (status report output)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for setup operations
pub type Result<T> = std::result::Result<T, SetupError>;

// Convenient error constructors
impl SetupError {
    /// Create a launch error for a binary that failed to start
    pub fn launch(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            program: program.into(),
            source,
        }
    }

    /// Create a command-failure error from an exit status and diagnostic text
    pub fn command(program: impl Into<String>, code: i32, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Command {
            program: program.into(),
            code,
            message: if message.is_empty() {
                "no diagnostic output".to_string()
            } else {
                message
            },
        }
    }

    /// Create a package-root resolution error
    pub fn package_root(msg: impl Into<String>) -> Self {
        Self::PackageRoot(msg.into())
    }

    /// Create a preflight error listing missing tools
    pub fn preflight(msg: impl Into<String>) -> Self {
        Self::Preflight(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }

    /// Exit code of the failing external command, if this error carries one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Command { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SetupError::command("systemctl --user daemon-reload", 1, "Failed to connect to bus");
        assert_eq!(
            err.to_string(),
            "`systemctl --user daemon-reload` exited with status 1: Failed to connect to bus"
        );

        let err = SetupError::package_root("no systemd/ directory above /opt/tools/bin");
        assert_eq!(
            err.to_string(),
            "package root not found: no systemd/ directory above /opt/tools/bin"
        );
    }

    #[test]
    fn test_empty_diagnostics_are_filled_in() {
        let err = SetupError::command("python3 -m pip", 2, "");
        assert_eq!(
            err.to_string(),
            "`python3 -m pip` exited with status 2: no diagnostic output"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SetupError = io_err.into();
        assert!(matches!(err, SetupError::Io(_)));
    }

    #[test]
    fn test_exit_code_exposure() {
        let err = SetupError::command("python3 -m pip", 2, "bad requirement");
        assert_eq!(err.exit_code(), Some(2));

        let err = SetupError::NoHome;
        assert_eq!(err.exit_code(), None);
    }
}
