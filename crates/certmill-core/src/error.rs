use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for certmill operations
pub type Result<T> = std::result::Result<T, CaError>;

/// Errors that can occur while bootstrapping the CA
#[derive(Error, Debug)]
pub enum CaError {
    /// A required external tool could not be run
    #[error("couldn't run {tool}: {hint}")]
    ToolMissing {
        /// Name of the missing binary
        tool: String,
        /// How to get it onto the PATH
        hint: String,
    },

    /// An external command exited with a non-zero status
    #[error("command failed: {command}\n{output}")]
    CommandFailed {
        /// The command line that was run
        command: String,
        /// Captured stdout and stderr of the failed command
        output: String,
    },

    /// A filesystem operation failed
    #[error("{}: {source}", .path.display())]
    Io {
        /// Path the operation touched
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The signer did not leave the certificate where the serial said it would
    #[error("{} was not created by the signing step", .0.display())]
    MissingSignedCert(PathBuf),

    /// A declared output artifact is missing or empty after the run
    #[error("artifact {} is missing or empty", .0.display())]
    BadArtifact(PathBuf),
}

impl CaError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the failure means an external dependency is absent
    #[must_use]
    pub const fn is_missing_tool(&self) -> bool {
        matches!(self, Self::ToolMissing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failure_includes_captured_output() {
        let err = CaError::CommandFailed {
            command: "openssl req -config ca.cnf".to_string(),
            output: "unable to load config".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("openssl req"));
        assert!(msg.contains("unable to load config"));
    }

    #[test]
    fn missing_tool_is_detectable() {
        let err = CaError::ToolMissing {
            tool: "keytool".to_string(),
            hint: "install a JDK".to_string(),
        };
        assert!(err.is_missing_tool());
    }
}
