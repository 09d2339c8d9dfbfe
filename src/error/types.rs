//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for rbuild operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RbuildError {
    /// Environment Error - a required environment variable is missing
    #[error("Environment error: {message}")]
    Environment { message: String },

    /// Directory Error - the tool was invoked from the wrong directory
    #[error("Directory error: {message}")]
    Directory { message: String },

    /// Unimplemented Error - a flag or feature that is not built yet
    #[error("Unimplemented: {message}")]
    Unimplemented { message: String },

    /// Build File Error - a .bld file is unreadable or malformed
    #[error("Build file error: {message}")]
    BuildFile { message: String },

    /// Node Not Found Error - a .bld path is absent or not a file
    #[error("Build file error: {message}")]
    NodeNotFound { message: String },

    /// Dependency Loop Error - a cycle among .bld needs
    #[error("Dependency loop: {message}")]
    DependencyLoop { message: String },

    /// Command Error - an external tool invocation failed
    #[error("Command error: {message}")]
    Command { message: String },
}

impl RbuildError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Environment { .. } | Self::Directory { .. } => 1,
            Self::Unimplemented { .. } => 2,
            Self::BuildFile { .. } | Self::NodeNotFound { .. } => 3,
            Self::DependencyLoop { .. } => 4,
            Self::Command { .. } => 5,
        }
    }

    /// Create an environment error
    #[inline]
    pub fn environment<S: Into<String>>(message: S) -> Self {
        Self::Environment {
            message: message.into(),
        }
    }

    /// Create a directory error
    #[inline]
    pub fn directory<S: Into<String>>(message: S) -> Self {
        Self::Directory {
            message: message.into(),
        }
    }

    /// Create an unimplemented-feature error
    #[inline]
    pub fn unimplemented<S: Into<String>>(message: S) -> Self {
        Self::Unimplemented {
            message: message.into(),
        }
    }

    /// Create a build file error
    #[inline]
    pub fn build_file<S: Into<String>>(message: S) -> Self {
        Self::BuildFile {
            message: message.into(),
        }
    }

    /// Create a node-not-found error
    #[inline]
    pub fn node_not_found<S: Into<String>>(message: S) -> Self {
        Self::NodeNotFound {
            message: message.into(),
        }
    }

    /// Create a dependency loop error
    #[inline]
    pub fn dependency_loop<S: Into<String>>(message: S) -> Self {
        Self::DependencyLoop {
            message: message.into(),
        }
    }

    /// Create a command error
    #[inline]
    pub fn command<S: Into<String>>(message: S) -> Self {
        Self::Command {
            message: message.into(),
        }
    }
}
