//! Error types for bundler operations.
//!
//! Provides contextual error chaining, filesystem errors that carry the
//! offending path, and the failure modes of external WiX tool invocations.
//!
//! # Features
//!
//! - **Context trait**: Add context to errors similar to anyhow
//! - **ErrorExt trait**: Filesystem operations with automatic path context
//! - **bail! macro**: Early return with formatted error messages

use std::{
    fmt::Display,
    io,
    path::PathBuf,
};
use thiserror::Error as DeriveError;

/// Errors returned by the bundler.
///
/// Every variant is fatal to the build attempt that produced it. Nothing is
/// retried; the caller decides whether to continue with other architectures.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "writing WiX source")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// An external tool could not be launched or awaited.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command that failed to execute
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// An external tool ran but exited unsuccessfully.
    #[error("{tool} exited with {}{}", exit_code_label(.code), stderr_suffix(.stderr))]
    ToolFailed {
        /// Tool name (e.g., "candle.exe")
        tool: String,
        /// Exit code, `None` when the process was terminated by a signal
        code: Option<i32>,
        /// Last lines written to stderr
        stderr: Vec<String>,
    },

    /// The build was cancelled while a tool was running.
    #[error("{tool} was cancelled")]
    Cancelled {
        /// Tool that was running when cancellation arrived
        tool: String,
    },

    /// Generic I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Error walking a directory tree (scan and payload size).
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Handlebars template rendering error.
    #[error("{0}")]
    HandleBarsError(#[from] handlebars::RenderError),

    /// Handlebars template parsing error.
    #[error("{0}")]
    Template(#[from] handlebars::TemplateError),

    /// Unsupported CPU architecture.
    #[error("unsupported architecture: {0}")]
    ArchError(String),

    /// Application signing failed.
    #[error("failed to sign app: {0}")]
    Sign(String),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &[String]) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(":\n{}", stderr.join("\n"))
    }
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Similar to `anyhow::Context` but integrated with bundler's Error type.
/// Works with both `Result<T, E>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "writing WiX source".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Macro for early return with error.
///
/// Converts the message into a [`Error::GenericError`] and returns immediately.
///
/// # Examples
///
/// ```ignore
/// bail!("operation failed");
/// bail!("invalid value: {}", value);
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::error::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_wraps_inner_error() {
        let result: Result<()> = Err(Error::GenericError("inner".into()));
        let err = result.context("outer").unwrap_err();
        assert_eq!(err.to_string(), "outer: inner");
    }

    #[test]
    fn test_option_context_becomes_generic_error() {
        let value: Option<u8> = None;
        let err = value.context("missing value").unwrap_err();
        assert!(matches!(err, Error::GenericError(ref m) if m == "missing value"));
    }

    #[test]
    fn test_tool_failure_includes_stderr_tail() {
        let err = Error::ToolFailed {
            tool: "light.exe".into(),
            code: Some(204),
            stderr: vec!["error LGHT0204 : ICE03".into()],
        };
        assert_eq!(
            err.to_string(),
            "light.exe exited with exit code 204:\nerror LGHT0204 : ICE03"
        );
    }

    #[test]
    fn test_fs_context_keeps_path() {
        let io: std::io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = io.fs_context("reading app directory", "/tmp/app").unwrap_err();
        assert_eq!(err.to_string(), "reading app directory /tmp/app: gone");
    }
}
