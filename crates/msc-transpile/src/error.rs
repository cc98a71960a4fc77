//! Errors raised while translating a program.

use crate::registry::{TypeSet, TypeTag};
use std::fmt;

/// Error raised while translating a single logical line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranspileError {
    #[error("`{function}` takes {} argument(s), got {got}", arity_range(.min, .max))]
    Arity {
        function: String,
        min: usize,
        max: Option<usize>,
        got: usize,
    },

    #[error("argument {position} of `{function}` is {found} (`{argument}`), expected {expected}")]
    Type {
        function: String,
        position: usize,
        argument: String,
        expected: TypeSet,
        found: TypeTag,
    },

    #[error("malformed call `{text}`: {reason}")]
    MalformedCall { text: String, reason: String },
}

/// Coarse classification of a [`TranspileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ArityError,
    TypeError,
    MalformedCallError,
}

impl TranspileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranspileError::Arity { .. } => ErrorKind::ArityError,
            TranspileError::Type { .. } => ErrorKind::TypeError,
            TranspileError::MalformedCall { .. } => ErrorKind::MalformedCallError,
        }
    }

    pub(crate) fn malformed(text: &str, reason: impl Into<String>) -> Self {
        TranspileError::MalformedCall {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::ArityError => "ArityError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::MalformedCallError => "MalformedCallError",
        };
        f.write_str(name)
    }
}

/// A translation run aborted on one source line.
///
/// No output is produced for a run that fails; the caller gets this instead
/// of a (possibly empty) program text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {}: {error}\n    {source_text}", .error.kind())]
pub struct LineError {
    /// 1-based line number in the source program.
    pub line: usize,
    /// The offending source line, as written.
    pub source_text: String,
    #[source]
    pub error: TranspileError,
}

impl LineError {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

/// Error loading a [`TranspileConfig`](crate::config::TranspileConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

fn arity_range(min: &usize, max: &Option<usize>) -> String {
    match *max {
        None => format!("at least {min}"),
        Some(max) if max == *min => min.to_string(),
        Some(max) => format!("{min} to {max}"),
    }
}
