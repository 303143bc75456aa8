//! Path engine error types
//!
//! Core error type shared by the tokenizer, the syntax table, search,
//! and the free-form text lexer.

use std::error::Error;
use std::fmt;

/// Path processing error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Path text rejected by the tokenizer
    InvalidPath,
    /// Syntax table mutation rejected
    Config,
    /// Cycle detected during a safe search
    Cycle,
    /// Free-form text rejected by the lexer
    Lexical,
    /// Value conversion failure
    Serde,
}

/// Main path engine error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathError {
    pub kind: ErrorKind,
    pub message: String,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path error: {}", self.message)
    }
}

impl Error for PathError {}

/// Result type for path engine operations
pub type PathResult<T> = Result<T, PathError>;

impl PathError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: String) -> Self {
        Self { kind, message }
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPath, msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, msg.into())
    }

    pub fn cycle(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cycle, msg.into())
    }

    pub fn lexical(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Lexical, msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serde, msg.into())
    }
}
