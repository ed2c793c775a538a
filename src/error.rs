//! Error types for evtree

use std::fmt;
use thiserror::Error;

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller required at least one top-level element and none was built
    EmptyInput,
    /// Input ended while an element was still open
    UnterminatedElement { name: String },
    /// A close event named a different element than the one open
    MismatchedClose { expected: String, found: String },
    /// A close event appeared with no element open
    UnexpectedClose { found: String },
    MaxDepthExceeded { max: u16 },
    /// A line of an event script could not be read
    InvalidScript { line: usize },
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "empty input"),
            Self::UnterminatedElement { name } => write!(f, "unterminated element <{name}>"),
            Self::MismatchedClose { expected, found } => {
                write!(f, "expected close of <{expected}>, found </{found}>")
            }
            Self::UnexpectedClose { found } => write!(f, "unexpected close </{found}>"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::InvalidScript { line } => write!(f, "invalid event script at line {line}"),
            Self::Io => write!(f, "i/o error"),
        }
    }
}

/// Main error type for evtree
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    /// Index of the offending event, when one exists
    position: Option<usize>,
    /// Element path (`a/b/c`) at which the condition was detected
    path: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            position: None,
            path: None,
        }
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            position: None,
            path: None,
        }
    }

    /// Attach the event index the error was raised at
    #[must_use]
    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Attach the element path the error was raised in
    #[must_use]
    pub fn in_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "error at event {position}")?,
            None => write!(f, "error")?,
        }
        if let Some(path) = &self.path {
            write!(f, " in {path}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Result type alias for evtree
pub type Result<T> = std::result::Result<T, Error>;
