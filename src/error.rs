// src/error.rs

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A field that does not match the lexical pattern its format requires.
///
/// Carries the offending value and what was expected of it. Readers wrap this
/// in [`ReadError::Format`] together with the file path and line number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found '{value}'")]
pub struct FormatError {
    pub value: String,
    pub expected: String,
}

impl FormatError {
    pub fn new(value: impl Into<String>, expected: impl Into<String>) -> Self {
        FormatError {
            value: value.into(),
            expected: expected.into(),
        }
    }
}

/// Everything that can abort a table read.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: {source}", .path.display())]
    Format {
        path: PathBuf,
        line: usize,
        #[source]
        source: FormatError,
    },

    #[error("{}: duplicate value '{key}' in unique column '{column}'", .path.display())]
    Integrity {
        path: PathBuf,
        column: String,
        key: String,
    },

    #[error("{}:{line}: {message}", .path.display())]
    Assertion {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("{}: missing required column '{column}'", .path.display())]
    Schema { path: PathBuf, column: String },
}

impl ReadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ReadError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, line: usize, source: FormatError) -> Self {
        ReadError::Format {
            path: path.into(),
            line,
            source,
        }
    }
}

/// A key that showed up twice in a column that must be unique.
///
/// Returned by [`crate::table::Table::indexed`]; readers attach the path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate value '{key}' in unique column '{column}'")]
pub struct DuplicateKey {
    pub column: String,
    pub key: String,
}

impl DuplicateKey {
    pub(crate) fn at(self, path: impl Into<PathBuf>) -> ReadError {
        ReadError::Integrity {
            path: path.into(),
            column: self.column,
            key: self.key,
        }
    }
}
