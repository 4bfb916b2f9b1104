//! Error types.

use std::collections::TryReserveError;
use std::fmt;
use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The byte source failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A token could not grow its storage.
    #[error("allocation failed: {0}")]
    Alloc(#[from] TryReserveError),

    #[error("file is empty")]
    EmptyInput,

    #[error("file must start with '>'")]
    MissingMarker,

    /// The input violates the record grammar.
    #[error("{kind} on line {line}")]
    Syntax { line: usize, kind: SyntaxError },

    /// A record was requested after the session was done or had failed.
    #[error("no record left to read")]
    Finished,
}

impl Error {
    /// Returns the line number of a grammar error.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Returns the kind of a grammar error.
    pub fn syntax(&self) -> Option<SyntaxError> {
        match self {
            Self::Syntax { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Field of a record, used to locate a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Header,
    Comment,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Header => f.write_str("header"),
            Self::Comment => f.write_str("comment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("expected '>'")]
    ExpectedMarker,

    #[error("empty name")]
    EmptyName,

    #[error("unexpected EOF in name")]
    EofInName,

    #[error("unexpected EOF in comment")]
    EofInComment,

    #[error("unexpected byte {byte:#04x} in {field}")]
    UnexpectedByte { byte: u8, field: Field },

    #[error("empty sequence")]
    EmptySequence,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = Error::Syntax {
            line: 12,
            kind: SyntaxError::EmptySequence,
        };
        assert_eq!(e.to_string(), "empty sequence on line 12");
        assert_eq!(e.line(), Some(12));

        let e = Error::Syntax {
            line: 3,
            kind: SyntaxError::UnexpectedByte {
                byte: 0x01,
                field: Field::Comment,
            },
        };
        assert_eq!(e.to_string(), "unexpected byte 0x01 in comment on line 3");

        assert_eq!(Error::EmptyInput.to_string(), "file is empty");
        assert_eq!(Error::MissingMarker.to_string(), "file must start with '>'");
        assert_eq!(Error::MissingMarker.line(), None);
    }
}
