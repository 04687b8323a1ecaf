use thiserror::Error;

use crate::value::Kind;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure raised while transcoding between UTF encodings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UtfError {
    #[error("Invalid Encoding - {0}")]
    InvalidEncoding(&'static str),
    #[error("Invalid Code Point - {0} is not a valid UTF code point")]
    InvalidCodePoint(u32),
    #[error("Unexpected Ending - input ends in the middle of a {0} sequence")]
    UnexpectedEnding(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Lexical or grammatical failure. `line` and `column` are zero-based
    /// and captured at the moment the error is raised; the display text
    /// renders them one-based.
    #[error("Parse error - {issue}: line {} column {}.", .line + 1, .column + 1)]
    Parse {
        issue: String,
        line: usize,
        column: usize,
    },

    #[error(transparent)]
    Utf(#[from] UtfError),

    /// The lexical form was valid but the value does not fit the target
    /// numeric type.
    #[error("Range error - {what}")]
    Range { what: String },

    /// A kind-specific operation was invoked on a value of another kind.
    #[error("The type of this JSON object is {kind}, which doesn't support operation of {op}.")]
    Unsupported { kind: Kind, op: &'static str },

    /// The writer was asked to serialize a value JSON text cannot express.
    #[error("Serialize error - {what}")]
    Serialize { what: String },
}

impl Error {
    pub(crate) fn parse(issue: impl Into<String>, line: usize, column: usize) -> Self {
        Error::Parse {
            issue: issue.into(),
            line,
            column,
        }
    }

    pub(crate) fn range(what: impl Into<String>) -> Self {
        Error::Range { what: what.into() }
    }

    pub(crate) fn unsupported(kind: Kind, op: &'static str) -> Self {
        Error::Unsupported { kind, op }
    }

    pub(crate) fn serialize(what: impl Into<String>) -> Self {
        Error::Serialize { what: what.into() }
    }

    /// Position reported by a parse error, if this is one.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Parse { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Error::Range { .. })
    }
}
