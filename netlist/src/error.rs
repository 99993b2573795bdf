use std::fmt::Display;
use std::io;

/// Everything that can go wrong while building or querying a [`Network`](crate::Network).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("wrong number of arguments for {gate}: got {found}")]
    ArityMismatch { gate: String, found: usize },
    #[error("unknown gate type `{0}`")]
    UnknownGateType(String),
    #[error("malformed cover: {0}")]
    MalformedCover(String),
    #[error("`{0}` is defined more than once")]
    DuplicateDeclaration(String),
    #[error("`{0}` is used but never defined")]
    UnresolvedSignal(String),
    #[error("combinational loop through `{0}`")]
    CombinationalLoop(String),
    #[error("port `{0}` has no bits")]
    EmptyPort(String),
    #[error("{what} index {index} out of range (have {len})")]
    OutOfRange { what: &'static str, index: usize, len: usize },
}

impl Error {
    pub fn syntax(message: impl Into<String>) -> Self {
        Error::Syntax(message.into())
    }

    pub fn malformed_cover(message: impl Into<String>) -> Self {
        Error::MalformedCover(message.into())
    }

    pub fn at(self, line: usize) -> ParseError {
        ParseError { line: Some(line), error: self }
    }
}

/// Error returned by the readers: an [`Error`] plus the 1-based line it was detected on, if any.
#[derive(Debug)]
pub struct ParseError {
    line: Option<usize>,
    error: Error,
}

impl ParseError {
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn error(&self) -> &Error {
        &self.error
    }

    pub fn into_error(self) -> Error {
        self.error
    }
}

impl From<Error> for ParseError {
    fn from(error: Error) -> Self {
        ParseError { line: None, error }
    }
}

impl From<io::Error> for ParseError {
    fn from(error: io::Error) -> Self {
        ParseError { line: None, error: Error::Io(error) }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
