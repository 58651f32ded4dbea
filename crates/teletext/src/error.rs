//! Error types for teletext payload parsing.

use thiserror::Error;

/// Errors that can occur when parsing a page payload.
///
/// Every variant carries a detail message describing where parsing stopped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// A working buffer could not be allocated.
    #[error("out of memory: {0}")]
    OutOfMemory(String),

    /// The JSON envelope is malformed, or no page object could be parsed.
    #[error("could not parse response: {0}")]
    PageParserFailed(String),

    /// The markup fragment of a page is malformed.
    #[error("could not parse HTML page content: {0}")]
    HtmlParserFailed(String),
}

impl ParseError {
    /// The kind of this error, as used by [`LastError`](crate::LastError).
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::OutOfMemory(_) => ErrorKind::OutOfMemory,
            ParseError::PageParserFailed(_) => ErrorKind::PageParserFailed,
            ParseError::HtmlParserFailed(_) => ErrorKind::HtmlParserFailed,
        }
    }

    pub(crate) fn page(detail: impl Into<String>) -> Self {
        ParseError::PageParserFailed(detail.into())
    }

    pub(crate) fn html(detail: impl Into<String>) -> Self {
        ParseError::HtmlParserFailed(detail.into())
    }
}

/// Coarse error classification shared with the network and rendering layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    OutOfMemory,
    /// Reported by the network collaborator; never produced by the parser.
    RequestFailed,
    PageParserFailed,
    HtmlParserFailed,
}

impl ErrorKind {
    /// The message shown when no custom message was recorded.
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorKind::OutOfMemory => "ERROR: Out of memory",
            ErrorKind::RequestFailed => "ERROR: HTTP request failed",
            ErrorKind::PageParserFailed => "ERROR: Could not parse response",
            ErrorKind::HtmlParserFailed => "ERROR: Could not parse HTML page content",
        }
    }
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, ParseError>;
