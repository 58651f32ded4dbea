//! Polling-style error slot for collaborators that query the most recent
//! failure instead of handling `Result`s directly.

use crate::error::{ErrorKind, ParseError};

/// Holds the most recent error and an optional custom message.
///
/// Any call to a setter overwrites the previous state, so callers must
/// inspect the slot right after the operation they care about.
///
/// # Examples
///
/// ```
/// use teletext::{ErrorKind, LastError};
///
/// let mut last = LastError::new();
/// assert!(!last.is_set());
///
/// last.set(ErrorKind::PageParserFailed);
/// assert_eq!(last.get_string(), Some("ERROR: Could not parse response"));
///
/// last.reset();
/// assert_eq!(last.get_string(), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LastError {
    kind: Option<ErrorKind>,
    custom: Option<String>,
}

impl LastError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error kind, dropping any previous custom message.
    pub fn set(&mut self, kind: ErrorKind) {
        self.kind = Some(kind);
        self.custom = None;
    }

    /// Set the error kind together with a custom message.
    pub fn set_with_string(&mut self, kind: ErrorKind, message: impl Into<String>) {
        self.kind = Some(kind);
        self.custom = Some(message.into());
    }

    /// Record a parser error, keeping its detail as the custom message.
    pub fn record(&mut self, error: &ParseError) {
        self.set_with_string(error.kind(), format!("ERROR: {error}"));
    }

    pub fn is_set(&self) -> bool {
        self.kind.is_some()
    }

    pub fn get(&self) -> Option<ErrorKind> {
        self.kind
    }

    /// The custom message if one was set, otherwise the kind's default.
    pub fn get_string(&self) -> Option<&str> {
        let kind = self.kind?;
        Some(
            self.custom
                .as_deref()
                .unwrap_or_else(|| kind.default_message()),
        )
    }

    pub fn reset(&mut self) {
        self.kind = None;
        self.custom = None;
    }
}
