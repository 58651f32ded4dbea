//! Cursor over page markup bytes.
//!
//! Every read is bounds-checked: looking past the end yields `None` or
//! `false` instead of panicking.

/// The two-character newline escape (`\` followed by `n`) as it appears in
/// the payload.
pub const NEWLINE_ESCAPE: &[u8] = b"\\n";

/// Returns true if `input` starts a tag.
pub fn is_tag_start(input: &[u8]) -> bool {
    input.first() == Some(&b'<')
}

/// Returns true if `input` starts with the end of a tag.
pub fn is_tag_end(input: &[u8]) -> bool {
    input.first() == Some(&b'>')
}

/// The escaped backslash (two backslashes) as it appears in the payload.
pub const ESCAPED_BACKSLASH: &[u8] = b"\\\\";

/// Returns true if `input` starts with a newline escape.
pub fn is_newline_escape(input: &[u8]) -> bool {
    input.starts_with(NEWLINE_ESCAPE)
}

/// Returns true if `input` starts with an escaped backslash.
pub fn is_escaped_backslash(input: &[u8]) -> bool {
    input.starts_with(ESCAPED_BACKSLASH)
}

/// A position within a byte slice.
///
/// # Examples
///
/// ```
/// use teletext::parser::Cursor;
///
/// let mut cursor = Cursor::new(b"<span>");
/// assert!(cursor.starts_with(b"<span"));
/// assert_eq!(cursor.advance(), Some(b'<'));
/// assert_eq!(cursor.peek(), Some(b's'));
/// ```
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get the remaining input.
    pub fn remaining(&self) -> &'a [u8] {
        self.input.get(self.pos..).unwrap_or(&[])
    }

    /// Peek at the next byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Peek `offset` bytes ahead of the current position.
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// Advance by one byte.
    pub fn advance(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Advance by up to `n` bytes, stopping at the end of input.
    pub fn advance_by(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Move to the position where `rest` begins.
    ///
    /// `rest` must be a suffix of the input, as returned by a sub-parser fed
    /// with [`remaining`](Self::remaining).
    pub fn seek_to_suffix(&mut self, rest: &[u8]) {
        self.pos = self.input.len().saturating_sub(rest.len());
    }

    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.remaining().starts_with(prefix)
    }

    /// Consume everything up to and including the next `byte`.
    ///
    /// Returns false, leaving the cursor at the end, if `byte` never occurs.
    pub fn skip_past(&mut self, byte: u8) -> bool {
        match self.remaining().iter().position(|&b| b == byte) {
            Some(offset) => {
                self.pos += offset + 1;
                true
            }
            None => {
                self.pos = self.input.len();
                false
            }
        }
    }
}
