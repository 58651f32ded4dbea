//! Token types for parsed page content.

use std::fmt;

use crate::style::Style;

/// What a token represents on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Text from the page's top row (page number, title and date).
    Header,
    /// Plain styled text.
    Text,
    /// A link to another page.
    Link,
}

/// A styled run of text, optionally linking to another page.
///
/// `text` is `None` only for a styling container: a block whose markup
/// starts with something other than text, such as a link.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub text: Option<String>,
    /// Target page id for links.
    pub href: Option<u16>,
    pub kind: TokenKind,
    pub style: Style,
}

impl Token {
    /// Create a text or header token.
    pub fn new(kind: TokenKind, text: impl Into<String>, style: Style) -> Self {
        Self {
            text: Some(text.into()),
            href: None,
            kind,
            style,
        }
    }

    /// Create a styling container without text.
    pub fn container(kind: TokenKind, style: Style) -> Self {
        Self {
            text: None,
            href: None,
            kind,
            style,
        }
    }

    /// Create a link token pointing at `href`.
    pub fn link(href: u16, text: impl Into<String>, style: Style) -> Self {
        Self {
            text: Some(text.into()),
            href: Some(href),
            kind: TokenKind::Link,
            style,
        }
    }

    /// Byte length of the decoded text.
    pub fn len(&self) -> usize {
        self.text.as_ref().map_or(0, String::len)
    }

    /// Returns true if the token has no visible text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn is_link(&self) -> bool {
        self.kind == TokenKind::Link
    }
}

impl fmt::Display for Token {
    /// One line per token: kind, style, optional href and the quoted text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            TokenKind::Header => "header",
            TokenKind::Text => "text",
            TokenKind::Link => "link",
        };
        write!(f, "{kind} [{}]", self.style)?;
        if let Some(href) = self.href {
            write!(f, " -> {href}")?;
        }
        match &self.text {
            Some(text) => write!(f, " {text:?}"),
            None => f.write_str(" <container>"),
        }
    }
}

/// The ordered tokens of one page.
///
/// Tokens are stored contiguously in append order; the last token is always
/// reachable in constant time so the tokenizer can keep filling it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenChain {
    tokens: Vec<Token>,
}

impl TokenChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Token> {
        self.tokens.last_mut()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Drop every token.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Link tokens in page order.
    pub fn links(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(|t| t.is_link())
    }
}

impl<'a> IntoIterator for &'a TokenChain {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
