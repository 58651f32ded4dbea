//! Parser for teletext page payloads.
//!
//! This module contains the byte cursor, the escape decoder, the tag and
//! markup tokenizers, and the JSON envelope extractor.

mod cursor;
mod decode;
mod json;
mod markup;
mod tag;

pub use cursor::{
    Cursor, ESCAPED_BACKSLASH, NEWLINE_ESCAPE, is_escaped_backslash, is_newline_escape,
    is_tag_end, is_tag_start,
};
pub use decode::{clean_markup, strip_wrapper};
pub use json::{get_page, get_page_collection};
pub use markup::tokenize_markup;
pub use tag::{Anchor, BlockKind, BlockStyle, ClassToken, anchor, block_open};

use crate::error::Result;
use crate::options::Options;
use crate::page::{Page, PageCollection};

/// Payload parser carrying its [`Options`].
///
/// The free functions in this module behave like a `PageParser` built with
/// `Options::default()`.
///
/// # Examples
///
/// ```
/// use teletext::{Options, PageParser};
///
/// let parser = PageParser::new(Options::new().with_placeholder('_'));
/// let page = parser
///     .parse_page(br#"[{"num": 100, "title": "Nyheter &hellip;"}]"#)
///     .unwrap();
/// assert_eq!(page.id, Some(100));
/// assert_eq!(page.title.as_deref(), Some("Nyheter _"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PageParser {
    options: Options,
}

impl PageParser {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parse every page of a payload. See [`get_page_collection`].
    pub fn parse_collection(&self, data: &[u8]) -> Result<PageCollection> {
        json::parse_collection(data, &self.options)
    }

    /// Parse a payload and return its first page.
    pub fn parse_page(&self, data: &[u8]) -> Result<Page> {
        json::parse_page(data, &self.options)
    }

    /// Append the tokens of a markup fragment to `page`. See [`tokenize_markup`].
    pub fn tokenize_markup(&self, page: &mut Page, markup: &[u8]) -> Result<()> {
        markup::tokenize_markup_with(page, markup, &self.options)
    }

    pub fn clean_markup(&self, raw: &[u8]) -> Vec<u8> {
        decode::clean_markup_with(raw, &self.options)
    }
}
