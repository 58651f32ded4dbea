//! Page and PageCollection types.
//!
//! A [`Page`] holds the metadata of one teletext page and the tokens of its
//! content. A [`PageCollection`] holds every page parsed from one payload.

use std::fmt;

use crate::token::{Token, TokenChain};

/// The first page id a reader can navigate to.
pub const FIRST_PAGE_ID: u16 = 100;
/// The last page id a reader can navigate to.
pub const LAST_PAGE_ID: u16 = 799;

/// Returns true for ids inside the teletext numbering range `100..=799`.
///
/// The parser itself accepts any `u16`; this is for callers deciding which
/// ids are worth requesting.
pub fn is_navigable_page_id(id: u16) -> bool {
    (FIRST_PAGE_ID..=LAST_PAGE_ID).contains(&id)
}

/// A single teletext page.
///
/// Numeric fields are `None` when the payload left them out or they failed
/// validation. `Page::default()` is the empty page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub id: Option<u16>,
    pub prev_id: Option<u16>,
    pub next_id: Option<u16>,
    /// Last update, in seconds since the Unix epoch.
    pub unix_date: Option<u64>,
    pub title: Option<String>,
    pub(crate) tokens: TokenChain,
}

impl Page {
    /// Create an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if every field still holds its default value.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn tokens(&self) -> &TokenChain {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut TokenChain {
        &mut self.tokens
    }

    /// Link tokens in page order.
    pub fn links(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.links()
    }

    /// Target page id of the `index`-th link on the page.
    pub fn link(&self, index: usize) -> Option<u16> {
        self.links().nth(index).and_then(|t| t.href)
    }

    /// Concatenated text of all tokens.
    pub fn plain_text(&self) -> String {
        self.tokens.iter().map(Token::text).collect()
    }
}

fn write_field<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    value: Option<T>,
) -> fmt::Result {
    match value {
        Some(value) => writeln!(f, "* {name}: {value}"),
        None => writeln!(f, "* {name}: unset"),
    }
}

impl fmt::Display for Page {
    /// Metadata first, then one line per token.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_field(f, "id", self.id)?;
        write_field(f, "prev_id", self.prev_id)?;
        write_field(f, "next_id", self.next_id)?;
        write_field(f, "unix_date", self.unix_date)?;
        write_field(f, "title", self.title.as_deref())?;
        writeln!(f, "* tokens: {}", self.tokens.len())?;
        for token in &self.tokens {
            writeln!(f, "  {token}")?;
        }
        Ok(())
    }
}

/// All pages parsed from one payload, in payload order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageCollection {
    pages: Vec<Page>,
}

impl PageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection of `size` empty pages.
    pub fn with_size(size: usize) -> Self {
        let mut collection = Self::new();
        collection.resize(size);
        collection
    }

    pub(crate) fn from_pages(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    pub fn push(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Find a page by its id.
    pub fn find(&self, id: u16) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == Some(id))
    }

    /// Position of the page with the given id.
    pub fn position(&self, id: u16) -> Option<usize> {
        self.pages.iter().position(|p| p.id == Some(id))
    }

    /// Change the number of pages.
    ///
    /// Shrinking drops the pages past `new_size` and leaves the rest in place.
    /// Growing appends empty pages.
    pub fn resize(&mut self, new_size: usize) {
        if new_size <= self.pages.len() {
            self.pages.truncate(new_size);
        } else {
            self.pages.resize_with(new_size, Page::default);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

impl IntoIterator for PageCollection {
    type Item = Page;
    type IntoIter = std::vec::IntoIter<Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}

impl<'a> IntoIterator for &'a PageCollection {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

impl fmt::Display for PageCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, page) in self.pages.iter().enumerate() {
            writeln!(f, "PAGE {i}")?;
            write!(f, "{page}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}
