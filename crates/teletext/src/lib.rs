//! Teletext page payload parser.
//!
//! This crate turns the JSON payload served by a teletext page API into
//! [`Page`]s made of styled text tokens and page links, ready to be drawn on
//! a terminal grid.
//!
//! # Overview
//!
//! A payload is a JSON array of page objects:
//!
//! ```text
//! [{"num": "100", "prev_page": "", "next_page": "101",
//!   "title": "SVT Text", "date_updated_unix": 1612004371,
//!   "content": ["<div class=\"root\"><span class=\"toprow\"> 100 SVT Text<\/span>\n..."]}]
//! ```
//!
//! Page content is a small markup fragment:
//!
//! - `<span class="...">text</span>` - A styled block
//! - `<h1 class="...">text</h1>` - A styled heading block
//! - `<a href="/NNN">text</a>` - A link to page `NNN`
//! - `\n` - A line break, as a JSON escape
//!
//! Class lists use `B C W G Y R` for the foreground, `bgB bgC ...` for the
//! background, `DH` for double height and `toprow` for the header row.
//!
//! # Usage
//!
//! ```
//! use teletext::{Color, TokenKind, get_page};
//!
//! let page = get_page(
//!     br#"[{"num": 100, "content": ["<span class=\"bgB Y\">Nyheter <a href=\"/101\">101</a></span>"]}]"#,
//! )
//! .unwrap();
//!
//! assert_eq!(page.id, Some(100));
//! assert_eq!(page.plain_text(), "Nyheter 101");
//! assert_eq!(page.link(0), Some(101));
//!
//! let first = &page.tokens().as_slice()[0];
//! assert_eq!(first.kind, TokenKind::Text);
//! assert_eq!(first.style.fg, Some(Color::Yellow));
//! ```

pub mod color;
pub mod error;
pub mod last_error;
pub mod options;
pub mod page;
pub mod parser;
pub mod style;
pub mod token;

// Re-export main types at crate root
pub use color::Color;
pub use error::{ErrorKind, ParseError, Result};
pub use last_error::LastError;
pub use options::Options;
pub use page::{FIRST_PAGE_ID, LAST_PAGE_ID, Page, PageCollection, is_navigable_page_id};
pub use parser::{PageParser, clean_markup, get_page, get_page_collection, tokenize_markup};
pub use style::{Attribute, Style};
pub use token::{Token, TokenChain, TokenKind};
