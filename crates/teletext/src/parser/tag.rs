//! Tag parsers for page markup.
//!
//! Parses block open tags (`<span>`, `<h1>`) with their class list, and
//! anchors (`<a href="/NNN">text</a>`).

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_until, take_while_m_n},
    character::complete::{char, multispace1},
    combinator::{map_opt, opt, peek, value},
    sequence::{delimited, preceded},
};

use crate::color::Color;
use crate::style::{Attribute, Style};
use crate::token::TokenKind;

/// The tag that opened a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Span,
    Header,
}

impl BlockKind {
    /// The close tag ending a block of this kind.
    pub fn close_tag(self) -> &'static [u8] {
        match self {
            BlockKind::Span => b"</span>",
            BlockKind::Header => b"</h1>",
        }
    }
}

/// A single entry in a block's class list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassToken {
    /// `DH`: double height, shown bold.
    DoubleHeight,
    Foreground(Color),
    Background(Color),
    /// `toprow`: the row with page number, title and date.
    TopRow,
}

impl ClassToken {
    /// Look up a class name. Unknown names yield `None`.
    pub fn parse(class: &str) -> Option<Self> {
        match class {
            "DH" => Some(ClassToken::DoubleHeight),
            "toprow" => Some(ClassToken::TopRow),
            _ => match class.strip_prefix("bg") {
                Some(code) => Color::from_code(code).map(ClassToken::Background),
                None => Color::from_code(class).map(ClassToken::Foreground),
            },
        }
    }
}

/// Style and token kind resolved from a block's class list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockStyle {
    pub style: Style,
    pub kind: TokenKind,
}

impl BlockStyle {
    /// Resolve a space separated class list, starting from [`Style::DEFAULT`].
    ///
    /// # Examples
    ///
    /// ```
    /// use teletext::{Color, TokenKind};
    /// use teletext::parser::BlockStyle;
    ///
    /// let block = BlockStyle::from_classes(b"bgB Y DH");
    /// assert_eq!(block.style.fg, Some(Color::Yellow));
    /// assert_eq!(block.style.bg, Some(Color::Blue));
    /// assert!(block.style.is_bold());
    /// assert_eq!(block.kind, TokenKind::Text);
    /// ```
    pub fn from_classes(classes: &[u8]) -> Self {
        let mut block = BlockStyle {
            style: Style::DEFAULT,
            kind: TokenKind::Text,
        };

        let names = classes
            .split(|b| b.is_ascii_whitespace())
            .filter(|name| !name.is_empty());

        for name in names {
            let token = std::str::from_utf8(name).ok().and_then(ClassToken::parse);
            match token {
                Some(token) => block.apply(token),
                None => log::trace!(
                    "ignoring unknown class {:?}",
                    String::from_utf8_lossy(name)
                ),
            }
        }

        block
    }

    fn apply(&mut self, token: ClassToken) {
        match token {
            ClassToken::DoubleHeight => self.style = self.style.with_extra(Attribute::Bold),
            ClassToken::Foreground(color) => self.style = self.style.with_fg(color),
            ClassToken::Background(color) => self.style = self.style.with_bg(color),
            ClassToken::TopRow => self.kind = TokenKind::Header,
        }
    }
}

fn class_attribute(input: &[u8]) -> IResult<&[u8], &[u8]> {
    delimited(tag("class=\""), take_until("\""), char('"'))(input)
}

fn tag_name_end(input: &[u8]) -> IResult<&[u8], &[u8]> {
    peek(take_while_m_n(1, 1, |b: u8| b == b'>' || b.is_ascii_whitespace()))(input)
}

/// Parse a block open tag, returning its kind and raw class list.
///
/// Attributes other than `class` are skipped.
pub fn block_open(input: &[u8]) -> IResult<&[u8], (BlockKind, &[u8])> {
    let (input, kind) = alt((
        value(BlockKind::Span, tag("<span")),
        value(BlockKind::Header, tag("<h1")),
    ))(input)?;
    let (input, _) = tag_name_end(input)?;
    let (input, classes) = opt(preceded(multispace1, class_attribute))(input)?;
    let (input, _) = take_until(">")(input)?;
    let (input, _) = char('>')(input)?;
    Ok((input, (kind, classes.unwrap_or_default())))
}

/// Returns true if `input` starts with a `<span` or `<h1` open tag.
pub fn is_block_open(input: &[u8]) -> bool {
    let kind: IResult<&[u8], &[u8]> = alt((tag("<span"), tag("<h1")))(input);
    kind.and_then(|(rest, _)| tag_name_end(rest)).is_ok()
}

/// Returns true if `input` starts with a nested `<span` open tag.
pub fn is_span_open(input: &[u8]) -> bool {
    let span: IResult<&[u8], &[u8]> = tag("<span")(input);
    span.and_then(|(rest, _)| tag_name_end(rest)).is_ok()
}

/// Returns true if `input` starts with an anchor open tag.
pub fn is_anchor_open(input: &[u8]) -> bool {
    input.starts_with(b"<a ")
}

fn page_id(digits: &[u8]) -> Option<u16> {
    std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .filter(|&id| id != 0)
}

/// A parsed anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor<'a> {
    pub href: u16,
    pub text: &'a [u8],
}

/// Parse `<a href="/NNN">text</a>`.
///
/// Page ids are always three digits. Anything between the digits and the
/// end of the open tag is skipped. The text is taken verbatim up to `</a>`.
pub fn anchor(input: &[u8]) -> IResult<&[u8], Anchor<'_>> {
    let (input, _) = tag("<a href=\"/")(input)?;
    let (input, href) = map_opt(
        take_while_m_n(3, 3, |b: u8| b.is_ascii_digit()),
        page_id,
    )(input)?;
    let (input, _) = take_until(">")(input)?;
    let (input, _) = char('>')(input)?;
    let (input, text) = take_until("</a>")(input)?;
    let (input, _) = tag("</a>")(input)?;
    Ok((input, Anchor { href, text }))
}
