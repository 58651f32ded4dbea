//! Markup tokenizer for page content.
//!
//! Walks cleaned markup and appends styled tokens to a page. Content is a
//! sequence of blocks (`<span>` or `<h1>`) separated by plain text. Inside a
//! block, text is collected into runs that carry the block's style; links
//! become their own tokens. Text following a newline escape, and text
//! between blocks, becomes separator tokens in the default style.

use crate::error::{ParseError, Result};
use crate::options::Options;
use crate::page::Page;
use crate::style::Style;
use crate::token::{Token, TokenChain, TokenKind};

use super::cursor::{Cursor, is_escaped_backslash, is_newline_escape, is_tag_start};
use super::decode::{clean_markup_with, unescape_backslashes};
use super::tag::{BlockStyle, anchor, block_open, is_anchor_open, is_block_open, is_span_open};

/// Decode `markup` and append its tokens to `page`.
///
/// On failure every token of the page is dropped, so a page never holds a
/// partial token list.
///
/// # Examples
///
/// ```
/// use teletext::{Page, TokenKind};
/// use teletext::parser::tokenize_markup;
///
/// let mut page = Page::new();
/// tokenize_markup(&mut page, br#"<span class=\"\">100</span>"#).unwrap();
///
/// let tokens = page.tokens();
/// assert_eq!(tokens.len(), 1);
/// assert_eq!(tokens.as_slice()[0].text(), "100");
/// assert_eq!(tokens.as_slice()[0].kind, TokenKind::Text);
/// ```
pub fn tokenize_markup(page: &mut Page, markup: &[u8]) -> Result<()> {
    tokenize_markup_with(page, markup, &Options::default())
}

pub(crate) fn tokenize_markup_with(page: &mut Page, markup: &[u8], options: &Options) -> Result<()> {
    let cleaned = clean_markup_with(markup, options);
    let result = Tokenizer::new(&cleaned, &mut page.tokens).run();

    if let Err(err) = &result {
        log::debug!("discarding tokens of page {:?}: {}", page.id, err);
        page.tokens.clear();
    }

    result
}

/// Text collected inside a block, waiting to become a token.
struct Run {
    bytes: Vec<u8>,
    /// The block's container token is still last and has no text yet.
    fills_container: bool,
}

impl Run {
    fn new() -> Self {
        Self {
            bytes: Vec::new(),
            fills_container: true,
        }
    }
}

fn to_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

struct Tokenizer<'a, 't> {
    cursor: Cursor<'a>,
    tokens: &'t mut TokenChain,
}

impl<'a, 't> Tokenizer<'a, 't> {
    fn new(input: &'a [u8], tokens: &'t mut TokenChain) -> Self {
        Self {
            cursor: Cursor::new(input),
            tokens,
        }
    }

    fn run(&mut self) -> Result<()> {
        if self.cursor.is_eof() {
            return Err(ParseError::html("empty page content"));
        }
        if !is_block_open(self.cursor.remaining()) {
            return Err(ParseError::html(
                "page content must start with a span or h1 tag",
            ));
        }

        loop {
            self.parse_block()?;
            self.parse_separators();

            if self.cursor.is_eof() {
                return Ok(());
            }
            if !is_block_open(self.cursor.remaining()) {
                return Err(ParseError::html(format!(
                    "expected a span or h1 tag at byte {}",
                    self.cursor.pos()
                )));
            }
        }
    }

    fn parse_block(&mut self) -> Result<()> {
        let start = self.cursor.pos();
        let (rest, (kind, classes)) = block_open(self.cursor.remaining())
            .map_err(|_| ParseError::html(format!("malformed block tag at byte {start}")))?;
        self.cursor.seek_to_suffix(rest);

        let block = BlockStyle::from_classes(classes);
        log::trace!("block {:?} at byte {} with style {}", kind, start, block.style);
        self.tokens.push(Token::container(block.kind, block.style));

        let close_tag = kind.close_tag();
        let mut run = Run::new();

        loop {
            let rest = self.cursor.remaining();

            if rest.is_empty() {
                return Err(ParseError::html(format!(
                    "unexpected end of content in block opened at byte {start}"
                )));
            }

            if is_escaped_backslash(rest) {
                run.bytes.push(b'\\');
                self.cursor.advance_by(2);
            } else if is_newline_escape(rest) {
                self.flush(&mut run, block);
                self.parse_separators();
                run.fills_container = false;
            } else if is_anchor_open(rest) {
                self.flush(&mut run, block);
                self.parse_anchor(block.style)?;
                run.fills_container = false;
            } else if rest.starts_with(close_tag) {
                self.flush(&mut run, block);
                self.cursor.advance_by(close_tag.len());
                return Ok(());
            } else if is_span_open(rest) {
                // Upstream content sometimes carries an unterminated <span>
                // inside a block. Skip the tag and keep the enclosing style.
                log::trace!("skipping nested span at byte {}", self.cursor.pos());
                if !self.cursor.skip_past(b'>') {
                    return Err(ParseError::html(format!(
                        "unexpected end of content in block opened at byte {start}"
                    )));
                }
            } else if let Some(b) = self.cursor.advance() {
                run.bytes.push(b);
            }
        }
    }

    /// Turn the collected run into a token with the block's style.
    fn flush(&mut self, run: &mut Run, block: BlockStyle) {
        if run.bytes.is_empty() {
            return;
        }

        let text = to_text(&run.bytes);
        run.bytes.clear();

        match self.tokens.last_mut() {
            Some(container) if run.fills_container => container.text = Some(text),
            _ => self.tokens.push(Token::new(block.kind, text, block.style)),
        }
        run.fills_container = false;
    }

    fn parse_anchor(&mut self, style: Style) -> Result<()> {
        let start = self.cursor.pos();
        let (rest, anchor) = anchor(self.cursor.remaining())
            .map_err(|_| ParseError::html(format!("invalid anchor at byte {start}")))?;

        let text = unescape_backslashes(anchor.text);
        self.tokens
            .push(Token::link(anchor.href, to_text(&text), style));
        self.cursor.seek_to_suffix(rest);
        Ok(())
    }

    /// Collect text up to the next tag as default styled separators.
    ///
    /// Each newline escape becomes a `'\n'` that ends the current separator.
    fn parse_separators(&mut self) {
        let mut text = Vec::new();

        while let Some(b) = self.cursor.peek() {
            let rest = self.cursor.remaining();
            if is_tag_start(rest) {
                break;
            }
            if is_escaped_backslash(rest) {
                text.push(b'\\');
                self.cursor.advance_by(2);
            } else if is_newline_escape(rest) {
                text.push(b'\n');
                self.cursor.advance_by(2);
                self.push_separator(&mut text);
            } else {
                text.push(b);
                self.cursor.advance();
            }
        }

        self.push_separator(&mut text);
    }

    fn push_separator(&mut self, text: &mut Vec<u8>) {
        if text.is_empty() {
            return;
        }
        self.tokens
            .push(Token::new(TokenKind::Text, to_text(text), Style::DEFAULT));
        text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn tokenize(markup: &[u8]) -> Result<Vec<Token>> {
        let mut page = Page::new();
        tokenize_markup(&mut page, markup)?;
        Ok(page.tokens().as_slice().to_vec())
    }

    fn blue_on_blue() -> Style {
        Style::new(Color::Blue, Color::Blue)
    }

    #[test]
    fn single_text_token() {
        let tokens = tokenize(br#"<span class="">100</span>"#).unwrap();
        assert_eq!(
            tokens,
            vec![Token::new(TokenKind::Text, "100", Style::DEFAULT)]
        );
        assert_eq!(tokens[0].href, None);
    }

    #[test]
    fn escaped_quotes_in_class_attribute() {
        let tokens = tokenize(br#"<span class=\"Y\">Nyheter</span>"#).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].style.fg, Some(Color::Yellow));
    }

    #[test]
    fn link_inside_styled_block() {
        let tokens =
            tokenize(br#"<span class="bgB B"><a href="/100">i am link</a></span>"#).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::container(TokenKind::Text, blue_on_blue()),
                Token::link(100, "i am link", blue_on_blue()),
            ]
        );
    }

    #[test]
    fn missing_close_tag_fails_and_clears() {
        let mut page = Page::new();
        let result = tokenize_markup(&mut page, br#"<span class="bgB B">100"#);
        assert!(matches!(result, Err(ParseError::HtmlParserFailed(_))));
        assert!(page.tokens().is_empty());
    }

    #[test]
    fn failure_discards_earlier_blocks() {
        let mut page = Page::new();
        let result = tokenize_markup(
            &mut page,
            br#"<span class="W">ok</span><span class="Y"><a href="/1">x</a></span>"#,
        );
        assert!(result.is_err());
        assert!(page.tokens().is_empty());
    }

    #[test]
    fn must_start_with_block() {
        assert!(matches!(
            tokenize(b"xxx"),
            Err(ParseError::HtmlParserFailed(_))
        ));
        assert!(matches!(
            tokenize(b"<div>x</div>"),
            Err(ParseError::HtmlParserFailed(_))
        ));
        assert!(matches!(tokenize(b""), Err(ParseError::HtmlParserFailed(_))));
    }

    #[test]
    fn newline_splits_run_and_drops_style() {
        let tokens = tokenize(br#"<span class="Y">abc\ndef</span>"#).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Text, "abc", Style::DEFAULT.with_fg(Color::Yellow)),
                Token::new(TokenKind::Text, "\n", Style::DEFAULT),
                Token::new(TokenKind::Text, "def", Style::DEFAULT),
            ]
        );
    }

    #[test]
    fn escaped_backslash_before_n_stays_text() {
        let tokens = tokenize(br#"<span class="Y">C:\\new</span>"#).unwrap();
        assert_eq!(
            tokens,
            vec![Token::new(
                TokenKind::Text,
                r"C:\new",
                Style::DEFAULT.with_fg(Color::Yellow)
            )]
        );
    }

    #[test]
    fn escaped_backslash_in_separator_and_link() {
        let tokens =
            tokenize(br#"<span class="W"><a href="/100">a\\b</a></span> \\n<span>x</span>"#)
                .unwrap();
        let texts: Vec<_> = tokens.iter().map(Token::text).collect();
        assert_eq!(texts, vec!["", r"a\b", r" \n", "x"]);
    }

    #[test]
    fn consecutive_newlines_make_separate_separators() {
        let tokens = tokenize(br#"<span class="W">a</span>\n  \n<span class="W">b</span>"#)
            .unwrap();
        let texts: Vec<_> = tokens.iter().map(Token::text).collect();
        assert_eq!(texts, vec!["a", "\n", "  \n", "b"]);
        assert!(tokens[1..3].iter().all(|t| t.style == Style::DEFAULT));
    }

    #[test]
    fn text_after_link_keeps_block_style() {
        let style = Style::DEFAULT.with_fg(Color::Cyan);
        let tokens =
            tokenize(br#"<span class="C">Se <a href="/104">104</a> utrikes</span>"#).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Text, "Se ", style),
                Token::link(104, "104", style),
                Token::new(TokenKind::Text, " utrikes", style),
            ]
        );
    }

    #[test]
    fn toprow_makes_header_tokens() {
        let tokens = tokenize(br#"<span class="toprow"> 100 SVT Text</span>"#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Header);
        assert_eq!(tokens[0].text(), " 100 SVT Text");
    }

    #[test]
    fn header_block_closes_with_h1() {
        let tokens = tokenize(br#"<h1 class="Y DH">Inrikes</h1>"#).unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].style.is_bold());
        assert_eq!(tokens[0].text(), "Inrikes");
    }

    #[test]
    fn other_close_tag_is_text() {
        let tokens = tokenize(br#"<h1 class="Y">a</span>b</h1>"#).unwrap();
        assert_eq!(tokens[0].text(), "a</span>b");
    }

    #[test]
    fn nested_span_is_skipped() {
        let tokens = tokenize(br#"<span class="W">one <span class="Y">two</span>"#).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text(), "one two");
        assert_eq!(tokens[0].style.fg, Some(Color::White));
    }

    #[test]
    fn unterminated_nested_span_fails() {
        assert!(tokenize(br#"<span class="W">one <span class="Y""#).is_err());
    }

    #[test]
    fn text_between_blocks() {
        let tokens = tokenize(br#"<span class="W">a</span> - <span class="W">b</span> "#).unwrap();
        let texts: Vec<_> = tokens.iter().map(Token::text).collect();
        assert_eq!(texts, vec!["a", " - ", "b", " "]);
    }

    #[test]
    fn garbage_between_blocks_fails() {
        assert!(tokenize(br#"<span class="W">a</span><p>b</p>"#).is_err());
    }

    #[test]
    fn empty_block_keeps_container() {
        let tokens = tokenize(br#"<span class="bgY"></span>"#).unwrap();
        assert_eq!(
            tokens,
            vec![Token::container(
                TokenKind::Text,
                Style::DEFAULT.with_bg(Color::Yellow)
            )]
        );
    }

    #[test]
    fn invalid_anchor_fails() {
        assert!(tokenize(br#"<span class="W"><a href="/abc">x</a></span>"#).is_err());
        assert!(tokenize(br#"<span class="W"><a href="/100">x</span>"#).is_err());
    }

    #[test]
    fn decoded_length_is_used() {
        let tokens = tokenize(br#"<span class="W">&amp;&amp;</span>"#).unwrap();
        assert_eq!(tokens[0].text(), "&&");
        assert_eq!(tokens[0].len(), 2);
    }

    #[test]
    fn wrapper_is_removed_before_tokenizing() {
        let tokens =
            tokenize(br#"<div class=\"root\"><span class=\"W\">x</span>\n</div>"#).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text(), "x");
    }
}
