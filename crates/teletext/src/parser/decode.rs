//! Escape and entity decoding for page markup.
//!
//! Page content arrives as the raw text of a JSON string, so it still carries
//! JSON backslash escapes next to HTML entities. Decoding resolves both in a
//! single left-to-right pass and leaves newline escapes (`\n`) and escaped
//! backslashes (`\\`) in place for the tokenizer, so that an escaped
//! backslash followed by `n` is never mistaken for a line break.

use phf::phf_map;

use crate::options::Options;

use super::cursor::{Cursor, is_escaped_backslash, is_newline_escape};

/// Length of a unicode escape: `\u` followed by four hex digits.
const UNICODE_ESCAPE_LENGTH: usize = 6;

/// Unicode escapes the page font can show, folded to plain letters.
static UNICODE_ESCAPES: phf::Map<&'static str, char> = phf_map! {
    "00e4" => 'a',
    "00e5" => 'a',
    "00c4" => 'A',
    "00c5" => 'A',
    "00f6" => 'o',
    "00d6" => 'O',
    "00e9" => 'e',
};

static ENTITIES: phf::Map<&'static str, char> = phf_map! {
    "amp" => '&',
    "lt" => '<',
    "gt" => '>',
};

/// Prefixes of the container wrapping page content, raw and unescaped.
const WRAPPER_PREFIXES: [&[u8]; 2] = [br#"<div class=\"root\">"#, br#"<div class="root">"#];
const WRAPPER_SUFFIXES: [&[u8]; 4] = [br"\n<\/div>", br"\n</div>", br"<\/div>", b"</div>"];

/// Remove the content wrapper if the markup starts with it.
pub fn strip_wrapper(raw: &[u8]) -> &[u8] {
    let Some(prefix) = WRAPPER_PREFIXES.iter().find(|p| raw.starts_with(p)) else {
        return raw;
    };
    let body = &raw[prefix.len()..];
    match WRAPPER_SUFFIXES.iter().find(|s| body.ends_with(s)) {
        Some(suffix) => &body[..body.len() - suffix.len()],
        None => body,
    }
}

/// Strip the wrapper and decode escapes and entities in page markup.
///
/// # Examples
///
/// ```
/// use teletext::parser::clean_markup;
///
/// let cleaned = clean_markup(br#"<div class=\"root\"><span>K\u00f6p &amp; s\u00e4lj</span>\n</div>"#);
/// assert_eq!(cleaned, b"<span>Kop & salj</span>");
/// ```
pub fn clean_markup(raw: &[u8]) -> Vec<u8> {
    clean_markup_with(raw, &Options::default())
}

pub(crate) fn clean_markup_with(raw: &[u8], options: &Options) -> Vec<u8> {
    let body = if options.strip_wrapper {
        strip_wrapper(raw)
    } else {
        raw
    };
    decode_with(body, options)
}

/// Decode escapes and entities without looking for a wrapper.
pub(crate) fn decode_with(input: &[u8], options: &Options) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut cursor = Cursor::new(input);

    while let Some(b) = cursor.peek() {
        match b {
            b'\\' => decode_backslash(&mut cursor, &mut out, options),
            b'&' => decode_entity(&mut cursor, &mut out, options),
            _ => {
                out.push(b);
                cursor.advance();
            }
        }
    }

    out
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

fn decode_backslash(cursor: &mut Cursor<'_>, out: &mut Vec<u8>, options: &Options) {
    let rest = cursor.remaining();
    if is_newline_escape(rest) || is_escaped_backslash(rest) {
        out.extend_from_slice(&rest[..2]);
        cursor.advance_by(2);
        return;
    }

    match cursor.peek_at(1) {
        Some(b'u') => decode_unicode(cursor, out, options),
        Some(b't') => {
            out.push(b'\t');
            cursor.advance_by(2);
        }
        // Carriage returns and the rarely used control escapes have no
        // place on a teletext row.
        Some(b'r' | b'b' | b'f') => cursor.advance_by(2),
        Some(quoted @ (b'"' | b'/')) => {
            out.push(quoted);
            cursor.advance_by(2);
        }
        // Not a JSON escape: keep it as written.
        Some(other) => {
            out.extend_from_slice(&[b'\\', other]);
            cursor.advance_by(2);
        }
        None => cursor.advance_by(1),
    }
}

/// Resolve escaped backslashes left in place by decoding.
pub(crate) fn unescape_backslashes(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut cursor = Cursor::new(input);

    while let Some(b) = cursor.peek() {
        out.push(b);
        let step = if is_escaped_backslash(cursor.remaining()) { 2 } else { 1 };
        cursor.advance_by(step);
    }

    out
}

fn decode_unicode(cursor: &mut Cursor<'_>, out: &mut Vec<u8>, options: &Options) {
    let rest = cursor.remaining();
    if rest.len() < UNICODE_ESCAPE_LENGTH {
        log::warn!(
            "truncated unicode escape {:?} replaced with '{}'",
            String::from_utf8_lossy(rest),
            options.placeholder
        );
        push_char(out, options.placeholder);
        cursor.advance_by(rest.len());
        return;
    }

    let digits = rest[2..UNICODE_ESCAPE_LENGTH].to_ascii_lowercase();
    let decoded = std::str::from_utf8(&digits)
        .ok()
        .and_then(|key| UNICODE_ESCAPES.get(key));

    match decoded {
        Some(&c) => push_char(out, c),
        None => {
            log::warn!(
                "unsupported unicode escape {:?} replaced with '{}'",
                String::from_utf8_lossy(&rest[..UNICODE_ESCAPE_LENGTH]),
                options.placeholder
            );
            push_char(out, options.placeholder);
        }
    }
    cursor.advance_by(UNICODE_ESCAPE_LENGTH);
}

fn decode_entity(cursor: &mut Cursor<'_>, out: &mut Vec<u8>, options: &Options) {
    let rest = cursor.remaining();

    // A lone ampersand, as in "Q & A", is plain text.
    if matches!(rest.get(1), None | Some(b' ')) {
        out.push(b'&');
        cursor.advance();
        return;
    }

    let window = &rest[..rest.len().min(options.max_entity_length)];
    let Some(end) = window.iter().position(|&b| b == b';') else {
        out.push(b'&');
        cursor.advance();
        return;
    };

    let name = &rest[1..end];
    let decoded = std::str::from_utf8(name)
        .ok()
        .and_then(|key| ENTITIES.get(key));

    match decoded {
        Some(&c) => push_char(out, c),
        None => {
            log::warn!(
                "unsupported entity {:?} replaced with '{}'",
                String::from_utf8_lossy(&rest[..=end]),
                options.placeholder
            );
            push_char(out, options.placeholder);
        }
    }
    cursor.advance_by(end + 1);
}
