//! JSON envelope extraction.
//!
//! A payload is a JSON array of page objects. String values are kept as raw
//! JSON text so that titles and markup reach the decoder with their escapes
//! intact.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde_json::Value;
use serde_json::value::RawValue;

use crate::error::{ParseError, Result};
use crate::options::Options;
use crate::page::{Page, PageCollection};

use super::decode::{decode_with, unescape_backslashes};
use super::markup::tokenize_markup_with;

const CONTENT_KEY: &str = "content";

/// Parse every page object of a payload.
///
/// Elements that are not objects are skipped. An object whose content fails
/// to tokenize is dropped; other invalid fields only leave that field unset.
/// Fails if the payload is not an array starting with an object, or if no
/// object yields a page.
pub fn get_page_collection(data: &[u8]) -> Result<PageCollection> {
    parse_collection(data, &Options::default())
}

/// Parse a payload and return its first page.
pub fn get_page(data: &[u8]) -> Result<Page> {
    parse_page(data, &Options::default())
}

pub(crate) fn parse_page(data: &[u8], options: &Options) -> Result<Page> {
    parse_collection(data, options)?
        .into_pages()
        .into_iter()
        .next()
        .ok_or_else(|| ParseError::page("payload holds no page"))
}

pub(crate) fn parse_collection(data: &[u8], options: &Options) -> Result<PageCollection> {
    if data.is_empty() {
        return Err(ParseError::page("empty response"));
    }

    let data = escape_stray_backslashes(data);
    let elements: Vec<&RawValue> = serde_json::from_slice(&data)
        .map_err(|e| ParseError::page(format!("expected a JSON array: {e}")))?;

    match elements.first() {
        None => return Err(ParseError::page("empty page array")),
        Some(first) if !is_object(first) => {
            return Err(ParseError::page("first array element is not an object"));
        }
        Some(_) => {}
    }

    let mut pages = Vec::new();
    pages
        .try_reserve_exact(elements.len())
        .map_err(|e| ParseError::OutOfMemory(format!("{} pages: {e}", elements.len())))?;

    let mut last_failure = None;
    for (index, element) in elements.iter().enumerate() {
        if !is_object(element) {
            log::debug!("skipping array element {index}: not an object");
            continue;
        }

        match parse_page_object(element, options) {
            Ok(page) => pages.push(page),
            Err(err) => {
                log::warn!("dropping page object {index}: {err}");
                last_failure = Some(err);
            }
        }
    }

    if pages.is_empty() {
        let detail = last_failure
            .map(|err| err.to_string())
            .unwrap_or_else(|| "no page objects".to_string());
        return Err(ParseError::page(format!("no page could be parsed: {detail}")));
    }

    pages.shrink_to_fit();
    log::debug!("parsed {} of {} array elements", pages.len(), elements.len());
    Ok(PageCollection::from_pages(pages))
}

/// Returns true if `rest`, the bytes after a backslash, form a JSON escape.
fn is_json_escape(rest: &[u8]) -> bool {
    match rest.first() {
        Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => true,
        Some(b'u') => rest.len() > 4 && rest[1..5].iter().all(u8::is_ascii_hexdigit),
        _ => false,
    }
}

/// Double every backslash that does not start a JSON escape.
///
/// Page text sometimes carries sequences like `\x00e4` that strict JSON
/// rejects. Escaping the backslash keeps the sequence as written instead of
/// failing the whole payload.
fn escape_stray_backslashes(data: &[u8]) -> Cow<'_, [u8]> {
    let mut fixed: Option<Vec<u8>> = None;
    let mut i = 0;

    while i < data.len() {
        let b = data[i];
        if b == b'\\' {
            if is_json_escape(&data[i + 1..]) {
                if let Some(out) = fixed.as_mut() {
                    out.extend_from_slice(&data[i..i + 2]);
                }
                i += 2;
                continue;
            }

            log::debug!("escaping stray backslash at byte {i}");
            let out = fixed.get_or_insert_with(|| {
                let mut out = Vec::with_capacity(data.len() + 16);
                out.extend_from_slice(&data[..i]);
                out
            });
            out.extend_from_slice(b"\\\\");
        } else if let Some(out) = fixed.as_mut() {
            out.push(b);
        }
        i += 1;
    }

    match fixed {
        Some(out) => Cow::Owned(out),
        None => Cow::Borrowed(data),
    }
}

fn is_object(raw: &RawValue) -> bool {
    raw.get().trim_start().starts_with('{')
}

/// The text between the quotes of a JSON string, escapes untouched.
fn raw_string(raw: &RawValue) -> Option<&str> {
    raw.get().trim().strip_prefix('"')?.strip_suffix('"')
}

fn parse_page_object(raw: &RawValue, options: &Options) -> Result<Page> {
    let fields: BTreeMap<String, &RawValue> = serde_json::from_str(raw.get())
        .map_err(|e| ParseError::page(format!("malformed page object: {e}")))?;

    let mut page = Page::new();
    for (key, value) in &fields {
        match key.as_str() {
            "num" => page.id = page_number(key, value),
            "prev_page" => page.prev_id = page_number(key, value),
            "next_page" => page.next_id = page_number(key, value),
            "date_updated_unix" => page.unix_date = unsigned(key, value),
            "title" => page.title = title(value, options),
            _ => {}
        }
    }

    if let Some(content) = fields.get(CONTENT_KEY) {
        parse_content(&mut page, content, options)?;
    }

    Ok(page)
}

/// A positive integer, given as a JSON number or a string of digits.
fn unsigned(key: &str, raw: &RawValue) -> Option<u64> {
    let number = match serde_json::from_str::<Value>(raw.get()) {
        Ok(Value::Number(n)) => n.as_u64(),
        Ok(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .filter(|&n| n > 0);

    if number.is_none() {
        log::debug!("ignoring invalid {key}: {}", raw.get());
    }
    number
}

fn page_number(key: &str, raw: &RawValue) -> Option<u16> {
    let number = unsigned(key, raw)?;
    match u16::try_from(number) {
        Ok(id) => Some(id),
        Err(_) => {
            log::debug!("ignoring out of range {key}: {number}");
            None
        }
    }
}

fn title(raw: &RawValue, options: &Options) -> Option<String> {
    let decoded = unescape_backslashes(&decode_with(raw_string(raw)?.as_bytes(), options));
    if decoded.is_empty() || decoded == b"null" {
        return None;
    }
    Some(String::from_utf8_lossy(&decoded).into_owned())
}

fn parse_content(page: &mut Page, raw: &RawValue, options: &Options) -> Result<()> {
    let items: Vec<&RawValue> = serde_json::from_str(raw.get())
        .map_err(|_| ParseError::html("content is not an array"))?;

    let markup = items
        .first()
        .and_then(|item| raw_string(item))
        .ok_or_else(|| ParseError::html("content holds no markup string"))?;

    tokenize_markup_with(page, markup.as_bytes(), options)
}
