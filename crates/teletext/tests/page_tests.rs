//! Tests for parsing whole payloads into pages.

use teletext::{
    Color, ErrorKind, LastError, Options, Page, PageCollection, PageParser, ParseError, TokenKind,
    get_page, get_page_collection,
};

const PAGE_200: &[u8] = include_bytes!("data/page_200.json");
const RANGE_100_104: &[u8] = include_bytes!("data/range_100_104.json");

fn range() -> PageCollection {
    get_page_collection(RANGE_100_104).unwrap()
}

// ============================================================================
// Single Page
// ============================================================================

#[test]
fn single_page_metadata() {
    let page = get_page(PAGE_200).unwrap();
    assert_eq!(page.id, Some(200));
    assert_eq!(page.prev_id, Some(199));
    assert_eq!(page.next_id, Some(201));
    assert_eq!(page.unix_date, Some(1612004371));
    assert_eq!(page.title.as_deref(), Some("Ekonomi ? Borsen"));
}

#[test]
fn single_page_tokens() {
    let page = get_page(PAGE_200).unwrap();
    insta::assert_snapshot!(page.to_string(), @r#"
    * id: 200
    * prev_id: 199
    * next_id: 201
    * unix_date: 1612004371
    * title: Ekonomi ? Borsen
    * tokens: 6
      header [white on black] " 200 SVT Text        tisdag 30 jan 2021"
      text [white on black] "\n"
      text [yellow on black bold] " Ekonomi  "
      text [white on black] "\n"
      text [white on black] " Borsen steg "
      link [white on black] -> 201 "201"
    "#);
}

#[test]
fn token_lengths_are_decoded_byte_lengths() {
    let page = get_page(PAGE_200).unwrap();
    for token in page.tokens() {
        assert_eq!(token.len(), token.text().len());
    }
    assert_eq!(page.tokens().as_slice()[4].len(), " Borsen steg ".len());
}

#[test]
fn single_page_links() {
    let page = get_page(PAGE_200).unwrap();
    assert_eq!(page.links().count(), 1);
    assert_eq!(page.link(0), Some(201));
    assert_eq!(page.link(1), None);
}

// ============================================================================
// Page Ranges
// ============================================================================

#[test]
fn range_drops_page_with_broken_content() {
    let pages = range();
    let ids: Vec<_> = pages.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![Some(100), Some(101), Some(103), Some(104)]);
    assert!(pages.find(102).is_none());
}

#[test]
fn range_first_page() {
    let pages = range();
    insta::assert_snapshot!(pages.pages()[0].to_string(), @r#"
    * id: 100
    * prev_id: unset
    * next_id: 101
    * unix_date: 1612004000
    * title: SVT Text
    * tokens: 6
      header [white on black] " 100 SVT Text"
      text [white on black] "\n"
      text [yellow on blue] "Nyheter "
      link [yellow on blue] -> 101 "101"
      text [yellow on blue] " Utrikes "
      link [yellow on blue] -> 104 "104"
    "#);
}

#[test]
fn range_heading_and_separators() {
    let pages = range();
    let page = pages.find(104).unwrap();
    insta::assert_snapshot!(page.to_string(), @r#"
    * id: 104
    * prev_id: 103
    * next_id: 105
    * unix_date: 1612004400
    * title: Utrikes
    * tokens: 4
      text [white on red bold] " Utrikes "
      text [white on black] "\n"
      text [white on black] "\n"
      text [white on black] "Text"
    "#);
}

#[test]
fn range_entities_and_nested_span() {
    let pages = range();

    let inrikes = pages.find(101).unwrap();
    assert_eq!(inrikes.plain_text(), "Regeringen & riksdagen");
    assert_eq!(inrikes.tokens().as_slice()[0].style.fg, Some(Color::Cyan));

    let page = pages.find(103).unwrap();
    assert_eq!(page.title, None);
    assert_eq!(page.tokens().len(), 1);
    assert_eq!(page.plain_text(), "Ett tva");
    assert_eq!(page.tokens().as_slice()[0].style.fg, Some(Color::Green));
}

#[test]
fn range_link_navigation() {
    let pages = range();
    let home = pages.find(100).unwrap();
    let targets: Vec<_> = home.links().filter_map(|t| t.href).collect();
    assert_eq!(targets, vec![101, 104]);
    assert_eq!(pages.position(104), Some(3));
}

#[test]
fn header_tokens_only_on_toprow() {
    let pages = range();
    let headers: Vec<_> = pages
        .iter()
        .flat_map(|p| p.tokens().iter())
        .filter(|t| t.kind == TokenKind::Header)
        .map(|t| t.text().to_string())
        .collect();
    assert_eq!(headers, vec![" 100 SVT Text"]);
}

#[test]
fn collection_display_numbers_pages() {
    let rendered = range().to_string();
    assert!(rendered.starts_with("PAGE 0\n* id: 100\n"));
    assert!(rendered.contains("PAGE 3\n* id: 104\n"));
    assert!(!rendered.contains("PAGE 4"));
}

// ============================================================================
// Envelope Errors
// ============================================================================

#[test]
fn strings_after_objects_are_skipped() {
    let pages = get_page_collection(br#"[{}, {}, {}, "xxx", "yyy", "zzz"]"#).unwrap();
    assert_eq!(pages.len(), 3);
}

#[test]
fn objects_with_only_invalid_fields_are_kept() {
    let data = br#"[
        {"num": "abc", "prev_page": null, "next_page": 0, "date_updated_unix": -5, "title": null},
        {"num": 70000, "prev_page": 1.5, "next_page": "", "date_updated_unix": {}, "title": "null"}
    ]"#;
    let pages = get_page_collection(data).unwrap();
    assert_eq!(pages.len(), 2);
    assert!(pages.iter().all(Page::is_empty));
}

#[test]
fn title_with_non_unicode_escapes_is_kept_verbatim() {
    let data = br#"[{"title": "abc-\x00e4\x00e5\x00c4\x00c5\x00f6\x00d6-def"}]"#;
    let pages = get_page_collection(data).unwrap();
    assert_eq!(pages.len(), 1);

    let page = &pages.pages()[0];
    assert_eq!(page.id, None);
    assert_eq!(
        page.title.as_deref(),
        Some(r"abc-\x00e4\x00e5\x00c4\x00c5\x00f6\x00d6-def")
    );
    assert!(page.tokens().is_empty());
}

#[test]
fn stray_escape_in_content_does_not_fail_the_payload() {
    let data = br#"[{"num": 100, "content": ["<span class=\"W\">a\qb</span>"]}]"#;
    let page = get_page(data).unwrap();
    assert_eq!(page.plain_text(), r"a\qb");
}

#[test]
fn all_failing_objects_fail_the_payload() {
    let err = get_page_collection(br#"[{"content": ["<span>open"]}]"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PageParserFailed);
}

#[test]
fn non_array_payloads_fail() {
    let payloads: [&[u8]; 6] = [b"", b"{}", b"[]", b"\"xxx\"", b"[\"xxx\"]", b"[{"];
    for data in payloads {
        let err = get_page_collection(data).unwrap_err();
        assert!(matches!(err, ParseError::PageParserFailed(_)), "{data:?}");
    }
}

#[test]
fn errors_feed_last_error() {
    let mut last_error = LastError::new();
    if let Err(err) = get_page_collection(b"[]") {
        last_error.record(&err);
    }
    assert!(last_error.is_set());
    assert_eq!(last_error.get(), Some(ErrorKind::PageParserFailed));
    assert!(last_error.get_string().unwrap().starts_with("ERROR: could not parse response"));

    last_error.reset();
    assert!(!last_error.is_set());
}

// ============================================================================
// Determinism And Options
// ============================================================================

#[test]
fn parsing_twice_gives_equal_trees() {
    assert_eq!(range(), range());
    assert_eq!(get_page(PAGE_200).unwrap(), get_page(PAGE_200).unwrap());
}

#[test]
fn placeholder_option_applies_to_titles() {
    let parser = PageParser::new(Options::new().with_placeholder('-'));
    let page = parser.parse_page(PAGE_200).unwrap();
    assert_eq!(page.title.as_deref(), Some("Ekonomi - Borsen"));
}
