// tests/text_link_test.rs

use eklase_core::Link;
use eklase_core::parsers::link::{resolve, unescape_backslashes};
use eklase_core::parsers::text::{normalize, normalize_optional};

#[test]
fn test_normalize_collapses_whitespace() {
    assert_eq!(normalize("  a \n b \t c  "), "a b c");
    assert_eq!(normalize(""), "");
    assert_eq!(normalize(" \n\t "), "");
    assert_eq!(normalize("Matemātika"), "Matemātika");

    assert_eq!(normalize_optional(None), None);
    assert_eq!(
        normalize_optional(Some("  9 \n")),
        Some("9".to_string())
    );
}

#[test]
fn test_resolve_unwraps_destination_uri() {
    let link = resolve(
        "/redirect?destination_uri=https%3A%2F%2Fexample.com%2Ffile.pdf",
        "Darba lapa",
    );
    assert_eq!(link.url, "https://example.com/file.pdf");
    assert_eq!(link.title, "Darba lapa");

    let absolute = resolve(
        "https://my.e-klase.lv/Attachment/Redirect?id=7&destination_uri=https%3A%2F%2Fexample.com%2Fa%3Fb%3Dc",
        "",
    );
    assert_eq!(absolute.url, "https://example.com/a?b=c");

    println!("✅ destination_uri is unwrapped");
}

#[test]
fn test_resolve_keeps_plain_href() {
    let href = "https://my.e-klase.lv/Attachment/Get/42?inline=1";
    assert_eq!(resolve(href, "Formulas"), Link::new(href, "Formulas"));

    let relative = "/Attachment/Get/42";
    assert_eq!(resolve(relative, "x").url, relative);
}

#[test]
fn test_resolve_first_non_blank_value_wins() {
    let link = resolve(
        "/r?destination_uri=&destination_uri=https%3A%2F%2Fa.lv%2F1&destination_uri=https%3A%2F%2Fa.lv%2F2",
        "",
    );
    assert_eq!(link.url, "https://a.lv/1");

    // Only a blank value means there is nothing to unwrap.
    let href = "/r?destination_uri=";
    assert_eq!(resolve(href, "").url, href);
}

#[test]
fn test_resolve_decodes_plus_and_backslash_escapes() {
    let spaced = resolve("/r?destination_uri=https%3A%2F%2Fa.lv%2Fmy+file.pdf", "");
    assert_eq!(spaced.url, "https://a.lv/my file.pdf");

    let escaped = resolve("/r?destination_uri=https%3A%2F%2Fa.lv%2Ff%5Cu0101ils.pdf", "");
    assert_eq!(escaped.url, "https://a.lv/fāils.pdf");
}

#[test]
fn test_resolve_malformed_href_is_kept() {
    for href in ["http://[broken", "http://exa mple.com/?destination_uri=x"] {
        assert_eq!(resolve(href, "t").url, href);
    }
}

#[test]
fn test_resolve_does_not_normalize_title() {
    let link = resolve("/a", "  Darba \n lapa ");
    assert_eq!(link.title, "  Darba \n lapa ");
}

#[test]
fn test_link_from_href_matches_resolve() {
    let href = "/redirect?destination_uri=https%3A%2F%2Fexample.com%2Ffile.pdf";
    assert_eq!(Link::from_href(href, "t"), resolve(href, "t"));
}

#[test]
fn test_unescape_backslashes() {
    assert_eq!(unescape_backslashes("plain"), "plain");
    assert_eq!(unescape_backslashes(r"a\nb\tc"), "a\nb\tc");
    assert_eq!(unescape_backslashes(r"\\server"), r"\server");
    assert_eq!(unescape_backslashes(r"\x41ā\U0001F600"), "Aā😀");
    assert_eq!(unescape_backslashes(r"😀"), "😀");

    // Sequences that do not decode stay as they are.
    assert_eq!(unescape_backslashes(r"\q"), r"\q");
    assert_eq!(unescape_backslashes(r"\u00"), r"\u00");
    assert_eq!(unescape_backslashes(r"\udc00"), r"\udc00");
    assert_eq!(unescape_backslashes(r"\ud83dx"), r"\ud83dx");
    assert_eq!(unescape_backslashes("end\\"), "end\\");
}
