use scraper::ElementRef;

/// Trims `text` and collapses every internal whitespace run to a single space.
///
/// `"  a \n b \t c  "` becomes `"a b c"`.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// [`normalize`] for optional fields; `None` stays `None`.
pub fn normalize_optional(text: Option<&str>) -> Option<String> {
    text.map(normalize)
}

/// All descendant text of an element, concatenated as is.
pub(crate) fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}
