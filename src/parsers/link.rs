use crate::config::DEFAULT_BASE_URL;
use crate::models::Link;
use std::sync::LazyLock;
use url::Url;

/// Query parameter the portal uses to wrap outbound links in its redirect page.
pub const REDIRECT_PARAM: &str = "destination_uri";

// Site-relative hrefs need a base before their query can be read.
static PARSE_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_BASE_URL).expect("invalid base url"));

/// Builds a [`Link`] from an anchor's `href` and its visible text.
///
/// When the href carries a non-empty `destination_uri` parameter, the link points at
/// the decoded destination instead of the redirect page. Anything else, including
/// hrefs that are not URLs at all, is kept verbatim. The title is not normalized.
pub fn resolve(href: &str, title: impl Into<String>) -> Link {
    let url = redirect_destination(href).unwrap_or_else(|| href.to_string());
    Link::new(url, title)
}

fn redirect_destination(href: &str) -> Option<String> {
    let parsed = Url::options().base_url(Some(&PARSE_BASE)).parse(href).ok()?;

    // Blank values count as absent, the first remaining occurrence wins.
    let (_, value) = parsed
        .query_pairs()
        .find(|(key, value)| key == REDIRECT_PARAM && !value.is_empty())?;

    Some(unescape_backslashes(&value))
}

/// Decodes backslash escapes (`\uXXXX`, `\UXXXXXXXX`, `\xXX`, `\n`, `\\`, ...) left in a
/// query value. Sequences that do not decode to a valid character are kept literally.
pub fn unescape_backslashes(input: &str) -> String {
    if !input.contains('\\') {
        return input.to_string();
    }

    let chars: Vec<char> = input.chars().collect();
    let mut output = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '\\' || i + 1 == chars.len() {
            output.push(chars[i]);
            i += 1;
            continue;
        }

        let simple = match chars[i + 1] {
            '\\' => Some('\\'),
            '\'' => Some('\''),
            '"' => Some('"'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'a' => Some('\u{07}'),
            'b' => Some('\u{08}'),
            'f' => Some('\u{0C}'),
            'v' => Some('\u{0B}'),
            _ => None,
        };
        if let Some(c) = simple {
            output.push(c);
            i += 2;
            continue;
        }

        let width = match chars[i + 1] {
            'x' => 2,
            'u' => 4,
            'U' => 8,
            _ => 0,
        };

        match hex_escape(&chars, i + 2, width) {
            Some(code) if (0xD800..0xDC00).contains(&code) && chars[i + 1] == 'u' => {
                // High surrogate: only valid together with a following `\uDC00`-`\uDFFF`.
                let low = (chars.get(i + 6) == Some(&'\\') && chars.get(i + 7) == Some(&'u'))
                    .then(|| hex_escape(&chars, i + 8, 4))
                    .flatten()
                    .filter(|low| (0xDC00..0xE000).contains(low));

                match low.and_then(|low| {
                    char::from_u32(0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00))
                }) {
                    Some(c) => {
                        output.push(c);
                        i += 12;
                    }
                    None => {
                        output.push('\\');
                        i += 1;
                    }
                }
            }
            Some(code) => match char::from_u32(code) {
                Some(c) => {
                    output.push(c);
                    i += 2 + width;
                }
                None => {
                    output.push('\\');
                    i += 1;
                }
            },
            None => {
                output.push('\\');
                i += 1;
            }
        }
    }

    output
}

fn hex_escape(chars: &[char], start: usize, width: usize) -> Option<u32> {
    if width == 0 || start + width > chars.len() {
        return None;
    }

    chars[start..start + width]
        .iter()
        .try_fold(0u32, |acc, c| c.to_digit(16).map(|d| acc * 16 + d))
}
