//! Text normalization shared by every site adapter.
//!
//! Raw strings pulled out of lyric pages carry three different kinds of
//! boundary whitespace: plain ASCII, the full-width space (U+3000) common in
//! East Asian markup, and the U+00A0 that `&nbsp;` entities decode to. All of
//! them count as trimmable here.

use std::collections::BTreeSet;

/// Distinct, trimmed names for one header field.
pub type NameSet = BTreeSet<String>;

/// Compiles a hard-coded pattern once, on first use.
macro_rules! static_regex {
    ($re:literal) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).expect("hard-coded regex is valid"))
    }};
}
pub(crate) use static_regex;

fn is_boundary_space(c: char) -> bool {
    // char::is_whitespace covers ASCII space, U+3000 and U+00A0 alike
    c.is_whitespace()
}

/// Strips boundary whitespace (ASCII, full-width, no-break) from both ends.
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_boundary_space)
}

/// [`trim`], plus collapsing of embedded full-width space runs.
///
/// Some sites pad names with U+3000 for typographic alignment
/// ("作詞　：　..."); those runs become a single ASCII space.
pub fn full_trim(s: &str) -> String {
    let trimmed = trim(s);

    let mut out = String::with_capacity(trimmed.len());
    let mut in_run = false;
    for c in trimmed.chars() {
        if c == '\u{3000}' {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Splits a raw multi-value field on `delimiter` into a set of trimmed,
/// non-empty names. Duplicates collapse; order is not significant.
pub fn split_names(raw: &str, delimiter: char) -> NameSet {
    split_names_with(raw, delimiter, |s| trim(s).to_string())
}

/// [`split_names`] with a custom per-piece normalizer.
pub fn split_names_with<F>(raw: &str, delimiter: char, normalize: F) -> NameSet
where
    F: Fn(&str) -> String,
{
    raw.split(delimiter)
        .map(|piece| normalize(piece))
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Splits on any of several delimiter characters.
pub fn split_names_any(raw: &str, delimiters: &[char]) -> NameSet {
    raw.split(delimiters)
        .map(|piece| trim(piece).to_string())
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Splits an HTML fragment on line-break tags (`<br>`, `<br/>`, `<br />`).
pub fn split_br(html: &str) -> Vec<&str> {
    static_regex!(r"(?i)<br ?/?>").split(html).collect()
}

/// Renders an HTML fragment as plain text: tags dropped, entities decoded.
pub fn fragment_text(html: &str) -> String {
    let fragment = scraper::Html::parse_fragment(html);
    fragment.root_element().text().collect::<String>()
}
