//! Plain-text rendering for saved songs: the output document and the
//! template-driven filename.

use crate::model::{FetchResult, Header, HeaderValue};

/// Default filename template, e.g. `米津玄師 - Lemon.txt`.
pub const DEFAULT_FILENAME_TEMPLATE: &str = "%ar% - %ti%";

/// Characters not allowed in filenames on common filesystems.
const FORBIDDEN: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

fn field<'a>(header: &'a Header, tag: &str) -> Option<HeaderValue<'a>> {
    match tag {
        "%ti%" => Some(HeaderValue::Text(header.title())),
        "%ar%" => header.artist().map(HeaderValue::Names),
        "%lr%" => header.lyricist().map(HeaderValue::Names),
        "%co%" => header.composer().map(HeaderValue::Names),
        "%ag%" => header.arranger().map(HeaderValue::Names),
        _ => None,
    }
}

/// Expands the template tags (`%ti%`, `%ar%`, `%lr%`, `%co%`, `%ag%`)
/// against the header. Absent fields render as `[unknown]` and forbidden
/// filename characters are stripped from the result.
pub fn filename(header: &Header, template: &str) -> String {
    let mut out = template.to_string();
    for tag in ["%ti%", "%ar%", "%lr%", "%co%", "%ag%"] {
        if !out.contains(tag) {
            continue;
        }
        let value = match field(header, tag) {
            Some(value) => value.join(","),
            None => "[unknown]".to_string(),
        };
        out = out.replace(tag, &value);
    }
    out.chars().filter(|c| !FORBIDDEN.contains(c)).collect()
}

/// Renders one fetched song as the saved text document: header fields in
/// their fixed order, a blank separator line, then the lyrics.
pub fn document(result: &FetchResult) -> String {
    let mut out = String::new();
    for item in result.header.iter() {
        out.push_str(item.name);
        out.push_str(": ");
        out.push_str(&item.value.join(", "));
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&result.lyrics.to_string());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Lyrics;
    use crate::text::NameSet;

    fn names(v: &[&str]) -> NameSet {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> FetchResult {
        FetchResult {
            header: Header::new("君への嘘")
                .with_artist(names(&["VALSHE"]))
                .with_lyricist(names(&["doriko"]))
                .with_composer(names(&["doriko"])),
            lyrics: Lyrics::from_lines(["一行目", "", "三行目"]),
            source_url: "http://www.uta-net.com/song/162989/".to_string(),
        }
    }

    #[test]
    fn default_template_renders_artist_and_title() {
        let name = filename(&sample().header, DEFAULT_FILENAME_TEMPLATE);
        assert_eq!(name, "VALSHE - 君への嘘");
    }

    #[test]
    fn absent_field_renders_unknown() {
        let header = Header::new("曲");
        assert_eq!(filename(&header, "%ar% - %ti%"), "[unknown] - 曲");
        assert_eq!(filename(&header, "%ag%"), "[unknown]");
    }

    #[test]
    fn forbidden_characters_are_stripped() {
        let header = Header::new("a/b:c?d").with_artist(names(&["x<y>"]));
        assert_eq!(filename(&header, "%ar% - %ti%"), "xy - abcd");
    }

    #[test]
    fn multiple_names_join_with_comma() {
        let header = Header::new("t").with_artist(names(&["A", "B"]));
        assert_eq!(filename(&header, "%ar%"), "A,B");
    }

    #[test]
    fn document_has_header_then_blank_then_lyrics() {
        let text = document(&sample());
        assert_eq!(
            text,
            "Title: 君への嘘\nArtist: VALSHE\nLyricist: doriko\nComposer: doriko\n\n一行目\n\n三行目\n"
        );
    }
}
