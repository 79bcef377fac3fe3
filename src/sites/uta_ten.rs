//! UtaTen (utaten.com). United shape, and the only site serving phonetic
//! annotations: the lyrics block wraps kanji in `<span class="ruby">` pairs,
//! which the plain view drops and the ruby view renders as `漢字(かんじ)`.

use scraper::Html;

use super::{normalized_text, select_first, selector};
use crate::error::Result;
use crate::http::PageRequest;
use crate::model::{Header, Lyrics};
use crate::pipeline::UnitedSite;
use crate::text::{self, static_regex};

pub(crate) const TOKEN: &str = "utaten.com";
pub(crate) const FULL_URL: &str = r"^.*?utaten\.com/lyric/([^/]+)/([^/]+)/?$";

const HOSTNAME: &str = "http://utaten.com";

pub(crate) fn canonical_url(captures: &[String]) -> String {
    format!("{}/lyric/{}/{}/", HOSTNAME, captures[0], captures[1])
}

pub(crate) static SITE: UnitedSite = UnitedSite {
    request: |_captures, url| PageRequest::get(url),
    parse_header,
    parse_lyrics: |body| lyrics_view(body, false),
    parse_ruby: Some(|body| lyrics_view(body, true)),
};

fn parse_header(body: &str) -> Result<Header> {
    let doc = Html::parse_document(body);

    let heading = select_first(&doc, "div.contentBox__title--lyricTitle h1", "title")?;
    let re = static_regex!(r"(?s)^.*?「(.*?)」.*$");
    let raw = heading.inner_html();
    let title = match re.captures(&raw) {
        Some(caps) => text::fragment_text(&caps[1]),
        None => normalized_text(heading),
    };
    let mut header = Header::new(text::trim(&title));

    if let Ok(artist) = select_first(&doc, "span.contentBox__titleSub", "artist") {
        header = header.with_artist(text::split_names(&normalized_text(artist), ','));
    }

    let works: Vec<String> = doc
        .select(&selector("dd.lyricWork__body"))
        .map(normalized_text)
        .collect();
    if let Some(lyricist) = works.first() {
        header = header.with_lyricist(text::split_names(lyricist, ','));
    }
    if let Some(composer) = works.get(1) {
        header = header.with_composer(text::split_names(composer, ','));
    }

    Ok(header)
}

fn lyrics_view(body: &str, with_ruby: bool) -> Result<Lyrics> {
    let doc = Html::parse_document(body);
    let block = select_first(&doc, "div.lyricBody div.medium", "lyrics body")?;

    // Line structure comes from <br> alone; literal newlines are markup
    // indentation.
    let html: String = block.inner_html().chars().filter(|&c| c != '\n').collect();

    let ruby = static_regex!(
        r#"<span class="ruby"><span class="rb">(.*?)</span><span class="rt">(.*?)</span></span>"#
    );
    let flattened = ruby.replace_all(&html, if with_ruby { "$1($2)" } else { "$1" });

    let lines = text::split_br(&flattened)
        .into_iter()
        .map(text::fragment_text)
        .collect::<Vec<_>>();
    Ok(Lyrics::from_lines(lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <div class="contentBox__title--lyricTitle"><h1>DAOKO×米津玄師「打上花火」歌詞</h1></div>
        <span class="contentBox__titleSub">DAOKO,米津玄師</span>
        <dl><dd class="lyricWork__body">米津玄師</dd><dd class="lyricWork__body">米津玄師</dd></dl>
        <div class="lyricBody"><div class="medium">
            あの<span class="ruby"><span class="rb">日</span><span class="rt">ひ</span></span>見た<br>そらの色<br><br>おわり
        </div></div>
    </body></html>"#;

    #[test]
    fn resolves_canonical_url() {
        assert_eq!(
            canonical_url(&["DAOKO".to_string(), "utau".to_string()]),
            "http://utaten.com/lyric/DAOKO/utau/"
        );
    }

    #[test]
    fn parses_header_from_bracketed_title() {
        let header = parse_header(PAGE).unwrap();
        assert_eq!(header.title(), "打上花火");
        assert_eq!(header.artist().unwrap().len(), 2);
        assert!(header.composer().unwrap().contains("米津玄師"));
    }

    #[test]
    fn plain_view_drops_readings() {
        let lyrics = lyrics_view(PAGE, false).unwrap();
        assert_eq!(lyrics.line(0), Some("あの日見た"));
        assert_eq!(lyrics.line(2), Some(""));
        assert_eq!(lyrics.line_count(), 4);
    }

    #[test]
    fn ruby_view_keeps_readings_in_parentheses() {
        let lyrics = lyrics_view(PAGE, true).unwrap();
        assert_eq!(lyrics.line(0), Some("あの日(ひ)見た"));
    }

    #[test]
    fn missing_block_fails() {
        assert!(lyrics_view("<html></html>", false).is_err());
    }
}
