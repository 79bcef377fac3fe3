//! うたまっぷ (utamap.com). Split shape: the lyrics come from a Shift_JIS
//! script resource that draws each line with a `fillText` call, and that
//! resource refuses requests without the song page as `Referer`.

use scraper::Html;

use super::{normalized_text, select_first, selector};
use crate::error::{FetchError, Result};
use crate::http::PageRequest;
use crate::model::{Header, Lyrics};
use crate::pipeline::SplitSite;
use crate::text::{self, static_regex};

pub(crate) const TOKEN: &str = "utamap.com";
pub(crate) const FULL_URL: &str = r"^.*?utamap\.com/show(?:kasi|top)\.php\?surl=([-\w]+)$";

const HOSTNAME: &str = "http://www.utamap.com";

pub(crate) fn canonical_url(captures: &[String]) -> String {
    format!("{}/showkasi.php?surl={}", HOSTNAME, captures[0])
}

pub(crate) static SITE: SplitSite = SplitSite {
    page_request: |url| PageRequest::get(url),
    lyrics_request: |code, page_url| {
        PageRequest::get(format!("{}/js_smt.php?unum={}", HOSTNAME, code))
            .charset("Shift_JIS")
            .referer(page_url)
    },
    parse_header,
    parse_lyrics,
};

fn parse_header(page: &str) -> Result<Header> {
    let doc = Html::parse_document(page);

    let title = select_first(&doc, "td.kasi1", "title")?;
    let mut header = Header::new(text::trim(&normalized_text(title)));

    // Fixed cell layout: lyricist, composer and artist at rows 1, 3 and 5.
    let cells: Vec<String> = doc
        .select(&selector("td.pad5x10x0x10"))
        .map(normalized_text)
        .collect();
    if cells.len() >= 6 {
        header = header
            .with_lyricist(text::split_names(&cells[1], '/'))
            .with_composer(text::split_names(&cells[3], '/'))
            .with_artist(text::split_names(&cells[5], '/'));
    }

    Ok(header)
}

fn parse_lyrics(payload: &str) -> Result<Lyrics> {
    let re = static_regex!(r"\.fillText\('(.*?)',");

    let lines: Vec<&str> = re
        .captures_iter(payload)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str()))
        .collect();
    if lines.is_empty() {
        return Err(FetchError::anchor("fillText lyric calls"));
    }
    Ok(Lyrics::from_lines(lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_canonical_url() {
        assert_eq!(
            canonical_url(&["-abc_123".to_string()]),
            "http://www.utamap.com/showkasi.php?surl=-abc_123"
        );
    }

    #[test]
    fn lyrics_request_spoofs_referer_and_charset() {
        let req = (SITE.lyrics_request)("k-050607-069", "http://www.utamap.com/showkasi.php?surl=k-050607-069");
        assert_eq!(
            req.url(),
            "http://www.utamap.com/js_smt.php?unum=k-050607-069"
        );
        assert!(!req.is_post());
    }

    #[test]
    fn parses_header_cells() {
        let page = r#"<html><body><table>
            <tr><td class="kasi1">タイトル曲</td></tr>
            <tr><td class="pad5x10x0x10">作詞</td><td class="pad5x10x0x10">人A/人B</td></tr>
            <tr><td class="pad5x10x0x10">作曲</td><td class="pad5x10x0x10">人C</td></tr>
            <tr><td class="pad5x10x0x10">歌</td><td class="pad5x10x0x10">人D</td></tr>
        </table></body></html>"#;

        let header = parse_header(page).unwrap();
        assert_eq!(header.title(), "タイトル曲");
        assert_eq!(header.lyricist().unwrap().len(), 2);
        assert!(header.artist().unwrap().contains("人D"));
    }

    #[test]
    fn short_cell_layout_leaves_people_absent() {
        let page = r#"<table><tr><td class="kasi1">タイトルのみ</td></tr></table>"#;
        let header = parse_header(page).unwrap();
        assert!(header.artist().is_none());
        assert!(header.lyricist().is_none());
    }

    #[test]
    fn parses_fill_text_lyrics() {
        let js = "ctx.fillText('最初の行', 10, 10);\nctx.fillText('', 10, 20);\nctx.fillText('次の行', 10, 30);";
        let lyrics = parse_lyrics(js).unwrap();
        assert_eq!(lyrics.line_count(), 3);
        assert_eq!(lyrics.line(0), Some("最初の行"));
        assert_eq!(lyrics.line(1), Some(""));
    }

    #[test]
    fn payload_without_calls_fails() {
        assert!(parse_lyrics("document.write('nothing here');").is_err());
    }
}
