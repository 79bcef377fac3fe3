//! 歌詞タイム (kasi-time.com). Split shape: the lyrics resource is a script
//! that emits the text through one `document.write('…');` call. This is also
//! one of the few sites exposing an arranger row.

use scraper::Html;

use super::{normalized_text, select_first, selector};
use crate::error::{FetchError, Result};
use crate::http::PageRequest;
use crate::model::{Header, Lyrics};
use crate::pipeline::SplitSite;
use crate::text::{self, NameSet};

pub(crate) const TOKEN: &str = "kasi-time.com";
pub(crate) const FULL_URL: &str = r"^.*?kasi-time\.com/item-(\d+)\.html$";

const HOSTNAME: &str = "http://www.kasi-time.com";

pub(crate) fn canonical_url(captures: &[String]) -> String {
    format!("{}/item-{}.html", HOSTNAME, captures[0])
}

pub(crate) static SITE: SplitSite = SplitSite {
    page_request: |url| PageRequest::get(url),
    lyrics_request: |code, _page_url| {
        PageRequest::get(format!("{}/item_js.php?no={}", HOSTNAME, code))
    },
    parse_header,
    parse_lyrics,
};

fn parse_header(page: &str) -> Result<Header> {
    let doc = Html::parse_document(page);

    let title = select_first(&doc, "div.person_list_and_other_contents > h1", "title")?;
    let mut header = Header::new(text::trim(&normalized_text(title)));

    // One cell per row: artist, lyricist, composer and sometimes arranger.
    // Names are linked, so each cell becomes the set of its anchor texts.
    let link = selector("a");
    let rows: Vec<NameSet> = doc
        .select(&selector("div.person_list th + td"))
        .map(|cell| {
            cell.select(&link)
                .map(|a| text::trim(&normalized_text(a)).to_string())
                .filter(|name| !name.is_empty())
                .collect()
        })
        .collect();

    let mut rows = rows.into_iter();
    if let Some(artists) = rows.next() {
        header = header.with_artist(artists);
    }
    if let Some(lyricists) = rows.next() {
        header = header.with_lyricist(lyricists);
    }
    if let Some(composers) = rows.next() {
        header = header.with_composer(composers);
    }
    if let Some(arrangers) = rows.next() {
        header = header.with_arranger(arrangers);
    }

    Ok(header)
}

fn parse_lyrics(payload: &str) -> Result<Lyrics> {
    let begin = payload
        .find("write('")
        .ok_or(FetchError::Extraction { anchor: "document.write payload" })?
        + "write('".len();
    let end = payload
        .rfind("');")
        .filter(|&end| end >= begin)
        .ok_or(FetchError::Extraction { anchor: "document.write payload" })?;

    let lines = text::split_br(&payload[begin..end]);
    Ok(Lyrics::from_lines(lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_canonical_url() {
        assert_eq!(
            canonical_url(&["73631".to_string()]),
            "http://www.kasi-time.com/item-73631.html"
        );
    }

    #[test]
    fn parses_header_with_arranger() {
        let page = r#"<html><body><div class="person_list_and_other_contents">
            <h1>残酷な天使のテーゼ</h1>
            <div class="person_list"><table>
                <tr><th>歌手</th><td><a>高橋洋子</a></td></tr>
                <tr><th>作詞</th><td><a>及川眠子</a></td></tr>
                <tr><th>作曲</th><td><a>佐藤英敏</a></td></tr>
                <tr><th>編曲</th><td><a>大森俊之</a> <a>他</a></td></tr>
            </table></div>
        </div></body></html>"#;

        let header = parse_header(page).unwrap();
        assert_eq!(header.title(), "残酷な天使のテーゼ");
        assert!(header.artist().unwrap().contains("高橋洋子"));
        assert_eq!(header.arranger().unwrap().len(), 2);
    }

    #[test]
    fn arranger_row_is_optional() {
        let page = r#"<div class="person_list_and_other_contents">
            <h1>曲名</h1>
            <div class="person_list"><table>
                <tr><th>歌手</th><td><a>A</a></td></tr>
                <tr><th>作詞</th><td><a>B</a></td></tr>
                <tr><th>作曲</th><td><a>C</a></td></tr>
            </table></div></div>"#;

        let header = parse_header(page).unwrap();
        assert!(header.composer().is_some());
        assert!(header.arranger().is_none());
    }

    #[test]
    fn parses_write_payload() {
        let js = "document.write('一行目<br>二行目<br><br>四行目');";
        let lyrics = parse_lyrics(js).unwrap();
        assert_eq!(lyrics.line_count(), 4);
        assert_eq!(lyrics.line(2), Some(""));
    }

    #[test]
    fn payload_without_write_fails() {
        assert!(matches!(
            parse_lyrics("var x = 1;").unwrap_err(),
            FetchError::Extraction { .. }
        ));
    }

    #[test]
    fn truncated_payload_with_markers_out_of_order_fails() {
        // The closing marker only appears before the opening one.
        let err = parse_lyrics("foo');bar document.write('truncated").unwrap_err();
        assert!(matches!(err, FetchError::Extraction { .. }));
    }
}
