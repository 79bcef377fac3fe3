//! アニメソングの歌詞が無料で見れるページ (jtw.zaq.ne.jp/animesong).
//! United shape, hand-written static pages: everything sits in one `<pre>`
//! block whose first lines are the credits.

use scraper::Html;

use super::select_first;
use crate::error::{FetchError, Result};
use crate::http::PageRequest;
use crate::model::{Header, Lyrics};
use crate::pipeline::UnitedSite;
use crate::text::{self, static_regex};

pub(crate) const TOKEN: &str = "jtw.zaq.ne.jp/animesong";
pub(crate) const FULL_URL: &str = r"^.*?jtw\.zaq\.ne\.jp/animesong/(\w{1,2})/(\w+)/(\w+)\.html$";

pub(crate) fn canonical_url(captures: &[String]) -> String {
    format!(
        "http://www.jtw.zaq.ne.jp/animesong/{}/{}/{}.html",
        captures[0], captures[1], captures[2]
    )
}

pub(crate) static SITE: UnitedSite = UnitedSite {
    request: |_captures, url| PageRequest::get(url),
    parse_header,
    parse_lyrics,
    parse_ruby: None,
};

// Credits line: 作詞：…／作曲：…／編曲：…／歌：…, full-width slashes,
// lyrics following on the next lines of the same block.
fn pre_regex() -> &'static regex::Regex {
    static_regex!(
        "(?s)^(?P<title>.*?)\n\\s+作詞：(?P<lyricist>.*?)／\\s*作曲：(?P<composer>.*?)／\\s*編曲：(?P<arranger>.*?)／\\s*歌：(?P<artist>.*?)\n\\s+(?P<lyrics>.*)$"
    )
}

fn pre_text(body: &str) -> Result<String> {
    let doc = Html::parse_document(body);
    let pre = select_first(&doc, "td.b pre", "lyrics pre")?;
    Ok(pre.text().collect())
}

fn parse_header(body: &str) -> Result<Header> {
    let raw = pre_text(body)?;
    let caps = pre_regex()
        .captures(&raw)
        .ok_or(FetchError::Extraction { anchor: "credits line" })?;

    Ok(Header::new(text::trim(&caps["title"]))
        .with_artist(text::split_names(&caps["artist"], '、'))
        .with_lyricist(text::split_names(&caps["lyricist"], '、'))
        .with_composer(text::split_names(&caps["composer"], '、'))
        .with_arranger(text::split_names(&caps["arranger"], '、')))
}

fn parse_lyrics(body: &str) -> Result<Lyrics> {
    let raw = pre_text(body)?;
    let caps = pre_regex()
        .captures(&raw)
        .ok_or(FetchError::Extraction { anchor: "credits line" })?;

    Ok(Lyrics::from_lines(caps["lyrics"].split('\n')))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<html><body><table><tr><td class=\"b\"><pre>\
残酷な天使のテーゼ\n\
　　作詞：及川眠子／作曲：佐藤英敏／編曲：大森俊之／歌：高橋洋子\n\
　　一行目\n二行目\n\n四行目</pre></td></tr></table></body></html>";

    #[test]
    fn resolves_canonical_url() {
        assert_eq!(
            canonical_url(&["e".to_string(), "eva".to_string(), "zankoku".to_string()]),
            "http://www.jtw.zaq.ne.jp/animesong/e/eva/zankoku.html"
        );
    }

    #[test]
    fn parses_header_with_arranger() {
        let header = parse_header(PAGE).unwrap();
        assert_eq!(header.title(), "残酷な天使のテーゼ");
        assert!(header.artist().unwrap().contains("高橋洋子"));
        assert!(header.arranger().unwrap().contains("大森俊之"));
    }

    #[test]
    fn parses_lyrics_after_credits() {
        let lyrics = parse_lyrics(PAGE).unwrap();
        assert_eq!(lyrics.line_count(), 4);
        assert_eq!(lyrics.line(0), Some("一行目"));
        assert_eq!(lyrics.line(2), Some(""));
    }

    #[test]
    fn page_without_credits_fails() {
        let page = "<table><tr><td class=\"b\"><pre>ただの文章</pre></td></tr></table>";
        assert!(matches!(
            parse_header(page).unwrap_err(),
            FetchError::Extraction { .. }
        ));
    }
}
