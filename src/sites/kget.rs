//! 歌詞GET (kget.jp). United shape with a clean microdata-style markup.

use scraper::Html;

use super::{normalized_text, select_first, selector};
use crate::error::Result;
use crate::http::PageRequest;
use crate::model::{Header, Lyrics};
use crate::pipeline::UnitedSite;
use crate::text;

pub(crate) const TOKEN: &str = "kget.jp";
pub(crate) const FULL_URL: &str = r"^.*?kget\.jp/lyric/(\d+)/?.*$";

const HOSTNAME: &str = "http://www.kget.jp";

pub(crate) fn canonical_url(captures: &[String]) -> String {
    format!("{}/lyric/{}/", HOSTNAME, captures[0])
}

pub(crate) static SITE: UnitedSite = UnitedSite {
    request: |_captures, url| PageRequest::get(url),
    parse_header,
    parse_lyrics,
    parse_ruby: None,
};

fn parse_header(body: &str) -> Result<Header> {
    let doc = Html::parse_document(body);

    let title = select_first(&doc, r#"h1[itemprop="name"]"#, "title")?;
    let mut header = Header::new(text::trim(&normalized_text(title)));

    let cells: Vec<String> = doc
        .select(&selector("table.lyric-data td"))
        .map(normalized_text)
        .collect();
    if let Some(artist) = cells.first() {
        header = header.with_artist(text::split_names(artist, ','));
    }
    if let Some(lyricist) = cells.get(1) {
        header = header.with_lyricist(text::split_names(lyricist, ','));
    }
    if let Some(composer) = cells.get(2) {
        header = header.with_composer(text::split_names(composer, ','));
    }

    Ok(header)
}

fn parse_lyrics(body: &str) -> Result<Lyrics> {
    let doc = Html::parse_document(body);
    let trunk = select_first(&doc, "#lyric-trunk", "lyrics trunk")?;

    let lines = text::split_br(&trunk.inner_html())
        .into_iter()
        .map(text::fragment_text)
        .collect::<Vec<_>>();
    Ok(Lyrics::from_lines(lines))
}
