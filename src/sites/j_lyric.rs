//! 歌詞検索 (j-lyric.net). United shape: one HTML page holds both the
//! metadata table and the `#lyricBody` block.

use scraper::Html;

use super::{normalized_text, select_first};
use crate::error::Result;
use crate::http::PageRequest;
use crate::model::{Header, Lyrics};
use crate::pipeline::UnitedSite;
use crate::text::{self, static_regex};

pub(crate) const TOKEN: &str = "j-lyric.net";
pub(crate) const FULL_URL: &str = r"^.*?j-lyric\.net/artist/(a\w+)/(l\w+)\.html$";

const HOSTNAME: &str = "http://j-lyric.net";

pub(crate) fn canonical_url(captures: &[String]) -> String {
    format!("{}/artist/{}/{}.html", HOSTNAME, captures[0], captures[1])
}

pub(crate) static SITE: UnitedSite = UnitedSite {
    request: |_captures, url| PageRequest::get(url),
    parse_header,
    parse_lyrics,
    parse_ruby: None,
};

fn parse_header(body: &str) -> Result<Header> {
    let doc = Html::parse_document(body);

    let title = select_first(&doc, "div.caption", "title")?;
    let mut header = Header::new(text::trim(&normalized_text(title)));

    if let Ok(table) = select_first(&doc, "div.body table", "info table") {
        let info = normalized_text(table);
        let re = static_regex!(r"^歌：(.*?)作詞：(.*?)作曲：(.*)$");
        if let Some(caps) = re.captures(&info) {
            header = header
                .with_artist(text::split_names(&caps[1], '/'))
                .with_lyricist(text::split_names(&caps[2], '/'))
                .with_composer(text::split_names(&caps[3], '/'));
        }
    }

    Ok(header)
}

fn parse_lyrics(body: &str) -> Result<Lyrics> {
    let doc = Html::parse_document(body);
    let lyric_body = select_first(&doc, "#lyricBody", "lyrics body")?;

    let lines = text::split_br(&lyric_body.inner_html())
        .into_iter()
        .map(text::fragment_text)
        .collect::<Vec<_>>();
    Ok(Lyrics::from_lines(lines))
}
