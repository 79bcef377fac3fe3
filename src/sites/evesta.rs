//! evesta歌詞 (evesta.jp). United shape.

use scraper::Html;

use super::{normalized_text, select_first};
use crate::error::{FetchError, Result};
use crate::http::PageRequest;
use crate::model::{Header, Lyrics};
use crate::pipeline::UnitedSite;
use crate::text::{self, static_regex};

pub(crate) const TOKEN: &str = "evesta.jp";
pub(crate) const FULL_URL: &str = r"^.*?evesta\.jp/lyric/artists/(a\d+)/lyrics/(l\d+)\.html$";

const HOSTNAME: &str = "http://www.evesta.jp";

pub(crate) fn canonical_url(captures: &[String]) -> String {
    format!(
        "{}/lyric/artists/{}/lyrics/{}.html",
        HOSTNAME, captures[0], captures[1]
    )
}

pub(crate) static SITE: UnitedSite = UnitedSite {
    request: |_captures, url| PageRequest::get(url),
    parse_header,
    parse_lyrics,
    parse_ruby: None,
};

fn parse_header(body: &str) -> Result<Header> {
    let doc = Html::parse_document(body);

    let heading = select_first(&doc, "#titleBand h1", "title")?;
    let raw_title = normalized_text(heading);
    let title_re = static_regex!(r"^(.*?)歌詞\s/.*$");
    let title = title_re
        .captures(&raw_title)
        .map(|caps| caps[1].to_string())
        .ok_or(FetchError::Extraction { anchor: "title" })?;
    let mut header = Header::new(text::trim(&title));

    if let Ok(artists) = select_first(&doc, "#descriptionBand div.artists", "credits") {
        let info = text::full_trim(&normalized_text(artists));
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
    let block = select_first(&doc, "#lyricview div.body p", "lyrics body")?;

    let lines = text::split_br(&block.inner_html())
        .into_iter()
        .map(text::fragment_text)
        .collect::<Vec<_>>();
    Ok(Lyrics::from_lines(lines))
}
