//! 歌詞ナビ (kashinavi.com). Split shape: the lyrics live behind a CGI
//! endpoint that only answers to what looks like the site's Flash player,
//! so the request carries a spoofed `Referer` and `X-Requested-With`.

use scraper::Html;

use super::{normalized_text, select_first, FLASH_VERSION};
use crate::error::Result;
use crate::http::PageRequest;
use crate::model::{Header, Lyrics};
use crate::pipeline::SplitSite;
use crate::text::{self, static_regex};

pub(crate) const TOKEN: &str = "kashinavi.com";
pub(crate) const FULL_URL: &str = r"^.*?kashinavi\.com/song_view\.html\?(\d+)$";

const HOSTNAME: &str = "http://kashinavi.com";

pub(crate) fn canonical_url(captures: &[String]) -> String {
    format!("{}/song_view.html?{}", HOSTNAME, captures[0])
}

pub(crate) static SITE: SplitSite = SplitSite {
    page_request: |url| PageRequest::get(url),
    lyrics_request: |code, _page_url| {
        PageRequest::get(format!("{}/cgi-bin/kashi.cgi", HOSTNAME))
            .form("kdifoe88", "smx;paa")
            .form("file_no", code)
            .referer(format!("{}/song_view.swf?file_no={}", HOSTNAME, code))
            .x_requested_with(FLASH_VERSION)
    },
    parse_header,
    parse_lyrics,
};

fn parse_header(page: &str) -> Result<Header> {
    let doc = Html::parse_document(page);

    // Title and artist sit in the first nested cellspacing="5" table.
    let song_table = select_first(
        &doc,
        r#"table[cellpadding="2"] table[cellspacing="5"]"#,
        "song table",
    )?;
    let cells: Vec<String> = song_table
        .select(&super::selector("td"))
        .map(normalized_text)
        .collect();
    let title = cells.first().map(String::as_str).unwrap_or("");
    let mut header = Header::new(text::trim(title));
    if let Some(artist) = cells.get(2) {
        header = header.with_artist(text::split_names(artist, '・'));
    }

    if let Ok(credit) = select_first(
        &doc,
        r#"table[cellpadding="2"] table[cellspacing="0"] td"#,
        "credit cell",
    ) {
        let info = normalized_text(credit);
        let re = static_regex!("^作詞\u{3000}：\u{3000}(.*?)作曲\u{3000}：\u{3000}(.*)$");
        if let Some(caps) = re.captures(&info) {
            header = header
                .with_lyricist(text::split_names(&caps[1], '・'))
                .with_composer(text::split_names(&caps[2], '・'));
        }
    }

    Ok(header)
}

/// The CGI reply is a status line followed by the plain-text lyrics.
fn parse_lyrics(payload: &str) -> Result<Lyrics> {
    let body = payload
        .split_once('\n')
        .map_or(payload, |(_, rest)| rest);
    Ok(Lyrics::from_lines(body.split('\n')))
}
