//! 歌ネット (uta-net.com). Split shape: the song page carries the metadata,
//! the lyrics are served as a small SVG/XML document of `<text>` elements.

use quick_xml::events::Event;
use quick_xml::Reader;
use scraper::Html;

use super::{normalized_text, select_first};
use crate::error::{FetchError, Result};
use crate::http::PageRequest;
use crate::model::{Header, Lyrics};
use crate::pipeline::SplitSite;
use crate::text::{self, static_regex};

pub(crate) const TOKEN: &str = "uta-net.com";
pub(crate) const FULL_URL: &str = r"^.*?uta-net\.com/song/(\d+)/?$";

const HOSTNAME: &str = "http://www.uta-net.com";

pub(crate) fn canonical_url(captures: &[String]) -> String {
    format!("{}/song/{}/", HOSTNAME, captures[0])
}

pub(crate) static SITE: SplitSite = SplitSite {
    page_request: |url| PageRequest::get(url),
    lyrics_request: |code, _page_url| {
        PageRequest::get(format!(
            "{}/user/phplib/svg/showkasi.php?ID={}",
            HOSTNAME, code
        ))
    },
    parse_header,
    parse_lyrics,
};

fn parse_header(page: &str) -> Result<Header> {
    let doc = Html::parse_document(page);

    let title = select_first(&doc, "#sound_uri + h2", "title")?;
    let mut header = Header::new(text::trim(&normalized_text(title)));

    if let Ok(block) = select_first(&doc, "div.kashi_artist", "artist block") {
        let info = normalized_text(block);
        let re = static_regex!(r"^歌手：\s?(.*?)作詞：\s?(.*?)作曲：\s?(.*)$");
        if let Some(caps) = re.captures(&info) {
            header = header
                .with_artist(text::split_names(&caps[1], '・'))
                .with_lyricist(text::split_names(&caps[2], '・'))
                .with_composer(text::split_names(&caps[3], '・'));
        }
    }

    Ok(header)
}

/// The SVG renders one `<text>` element per lyric line; a self-closing
/// element is a blank line.
fn parse_lyrics(payload: &str) -> Result<Lyrics> {
    let mut reader = Reader::from_str(payload);

    let mut lines: Vec<String> = Vec::new();
    let mut in_line = false;
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"text" => {
                in_line = true;
                lines.push(String::new());
            }
            Event::Empty(e) if e.name().as_ref() == b"text" => {
                lines.push(String::new());
            }
            Event::Text(e) if in_line => {
                if let Some(last) = lines.last_mut() {
                    last.push_str(&e.unescape()?);
                }
            }
            Event::End(e) if e.name().as_ref() == b"text" => in_line = false,
            Event::Eof => break,
            _ => {}
        }
    }

    if lines.is_empty() {
        return Err(FetchError::anchor("lyrics text elements"));
    }
    Ok(Lyrics::from_lines(lines))
}
