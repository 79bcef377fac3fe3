//! プチリリ (petitlyrics.com). United shape, but the page is too
//! template-heavy for clean selectors: the credits paragraph packs
//! `役割：名前` pairs separated by no-break spaces, and the lyrics are the
//! text content of a `<canvas>` element. Raw-text regexes all the way.

use crate::error::{FetchError, Result};
use crate::http::PageRequest;
use crate::model::{Header, Lyrics};
use crate::pipeline::UnitedSite;
use crate::text::{self, static_regex};

pub(crate) const TOKEN: &str = "petitlyrics.com";
pub(crate) const FULL_URL: &str = r"^.*?petitlyrics\.com/lyrics/(\d+)/?$";

pub(crate) fn canonical_url(captures: &[String]) -> String {
    format!("http://petitlyrics.com/lyrics/{}", captures[0])
}

pub(crate) static SITE: UnitedSite = UnitedSite {
    request: |_captures, url| PageRequest::get(url),
    parse_header,
    parse_lyrics,
    parse_ruby: None,
};

fn parse_header(body: &str) -> Result<Header> {
    let title_re = static_regex!(r#"<div class="title-bar">(.+?)</div"#);
    let caps = title_re
        .captures(body)
        .ok_or(FetchError::Extraction { anchor: "title bar" })?;
    let mut header = Header::new(text::trim(&text::fragment_text(&caps[1])));

    let info_re = static_regex!(r#"(?s)<div class="pure-u-1">.*?<div align="left".*?<p>(.*?)</p>"#);
    if let Some(caps) = info_re.captures(body) {
        let info = text::fragment_text(&caps[1]);
        // Pairs look like 作詞：名前&名前, glued together with U+00A0.
        for piece in info.split('\u{a0}') {
            let Some((role, names)) = piece.split_once('：') else {
                continue;
            };
            match text::trim(role) {
                "アーティスト" => {
                    header = header.with_artist(text::split_names_any(names, &['&', '/', ',']));
                }
                "作詞" => {
                    header = header.with_lyricist(text::split_names_any(names, &['&', '/', ',']));
                }
                "作曲" => {
                    // The composer pair can carry the arranger as a suffix.
                    let (composers, arrangers) = match names.split_once("/編曲:") {
                        Some((c, a)) => (c, Some(a)),
                        None => (names, None),
                    };
                    header =
                        header.with_composer(text::split_names_any(composers, &['&', '/', ',']));
                    if let Some(arrangers) = arrangers {
                        header =
                            header.with_arranger(text::split_names_any(arrangers, &['&', '＆']));
                    }
                }
                _ => {}
            }
        }
    }

    Ok(header)
}

fn parse_lyrics(body: &str) -> Result<Lyrics> {
    let re = static_regex!(r#"<canvas id="lyrics"[^>]*>([^<]+)\n</canvas>"#);
    let caps = re
        .captures(body)
        .ok_or(FetchError::Extraction { anchor: "lyrics canvas" })?;

    let lines = caps[1]
        .split('\n')
        .map(text::fragment_text)
        .collect::<Vec<_>>();
    Ok(Lyrics::from_lines(lines))
}
