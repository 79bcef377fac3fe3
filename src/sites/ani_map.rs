//! アニメソングの歌詞ならここにおまかせ (animap.jp). Split shape: same
//! Flash-era setup as kashinavi, a Shift_JIS PHP endpoint gated on a spoofed
//! player `Referer`.

use scraper::Html;

use super::{normalized_text, select_first, FLASH_VERSION};
use crate::error::{FetchError, Result};
use crate::http::PageRequest;
use crate::model::{Header, Lyrics};
use crate::pipeline::SplitSite;
use crate::text;

pub(crate) const TOKEN: &str = "animap.jp";
pub(crate) const FULL_URL: &str = r"^.*?animap\.jp/kasi/showkasi\.php\?surl=([-\w]+)$";

const HOSTNAME: &str = "http://www.animap.jp";

pub(crate) fn canonical_url(captures: &[String]) -> String {
    format!("{}/kasi/showkasi.php?surl={}", HOSTNAME, captures[0])
}

pub(crate) static SITE: SplitSite = SplitSite {
    page_request: |url| PageRequest::get(url),
    lyrics_request: |code, _page_url| {
        PageRequest::get(format!("{}/kasi/phpflash/flashphp.php?unum={}", HOSTNAME, code))
            .charset("Shift_JIS")
            .referer(format!("{}/kasi/showkasi.swf?ucode={}", HOSTNAME, code))
            .x_requested_with(FLASH_VERSION)
    },
    parse_header,
    parse_lyrics,
};

fn parse_header(page: &str) -> Result<Header> {
    let doc = Html::parse_document(page);

    // Fixed cell order inside the info table: artist, lyricist, title,
    // composer.
    let table = select_first(&doc, r#"table[width="442"]"#, "info table")?;
    let cells: Vec<String> = table
        .select(&super::selector(r##"td[bgcolor="#ffffff"]"##))
        .map(normalized_text)
        .collect();

    let title = cells.get(2).map(String::as_str).unwrap_or("");
    let mut header = Header::new(text::trim(title));
    if let Some(artist) = cells.first() {
        header = header.with_artist(text::split_names(artist, '/'));
    }
    if let Some(lyricist) = cells.get(1) {
        header = header.with_lyricist(text::split_names(lyricist, '/'));
    }
    if let Some(composer) = cells.get(3) {
        header = header.with_composer(text::split_names(composer, '/'));
    }

    Ok(header)
}

/// The Flash endpoint answers with form-encoded variables; the lyrics sit
/// after the `test2=` key.
fn parse_lyrics(payload: &str) -> Result<Lyrics> {
    let begin = payload
        .find("test2=")
        .ok_or(FetchError::Extraction { anchor: "test2 variable" })?
        + "test2=".len();
    Ok(Lyrics::from_lines(payload[begin..].split('\n')))
}
