//! JOYSOUND (joysound.com). United shape backed by a JSON API: the web page
//! itself is a JavaScript shell, so everything comes from the lyric service
//! the player talks to.

use serde::Deserialize;

use crate::error::{FetchError, Result};
use crate::http::PageRequest;
use crate::model::{Header, Lyrics};
use crate::pipeline::UnitedSite;
use crate::text;

pub(crate) const TOKEN: &str = "joysound.com";
pub(crate) const FULL_URL: &str = r"^.*?joysound\.com/web/search/song/(\d+)/?$";

pub(crate) fn canonical_url(captures: &[String]) -> String {
    format!("https://www.joysound.com/web/search/song/{}/", captures[0])
}

pub(crate) static SITE: UnitedSite = UnitedSite {
    request: |captures, url| {
        PageRequest::get("https://mspxy.joysound.com/Common/Lyric")
            .form("kind", "naviGroupId")
            .form("selSongNo", captures[0].as_str())
            .form("interactionFlg", "0")
            .form("apiVer", "1.0")
            .referer(url)
            .header("X-JSP-APP-NAME", "0000800")
    },
    parse_header,
    parse_lyrics,
    parse_ruby: None,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LyricResponse {
    song_name: String,
    artist_name: String,
    lyricist: String,
    composer: String,
    #[serde(default)]
    lyric_list: Vec<LyricEntry>,
}

#[derive(Debug, Deserialize)]
struct LyricEntry {
    lyric: String,
}

fn parse_header(body: &str) -> Result<Header> {
    let response: LyricResponse = serde_json::from_str(body)?;

    // The API joins multiple names with a full-width comma.
    Ok(Header::new(text::trim(&response.song_name))
        .with_artist(text::split_names(&response.artist_name, '，'))
        .with_lyricist(text::split_names(&response.lyricist, '，'))
        .with_composer(text::split_names(&response.composer, '，')))
}

fn parse_lyrics(body: &str) -> Result<Lyrics> {
    let response: LyricResponse = serde_json::from_str(body)?;

    let entry = response
        .lyric_list
        .first()
        .ok_or(FetchError::Extraction { anchor: "lyric list" })?;
    Ok(Lyrics::from_lines(entry.lyric.split('\n')))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "songName": "前前前世",
        "artistName": "RADWIMPS",
        "lyricist": "野田洋次郎",
        "composer": "野田洋次郎",
        "lyricList": [{"lyric": "一行目\n二行目\n\n四行目"}]
    }"#;

    #[test]
    fn resolves_canonical_url() {
        assert_eq!(
            canonical_url(&["405267".to_string()]),
            "https://www.joysound.com/web/search/song/405267/"
        );
    }

    #[test]
    fn api_request_is_a_form_post() {
        let req = (SITE.request)(
            &["405267".to_string()],
            "https://www.joysound.com/web/search/song/405267/",
        );
        assert!(req.is_post());
        assert_eq!(req.url(), "https://mspxy.joysound.com/Common/Lyric");
    }

    #[test]
    fn parses_header_from_json() {
        let header = parse_header(RESPONSE).unwrap();
        assert_eq!(header.title(), "前前前世");
        assert!(header.artist().unwrap().contains("RADWIMPS"));
        assert!(header.lyricist().unwrap().contains("野田洋次郎"));
    }

    #[test]
    fn splits_names_on_fullwidth_comma() {
        let body = r#"{"songName":"x","artistName":"A，B","lyricist":"C","composer":"D","lyricList":[]}"#;
        let header = parse_header(body).unwrap();
        assert_eq!(header.artist().unwrap().len(), 2);
    }

    #[test]
    fn parses_lyrics_from_first_entry() {
        let lyrics = parse_lyrics(RESPONSE).unwrap();
        assert_eq!(lyrics.line_count(), 4);
        assert_eq!(lyrics.line(2), Some(""));
    }

    #[test]
    fn empty_lyric_list_is_extraction_error() {
        let body = r#"{"songName":"x","artistName":"a","lyricist":"b","composer":"c"}"#;
        assert!(matches!(
            parse_lyrics(body).unwrap_err(),
            FetchError::Extraction { .. }
        ));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(parse_header("not json").unwrap_err().is_retryable());
    }
}
