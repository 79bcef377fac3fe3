//! One thin module per supported site.
//!
//! Each module contributes a token, an anchored full-URL pattern, a
//! canonical-URL assembly function and a [`SplitSite`] or [`UnitedSite`]
//! table of extraction functions. The registry stitches them together; all
//! real variation between sites lives here.

pub(crate) mod ani_map;
pub(crate) mod anime_song;
pub(crate) mod evesta;
pub(crate) mod j_lyric;
pub(crate) mod joy_sound;
pub(crate) mod kashi_navi;
pub(crate) mod kasi_time;
pub(crate) mod kget;
pub(crate) mod petit_lyrics;
pub(crate) mod uta_map;
pub(crate) mod uta_net;
pub(crate) mod uta_ten;

use scraper::{ElementRef, Html, Selector};

use crate::error::{FetchError, Result};

/// Client token some lyrics endpoints expect in `X-Requested-With`; they were
/// served exclusively to an embedded Flash player.
pub(crate) const FLASH_VERSION: &str = "ShockwaveFlash/18.0.0.232";

pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("hard-coded selector is valid")
}

/// First element matching `css`, or the extraction failure for `anchor`.
pub(crate) fn select_first<'a>(
    doc: &'a Html,
    css: &str,
    anchor: &'static str,
) -> Result<ElementRef<'a>> {
    doc.select(&selector(css))
        .next()
        .ok_or(FetchError::Extraction { anchor })
}

/// Element text with runs of ASCII whitespace collapsed to single spaces and
/// the ends trimmed. Full-width spaces and U+00A0 survive untouched, since
/// several sites use them as field delimiters.
pub(crate) fn normalized_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();

    let mut out = String::with_capacity(raw.len());
    let mut in_run = false;
    for c in raw.chars() {
        if c.is_ascii_whitespace() {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out.trim_matches(' ').to_string()
}
