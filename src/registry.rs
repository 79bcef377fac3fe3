//! The roster of supported sites and identifier resolution.
//!
//! Each entry couples a human-facing token ("uta-net.com") with an anchored
//! full-URL pattern, the bare-code class the site accepts, a canonical-URL
//! assembler and its adapter table. Auto-detection walks the roster in
//! registration order and takes the first full-URL match, so the order here
//! is part of the observable behavior.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{FetchError, Result};
use crate::http::HttpClient;
use crate::pipeline::{SongPipeline, SplitPipeline, SplitSite, UnitedPipeline, UnitedSite};
use crate::sites;
use crate::text::static_regex;

/// Shape of the bare song code a site accepts in place of a full URL.
/// Sites whose URLs carry more than one variable part accept none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CodeKind {
    Numeric,
    Word,
}

impl CodeKind {
    fn matches(self, code: &str) -> bool {
        match self {
            CodeKind::Numeric => static_regex!(r"^\d+$").is_match(code),
            CodeKind::Word => static_regex!(r"^[-\w]+$").is_match(code),
        }
    }
}

pub(crate) enum SiteKind {
    Split(&'static SplitSite),
    United(&'static UnitedSite),
}

pub(crate) struct SiteRegistration {
    pub token: &'static str,
    full_url: Regex,
    code: Option<CodeKind>,
    canonical: fn(&[String]) -> String,
    kind: SiteKind,
}

/// A page identifier resolved against one site: the captured URL parts plus
/// the canonical song-page URL they reassemble into.
pub(crate) struct ResolvedSong {
    pub site: &'static SiteRegistration,
    pub captures: Vec<String>,
    pub url: String,
}

impl SiteRegistration {
    fn new(
        token: &'static str,
        full_url: &str,
        code: Option<CodeKind>,
        canonical: fn(&[String]) -> String,
        kind: SiteKind,
    ) -> Self {
        SiteRegistration {
            token,
            full_url: Regex::new(full_url).expect("hard-coded pattern is valid"),
            code,
            canonical,
            kind,
        }
    }

    /// Resolves `page` against this site: a matching full URL first, then a
    /// bare code of the site's accepted shape.
    pub(crate) fn resolve(&'static self, page: &str) -> Result<ResolvedSong> {
        if let Some(caps) = self.full_url.captures(page) {
            let captures: Vec<String> = caps
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().to_string())
                .collect();
            let url = (self.canonical)(&captures);
            return Ok(ResolvedSong { site: self, captures, url });
        }

        if let Some(code) = self.code {
            if code.matches(page) {
                let captures = vec![page.to_string()];
                let url = (self.canonical)(&captures);
                return Ok(ResolvedSong { site: self, captures, url });
            }
        }

        Err(FetchError::InvalidIdentifier {
            site: self.token,
            page: page.to_string(),
        })
    }
}

/// All supported sites, in the order auto-detection consults them.
pub(crate) fn registry() -> &'static [SiteRegistration] {
    static REGISTRY: OnceLock<Vec<SiteRegistration>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        use sites::*;
        vec![
            SiteRegistration::new(
                uta_net::TOKEN,
                uta_net::FULL_URL,
                Some(CodeKind::Numeric),
                uta_net::canonical_url,
                SiteKind::Split(&uta_net::SITE),
            ),
            SiteRegistration::new(
                j_lyric::TOKEN,
                j_lyric::FULL_URL,
                None,
                j_lyric::canonical_url,
                SiteKind::United(&j_lyric::SITE),
            ),
            SiteRegistration::new(
                uta_map::TOKEN,
                uta_map::FULL_URL,
                Some(CodeKind::Word),
                uta_map::canonical_url,
                SiteKind::Split(&uta_map::SITE),
            ),
            SiteRegistration::new(
                kasi_time::TOKEN,
                kasi_time::FULL_URL,
                Some(CodeKind::Numeric),
                kasi_time::canonical_url,
                SiteKind::Split(&kasi_time::SITE),
            ),
            SiteRegistration::new(
                kashi_navi::TOKEN,
                kashi_navi::FULL_URL,
                Some(CodeKind::Numeric),
                kashi_navi::canonical_url,
                SiteKind::Split(&kashi_navi::SITE),
            ),
            SiteRegistration::new(
                kget::TOKEN,
                kget::FULL_URL,
                Some(CodeKind::Numeric),
                kget::canonical_url,
                SiteKind::United(&kget::SITE),
            ),
            SiteRegistration::new(
                uta_ten::TOKEN,
                uta_ten::FULL_URL,
                None,
                uta_ten::canonical_url,
                SiteKind::United(&uta_ten::SITE),
            ),
            SiteRegistration::new(
                ani_map::TOKEN,
                ani_map::FULL_URL,
                Some(CodeKind::Word),
                ani_map::canonical_url,
                SiteKind::Split(&ani_map::SITE),
            ),
            SiteRegistration::new(
                evesta::TOKEN,
                evesta::FULL_URL,
                None,
                evesta::canonical_url,
                SiteKind::United(&evesta::SITE),
            ),
            SiteRegistration::new(
                joy_sound::TOKEN,
                joy_sound::FULL_URL,
                Some(CodeKind::Numeric),
                joy_sound::canonical_url,
                SiteKind::United(&joy_sound::SITE),
            ),
            SiteRegistration::new(
                anime_song::TOKEN,
                anime_song::FULL_URL,
                None,
                anime_song::canonical_url,
                SiteKind::United(&anime_song::SITE),
            ),
            SiteRegistration::new(
                petit_lyrics::TOKEN,
                petit_lyrics::FULL_URL,
                Some(CodeKind::Numeric),
                petit_lyrics::canonical_url,
                SiteKind::United(&petit_lyrics::SITE),
            ),
        ]
    })
}

/// Finds a site by its token, case-insensitively.
pub(crate) fn lookup(token: &str) -> Option<&'static SiteRegistration> {
    registry()
        .iter()
        .find(|site| site.token.eq_ignore_ascii_case(token))
}

/// Detects which site a full song-page URL belongs to. Bare codes are
/// ambiguous across sites and never auto-detected.
pub(crate) fn detect(page: &str) -> Option<&'static SiteRegistration> {
    registry().iter().find(|site| site.full_url.is_match(page))
}

/// Opens the fetch pipeline matching the site's shape.
pub(crate) fn open(song: &ResolvedSong, http: &HttpClient) -> Result<Box<dyn SongPipeline>> {
    match song.site.kind {
        SiteKind::Split(site) => {
            let code = song.captures.first().ok_or(FetchError::InvalidIdentifier {
                site: song.site.token,
                page: song.url.clone(),
            })?;
            Ok(Box::new(SplitPipeline::open(
                site,
                code,
                song.url.clone(),
                http,
            )?))
        }
        SiteKind::United(site) => Ok(Box::new(UnitedPipeline::open(
            site,
            &song.captures,
            song.url.clone(),
            http,
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_is_in_detection_order() {
        let tokens: Vec<&str> = registry().iter().map(|s| s.token).collect();
        assert_eq!(tokens[0], "uta-net.com");
        assert_eq!(tokens[1], "j-lyric.net");
        assert_eq!(tokens.len(), 12);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(lookup("UTA-NET.COM").is_some());
        assert!(lookup("Kget.jp").is_some());
        assert!(lookup("nosuch.example").is_none());
    }

    #[test]
    fn bare_code_resolves_to_canonical_url() {
        let song = lookup("kasi-time.com").unwrap().resolve("73631").unwrap();
        assert_eq!(song.url, "http://www.kasi-time.com/item-73631.html");
        assert_eq!(song.captures, vec!["73631".to_string()]);
    }

    #[test]
    fn full_url_resolves_and_canonicalizes() {
        let song = lookup("uta-net.com")
            .unwrap()
            .resolve("https://www.uta-net.com/song/12345/")
            .unwrap();
        assert_eq!(song.url, "http://www.uta-net.com/song/12345/");
    }

    #[test]
    fn numeric_site_rejects_word_code() {
        let err = lookup("uta-net.com")
            .unwrap()
            .resolve("abc-123")
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidIdentifier { .. }));
    }

    #[test]
    fn multi_capture_site_rejects_bare_code() {
        let err = lookup("j-lyric.net")
            .unwrap()
            .resolve("l031ba7")
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidIdentifier { .. }));
    }

    #[test]
    fn canonical_urls_resolve_to_themselves() {
        // The canonical URL every site assembles must satisfy that site's
        // own full-URL pattern, or code-based resolution would produce
        // identifiers detect() cannot round-trip.
        let samples = [
            ("uta-net.com", "http://www.uta-net.com/song/162989/"),
            ("j-lyric.net", "http://j-lyric.net/artist/a057818/l031ba7.html"),
            ("utamap.com", "http://www.utamap.com/showkasi.php?surl=k-050607-069"),
            ("kasi-time.com", "http://www.kasi-time.com/item-73631.html"),
            ("kashinavi.com", "http://kashinavi.com/song_view.html?83532"),
            ("kget.jp", "http://www.kget.jp/lyric/172610/"),
            ("utaten.com", "http://utaten.com/lyric/DAOKO/fireworks/"),
            ("animap.jp", "http://www.animap.jp/kasi/showkasi.php?surl=k-140806-093"),
            (
                "evesta.jp",
                "http://www.evesta.jp/lyric/artists/a17462/lyrics/l232637.html",
            ),
            ("joysound.com", "https://www.joysound.com/web/search/song/405267/"),
            (
                "jtw.zaq.ne.jp/animesong",
                "http://www.jtw.zaq.ne.jp/animesong/e/eva/zankoku.html",
            ),
            ("petitlyrics.com", "http://petitlyrics.com/lyrics/1158450"),
        ];

        for (token, url) in samples {
            let site = lookup(token).unwrap_or_else(|| panic!("{token} not registered"));
            let song = site
                .resolve(url)
                .unwrap_or_else(|e| panic!("{token}: {e}"));
            assert_eq!(song.url, url, "{token}");
            assert_eq!(detect(url).map(|s| s.token), Some(token));
        }
    }

    #[test]
    fn single_code_sites_accept_bare_codes() {
        let cases = [
            ("uta-net.com", "162989", "http://www.uta-net.com/song/162989/"),
            (
                "utamap.com",
                "k-050607-069",
                "http://www.utamap.com/showkasi.php?surl=k-050607-069",
            ),
            ("kasi-time.com", "73631", "http://www.kasi-time.com/item-73631.html"),
            ("kashinavi.com", "83532", "http://kashinavi.com/song_view.html?83532"),
            ("kget.jp", "172610", "http://www.kget.jp/lyric/172610/"),
            (
                "animap.jp",
                "k-140806-093",
                "http://www.animap.jp/kasi/showkasi.php?surl=k-140806-093",
            ),
            ("joysound.com", "405267", "https://www.joysound.com/web/search/song/405267/"),
            ("petitlyrics.com", "1158450", "http://petitlyrics.com/lyrics/1158450"),
        ];

        for (token, code, url) in cases {
            let song = lookup(token).unwrap().resolve(code).unwrap();
            assert_eq!(song.url, url, "{token}");
        }
    }

    #[test]
    fn full_url_wins_over_code_interpretation() {
        // A numeric-looking URL is still a URL, never a code.
        let song = lookup("kget.jp")
            .unwrap()
            .resolve("http://www.kget.jp/lyric/172610/?lang=ja")
            .unwrap();
        assert_eq!(song.url, "http://www.kget.jp/lyric/172610/");
    }

    #[test]
    fn detect_matches_full_urls_only() {
        let site = detect("http://j-lyric.net/artist/a057818/l031ba7.html").unwrap();
        assert_eq!(site.token, "j-lyric.net");
        assert!(detect("12345").is_none());
        assert!(detect("http://example.com/song/1/").is_none());
    }
}
