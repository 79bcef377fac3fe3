//! The two fetch-and-extract pipeline shapes.
//!
//! A site adapter is a value, not a type: a table of plain functions slotted
//! into either [`SplitSite`] (metadata page and lyrics resource fetched
//! separately, correlated by song code) or [`UnitedSite`] (one document,
//! multiple extraction passes). The pipeline structs own the fetched bodies
//! and memoize extraction results; instances are single-use and not shareable
//! across threads.

use tracing::debug;

use crate::error::Result;
use crate::http::{HttpClient, PageRequest};
use crate::model::{Header, Lyrics};

/// Uniform access to one resolved song, regardless of pipeline shape.
///
/// `header()` and `lyrics()` extract on first call and return the cached
/// value afterwards; repeated calls are value-equal and side-effect free.
/// `ruby_lyrics()` yields `Ok(None)` on sites without a reading-annotated
/// rendering; absence of the capability is not an error.
pub trait SongPipeline {
    fn header(&mut self) -> Result<Header>;
    fn lyrics(&mut self) -> Result<Lyrics>;
    fn ruby_lyrics(&mut self) -> Result<Option<Lyrics>>;
    fn source_url(&self) -> &str;
}

/// Adapter table for sites whose lyrics live in a secondary resource
/// (HTML fragment, inline script payload or CGI endpoint).
pub(crate) struct SplitSite {
    /// Request for the song page at the canonical URL.
    pub page_request: fn(url: &str) -> PageRequest,
    /// Request for the lyrics resource, derived from the song code; usually
    /// carries a spoofed `Referer` and sometimes a synthetic client token.
    pub lyrics_request: fn(code: &str, page_url: &str) -> PageRequest,
    pub parse_header: fn(page: &str) -> Result<Header>,
    pub parse_lyrics: fn(payload: &str) -> Result<Lyrics>,
}

/// Adapter table for sites serving metadata and lyrics in one document.
pub(crate) struct UnitedSite {
    /// Request for the single document; built from the resolved captures so
    /// JSON-backed sites can POST to their lyric endpoint instead of GETting
    /// the page itself.
    pub request: fn(captures: &[String], url: &str) -> PageRequest,
    pub parse_header: fn(body: &str) -> Result<Header>,
    pub parse_lyrics: fn(body: &str) -> Result<Lyrics>,
    /// Present only on sites that keep ruby/furigana annotations.
    pub parse_ruby: Option<fn(body: &str) -> Result<Lyrics>>,
}

pub(crate) struct SplitPipeline {
    site: &'static SplitSite,
    source_url: String,
    page_body: String,
    lyrics_body: String,
    header: Option<Header>,
    lyrics: Option<Lyrics>,
}

impl SplitPipeline {
    /// Performs both fetches up front: the lyrics request depends on the
    /// song code and on the page URL for referer spoofing.
    pub(crate) fn open(
        site: &'static SplitSite,
        code: &str,
        url: String,
        http: &HttpClient,
    ) -> Result<Self> {
        let page_body = http.fetch_text(&(site.page_request)(&url))?;
        let lyrics_body = http.fetch_text(&(site.lyrics_request)(code, &url))?;

        debug!(url = %url, "split pipeline opened");
        Ok(SplitPipeline {
            site,
            source_url: url,
            page_body,
            lyrics_body,
            header: None,
            lyrics: None,
        })
    }
}

impl SongPipeline for SplitPipeline {
    fn header(&mut self) -> Result<Header> {
        if let Some(header) = &self.header {
            return Ok(header.clone());
        }
        let header = (self.site.parse_header)(&self.page_body)?;
        self.header = Some(header.clone());
        Ok(header)
    }

    fn lyrics(&mut self) -> Result<Lyrics> {
        if let Some(lyrics) = &self.lyrics {
            return Ok(lyrics.clone());
        }
        let lyrics = (self.site.parse_lyrics)(&self.lyrics_body)?;
        self.lyrics = Some(lyrics.clone());
        Ok(lyrics)
    }

    fn ruby_lyrics(&mut self) -> Result<Option<Lyrics>> {
        Ok(None)
    }

    fn source_url(&self) -> &str {
        &self.source_url
    }
}

pub(crate) struct UnitedPipeline {
    site: &'static UnitedSite,
    source_url: String,
    body: String,
    header: Option<Header>,
    lyrics: Option<Lyrics>,
    ruby: Option<Lyrics>,
}

impl UnitedPipeline {
    pub(crate) fn open(
        site: &'static UnitedSite,
        captures: &[String],
        url: String,
        http: &HttpClient,
    ) -> Result<Self> {
        let body = http.fetch_text(&(site.request)(captures, &url))?;

        debug!(url = %url, "united pipeline opened");
        Ok(UnitedPipeline {
            site,
            source_url: url,
            body,
            header: None,
            lyrics: None,
            ruby: None,
        })
    }
}

impl SongPipeline for UnitedPipeline {
    fn header(&mut self) -> Result<Header> {
        if let Some(header) = &self.header {
            return Ok(header.clone());
        }
        let header = (self.site.parse_header)(&self.body)?;
        self.header = Some(header.clone());
        Ok(header)
    }

    fn lyrics(&mut self) -> Result<Lyrics> {
        if let Some(lyrics) = &self.lyrics {
            return Ok(lyrics.clone());
        }
        let lyrics = (self.site.parse_lyrics)(&self.body)?;
        self.lyrics = Some(lyrics.clone());
        Ok(lyrics)
    }

    fn ruby_lyrics(&mut self) -> Result<Option<Lyrics>> {
        let Some(parse_ruby) = self.site.parse_ruby else {
            return Ok(None);
        };
        if let Some(ruby) = &self.ruby {
            return Ok(Some(ruby.clone()));
        }
        let ruby = parse_ruby(&self.body)?;
        self.ruby = Some(ruby.clone());
        Ok(Some(ruby))
    }

    fn source_url(&self) -> &str {
        &self.source_url
    }
}
