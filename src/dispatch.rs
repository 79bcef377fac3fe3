//! Front door of the crate.
//!
//! A [`FetchRequest`] names a site (token or auto-detection) and a page
//! (full URL or bare song code). [`resolve`] turns it into an open
//! [`SongPipeline`]; [`fetch`] drains that pipeline into a [`FetchResult`]
//! for callers that just want the data.

use std::time::Duration;

use tracing::info;

use crate::agent;
use crate::error::{FetchError, Result};
use crate::http::{HttpClient, DEFAULT_CONNECT_TIMEOUT};
use crate::model::FetchResult;
use crate::pipeline::SongPipeline;
use crate::registry;

/// Site token requesting auto-detection from a full URL.
pub const AUTO_DETECT: &str = "*";

/// One fetch order. `site` and `page` are required; the rest defaults.
#[derive(Debug, Clone, Default)]
pub struct FetchRequest {
    site: Option<String>,
    page: Option<String>,
    user_agent: Option<String>,
    connect_timeout: Option<Duration>,
}

impl FetchRequest {
    pub fn new() -> Self {
        FetchRequest::default()
    }

    /// Site token, e.g. `"uta-net.com"`. Matched case-insensitively.
    pub fn site(mut self, token: impl Into<String>) -> Self {
        self.site = Some(token.into());
        self
    }

    /// Detect the site from the page URL instead of naming it.
    pub fn auto_detect(mut self) -> Self {
        self.site = Some(AUTO_DETECT.to_string());
        self
    }

    /// Full song-page URL, or a bare song code when a site is named.
    pub fn page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Overrides the per-request random browser `User-Agent`.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }
}

/// Resolves the request and opens the site's pipeline. This performs the
/// network fetches; extraction happens lazily on the returned pipeline.
pub fn resolve(request: &FetchRequest) -> Result<Box<dyn SongPipeline>> {
    let token = request
        .site
        .as_deref()
        .ok_or(FetchError::Configuration("site"))?;
    let page = request
        .page
        .as_deref()
        .ok_or(FetchError::Configuration("page"))?;

    let site = if token == AUTO_DETECT {
        registry::detect(page).ok_or_else(|| FetchError::UnresolvedSite(page.to_string()))?
    } else {
        registry::lookup(token).ok_or_else(|| FetchError::UnsupportedSite(token.to_string()))?
    };

    let song = site.resolve(page)?;
    info!(site = site.token, url = %song.url, "song resolved");

    let http = HttpClient::new(
        &effective_user_agent(request),
        request.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
    )?;

    registry::open(&song, &http)
}

/// An unset or empty override both mean "pick one from the rotation".
fn effective_user_agent(request: &FetchRequest) -> String {
    match request.user_agent.as_deref() {
        Some(user_agent) if !user_agent.is_empty() => user_agent.to_string(),
        _ => agent::random_user_agent().to_string(),
    }
}

/// Resolves, fetches and extracts in one call.
pub fn fetch(request: &FetchRequest) -> Result<FetchResult> {
    let mut pipeline = resolve(request)?;

    Ok(FetchResult {
        header: pipeline.header()?,
        lyrics: pipeline.lyrics()?,
        source_url: pipeline.source_url().to_string(),
    })
}
