//! Blocking HTTP collaborator.
//!
//! [`PageRequest`] describes one outbound document fetch (method, spoofed
//! headers, form body, response charset) and [`HttpClient`] executes it.
//! Only http/https URLs are accepted. The lyric sites in question predate
//! modern APIs; several of them gate their lyrics resource behind `Referer`
//! or `X-Requested-With` values that mimic the embedded player that used to
//! fetch it.

use std::time::Duration;

use tracing::debug;

use crate::error::{FetchError, Result};

/// Default connect timeout, overridable through [`HttpClient::new`].
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// One planned document fetch. GET by default; adding form data turns the
/// request into an `application/x-www-form-urlencoded` POST with the pairs
/// sent in insertion order.
#[derive(Debug, Clone)]
pub struct PageRequest {
    url: String,
    charset: Option<&'static str>,
    referer: Option<String>,
    x_requested_with: Option<&'static str>,
    headers: Vec<(&'static str, String)>,
    form: Vec<(&'static str, String)>,
}

impl PageRequest {
    pub fn get(url: impl Into<String>) -> Self {
        PageRequest {
            url: url.into(),
            charset: None,
            referer: None,
            x_requested_with: None,
            headers: Vec::new(),
            form: Vec::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fallback charset for decoding the response body when the server does
    /// not declare one. Defaults to UTF-8.
    pub fn charset(mut self, charset: &'static str) -> Self {
        self.charset = Some(charset);
        self
    }

    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    pub fn x_requested_with(mut self, value: &'static str) -> Self {
        self.x_requested_with = Some(value);
        self
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Appends one form pair; the first call switches the request to POST.
    pub fn form(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.form.push((name, value.into()));
        self
    }

    pub fn is_post(&self) -> bool {
        !self.form.is_empty()
    }
}

/// Thin wrapper over a blocking [`reqwest`] client carrying the per-fetch
/// `User-Agent`. One instance per pipeline; holds no response state.
pub struct HttpClient {
    client: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new(user_agent: &str, connect_timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(HttpClient { client })
    }

    /// Fetches the document and decodes it to text.
    pub fn fetch_text(&self, request: &PageRequest) -> Result<String> {
        if !request.url.starts_with("http://") && !request.url.starts_with("https://") {
            return Err(FetchError::UnsupportedScheme(request.url.clone()));
        }

        debug!(
            url = %request.url,
            post = request.is_post(),
            "fetching document"
        );

        let mut builder = if request.is_post() {
            self.client.post(&request.url).form(&request.form)
        } else {
            self.client.get(&request.url)
        };

        if let Some(referer) = &request.referer {
            builder = builder.header("Referer", referer);
        }
        if let Some(value) = request.x_requested_with {
            builder = builder.header("X-Requested-With", value);
        }
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.send()?.error_for_status()?;
        let text = response.text_with_charset(request.charset.unwrap_or("utf-8"))?;

        debug!(bytes = text.len(), "document received");
        Ok(text)
    }
}
