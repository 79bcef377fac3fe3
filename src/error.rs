use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("required parameter '{0}' is not set")]
    Configuration(&'static str),

    #[error("unsupported site: {0}")]
    UnsupportedSite(String),

    #[error("no registered site matches page '{0}'")]
    UnresolvedSite(String),

    #[error("unable to resolve page '{page}' for site '{site}'")]
    InvalidIdentifier { site: &'static str, page: String },

    #[error("only http/https urls are supported: {0}")]
    UnsupportedScheme(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{anchor} not found in fetched document")]
    Extraction { anchor: &'static str },

    #[error("malformed payload: {0}")]
    Parse(String),
}

impl FetchError {
    /// Missing structural anchor in an otherwise well-formed document.
    pub(crate) fn anchor(anchor: &'static str) -> Self {
        FetchError::Extraction { anchor }
    }

    /// Whether a caller-side retry can plausibly help.
    ///
    /// Network failures are transient by nature; malformed JSON/XML usually
    /// means a truncated or garbage response rather than a site redesign.
    /// Everything else (configuration, identifier, extraction) is permanent.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::Parse(_))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

impl From<quick_xml::Error> for FetchError {
    fn from(err: quick_xml::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for FetchError {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        FetchError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(FetchError::Parse("bad json".into()).is_retryable());
        assert!(!FetchError::Configuration("page").is_retryable());
        assert!(!FetchError::anchor("title").is_retryable());
        assert!(!FetchError::UnresolvedSite("x".into()).is_retryable());
    }
}
