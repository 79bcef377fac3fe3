//! Public-contract tests for request validation and site resolution.
//! Everything here fails before any network traffic happens.

use kashi_fetch::{resolve, FetchError, FetchRequest};

fn resolve_err(request: &FetchRequest) -> FetchError {
    resolve(request).map(|_| ()).unwrap_err()
}

#[test]
fn site_and_page_are_both_required() {
    let err = resolve_err(&FetchRequest::new());
    assert!(matches!(err, FetchError::Configuration("site")));

    let err = resolve_err(&FetchRequest::new().site("uta-net.com"));
    assert!(matches!(err, FetchError::Configuration("page")));
    assert!(!err.is_retryable());
}

#[test]
fn unknown_site_token_is_rejected() {
    let err = resolve_err(&FetchRequest::new().site("lyrics.example").page("1"));
    assert!(matches!(err, FetchError::UnsupportedSite(_)));
    assert!(err.to_string().contains("lyrics.example"));
}

#[test]
fn site_tokens_are_case_insensitive() {
    // Resolution gets past the roster lookup and fails on the identifier
    // instead, proving the token matched.
    let err = resolve_err(&FetchRequest::new().site("UTA-NET.COM").page("not/a/code"));
    assert!(matches!(
        err,
        FetchError::InvalidIdentifier { site: "uta-net.com", .. }
    ));
}

#[test]
fn auto_detection_needs_a_known_full_url() {
    let err = resolve_err(
        &FetchRequest::new()
            .auto_detect()
            .page("http://unknown-lyrics.example/song/1/"),
    );
    assert!(matches!(err, FetchError::UnresolvedSite(_)));

    // Bare codes are ambiguous across sites.
    let err = resolve_err(&FetchRequest::new().auto_detect().page("162989"));
    assert!(matches!(err, FetchError::UnresolvedSite(_)));
}

#[test]
fn bare_code_must_match_the_site_code_class() {
    let err = resolve_err(&FetchRequest::new().site("uta-net.com").page("abc-123"));
    assert!(matches!(err, FetchError::InvalidIdentifier { .. }));
    assert!(!err.is_retryable());

    // j-lyric URLs carry two variable parts, so no bare code exists at all.
    let err = resolve_err(&FetchRequest::new().site("j-lyric.net").page("l031ba7"));
    assert!(matches!(err, FetchError::InvalidIdentifier { .. }));
}
