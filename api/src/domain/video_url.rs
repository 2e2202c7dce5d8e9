//! Video URL validation - turns a submitted watch-page URL into a video ID
//!
//! Validation is purely syntactic. Nothing here touches the network, so a
//! well-formed URL for a video that does not exist is still accepted.

use std::fmt;

use thiserror::Error;
use url::{Url, form_urlencoded};

use crate::constants::{VIDEO_HOST, VIDEO_PARAM, WATCH_PATH};

/// Why a submitted URL could not yield a video ID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Not a YouTube watch URL: {0}")]
    NotVideoHostUrl(String),

    #[error("YouTube URL has no query string: {0}")]
    MissingQuery(String),

    #[error("YouTube URL has a malformed query string: {0}")]
    MalformedQuery(String),

    #[error("YouTube URL is missing the video parameter: {0}")]
    MissingVideoParameter(String),
}

/// Canonical identifier of a video, the first `v` value of a watch URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the video ID from `https://www.youtube.com/watch?v=<id>`
pub fn extract_video_id(raw_url: &str) -> Result<VideoId, ValidationFailure> {
    let not_video_host = || ValidationFailure::NotVideoHostUrl(raw_url.to_string());

    let written = clean_input(raw_url);
    let url = Url::parse(&written).map_err(|_| not_video_host())?;

    if url.scheme() != "https" || url.host_str() != Some(VIDEO_HOST) || url.path() != WATCH_PATH {
        return Err(not_video_host());
    }

    // `Url` lowercases hosts, drops default ports and resolves dot segments,
    // so the location must also be written exactly as expected
    if written_location(&written) != Some(expected_location().as_str()) {
        return Err(not_video_host());
    }

    // Read from the input rather than `url.query()`, which loses trailing spaces
    let query = match written_query(&written) {
        Some(q) if !q.is_empty() => q,
        _ => return Err(ValidationFailure::MissingQuery(raw_url.to_string())),
    };

    let params = parse_query_strict(query)
        .ok_or_else(|| ValidationFailure::MalformedQuery(raw_url.to_string()))?;

    params
        .into_iter()
        .find(|(name, _)| name == VIDEO_PARAM)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
        .map(VideoId)
        .ok_or_else(|| ValidationFailure::MissingVideoParameter(raw_url.to_string()))
}

fn expected_location() -> String {
    format!("//{}{}", VIDEO_HOST, WATCH_PATH)
}

/// Drop leading C0 controls and spaces, and every tab, CR and LF.
/// Trailing characters are kept.
fn clean_input(raw_url: &str) -> String {
    raw_url
        .trim_start_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect()
}

/// Everything between the scheme's `:` and the start of the query or fragment
fn written_location(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once(':')?;
    rest.split(['?', '#']).next()
}

/// Text after the first `?` and before the fragment
fn written_query(url: &str) -> Option<&str> {
    let (_, query) = url.split('#').next()?.split_once('?')?;
    Some(query)
}

/// Strict form parsing: every `&`-separated segment must contain `=`.
/// Pairs with an empty raw value are dropped. Returns pairs in input order.
fn parse_query_strict(query: &str) -> Option<Vec<(String, String)>> {
    let mut params = Vec::new();

    for segment in query.split('&') {
        let (_, raw_value) = segment.split_once('=')?;
        if raw_value.is_empty() {
            continue;
        }

        // A segment without `&` decodes to exactly one pair
        let (name, value) = form_urlencoded::parse(segment.as_bytes()).next()?;
        params.push((name.into_owned(), value.into_owned()));
    }

    Some(params)
}
