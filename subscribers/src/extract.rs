//! Identifier extraction from free-form user input.
//!
//! Users paste all sorts of things into the lookup box: channel URLs, video URLs, `@handle`s, or
//! just a channel's name. The functions here pick those apart without touching the network. None
//! of them fail; input they don't understand simply yields `None`.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Matches `/channel/UC...` anywhere in the input.
static CHANNEL_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/channel/(UC[a-zA-Z0-9_-]{20,})").expect("channel id pattern is valid")
});

/// Matches `youtube.com/@handle` anywhere in the input, ignoring case.
static HANDLE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)youtube\.com/@([a-zA-Z0-9._-]+)").expect("handle pattern is valid")
});

/// Extracts a video ID from a YouTube video URL.
///
/// Supports:
/// - `https://youtu.be/VIDEOID`
/// - `https://www.youtube.com/watch?v=VIDEOID`
/// - `https://www.youtube.com/shorts/VIDEOID`
/// - `https://www.youtube.com/live/VIDEOID`
///
/// Anything that isn't an absolute URL returns `None`.
pub fn extract_video_id(input: &str) -> Option<String> {
    let url = Url::parse(input).ok()?;
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    let mut segments = url
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty());

    if host == "youtu.be" {
        return segments.next().map(str::to_string);
    }

    if host.ends_with("youtube.com") {
        if url.path() == "/watch" {
            return url
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned())
                .filter(|v| !v.is_empty());
        }

        if let (Some("shorts" | "live"), Some(id)) = (segments.next(), segments.next()) {
            return Some(id.to_string());
        }
    }

    None
}

/// Extracts a channel ID (`UC` followed by at least 20 ID characters) from a `/channel/` URL.
pub fn extract_channel_id_from_channel_url(input: &str) -> Option<&str> {
    CHANNEL_ID_RE
        .captures(input)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Extracts a channel handle from either `@handle` or a `youtube.com/@handle` URL.
///
/// A bare `@` has no handle.
pub fn extract_handle(input: &str) -> Option<&str> {
    if let Some(rest) = input.strip_prefix('@') {
        let handle = rest.trim();
        return (!handle.is_empty()).then_some(handle);
    }

    HANDLE_URL_RE
        .captures(input)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// The text to hand to channel search: the handle if the query names one, else the query itself.
pub fn search_text(query: &str) -> &str {
    extract_handle(query).unwrap_or(query)
}
