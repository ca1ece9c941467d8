//! YouTube Search API types.

use serde::Deserialize;
use std::collections::VecDeque;

/// Response structure for the `search.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list>
#[derive(Debug, Default, Deserialize)]
pub struct SearchListResponse {
    /// The search results, best match first.
    #[serde(default)]
    pub items: VecDeque<SearchResult>,
}

/// A single search result.
///
/// See: <https://developers.google.com/youtube/v3/docs/search#resource>
#[derive(Debug, Default, Deserialize)]
pub struct SearchResult {
    /// Identifies the resource that matched the search.
    pub id: Option<SearchResultId>,
    pub snippet: Option<SearchResultSnippet>,
}

/// The resource a search result points at.
///
/// Only one of the ID fields is set, depending on the kind of resource.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResultId {
    /// Set if the matched resource is a channel.
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
}

/// Basic details about a search result.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResultSnippet {
    /// The channel that published the resource, or the channel itself for channel results.
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
}

impl SearchListResponse {
    /// The channel of the top search result, if any.
    ///
    /// Prefers the snippet's `channelId`; channel results also carry it in `id.channelId`.
    pub fn first_channel_id(self) -> Option<String> {
        let first = self.items.into_iter().next()?;
        first
            .snippet
            .and_then(|s| s.channel_id)
            .or_else(|| first.id.and_then(|id| id.channel_id))
            .filter(|id| !id.is_empty())
    }
}
