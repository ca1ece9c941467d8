//! YouTube Channels API types.

use serde::Deserialize;
use std::collections::VecDeque;

/// Response structure for the `channels.list` API call.
///
/// Contains the [`Channel`] resources that match the request criteria.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels/list>
#[derive(Debug, Default, Deserialize)]
pub struct ChannelListResponse {
    /// A list of channels that match the request criteria.
    #[serde(default)]
    pub items: VecDeque<Channel>,
}

/// A `channel` resource contains information about a YouTube channel.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#resource>
#[derive(Debug, Default, Deserialize)]
pub struct Channel {
    /// Contains basic details about the channel.
    pub snippet: Option<ChannelSnippet>,
    /// Contains statistics for the channel.
    pub statistics: Option<ChannelStatistics>,
}

/// The snippet object contains basic details about the channel.
///
/// This is a subset of the full snippet data available from the YouTube API,
/// containing only the fields currently needed by this implementation.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#snippet>
#[derive(Debug, Default, Deserialize)]
pub struct ChannelSnippet {
    /// The channel's title.
    pub title: Option<String>,
    /// Images associated with the channel, keyed by resolution.
    pub thumbnails: Option<Thumbnails>,
}

/// The available channel images.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#snippet.thumbnails>
#[derive(Debug, Default, Deserialize)]
pub struct Thumbnails {
    /// 88px by 88px.
    pub default: Option<Thumbnail>,
    /// 240px by 240px.
    pub medium: Option<Thumbnail>,
    /// 800px by 800px.
    pub high: Option<Thumbnail>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnail {
    pub url: Option<String>,
}

/// Statistics about the channel.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#statistics>
#[derive(Debug, Default, Deserialize)]
pub struct ChannelStatistics {
    /// The number of subscribers that the channel has.
    ///
    /// Omitted entirely when the channel owner hides it.
    #[serde(rename = "subscriberCount")]
    pub subscriber_count: Option<Count>,
    /// Whether the channel's subscriber count is publicly visible.
    #[serde(rename = "hiddenSubscriberCount")]
    pub hidden_subscriber_count: Option<bool>,
}

/// A count as YouTube reports it.
///
/// YouTube sends decimal strings, but a bare number is accepted too. Anything else is kept as-is
/// so an odd value cannot fail the whole response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Count {
    Number(u64),
    Text(String),
    Other(serde_json::Value),
}

impl Count {
    /// The count as an integer, if it is one.
    pub fn value(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Other(_) => None,
        }
    }
}

impl Thumbnails {
    /// The smallest available thumbnail URL, preferring `default`, then `medium`, then `high`.
    pub fn preferred_url(&self) -> Option<&str> {
        [&self.default, &self.medium, &self.high]
            .into_iter()
            .flatten()
            .filter_map(|t| t.url.as_deref())
            .find(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_channel_list_deserializes_partial_payloads() {
        let json = r#"{
            "kind": "youtube#channelListResponse",
            "items": [{
                "id": "UCabcdefghijklmnopqrst",
                "snippet": {
                    "title": "Example",
                    "publishedAt": "2010-01-01T00:00:00Z",
                    "thumbnails": {
                        "medium": { "url": "https://yt3.ggpht.com/medium.jpg", "width": 240, "height": 240 }
                    }
                },
                "statistics": { "viewCount": "100", "hiddenSubscriberCount": true }
            }]
        }"#;

        let response: ChannelListResponse = serde_json::from_str(json).unwrap();
        let channel = &response.items[0];
        let snippet = channel.snippet.as_ref().unwrap();
        let statistics = channel.statistics.as_ref().unwrap();

        assert_eq!(snippet.title.as_deref(), Some("Example"));
        assert_eq!(
            snippet.thumbnails.as_ref().unwrap().preferred_url(),
            Some("https://yt3.ggpht.com/medium.jpg")
        );
        assert_eq!(statistics.subscriber_count, None);
        assert_eq!(statistics.hidden_subscriber_count, Some(true));
    }

    #[test]
    fn test_subscriber_count_forms() {
        let count = |json: serde_json::Value| {
            let statistics: ChannelStatistics =
                serde_json::from_value(serde_json::json!({ "subscriberCount": json })).unwrap();
            statistics.subscriber_count.unwrap().value()
        };

        assert_eq!(count(serde_json::json!("12345")), Some(12345));
        assert_eq!(count(serde_json::json!(12345)), Some(12345));
        assert_eq!(count(serde_json::json!("lots")), None);
        assert_eq!(count(serde_json::json!(-1)), None);
        assert_eq!(count(serde_json::json!({ "weird": true })), None);
    }

    #[test]
    fn test_missing_items_is_empty() {
        let response: ChannelListResponse =
            serde_json::from_str(r#"{"kind": "youtube#channelListResponse"}"#).unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_thumbnail_preference_order() {
        let thumb = |url: &str| {
            Some(Thumbnail {
                url: Some(url.to_string()),
            })
        };

        let all = Thumbnails {
            default: thumb("d"),
            medium: thumb("m"),
            high: thumb("h"),
        };
        assert_eq!(all.preferred_url(), Some("d"));

        let high_only = Thumbnails {
            high: thumb("h"),
            ..Default::default()
        };
        assert_eq!(high_only.preferred_url(), Some("h"));

        assert_eq!(Thumbnails::default().preferred_url(), None);
    }
}
