//! Resolution of a free-form query into a channel summary.
//!
//! A query is resolved to a channel ID by the first of these that applies:
//!
//! 1. a `/channel/UC...` URL names the channel directly;
//! 2. a video URL names the channel that uploaded the video;
//! 3. anything else is handed to channel search, using the handle if the query contains one.
//!
//! A video link that leads nowhere does not fall through to search: the user clearly meant that
//! video, and searching for the URL text would only produce a misleading match.
//!
//! The resolved ID is then used to fetch the channel's details in a single `channels.list` call.

use crate::error::{LookupError, NotFound};
use crate::extract;
use crate::youtube_api::{Channel, YouTubeDataApi};
use serde::{Serialize, Serializer};
use tracing::instrument;

/// Title used for channels that somehow have none.
const FALLBACK_TITLE: &str = "Channel";

/// What a lookup returns to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub title: String,
    pub subscribers: Subscribers,
    pub thumbnail: Option<String>,
    pub channel_url: String,
}

/// A channel's subscriber count, unless the channel owner has chosen to hide it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscribers {
    Count(u64),
    Hidden,
}

impl Serialize for Subscribers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Count(n) => serializer.serialize_u64(*n),
            Self::Hidden => serializer.serialize_str("Hidden"),
        }
    }
}

/// Canonical URL of the channel with the given ID.
pub fn channel_url(channel_id: &str) -> String {
    format!("https://www.youtube.com/channel/{channel_id}")
}

/// Resolves `query` to a channel and summarizes it.
///
/// `query` is expected to already be trimmed and non-empty.
#[instrument(skip(api))]
pub async fn lookup<A: YouTubeDataApi>(
    api: &A,
    query: &str,
) -> Result<ChannelSummary, LookupError> {
    let channel_id = resolve_channel_id(api, query).await?;
    let channel = fetch_channel(api, &channel_id).await?;
    Ok(summarize(&channel_id, channel))
}

/// Runs the resolution chain and returns the channel ID it settles on.
pub async fn resolve_channel_id<A: YouTubeDataApi>(
    api: &A,
    query: &str,
) -> Result<String, LookupError> {
    if let Some(channel_id) = extract::extract_channel_id_from_channel_url(query) {
        tracing::debug!(channel_id, "query is a channel URL");
        return Ok(channel_id.to_string());
    }

    if let Some(video_id) = extract::extract_video_id(query) {
        tracing::debug!(video_id, "query is a video URL");
        return channel_id_from_video(api, &video_id).await;
    }

    channel_id_from_search(api, extract::search_text(query)).await
}

async fn channel_id_from_video<A: YouTubeDataApi>(
    api: &A,
    video_id: &str,
) -> Result<String, LookupError> {
    let channel_id = api
        .list_videos(video_id)
        .await?
        .first_channel_id()
        .ok_or(NotFound::FromVideo)?;
    tracing::debug!(video_id, channel_id, "resolved channel from video");
    Ok(channel_id)
}

async fn channel_id_from_search<A: YouTubeDataApi>(
    api: &A,
    text: &str,
) -> Result<String, LookupError> {
    let channel_id = api
        .search_channels(text)
        .await?
        .first_channel_id()
        .ok_or(NotFound::BySearch)?;
    tracing::debug!(text, channel_id, "resolved channel from search");
    Ok(channel_id)
}

async fn fetch_channel<A: YouTubeDataApi>(
    api: &A,
    channel_id: &str,
) -> Result<Channel, LookupError> {
    let channel = api
        .list_channels(channel_id)
        .await?
        .items
        .pop_front()
        .ok_or(NotFound::ById)?;
    Ok(channel)
}

/// Builds the summary for a channel fetched by `channel_id`.
pub fn summarize(channel_id: &str, channel: Channel) -> ChannelSummary {
    let statistics = channel.statistics.unwrap_or_default();
    let snippet = channel.snippet.unwrap_or_default();

    let subscribers = match statistics.subscriber_count {
        Some(_) if statistics.hidden_subscriber_count == Some(true) => Subscribers::Hidden,
        None => Subscribers::Hidden,
        Some(ref count) => match count.value() {
            Some(n) => Subscribers::Count(n),
            None => {
                tracing::warn!(channel_id, ?count, "unparseable subscriber count");
                Subscribers::Hidden
            }
        },
    };

    let thumbnail = snippet
        .thumbnails
        .as_ref()
        .and_then(|t| t.preferred_url())
        .map(str::to_string);

    let title = snippet
        .title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());

    ChannelSummary {
        title,
        subscribers,
        thumbnail,
        channel_url: channel_url(channel_id),
    }
}
