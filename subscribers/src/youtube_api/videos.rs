//! YouTube Videos API types.

use serde::Deserialize;
use std::collections::VecDeque;

/// Response structure for the `videos.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Default, Deserialize)]
pub struct VideoListResponse {
    /// A list of videos that match the request criteria.
    ///
    /// Empty when no video has the requested ID.
    #[serde(default)]
    pub items: VecDeque<Video>,
}

/// A `video` resource represents a YouTube video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Default, Deserialize)]
pub struct Video {
    pub snippet: Option<VideoSnippet>,
}

/// Basic details about the video.
///
/// Only the fields needed to find the uploading channel.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#snippet>
#[derive(Debug, Default, Deserialize)]
pub struct VideoSnippet {
    /// The ID of the channel that the video was uploaded to.
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
}

impl VideoListResponse {
    /// The uploading channel of the first returned video, if any.
    pub fn first_channel_id(self) -> Option<String> {
        self.items
            .into_iter()
            .next()
            .and_then(|v| v.snippet)
            .and_then(|s| s.channel_id)
            .filter(|id| !id.is_empty())
    }
}
