//! YouTube Data API v3 client library.
//!
//! This module provides a small client for the public, read-only parts of the YouTube Data API
//! v3 that are needed to go from "something a user typed" to a channel's statistics:
//!
//! - [`videos`]: `videos.list`, to find the channel that uploaded a video
//! - [`search`]: `search.list`, to find a channel by name or handle
//! - [`channels`]: `channels.list`, to fetch a channel's title, thumbnails, and statistics
//!
//! All response types model every field as optional. YouTube omits fields freely (most notably
//! `subscriberCount` for channels that hide it), so callers check for presence explicitly.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use youtube_subscribers::youtube_api::{YouTubeClient, YouTubeDataApi, DEFAULT_BASE_URL};
//!
//! # async fn example() -> eyre::Result<()> {
//! let client = YouTubeClient::new("API_KEY", DEFAULT_BASE_URL, reqwest::Client::new());
//! let channels = client.list_channels("UC_x5XG1OV2P6uZZ5FSM9Ttw").await?;
//! for channel in channels.items {
//!     println!("{:?}", channel.snippet.and_then(|s| s.title));
//! }
//! # Ok(())
//! # }
//! ```

use std::future::Future;

pub mod channels;
pub mod client;
pub mod search;
pub mod videos;

// Re-export main types for convenience
pub use client::{ApiError, DEFAULT_BASE_URL, YouTubeClient};

pub use channels::{
    Channel, ChannelListResponse, ChannelSnippet, ChannelStatistics, Count, Thumbnail, Thumbnails,
};
pub use search::{SearchListResponse, SearchResult};
pub use videos::{Video, VideoListResponse};

/// The YouTube Data API calls needed to resolve a channel.
///
/// [`YouTubeClient`] is the real implementation. The channel resolver and the HTTP server are
/// generic over this trait so that they can be exercised without the network.
pub trait YouTubeDataApi {
    /// `videos.list` with `part=snippet` for a single video ID.
    fn list_videos(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<VideoListResponse, ApiError>> + Send;

    /// `search.list` restricted to channels, returning at most one result.
    fn search_channels(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<SearchListResponse, ApiError>> + Send;

    /// `channels.list` with `part=snippet,statistics` for a single channel ID.
    fn list_channels(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = Result<ChannelListResponse, ApiError>> + Send;
}
