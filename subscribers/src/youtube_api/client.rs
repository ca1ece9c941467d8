//! Core YouTube API client functionality.

use crate::config::Config;
use crate::youtube_api::{
    YouTubeDataApi, channels::ChannelListResponse, search::SearchListResponse,
    videos::VideoListResponse,
};
use eyre::Context;
use serde::de::DeserializeOwned;
use tracing::instrument;

/// Base URL of the YouTube Data API v3.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Message used when YouTube rejects a request without saying why.
const GENERIC_UPSTREAM_MESSAGE: &str = "YouTube API error";

/// Failure talking to the YouTube Data API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// YouTube answered with a non-success status.
    ///
    /// `message` is the `error.message` from YouTube's error payload when there is one.
    #[error("{message}")]
    Upstream {
        status: reqwest::StatusCode,
        message: String,
    },
    /// The request never got a response.
    #[error("{0}")]
    Transport(reqwest::Error),
    /// The response was not the JSON we expected.
    #[error("invalid response from YouTube API: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the public, API-key authenticated parts of the YouTube Data API v3.
///
/// The key is sent as the `key` query parameter on every request. It never appears in logs or in
/// error messages.
#[derive(Clone)]
pub struct YouTubeClient {
    /// API key for the Google Cloud project.
    api_key: String,
    /// Base URL of the API, without a trailing slash.
    base_url: String,
    /// HTTP client for API requests
    client: reqwest::Client,
}

impl std::fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl YouTubeClient {
    /// Creates a new client for the API rooted at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The YouTube Data API key
    /// * `base_url` - Where the API lives, usually [`DEFAULT_BASE_URL`]
    /// * `client` - Shared HTTP client for making API requests
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Builds a client from the service configuration.
    ///
    /// Returns `Ok(None)` if no API key is configured. Lookups cannot be served in that case, but
    /// the rest of the service can still run and report the misconfiguration.
    pub fn from_config(config: &Config) -> eyre::Result<Option<Self>> {
        let Some(api_key) = config.api_key.as_deref() else {
            return Ok(None);
        };

        let client = reqwest::ClientBuilder::new()
            // SSRF no thank you.
            .redirect(reqwest::redirect::Policy::none())
            .timeout(config.request_timeout)
            .build()
            .context("build HTTP client for YouTube API")?;

        Ok(Some(Self::new(api_key, &config.api_base_url, client)))
    }

    /// Issues a GET to `endpoint` and returns the body as JSON.
    ///
    /// The body is parsed as JSON regardless of status. On a non-success status, the message
    /// from YouTube's error payload (`error.message`) is surfaced in [`ApiError::Upstream`].
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The API resource, e.g. `channels`
    /// * `query_params` - Query parameters, not including the API key
    #[instrument(skip(self), level = tracing::Level::TRACE)]
    pub async fn fetch_json(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(query_params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            // the URL carries the API key
            .map_err(|e| ApiError::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.without_url()))?;
        let json = serde_json::from_slice::<serde_json::Value>(&body);

        if !status.is_success() {
            let message = json
                .ok()
                .as_ref()
                .and_then(|j| j.pointer("/error/message"))
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty())
                .unwrap_or(GENERIC_UPSTREAM_MESSAGE)
                .to_string();
            tracing::warn!(endpoint, %status, error = %message, "YouTube API request failed");
            return Err(ApiError::Upstream { status, message });
        }

        Ok(json?)
    }

    /// Like [`Self::fetch_json`], but decodes into one of the typed response structures.
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let json = self.fetch_json(endpoint, query_params).await?;
        Ok(serde_json::from_value(json)?)
    }
}

impl YouTubeDataApi for YouTubeClient {
    /// Uses the `videos.list` API to fetch the snippet of a single video.
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self))]
    async fn list_videos(&self, video_id: &str) -> Result<VideoListResponse, ApiError> {
        let query_params = [("part", "snippet"), ("id", video_id)];
        let videos: VideoListResponse = self.fetch("videos", &query_params).await?;

        tracing::debug!(
            video_id,
            returned_items = videos.items.len(),
            "fetched video snippet"
        );

        Ok(videos)
    }

    /// Uses the `search.list` API to find the single best channel match for `text`.
    ///
    /// Search is expensive in quota terms (100 units per call), so it's only used when the query
    /// names no channel or video directly.
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    #[instrument(skip(self))]
    async fn search_channels(&self, text: &str) -> Result<SearchListResponse, ApiError> {
        let query_params = [
            ("part", "snippet"),
            ("type", "channel"),
            ("maxResults", "1"),
            ("q", text),
        ];
        let results: SearchListResponse = self.fetch("search", &query_params).await?;

        tracing::debug!(
            returned_items = results.items.len(),
            "searched for channel"
        );

        Ok(results)
    }

    /// Uses the `channels.list` API to fetch the snippet and statistics of a channel.
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self))]
    async fn list_channels(&self, channel_id: &str) -> Result<ChannelListResponse, ApiError> {
        let query_params = [("part", "snippet,statistics"), ("id", channel_id)];
        let channels: ChannelListResponse = self.fetch("channels", &query_params).await?;

        tracing::debug!(
            channel_id,
            returned_items = channels.items.len(),
            "fetched channel details"
        );

        Ok(channels)
    }
}
