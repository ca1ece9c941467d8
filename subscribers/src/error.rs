use crate::youtube_api::ApiError;
use http::StatusCode;

/// Why a channel lookup failed.
///
/// The `Display` output of each variant is the message returned to the caller.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Missing query q")]
    MissingQuery,
    #[error("Missing YT_API_KEY in server env variables")]
    MissingApiKey,
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error(transparent)]
    Upstream(#[from] ApiError),
    #[error("{0}")]
    Unexpected(String),
}

/// The resolution stage at which no channel could be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NotFound {
    /// The query was a video link, but YouTube returned no video (or no uploader) for it.
    #[error("Could not resolve channel from that video link.")]
    FromVideo,
    /// Channel search returned no results.
    #[error("Channel not found. Try another name or paste a channel/video URL.")]
    BySearch,
    /// A channel ID was found, but YouTube has no channel with that ID.
    #[error("Channel not found by ID.")]
    ById,
}

impl LookupError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingQuery => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingApiKey | Self::Upstream(_) | Self::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message to report to the caller.
    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.is_empty() {
            "Unexpected error".to_string()
        } else {
            message
        }
    }
}
