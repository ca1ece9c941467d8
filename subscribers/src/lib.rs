//! Look up a YouTube channel's subscriber count from whatever a user typed.
//!
//! A query can be a channel URL, a video URL, an `@handle`, or just a channel's name. See
//! [`resolve`] for how a query is turned into a channel, and [`server`] for the HTTP endpoint.

pub mod config;
pub mod error;
pub mod extract;
pub mod resolve;
pub mod server;
pub mod youtube_api;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::{LookupError, NotFound};
pub use resolve::{ChannelSummary, Subscribers, lookup};
pub use youtube_api::{YouTubeClient, YouTubeDataApi};
