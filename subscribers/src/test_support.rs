//! Test doubles for the YouTube Data API.

use crate::youtube_api::{
    ApiError, ChannelListResponse, SearchListResponse, VideoListResponse, YouTubeDataApi,
};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::service::service_fn;
use hyper::{Request, Response, body};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// A call made against [`FakeYouTube`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Videos(String),
    Search(String),
    Channels(String),
}

/// In-memory [`YouTubeDataApi`] that replays canned JSON and records every call.
///
/// Calling an endpoint that has no canned response panics, so tests also assert which
/// endpoints were *not* called.
#[derive(Debug, Default)]
pub(crate) struct FakeYouTube {
    videos: Option<serde_json::Value>,
    search: Option<serde_json::Value>,
    channels: Option<serde_json::Value>,
    search_error: Mutex<Option<ApiError>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeYouTube {
    pub(crate) fn with_videos(mut self, response: serde_json::Value) -> Self {
        self.videos = Some(response);
        self
    }

    pub(crate) fn with_search(mut self, response: serde_json::Value) -> Self {
        self.search = Some(response);
        self
    }

    pub(crate) fn with_channels(mut self, response: serde_json::Value) -> Self {
        self.channels = Some(response);
        self
    }

    /// Makes the next search fail with `error`.
    pub(crate) fn with_search_error(self, error: ApiError) -> Self {
        *self.search_error.lock().unwrap() = Some(error);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn respond<T: DeserializeOwned>(
        &self,
        call: Call,
        response: &Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        self.calls.lock().unwrap().push(call.clone());
        let Some(response) = response else {
            panic!("unexpected YouTube API call: {call:?}");
        };
        Ok(serde_json::from_value(response.clone())?)
    }
}

impl YouTubeDataApi for FakeYouTube {
    async fn list_videos(&self, video_id: &str) -> Result<VideoListResponse, ApiError> {
        self.respond(Call::Videos(video_id.to_string()), &self.videos)
    }

    async fn search_channels(&self, text: &str) -> Result<SearchListResponse, ApiError> {
        if let Some(error) = self.search_error.lock().unwrap().take() {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Search(text.to_string()));
            return Err(error);
        }
        self.respond(Call::Search(text.to_string()), &self.search)
    }

    async fn list_channels(&self, channel_id: &str) -> Result<ChannelListResponse, ApiError> {
        self.respond(Call::Channels(channel_id.to_string()), &self.channels)
    }
}

/// A local HTTP server standing in for the YouTube Data API.
///
/// Each route maps a request path (e.g. `/channels`) to a status code and body. Unknown paths get
/// a 404 with a YouTube-style error payload.
pub(crate) struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Serves JSON bodies.
    pub(crate) async fn start(routes: Vec<(&'static str, u16, serde_json::Value)>) -> Self {
        Self::start_raw(
            routes
                .into_iter()
                .map(|(path, status, body)| (path, status, body.to_string()))
                .collect(),
        )
        .await
    }

    /// Serves bodies verbatim, for when YouTube (or something in front of it) doesn't send JSON.
    pub(crate) async fn start_raw(routes: Vec<(&'static str, u16, String)>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");

        let routes: Arc<HashMap<&'static str, (u16, String)>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, status, body)| (path, (status, body)))
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((conn, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<body::Incoming>| {
                        recorded.lock().unwrap().push(req.uri().to_string());
                        let (status, body) = routes.get(req.uri().path()).cloned().unwrap_or((
                            404,
                            r#"{"error":{"code":404,"message":"Not Found"}}"#.to_string(),
                        ));
                        async move {
                            let mut response = Response::new(Full::<Bytes>::from(body));
                            *response.status_mut() =
                                http::StatusCode::from_u16(status).expect("valid stub status");
                            Ok::<_, Infallible>(response)
                        }
                    });
                    let _ = hyper::server::conn::http1::Builder::new()
                        .serve_connection(hyper_util::rt::TokioIo::new(conn), service)
                        .await;
                });
            }
        });

        Self { addr, requests }
    }

    /// Accepts connections but never answers on them.
    pub(crate) async fn start_unresponsive() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");

        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((conn, _)) = listener.accept().await {
                held.push(conn);
            }
        });

        Self {
            addr,
            requests: Arc::default(),
        }
    }

    pub(crate) fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Path and query of every request received so far, in order.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}
