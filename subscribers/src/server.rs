//! The HTTP boundary of the lookup service.
//!
//! There is exactly one endpoint, `GET /api/subscribers?q=<query>`. Every outcome, including
//! failures, is reported as a JSON body: the [`ChannelSummary`] on success, `{ "error": "..." }`
//! otherwise.

use crate::error::LookupError;
use crate::resolve::{self, ChannelSummary};
use crate::youtube_api::YouTubeDataApi;
use eyre::Context;
use http::header::{ALLOW, CACHE_CONTROL, CONTENT_TYPE};
use http::{HeaderValue, Method, StatusCode, Uri};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::service::service_fn;
use hyper::{Request, Response, body};
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Path of the lookup endpoint.
pub const LOOKUP_PATH: &str = "/api/subscribers";

/// Lets a CDN serve a lookup for 20 seconds, and a stale one for another minute while it
/// refreshes. Each uncached lookup costs YouTube API quota.
const LOOKUP_CACHE_CONTROL: &str = "s-maxage=20, stale-while-revalidate=60";

/// State shared by all connections.
#[derive(Debug)]
pub struct AppState<A> {
    /// The YouTube API client, or `None` if no API key is configured.
    api: Option<A>,
}

impl<A> AppState<A> {
    pub fn new(api: Option<A>) -> Self {
        if api.is_none() {
            tracing::warn!("no YouTube API key configured, all lookups will fail");
        }
        Self { api }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Validates a raw `q` parameter and looks up the channel it names.
///
/// The query is checked before the configuration, so an empty query is always the caller's fault.
pub async fn handle_lookup<A: YouTubeDataApi>(
    api: Option<&A>,
    raw_query: Option<&str>,
) -> Result<ChannelSummary, LookupError> {
    let query = raw_query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or(LookupError::MissingQuery)?;
    let api = api.ok_or(LookupError::MissingApiKey)?;
    resolve::lookup(api, query).await
}

/// Produces the response for a single request.
pub async fn route<A: YouTubeDataApi>(
    state: &AppState<A>,
    method: &Method,
    uri: &Uri,
) -> Response<Full<Bytes>> {
    if uri.path() != LOOKUP_PATH {
        return json_response(
            StatusCode::NOT_FOUND,
            &ErrorBody {
                error: "Not found".to_string(),
            },
        );
    }

    // HEAD is refused too: answering it would mean a full lookup, spending quota for no body.
    if method != Method::GET {
        let mut response = json_response(
            StatusCode::METHOD_NOT_ALLOWED,
            &ErrorBody {
                error: "Method not allowed".to_string(),
            },
        );
        response
            .headers_mut()
            .insert(ALLOW, HeaderValue::from_static("GET"));
        return response;
    }

    let q = query_param(uri, "q");
    match handle_lookup(state.api.as_ref(), q.as_deref()).await {
        Ok(summary) => {
            let mut response = json_response(StatusCode::OK, &summary);
            response
                .headers_mut()
                .insert(CACHE_CONTROL, HeaderValue::from_static(LOOKUP_CACHE_CONTROL));
            response
        }
        Err(e) => error_response(&e),
    }
}

/// The first value of the query parameter `name`, percent-decoded.
fn query_param(uri: &Uri, name: &str) -> Option<String> {
    form_urlencoded::parse(uri.query().unwrap_or("").as_bytes())
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

fn error_response(error: &LookupError) -> Response<Full<Bytes>> {
    match error {
        LookupError::Upstream(e) => tracing::warn!(error = %e, "lookup failed upstream"),
        LookupError::MissingApiKey | LookupError::Unexpected(_) => {
            tracing::error!(error = %error, "lookup failed")
        }
        LookupError::MissingQuery | LookupError::NotFound(_) => {
            tracing::debug!(error = %error, "lookup rejected")
        }
    }

    json_response(
        error.status(),
        &ErrorBody {
            error: error.message(),
        },
    )
}

fn json_response(status: StatusCode, body: &impl Serialize) -> Response<Full<Bytes>> {
    let (status, body) = match serde_json::to_vec(body) {
        Ok(body) => (status, body),
        Err(e) => {
            let error = LookupError::Unexpected(e.to_string());
            tracing::error!(error = %error, "failed to serialize response");
            let fallback = serde_json::json!({ "error": error.message() }).to_string();
            (error.status(), fallback.into_bytes())
        }
    };

    let mut response = Response::new(Full::<Bytes>::from(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// Accepts connections on `listener` forever, serving each on its own task.
pub async fn serve<A>(listener: TcpListener, state: Arc<AppState<A>>) -> eyre::Result<()>
where
    A: YouTubeDataApi + Send + Sync + 'static,
{
    loop {
        let (conn, peer) = listener.accept().await.context("accept connection")?;
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            let conn = hyper_util::rt::TokioIo::new(conn);
            let service = service_fn(move |req: Request<body::Incoming>| {
                let state = Arc::clone(&state);
                let method = req.method().clone();
                let uri = req.uri().clone();
                async move {
                    let response = route(&state, &method, &uri).await;
                    tracing::info!(
                        %method,
                        path = uri.path(),
                        status = response.status().as_u16(),
                        "handled request"
                    );
                    Ok::<_, Infallible>(response)
                }
            });
            if let Err(e) = hyper::server::conn::http1::Builder::new()
                .serve_connection(conn, service)
                .await
            {
                tracing::debug!(%peer, error = %e, "connection closed with error");
            }
        });
    }
}
