use eyre::Context;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_subscribers::server::{self, AppState};
use youtube_subscribers::{Config, YouTubeClient};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stdout().is_terminal())
        .init();

    let config = Config::from_env().context("load configuration")?;
    let client = YouTubeClient::from_config(&config).context("set up YouTube API client")?;
    let state = Arc::new(AppState::new(client));

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("bind to {}", config.bind_address))?;
    let addr = listener.local_addr().context("get local address")?;
    tracing::info!(%addr, path = server::LOOKUP_PATH, "listening");

    tokio::select! {
        r = server::serve(listener, state) => r,
        r = tokio::signal::ctrl_c() => {
            r.context("listen for ctrl-c")?;
            tracing::info!("shutting down");
            Ok(())
        }
    }
}
