use eyre::Context;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_subscribers::server::handle_lookup;
use youtube_subscribers::{Config, YouTubeClient};

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    let config = Config::from_env().context("load configuration")?;
    let client = YouTubeClient::from_config(&config).context("set up YouTube API client")?;

    let output = match handle_lookup(client.as_ref(), Some(query.as_str())).await {
        Ok(summary) => {
            let json = serde_json::to_string_pretty(&summary).context("serialize summary")?;
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let json = serde_json::json!({ "error": e.message() });
            println!("{json:#}");
            ExitCode::FAILURE
        }
    };

    Ok(output)
}
