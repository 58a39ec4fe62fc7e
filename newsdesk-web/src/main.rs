//! newsdesk-web - news search front-end
//!
//! Serves a search form, forwards queries to the news API and renders
//! paginated results.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use newsdesk_common::config::{ConfigOverrides, TomlConfig};
use newsdesk_common::{ApiKey, Settings};
use newsdesk_web::newsapi::{build_http_client, NewsClient, MAX_PAGE_SIZE};
use newsdesk_web::{build_router, AppState};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for newsdesk-web
#[derive(Parser, Debug)]
#[command(name = "newsdesk-web")]
#[command(about = "Web front-end for news search")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "NEWSDESK_HOST")]
    host: Option<String>,

    /// News API key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Articles per page (at most 100)
    #[arg(long, env = "NEWSDESK_PAGE_SIZE")]
    page_size: Option<u32>,

    /// News API base URL
    #[arg(long, env = "NEWSDESK_BASE_URL")]
    base_url: Option<String>,

    /// Directory served under /assets
    #[arg(long, env = "NEWSDESK_ASSETS_DIR")]
    assets_dir: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "NEWSDESK_CONFIG")]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            api_key: self.api_key.clone().map(ApiKey::new),
            page_size: self.page_size,
            base_url: self.base_url.clone(),
            assets_dir: self.assets_dir.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads the environment
    let dotenv_result = dotenv::dotenv();

    let args = Args::parse();

    let file_config =
        TomlConfig::discover(args.config.as_deref()).context("Failed to load config file")?;

    // Resolved before tracing starts so the merged log level applies;
    // anyhow reports a failure here on stderr.
    let settings = Settings::resolve(args.overrides(), file_config)
        .context("Failed to resolve configuration")?;

    init_tracing(&settings.log_level);

    info!("Starting newsdesk-web v{}", env!("CARGO_PKG_VERSION"));

    match dotenv_result {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(_) => warn!("No .env file loaded"),
    }

    if settings.page_size > MAX_PAGE_SIZE {
        warn!(
            "Page size {} exceeds upstream limit, using {}",
            settings.page_size, MAX_PAGE_SIZE
        );
    }

    let http = build_http_client(settings.request_timeout)
        .context("Failed to build HTTP client")?;
    let news = NewsClient::new(http, settings.api_key.clone(), settings.page_size)
        .with_base_url(&settings.base_url)
        .context("Invalid news API base URL")?;

    info!(
        base_url = %news.base_url(),
        page_size = news.page_size(),
        timeout_secs = settings.request_timeout.as_secs(),
        "News API client ready"
    );

    let state = AppState::new(news, &settings.assets_dir);
    let app = build_router(state);

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;

    info!("newsdesk-web listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Install the global subscriber; `RUST_LOG` overrides `log_level`
fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "newsdesk_web={0},newsdesk_common={0},tower_http={0}",
            log_level
        )
        .into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolves on the first of Ctrl+C or SIGTERM
///
/// A listener that cannot be installed is logged and then never fires, so
/// the server keeps running on the remaining one.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Ctrl+C listener unavailable");
            std::future::pending::<()>().await;
        }
        "interrupt"
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal as unix_signal, SignalKind};

        match unix_signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "SIGTERM listener unavailable");
                std::future::pending::<()>().await;
            }
        }
        "terminate"
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&str>();

    let reason = tokio::select! {
        reason = interrupt => reason,
        reason = terminate => reason,
    };

    info!(signal = reason, "Stopping listener, draining in-flight requests");
}
