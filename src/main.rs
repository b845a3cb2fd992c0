use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kibitz::api;
use kibitz::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("kibitz=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    match &config.engine.path {
        Some(path) if path.exists() => {
            info!(path = %path.display(), depth = config.engine.depth, "engine binary configured");
        }
        Some(path) => {
            warn!(path = %path.display(), "STOCKFISH_PATH does not exist, engine play disabled");
        }
        None => warn!("STOCKFISH_PATH not set, engine play disabled"),
    }

    let addr = config.addr;
    let app = api::router(config);

    let listener = TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
