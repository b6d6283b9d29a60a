//! Roast.fm server entry point

use tracing::info;
use tracing_subscriber::EnvFilter;

use roastfm::{router, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("roastfm=info,tower_http=info")),
        )
        .init();

    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let addr = format!("0.0.0.0:{}", config.port);
    let app = router(AppState::new(config));

    info!("Roast.fm listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
