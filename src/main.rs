// Prospect Dashboard - Web Server
//
// Read-only dashboard over pre-computed scoring artifacts. Startup fails
// fast when a required artifact is missing or fails its quality gates.

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use prospect_dashboard::config::Config;
use prospect_dashboard::loader::DataLoader;
use prospect_dashboard::server::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("prospect_dashboard=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();
    info!(
        data_dir = %config.data_dir.display(),
        listen_addr = %config.listen_addr,
        "starting prospect dashboard v{}",
        prospect_dashboard::VERSION
    );

    if let Err(e) = config.check_data_dir() {
        error!("{e}");
        std::process::exit(1);
    }

    let loader = Arc::new(DataLoader::new(config.data_dir.clone()));

    // Load required tables and run all gates before accepting traffic
    match loader.preflight() {
        Ok(report) => {
            info!(
                companies = report.companies,
                buildings = report.buildings,
                scored_companies = report.scored_companies,
                warnings = report.warnings.len(),
                "data preflight complete"
            );
        }
        Err(e) => {
            error!("startup aborted: {e}");
            std::process::exit(1);
        }
    }

    let app = router(AppState { loader });

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app)
        .await
        .context("server terminated")?;

    Ok(())
}
