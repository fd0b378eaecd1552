// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::broadcast_notifier::BroadcastNotifier;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::mock_analysis::MockAnalysisProvider;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create adapters (infrastructure layer)
    let provider = Arc::new(MockAnalysisProvider::new(
        config.analysis.delay_ms,
        config.analysis.series_points,
    ));
    let notifier = BroadcastNotifier::new(config.notifications.capacity);

    // Create services (application layer)
    let dashboard_service = DashboardService::new(
        provider,
        Arc::new(notifier.clone()),
        config.upload.max_bytes,
    );

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        notifier,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config.server.bind_addr.parse()?;
    tracing::info!("Starting structural-monitor service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
