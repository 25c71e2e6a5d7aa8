// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{sync::Arc, time::Duration};
use axum::{routing::{get, post}, Router};
use tokio::sync::{mpsc, watch};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard::Dashboard;
use crate::application::scheduler::{run_dashboard, IntervalTicker};
use crate::application::view::DashboardView;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::http_provider::HttpHealthProvider;
use crate::infrastructure::memory_document::MemoryDocument;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_dashboard, health_check, post_event, post_refresh};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;
    let profile = config.dashboard.variant.profile().with_settings(&config.dashboard);
    tracing::info!(
        dashboard = %profile.name,
        poll_ms = profile.poll_interval_ms,
        capacity = profile.capacity(),
        "Loaded dashboard profile"
    );

    // Create provider (infrastructure layer)
    let provider = Arc::new(HttpHealthProvider::new(
        &config.provider.base_url,
        profile.endpoints.clone(),
        Duration::from_millis(config.provider.timeout_ms),
    )?);

    // Host document with one canvas per sparkline
    let (width, height) = profile.sparkline_size;
    let mut document = MemoryDocument::new(config.dashboard.device_pixel_ratio);
    for metric in &profile.metrics {
        document.add_canvas(&metric.chart, width, height);
    }

    // Create dashboard (application layer)
    let ticker = IntervalTicker::new(profile.poll_interval());
    let dashboard = Dashboard::new(profile, document);
    let (publisher, view) = watch::channel(DashboardView::capture(&dashboard));
    let (commands, command_rx) = mpsc::channel(64);

    tokio::spawn(run_dashboard(dashboard, provider, ticker, command_rx, move |d| {
        publisher.send_replace(DashboardView::capture(d));
    }));

    let state = Arc::new(AppState { view, commands });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/events", post(post_event))
        .route("/dashboard/refresh", post(post_refresh))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server.listen;
    tracing::info!("Starting status-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
