// Portico web server: hosted-auth sign-in flow around a protected dashboard.
// Decision: session handles are built fresh per request; only the config and
// the HTTP client to the auth service are shared across requests

mod auth_flow;
mod origin;
mod pages;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use axum::{response::Redirect, routing::get, Json, Router};
use portico_auth::{AuthConfig, HttpSessionService, SessionService};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// App state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AuthConfig>,
    pub service: Arc<dyn SessionService>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portico_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("portico-web starting...");

    let config = AuthConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(auth_url = %config.auth_url, "Hosted auth service configured");
    if let Some(site_url) = &config.site_url {
        tracing::info!(site_url = %site_url, "Site origin override configured");
    }

    let bind_addr = config.bind_addr.clone();
    let service: Arc<dyn SessionService> =
        Arc::new(HttpSessionService::new(&config.auth_url, &config.api_key));
    let state = AppState {
        config: Arc::new(config),
        service,
    };

    let app = router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Build the full router (extracted for testing)
fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // The dashboard guard sorts out where a visitor belongs.
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .merge(pages::routes(state.clone()))
        .merge(auth_flow::routes(state))
}
