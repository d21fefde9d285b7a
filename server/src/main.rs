mod api;
mod auth;
mod context;
mod db;
mod history;
mod models;
mod schema;

use axum::extract::{FromRef, MatchedPath};
use axum::http::Request;
use axum::routing::get;
use axum::{middleware, Json, Router};
use platewise_core::ai::{AiClient, FakeAiClient, OpenRouterClient};
use platewise_core::cache::ImageCache;
use platewise_core::images::{FakeImageProvider, ImageProvider, StabilityProvider};
use platewise_core::{Assistant, AssistantConfig};
use std::env;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Application state shared across all handlers.
///
/// Every client in here is constructed once at startup; nothing is lazily
/// initialized behind a global.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<db::DbPool>,
    pub assistant: Arc<Assistant>,
}

impl FromRef<AppState> for Arc<db::DbPool> {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<Assistant> {
    fn from_ref(state: &AppState) -> Self {
        state.assistant.clone()
    }
}

fn init_telemetry() {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Build the assistant from environment configuration. Falls back to fakes
/// when the provider keys are not set, so local development works offline.
fn build_assistant() -> Assistant {
    let ai: Box<dyn AiClient> = match OpenRouterClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model_name(), "Using OpenRouter completions");
            Box::new(client)
        }
        Err(e) => {
            tracing::warn!("Completion provider not configured ({}), using fake", e);
            Box::new(FakeAiClient::default())
        }
    };

    let images: Arc<dyn ImageProvider> = match StabilityProvider::from_env() {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            tracing::warn!("Image provider not configured ({}), using fake", e);
            Arc::new(FakeImageProvider::new())
        }
    };

    Assistant::new(ai, images, ImageCache::from_env(), AssistantConfig::default())
}

#[tokio::main]
async fn main() {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi().to_pretty_json().unwrap();
        println!("{}", spec);
        return;
    }

    dotenvy::dotenv().ok();
    init_telemetry();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let state = AppState {
        pool: Arc::new(db::create_pool(&database_url)),
        assistant: Arc::new(build_assistant()),
    };

    // Public routes (no auth required)
    let public_router = api::public::router();

    // Protected routes (auth required)
    let protected_router = Router::new()
        .nest("/api/assistant", api::assistant::router())
        .nest("/api/meals", api::meals::router())
        .nest("/api/plans", api::plans::router())
        .nest("/api/pantry", api::pantry::router())
        .nest("/api/grocery", api::grocery::router())
        .nest("/api/utensils", api::utensils::router())
        .nest("/api/profile", api::profile::router())
        .layer(middleware::from_fn_with_state(
            state.pool.clone(),
            auth::require_auth,
        ));

    let app = Router::new()
        .merge(public_router)
        .merge(protected_router)
        .route("/api-docs/openapi.json", get(|| async { Json(api::openapi()) }))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        // Mobile clients and local testing hit the API cross-origin
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    // Don't create a span at all for noisy endpoints
                    if matched_path == "/health" {
                        tracing::trace_span!("http_request")
                    } else {
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            path = %matched_path,
                        )
                    }
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        // Skip logging for noisy endpoints (trace-level spans)
                        if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
                            return;
                        }
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        );

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());
    tracing::info!("OpenAPI spec available at http://localhost:8000/api-docs/openapi.json");

    axum::serve(listener, app).await.unwrap();
}
