pub mod ask;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/assistant endpoints (mounted at /api/assistant)
pub fn router() -> Router<AppState> {
    Router::new().route("/ask", post(ask::ask))
}

#[derive(OpenApi)]
#[openapi(
    paths(ask::ask),
    components(schemas(
        ask::AskRequest,
        ask::AskResponse,
        ask::RecipeOut,
        ask::NutritionOut,
    ))
)]
pub struct ApiDoc;
