pub mod create;
pub mod delete;
pub mod list;

use crate::AppState;
use axum::routing::{delete, get};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/meals endpoints (mounted at /api/meals)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_meals).post(create::create_meal))
        .route("/{id}", delete(delete::delete_meal))
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_meals, create::create_meal, delete::delete_meal),
    components(schemas(
        list::MealListResponse,
        list::MealItem,
        create::CreateMealRequest,
        create::CreateMealResponse,
    ))
)]
pub struct ApiDoc;
