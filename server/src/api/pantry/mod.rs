pub mod create;
pub mod delete;
pub mod list;

use crate::AppState;
use axum::routing::{delete, get};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/pantry endpoints (mounted at /api/pantry)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_pantry_items).post(create::add_pantry_item))
        .route("/{id}", delete(delete::delete_pantry_item))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_pantry_items,
        create::add_pantry_item,
        delete::delete_pantry_item
    ),
    components(schemas(
        list::PantryListResponse,
        list::PantryItem,
        create::AddPantryItemRequest,
        create::AddPantryItemResponse,
    ))
)]
pub struct ApiDoc;
