pub mod create;
pub mod delete;
pub mod list;

use crate::AppState;
use axum::routing::{delete, get};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/grocery endpoints (mounted at /api/grocery)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list::list_grocery_items).post(create::add_grocery_item),
        )
        .route("/{id}", delete(delete::delete_grocery_item))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_grocery_items,
        create::add_grocery_item,
        delete::delete_grocery_item
    ),
    components(schemas(
        list::GroceryListResponse,
        list::GroceryItem,
        create::AddGroceryItemRequest,
        create::AddGroceryItemResponse,
    ))
)]
pub struct ApiDoc;
