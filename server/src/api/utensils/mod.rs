pub mod categories;
pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use crate::AppState;
use axum::routing::{get, put};
use axum::Router;
use utoipa::OpenApi;

/// Known utensil categories, in display order.
pub const UTENSIL_CATEGORIES: &[&str] = &[
    "Cookware",
    "Bakeware",
    "Knives",
    "Utensils",
    "Appliances",
    "Measuring",
    "Prep Tools",
    "Storage",
    "Other",
];

/// Returns the router for /api/utensils endpoints (mounted at /api/utensils)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_utensils).post(create::add_utensil))
        .route("/categories", get(categories::list_categories))
        .route(
            "/{id}",
            put(update::update_utensil).delete(delete::delete_utensil),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_utensils,
        create::add_utensil,
        update::update_utensil,
        delete::delete_utensil,
        categories::list_categories
    ),
    components(schemas(
        list::UtensilListResponse,
        list::UtensilItem,
        create::AddUtensilRequest,
        create::AddUtensilResponse,
        update::UpdateUtensilRequest,
        categories::CategoriesResponse,
    ))
)]
pub struct ApiDoc;
