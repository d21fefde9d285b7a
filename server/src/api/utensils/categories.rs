use super::UTENSIL_CATEGORIES;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub categories: Vec<&'static str>,
}

#[utoipa::path(
    get,
    path = "/api/utensils/categories",
    tag = "utensils",
    responses(
        (status = 200, description = "List of utensil categories", body = CategoriesResponse),
        (status = 401, description = "Unauthorized", body = crate::api::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_categories() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(CategoriesResponse {
            categories: UTENSIL_CATEGORIES.to_vec(),
        }),
    )
}
