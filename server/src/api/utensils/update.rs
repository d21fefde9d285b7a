use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::utensils;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateUtensilRequest {
    pub name: String,
    pub category: Option<String>,
}

#[utoipa::path(
    put,
    path = "/api/utensils/{id}",
    tag = "utensils",
    params(
        ("id" = Uuid, Path, description = "Utensil ID")
    ),
    request_body = UpdateUtensilRequest,
    responses(
        (status = 204, description = "Utensil updated"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Utensil not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_utensil(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUtensilRequest>,
) -> impl IntoResponse {
    if request.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Name cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let category = request.category.as_deref().unwrap_or("Other");

    let mut conn = get_conn!(pool);

    let updated = diesel::update(
        utensils::table
            .filter(utensils::id.eq(id))
            .filter(utensils::user_id.eq(user.id)),
    )
    .set((
        utensils::name.eq(request.name.trim()),
        utensils::category.eq(category),
    ))
    .execute(&mut conn);

    match updated {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Utensil not found".to_string(),
            }),
        )
            .into_response(),
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!("Failed to update utensil: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update utensil".to_string(),
                }),
            )
                .into_response()
        }
    }
}
