use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewUtensil;
use crate::schema::utensils;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddUtensilRequest {
    pub name: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AddUtensilResponse {
    pub id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/utensils",
    tag = "utensils",
    request_body = AddUtensilRequest,
    responses(
        (status = 201, description = "Utensil added", body = AddUtensilResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_utensil(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<AddUtensilRequest>,
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

    let result: Result<Uuid, diesel::result::Error> = diesel::insert_into(utensils::table)
        .values(NewUtensil {
            user_id: user.id,
            name: request.name.trim(),
            category,
        })
        .returning(utensils::id)
        .get_result(&mut conn);

    match result {
        Ok(id) => (StatusCode::CREATED, Json(AddUtensilResponse { id })).into_response(),
        Err(e) => {
            tracing::error!("Failed to add utensil: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to add utensil".to_string(),
                }),
            )
                .into_response()
        }
    }
}
