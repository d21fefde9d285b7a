use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewPantryItem;
use crate::schema::pantry_items;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddPantryItemRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AddPantryItemResponse {
    pub id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/pantry",
    tag = "pantry",
    request_body = AddPantryItemRequest,
    responses(
        (status = 201, description = "Pantry item added", body = AddPantryItemResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_pantry_item(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<AddPantryItemRequest>,
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

    let mut conn = get_conn!(pool);

    let result: Result<Uuid, diesel::result::Error> = diesel::insert_into(pantry_items::table)
        .values(NewPantryItem {
            user_id: user.id,
            name: request.name.trim(),
        })
        .returning(pantry_items::id)
        .get_result(&mut conn);

    match result {
        Ok(id) => (StatusCode::CREATED, Json(AddPantryItemResponse { id })).into_response(),
        Err(e) => {
            tracing::error!("Failed to add pantry item: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to add pantry item".to_string(),
                }),
            )
                .into_response()
        }
    }
}
