use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewGroceryItem;
use crate::schema::grocery_items;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddGroceryItemRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AddGroceryItemResponse {
    pub id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/grocery",
    tag = "grocery",
    request_body = AddGroceryItemRequest,
    responses(
        (status = 201, description = "Grocery item added", body = AddGroceryItemResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_grocery_item(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<AddGroceryItemRequest>,
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

    let result: Result<Uuid, diesel::result::Error> = diesel::insert_into(grocery_items::table)
        .values(NewGroceryItem {
            user_id: user.id,
            name: request.name.trim(),
        })
        .returning(grocery_items::id)
        .get_result(&mut conn);

    match result {
        Ok(id) => (StatusCode::CREATED, Json(AddGroceryItemResponse { id })).into_response(),
        Err(e) => {
            tracing::error!("Failed to add grocery item: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to add grocery item".to_string(),
                }),
            )
                .into_response()
        }
    }
}
