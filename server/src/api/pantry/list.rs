use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::pantry_items;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PantryItem {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PantryListResponse {
    pub items: Vec<PantryItem>,
}

// Type alias for query result row
type PantryRow = (Uuid, String, DateTime<Utc>);

#[utoipa::path(
    get,
    path = "/api/pantry",
    tag = "pantry",
    responses(
        (status = 200, description = "List of the user's pantry items", body = PantryListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_pantry_items(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let items: Vec<PantryRow> = match pantry_items::table
        .filter(pantry_items::user_id.eq(user.id))
        .select((
            pantry_items::id,
            pantry_items::name,
            pantry_items::created_at,
        ))
        .order(pantry_items::name.asc())
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch pantry items: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch pantry items".to_string(),
                }),
            )
                .into_response();
        }
    };

    let response = PantryListResponse {
        items: items
            .into_iter()
            .map(|(id, name, created_at)| PantryItem {
                id,
                name,
                created_at,
            })
            .collect(),
    };

    (StatusCode::OK, Json(response)).into_response()
}
