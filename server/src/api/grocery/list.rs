use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::grocery_items;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListGroceryQuery {
    /// Case-insensitive substring match on name
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroceryItem {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroceryListResponse {
    pub items: Vec<GroceryItem>,
}

type GroceryRow = (Uuid, String, DateTime<Utc>);

#[utoipa::path(
    get,
    path = "/api/grocery",
    tag = "grocery",
    params(ListGroceryQuery),
    responses(
        (status = 200, description = "List of the user's grocery items", body = GroceryListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_grocery_items(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(query): Query<ListGroceryQuery>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let mut db_query = grocery_items::table
        .filter(grocery_items::user_id.eq(user.id))
        .into_boxed();

    if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        db_query = db_query.filter(grocery_items::name.ilike(pattern));
    }

    let items: Vec<GroceryRow> = match db_query
        .select((
            grocery_items::id,
            grocery_items::name,
            grocery_items::created_at,
        ))
        .order(grocery_items::created_at.desc())
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch grocery items: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch grocery items".to_string(),
                }),
            )
                .into_response();
        }
    };

    let response = GroceryListResponse {
        items: items
            .into_iter()
            .map(|(id, name, created_at)| GroceryItem {
                id,
                name,
                created_at,
            })
            .collect(),
    };

    (StatusCode::OK, Json(response)).into_response()
}
