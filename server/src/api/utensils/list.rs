use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::utensils;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListUtensilsQuery {
    /// Case-insensitive substring match on name
    pub search: Option<String>,
    /// Exact category filter
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UtensilItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UtensilListResponse {
    pub utensils: Vec<UtensilItem>,
}

// Type alias for query result row
type UtensilRow = (Uuid, String, String);

#[utoipa::path(
    get,
    path = "/api/utensils",
    tag = "utensils",
    params(ListUtensilsQuery),
    responses(
        (status = 200, description = "List of the user's utensils, grouped by category", body = UtensilListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_utensils(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(query): Query<ListUtensilsQuery>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let mut db_query = utensils::table
        .filter(utensils::user_id.eq(user.id))
        .into_boxed();

    if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        db_query = db_query.filter(utensils::name.ilike(pattern));
    }

    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        db_query = db_query.filter(utensils::category.eq(category.to_string()));
    }

    let rows: Vec<UtensilRow> = match db_query
        .select((utensils::id, utensils::name, utensils::category))
        .order((utensils::category.asc(), utensils::name.asc()))
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch utensils: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch utensils".to_string(),
                }),
            )
                .into_response();
        }
    };

    let response = UtensilListResponse {
        utensils: rows
            .into_iter()
            .map(|(id, name, category)| UtensilItem { id, name, category })
            .collect(),
    };

    (StatusCode::OK, Json(response)).into_response()
}
