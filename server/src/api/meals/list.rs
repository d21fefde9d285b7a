use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Meal;
use crate::schema::meals;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MealItem {
    pub id: Uuid,
    pub name: String,
    pub calories: i32,
    pub protein: Option<i32>,
    pub carbs: Option<i32>,
    pub fat: Option<i32>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MealListResponse {
    pub meals: Vec<MealItem>,
}

#[utoipa::path(
    get,
    path = "/api/meals",
    tag = "meals",
    responses(
        (status = 200, description = "List of the user's logged meals, newest first", body = MealListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_meals(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let meals: Vec<Meal> = match meals::table
        .filter(meals::user_id.eq(user.id))
        .filter(meals::deleted_at.is_null())
        .select(Meal::as_select())
        .order(meals::created_at.desc())
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch meals: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch meals".to_string(),
                }),
            )
                .into_response();
        }
    };

    let response = MealListResponse {
        meals: meals
            .into_iter()
            .map(|m| MealItem {
                id: m.id,
                name: m.name,
                calories: m.calories,
                protein: m.protein,
                carbs: m.carbs,
                fat: m.fat,
                image: m.image,
                created_at: m.created_at,
            })
            .collect(),
    };

    (StatusCode::OK, Json(response)).into_response()
}
