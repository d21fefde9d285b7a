use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::{meal_plan_items, meal_plans, meals};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{Datelike, Utc};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TodayNutritionResponse {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

// Type alias for query result row
type NutritionRow = (i32, Option<i32>, Option<i32>, Option<i32>);

#[utoipa::path(
    get,
    path = "/api/profile/nutrition/today",
    tag = "profile",
    responses(
        (status = 200, description = "Nutrition totals for meals planned today", body = TodayNutritionResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn today_nutrition(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    // Plan days are 0-based from Monday, matching chrono's weekday numbering
    let weekday = Utc::now().date_naive().weekday().num_days_from_monday() as i32;

    let mut conn = get_conn!(pool);

    let rows: Vec<NutritionRow> = match meal_plan_items::table
        .inner_join(meal_plans::table)
        .inner_join(meals::table)
        .filter(meal_plans::user_id.eq(user.id))
        .filter(meal_plans::deleted_at.is_null())
        .filter(meal_plan_items::day.eq(weekday))
        .select((meals::calories, meals::protein, meals::carbs, meals::fat))
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch today's nutrition: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch today's nutrition".to_string(),
                }),
            )
                .into_response();
        }
    };

    let mut totals = TodayNutritionResponse {
        calories: 0,
        protein: 0,
        carbs: 0,
        fat: 0,
    };
    for (calories, protein, carbs, fat) in rows {
        totals.calories += calories as i64;
        totals.protein += protein.unwrap_or(0) as i64;
        totals.carbs += carbs.unwrap_or(0) as i64;
        totals.fat += fat.unwrap_or(0) as i64;
    }

    (StatusCode::OK, Json(totals)).into_response()
}
