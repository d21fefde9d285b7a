use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::{meal_plan_items, meal_plans};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlanEntry {
    pub day: i32,
    pub meal_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlanSummary {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub items: Vec<PlanEntry>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlanListResponse {
    pub plans: Vec<PlanSummary>,
}

#[utoipa::path(
    get,
    path = "/api/plans",
    tag = "plans",
    responses(
        (status = 200, description = "List of the user's meal plans with their entries", body = PlanListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_plans(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let plans: Vec<(Uuid, NaiveDate)> = match meal_plans::table
        .filter(meal_plans::user_id.eq(user.id))
        .filter(meal_plans::deleted_at.is_null())
        .select((meal_plans::id, meal_plans::start_date))
        .order(meal_plans::start_date.desc())
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch meal plans: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch meal plans".to_string(),
                }),
            )
                .into_response();
        }
    };

    let plan_ids: Vec<Uuid> = plans.iter().map(|(id, _)| *id).collect();

    let items: Vec<(Uuid, i32, Uuid)> = match meal_plan_items::table
        .filter(meal_plan_items::meal_plan_id.eq_any(&plan_ids))
        .select((
            meal_plan_items::meal_plan_id,
            meal_plan_items::day,
            meal_plan_items::meal_id,
        ))
        .order(meal_plan_items::day.asc())
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch meal plan items: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch meal plan items".to_string(),
                }),
            )
                .into_response();
        }
    };

    let response = PlanListResponse {
        plans: plans
            .into_iter()
            .map(|(id, start_date)| PlanSummary {
                id,
                start_date,
                items: items
                    .iter()
                    .filter(|(plan_id, _, _)| *plan_id == id)
                    .map(|(_, day, meal_id)| PlanEntry {
                        day: *day,
                        meal_id: *meal_id,
                    })
                    .collect(),
            })
            .collect(),
    };

    (StatusCode::OK, Json(response)).into_response()
}
