use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{NewMealPlan, NewMealPlanItem};
use crate::schema::{meal_plan_items, meal_plans, meals};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PlanItemRequest {
    /// Day offset from the plan's start date (0 through 6)
    pub day: i32,
    pub meal_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePlanRequest {
    pub start_date: NaiveDate,
    #[serde(default)]
    pub items: Vec<PlanItemRequest>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatePlanResponse {
    pub id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/plans",
    tag = "plans",
    request_body = CreatePlanRequest,
    responses(
        (status = 201, description = "Meal plan created", body = CreatePlanResponse),
        (status = 400, description = "Invalid request (unknown meal or bad day)", body = ErrorResponse),
        (status = 409, description = "Duplicate plan entry", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_plan(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreatePlanRequest>,
) -> impl IntoResponse {
    if request
        .items
        .iter()
        .any(|item| !super::valid_plan_day(item.day))
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Day offset must be between 0 and 6".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    // Every referenced meal must exist and belong to the user
    let meal_ids: Vec<Uuid> = request.items.iter().map(|i| i.meal_id).collect();
    if !meal_ids.is_empty() {
        let owned: i64 = match meals::table
            .filter(meals::id.eq_any(&meal_ids))
            .filter(meals::user_id.eq(user.id))
            .filter(meals::deleted_at.is_null())
            .count()
            .get_result(&mut conn)
        {
            Ok(n) => n,
            Err(e) => {
                tracing::error!("Failed to verify meals: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to verify meals".to_string(),
                    }),
                )
                    .into_response();
            }
        };

        let distinct: std::collections::HashSet<Uuid> = meal_ids.iter().copied().collect();
        if owned < distinct.len() as i64 {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "One or more meals not found".to_string(),
                }),
            )
                .into_response();
        }
    }

    // Create the plan and its items atomically
    let result: Result<Uuid, DieselError> = conn.transaction(|conn| {
        let plan_id: Uuid = diesel::insert_into(meal_plans::table)
            .values(NewMealPlan {
                user_id: user.id,
                start_date: request.start_date,
            })
            .returning(meal_plans::id)
            .get_result(conn)?;

        let items: Vec<NewMealPlanItem> = request
            .items
            .iter()
            .map(|item| NewMealPlanItem {
                meal_plan_id: plan_id,
                day: item.day,
                meal_id: item.meal_id,
            })
            .collect();

        if !items.is_empty() {
            diesel::insert_into(meal_plan_items::table)
                .values(&items)
                .execute(conn)?;
        }

        Ok(plan_id)
    });

    match result {
        Ok(id) => (StatusCode::CREATED, Json(CreatePlanResponse { id })).into_response(),
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "This meal is already planned for that day".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create meal plan: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create meal plan".to_string(),
                }),
            )
                .into_response()
        }
    }
}
