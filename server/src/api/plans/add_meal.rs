use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewMealPlanItem;
use crate::schema::{meal_plan_items, meal_plans, meals};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddMealRequest {
    /// Day offset from the plan's start date (0 through 6)
    pub day: i32,
    pub meal_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/plans/{id}/meals",
    tag = "plans",
    params(
        ("id" = Uuid, Path, description = "Meal plan ID")
    ),
    request_body = AddMealRequest,
    responses(
        (status = 201, description = "Meal added to plan"),
        (status = 400, description = "Invalid request (unknown meal or bad day)", body = ErrorResponse),
        (status = 404, description = "Meal plan not found", body = ErrorResponse),
        (status = 409, description = "Meal already planned for that day", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_meal_to_plan(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddMealRequest>,
) -> impl IntoResponse {
    if !super::valid_plan_day(request.day) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Day offset must be between 0 and 6".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    // Plan must exist and belong to the user
    let plan_exists: bool = match meal_plans::table
        .filter(meal_plans::id.eq(id))
        .filter(meal_plans::user_id.eq(user.id))
        .filter(meal_plans::deleted_at.is_null())
        .select(meal_plans::id)
        .first::<Uuid>(&mut conn)
        .optional()
    {
        Ok(record) => record.is_some(),
        Err(e) => {
            tracing::error!("Failed to verify meal plan ownership: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to verify meal plan".to_string(),
                }),
            )
                .into_response();
        }
    };

    if !plan_exists {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Meal plan not found".to_string(),
            }),
        )
            .into_response();
    }

    // Meal must exist and belong to the user
    let meal_exists: bool = match meals::table
        .filter(meals::id.eq(request.meal_id))
        .filter(meals::user_id.eq(user.id))
        .filter(meals::deleted_at.is_null())
        .select(meals::id)
        .first::<Uuid>(&mut conn)
        .optional()
    {
        Ok(record) => record.is_some(),
        Err(e) => {
            tracing::error!("Failed to verify meal ownership: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to verify meal".to_string(),
                }),
            )
                .into_response();
        }
    };

    if !meal_exists {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Meal not found".to_string(),
            }),
        )
            .into_response();
    }

    let result = diesel::insert_into(meal_plan_items::table)
        .values(NewMealPlanItem {
            meal_plan_id: id,
            day: request.day,
            meal_id: request.meal_id,
        })
        .execute(&mut conn);

    match result {
        Ok(_) => StatusCode::CREATED.into_response(),
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "This meal is already planned for that day".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to add meal to plan: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to add meal to plan".to_string(),
                }),
            )
                .into_response()
        }
    }
}
