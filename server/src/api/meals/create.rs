use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewMeal;
use crate::schema::meals;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateMealRequest {
    pub name: String,
    pub calories: i32,
    pub protein: Option<i32>,
    pub carbs: Option<i32>,
    pub fat: Option<i32>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateMealResponse {
    pub id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/meals",
    tag = "meals",
    request_body = CreateMealRequest,
    responses(
        (status = 201, description = "Meal logged", body = CreateMealResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_meal(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateMealRequest>,
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

    if request.calories < 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Calories cannot be negative".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    let result: Result<Uuid, diesel::result::Error> = diesel::insert_into(meals::table)
        .values(NewMeal {
            user_id: user.id,
            name: request.name.trim(),
            calories: request.calories,
            protein: request.protein,
            carbs: request.carbs,
            fat: request.fat,
            image: request.image.as_deref(),
        })
        .returning(meals::id)
        .get_result(&mut conn);

    match result {
        Ok(id) => (StatusCode::CREATED, Json(CreateMealResponse { id })).into_response(),
        Err(e) => {
            tracing::error!("Failed to log meal: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to log meal".to_string(),
                }),
            )
                .into_response()
        }
    }
}
