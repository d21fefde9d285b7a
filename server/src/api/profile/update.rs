use super::get::ProfileResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::User;
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, AsChangeset, ToSchema)]
#[diesel(table_name = users)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub daily_calorie_goal: Option<i32>,
    pub daily_protein_goal: Option<i32>,
    pub daily_carbs_goal: Option<i32>,
    pub daily_fat_goal: Option<i32>,
    pub breakfast_time: Option<String>,
    pub lunch_time: Option<String>,
    pub dinner_time: Option<String>,
    pub snack_time: Option<String>,
    pub dietary_preferences: Option<String>,
    pub allergies: Option<String>,
    pub cuisine_preferences: Option<String>,
}

impl UpdateProfileRequest {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.height.is_none()
            && self.weight.is_none()
            && self.daily_calorie_goal.is_none()
            && self.daily_protein_goal.is_none()
            && self.daily_carbs_goal.is_none()
            && self.daily_fat_goal.is_none()
            && self.breakfast_time.is_none()
            && self.lunch_time.is_none()
            && self.dinner_time.is_none()
            && self.snack_time.is_none()
            && self.dietary_preferences.is_none()
            && self.allergies.is_none()
            && self.cuisine_preferences.is_none()
    }
}

#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "No fields to update", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    if request.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No fields to update".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    let updated: User = match diesel::update(users::table.filter(users::id.eq(user.id)))
        .set(&request)
        .returning(User::as_returning())
        .get_result(&mut conn)
    {
        Ok(u) => u,
        Err(e) => {
            tracing::error!("Failed to update profile: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update profile".to_string(),
                }),
            )
                .into_response();
        }
    };

    (StatusCode::OK, Json(ProfileResponse::from(updated))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> UpdateProfileRequest {
        UpdateProfileRequest {
            name: None,
            email: None,
            height: None,
            weight: None,
            daily_calorie_goal: None,
            daily_protein_goal: None,
            daily_carbs_goal: None,
            daily_fat_goal: None,
            breakfast_time: None,
            lunch_time: None,
            dinner_time: None,
            snack_time: None,
            dietary_preferences: None,
            allergies: None,
            cuisine_preferences: None,
        }
    }

    #[test]
    fn all_none_request_is_empty() {
        assert!(blank().is_empty());
    }

    #[test]
    fn meal_time_only_update_is_not_empty() {
        let mut request = blank();
        request.breakfast_time = Some("08:00".to_string());
        assert!(!request.is_empty());
    }
}
