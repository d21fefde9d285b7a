use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::models::User;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
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

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        ProfileResponse {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
            height: user.height,
            weight: user.weight,
            daily_calorie_goal: user.daily_calorie_goal,
            daily_protein_goal: user.daily_protein_goal,
            daily_carbs_goal: user.daily_carbs_goal,
            daily_fat_goal: user.daily_fat_goal,
            breakfast_time: user.breakfast_time,
            lunch_time: user.lunch_time,
            dinner_time: user.dinner_time,
            snack_time: user.snack_time,
            dietary_preferences: user.dietary_preferences,
            allergies: user.allergies,
            cuisine_preferences: user.cuisine_preferences,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "profile",
    responses(
        (status = 200, description = "The current user's profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_profile(AuthUser(user): AuthUser) -> impl IntoResponse {
    (StatusCode::OK, Json(ProfileResponse::from(user)))
}
