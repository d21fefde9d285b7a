use crate::api::ErrorResponse;
use crate::db::DbPool;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::db::get_user_from_token;
use super::middleware::bearer_token;
use crate::models::User;

/// Extractor that resolves the authenticated user from the bearer token.
///
/// Usually runs behind `require_auth`, which has already validated the token;
/// the extractor still re-resolves so handlers get the full user row.
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    Arc<DbPool>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = Arc::<DbPool>::from_ref(state);

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(bearer_token)
            .ok_or_else(|| unauthorized("Missing or invalid Authorization header"))?;

        let user = get_user_from_token(&pool, token)
            .await
            .ok_or_else(|| unauthorized("Invalid or expired token"))?;

        Ok(AuthUser(user))
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
