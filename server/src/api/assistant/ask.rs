use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::context;
use crate::db::DbPool;
use crate::get_conn;
use crate::history;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use platewise_core::assistant::ImageOutcome;
use platewise_core::{ai::AiError, Assistant, AssistantError, Nutrition, RecipeSuggestion};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NutritionOut {
    pub calories: f32,
    pub protein: f32,
    pub carbs: f32,
    pub fat: f32,
}

impl From<Nutrition> for NutritionOut {
    fn from(n: Nutrition) -> Self {
        NutritionOut {
            calories: n.calories,
            protein: n.protein,
            carbs: n.carbs,
            fat: n.fat,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeOut {
    pub id: u32,
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub nutrition: NutritionOut,
    pub prep_time: String,
    pub cook_time: String,
    /// Relative URI of the recipe image; empty when no image is available
    pub image: String,
}

impl From<RecipeSuggestion> for RecipeOut {
    fn from(r: RecipeSuggestion) -> Self {
        RecipeOut {
            id: r.id,
            name: r.name,
            ingredients: r.ingredients,
            instructions: r.instructions,
            nutrition: r.nutrition.into(),
            prep_time: r.prep_time,
            cook_time: r.cook_time,
            image: r.image,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AskResponse {
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipes: Option<Vec<RecipeOut>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/assistant/ask",
    tag = "assistant",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Assistant reply, optionally with recipe suggestions", body = AskResponse),
        (status = 400, description = "Empty question", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 502, description = "Completion provider error", body = ErrorResponse),
        (status = 503, description = "Completion provider unavailable", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn ask(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    State(assistant): State<Arc<Assistant>>,
    Json(request): Json<AskRequest>,
) -> impl IntoResponse {
    let question = request.question.trim();
    if question.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Question cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    // Assemble context with a connection scoped to the DB reads, so it is
    // back in the pool before the model round-trip.
    let (context_block, prior_turns) = {
        let mut conn = get_conn!(pool);

        let snapshot = match context::fetch_snapshot(&mut conn, &user) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("Failed to assemble user context: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to assemble user context".to_string(),
                    }),
                )
                    .into_response();
            }
        };

        let prior_turns = match history::recent_turns(&mut conn, user.id) {
            Ok(turns) => turns,
            Err(e) => {
                // History is additive context; a read failure degrades to an
                // empty window rather than failing the request.
                tracing::warn!("Failed to fetch chat history: {}", e);
                Vec::new()
            }
        };

        (context::build_system_block(&snapshot), prior_turns)
    };

    let reply = match assistant.respond(&context_block, prior_turns, question).await {
        Ok(reply) => reply,
        Err(AssistantError::Ai(AiError::Unavailable(e))) => {
            tracing::error!("Completion provider unavailable: {}", e);
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: "Assistant is temporarily unavailable".to_string(),
                }),
            )
                .into_response();
        }
        Err(AssistantError::Ai(e)) => {
            tracing::error!("Completion dispatch failed: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "Assistant failed to answer".to_string(),
                }),
            )
                .into_response();
        }
    };

    for (i, outcome) in reply.image_outcomes.iter().enumerate() {
        match outcome {
            ImageOutcome::Failed(e) => {
                tracing::warn!("Image generation failed for recipe slot {}: {}", i + 1, e);
            }
            ImageOutcome::TimedOut => {
                tracing::warn!("Image generation timed out for recipe slot {}", i + 1);
            }
            ImageOutcome::CacheHit | ImageOutcome::Generated => {}
        }
    }

    // Persist the turn pair; losing history never fails the response
    match pool.get() {
        Ok(mut conn) => history::record_turn(&mut conn, user.id, question, &reply.raw),
        Err(e) => tracing::warn!("Skipping history write, no DB connection: {}", e),
    }

    let response = AskResponse {
        answer: reply.answer,
        recipes: reply
            .recipes
            .map(|recipes| recipes.into_iter().map(RecipeOut::from).collect()),
        follow_up: reply.follow_up,
    };

    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use crate::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::{middleware, Router};
    use diesel::r2d2::{self, ConnectionManager};
    use diesel::PgConnection;
    use platewise_core::ai::FakeAiClient;
    use platewise_core::cache::ImageCache;
    use platewise_core::images::FakeImageProvider;
    use platewise_core::{Assistant, AssistantConfig};
    use std::sync::Arc;
    use tower::ServiceExt;

    // A pool that never connects; requests rejected before auth must not
    // touch it.
    fn unconnected_pool() -> Arc<crate::db::DbPool> {
        let manager = ConnectionManager::<PgConnection>::new("postgres://localhost/unused");
        Arc::new(
            r2d2::Pool::builder()
                .min_idle(Some(0))
                .build_unchecked(manager),
        )
    }

    #[tokio::test]
    async fn unauthenticated_ask_is_rejected_before_any_provider_call() {
        let ai = Arc::new(FakeAiClient::default());
        let images = Arc::new(FakeImageProvider::new());

        let assistant = Arc::new(Assistant::new(
            Box::new(ai.clone()),
            images.clone(),
            ImageCache::in_memory(),
            AssistantConfig::default(),
        ));

        let state = AppState {
            pool: unconnected_pool(),
            assistant,
        };

        let app = Router::new()
            .nest("/api/assistant", super::super::router())
            .layer(middleware::from_fn_with_state(
                state.pool.clone(),
                crate::auth::require_auth,
            ))
            .with_state(state);

        let request = Request::builder()
            .method("POST")
            .uri("/api/assistant/ask")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"question": "What's for dinner?"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ai.call_count(), 0);
        assert_eq!(images.call_count(), 0);
    }
}
