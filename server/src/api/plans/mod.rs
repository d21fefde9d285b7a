pub mod add_meal;
pub mod create;
pub mod delete;
pub mod list;

use crate::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use utoipa::OpenApi;

/// Plans cover one week; item days are offsets 0 through 6 from the start
/// date. The nutrition rollup only ever looks at days in this range.
pub fn valid_plan_day(day: i32) -> bool {
    (0..=6).contains(&day)
}

/// Returns the router for /api/plans endpoints (mounted at /api/plans)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_plans).post(create::create_plan))
        .route("/{id}", delete(delete::delete_plan))
        .route("/{id}/meals", post(add_meal::add_meal_to_plan))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_plans,
        create::create_plan,
        delete::delete_plan,
        add_meal::add_meal_to_plan
    ),
    components(schemas(
        list::PlanListResponse,
        list::PlanSummary,
        list::PlanEntry,
        create::CreatePlanRequest,
        create::PlanItemRequest,
        create::CreatePlanResponse,
        add_meal::AddMealRequest,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::valid_plan_day;

    #[test]
    fn plan_days_are_limited_to_one_week() {
        assert!(valid_plan_day(0));
        assert!(valid_plan_day(6));
        assert!(!valid_plan_day(-1));
        assert!(!valid_plan_day(7));
        assert!(!valid_plan_day(12));
    }
}
