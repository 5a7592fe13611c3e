pub mod forms;
pub mod health;
pub mod info;
pub mod meals;
pub mod roster;
pub mod sessions;
pub mod weights;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::AppState;

/// All API routes. Transport layers (CORS, tracing) are added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/roster", get(roster::list_players))
        .route("/info", get(info::get_info))
        // Forms
        .route("/forms/food-diary", get(forms::food_diary))
        .route("/forms/weight", get(forms::weight))
        // Sessions
        .route(
            "/sessions",
            post(sessions::create_session)
                .get(sessions::get_session)
                .delete(sessions::end_session),
        )
        .route("/sessions/player", put(sessions::select_player))
        .route(
            "/sessions/meal-elements",
            post(sessions::add_meal_element).delete(sessions::clear_meal_elements),
        )
        // Submissions
        .route("/meals", post(meals::submit_meal))
        .route("/weights", post(weights::submit_weight))
        .with_state(state)
}
