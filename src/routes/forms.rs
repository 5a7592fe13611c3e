use axum::{extract::State, Json};

use crate::{
    middleware::session::ActiveSession,
    models::form::{FoodDiaryForm, WeightForm},
    services::forms::FormService,
    AppState,
};

/// GET /forms/food-diary
pub async fn food_diary(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
) -> Json<FoodDiaryForm> {
    Json(FormService::food_diary(state.store.as_ref(), &state.collections, &session).await)
}

/// GET /forms/weight
pub async fn weight(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
) -> Json<WeightForm> {
    Json(FormService::weight(state.store.as_ref(), &state.collections, &session).await)
}
