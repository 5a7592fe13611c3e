use axum::Json;
use serde_json::{json, Value};

const GUIDELINES: &[&str] = &[
    "Describe what you eat and drink",
    "Include brand names when applicable",
    "Specify quantities in precise measurements",
    "For restaurant meals, note the establishment",
    "Fill out the diary individually without assistance from other players",
    "Contact your trainer if you need help",
];

/// GET /info — static guidance shown next to the forms
pub async fn get_info() -> Json<Value> {
    Json(json!({
        "title": "Extra Information",
        "introduction": "Please provide as accurate as possible information about everything you eat and drink during the day.",
        "guidelines": GUIDELINES,
    }))
}
