use serde::Serialize;

use super::{
    meal::{DayType, MealElement, MealType},
    weight::WeightDayType,
};

/// Everything a client needs to render the food diary form.
#[derive(Debug, Serialize)]
pub struct FoodDiaryForm {
    pub players: Vec<String>,
    pub selected_player: Option<String>,
    /// Today, YYYYMMDD. Also the latest date accepted.
    pub default_date: i32,
    pub max_date: i32,
    pub day_types: Vec<DayType>,
    pub meal_types: Vec<MealType>,
    pub amount_units: Vec<&'static str>,
    pub pending_elements: Vec<MealElement>,
    pub submission_enabled: bool,
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WeightForm {
    pub players: Vec<String>,
    pub selected_player: Option<String>,
    pub default_date: i32,
    pub max_date: i32,
    pub day_types: Vec<WeightDayType>,
    pub submission_enabled: bool,
    pub warning: Option<String>,
}

/// Returned by a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub id: String,
    pub message: &'static str,
}
