use std::fmt;

use serde::{Deserialize, Serialize};

/// Units offered by the food diary form. Any non-empty unit is accepted.
pub const AMOUNT_UNITS: &[&str] = &["gr", "ml", "tas", "snede", "el", "kl", "stuk"];

/// Activity context of a meal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayType {
    Match,
    Training,
    Rest,
}

impl DayType {
    pub const ALL: [DayType; 3] = [DayType::Match, DayType::Training, DayType::Rest];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Match => "Match",
            DayType::Training => "Training",
            DayType::Rest => "Rest",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == value)
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One food item of a meal, as stored inside `meal_elements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealElement {
    /// Time of day, `HH:MM`.
    pub time: String,
    pub food_product: String,
    pub amount_value: f64,
    pub amount_unit: String,
}

/// Document written to the `meal_diary_entries` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealDiaryEntry {
    pub player_id: String,
    /// YYYYMMDD
    pub meal_date: i32,
    pub day_type: DayType,
    pub meal_type: MealType,
    pub meal_elements: Vec<MealElement>,
}

/// A meal element as typed into the form, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MealElementInput {
    pub time: Option<String>,
    pub food_product: Option<String>,
    pub amount_value: Option<f64>,
    pub amount_unit: Option<String>,
}

/// Body for POST /meals.
///
/// `player_id` falls back to the session's selected player and
/// `meal_elements` to the session's pending elements.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitMealRequest {
    pub player_id: Option<String>,
    #[serde(alias = "date")]
    pub meal_date: Option<i32>,
    pub day_type: Option<String>,
    pub meal_type: Option<String>,
    #[serde(alias = "elements")]
    pub meal_elements: Option<Vec<MealElementInput>>,
}
