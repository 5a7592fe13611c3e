use std::fmt;

use serde::{Deserialize, Serialize};

/// Activity context of a weight registration.
///
/// Kept apart from the meal `DayType`: `Wedstrijd` is the spelling older
/// registrations were written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightDayType {
    Match,
    Wedstrijd,
    Training,
}

impl WeightDayType {
    pub const ALL: [WeightDayType; 3] = [
        WeightDayType::Match,
        WeightDayType::Wedstrijd,
        WeightDayType::Training,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightDayType::Match => "Match",
            WeightDayType::Wedstrijd => "Wedstrijd",
            WeightDayType::Training => "Training",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == value)
    }
}

impl fmt::Display for WeightDayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document written to the `weight_registration` collection. Weights in kg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRegistration {
    pub player_id: String,
    /// YYYYMMDD
    pub registration_date: i32,
    pub day_type: WeightDayType,
    pub weight_before: f64,
    pub weight_after: f64,
}

/// Body for POST /weights.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitWeightRequest {
    pub player_id: Option<String>,
    #[serde(alias = "date")]
    pub registration_date: Option<i32>,
    pub day_type: Option<String>,
    pub weight_before: Option<f64>,
    pub weight_after: Option<f64>,
}
