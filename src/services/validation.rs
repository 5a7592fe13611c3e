use chrono::{Datelike, Local, NaiveDate, NaiveTime};

use crate::{
    error::AppError,
    models::{
        meal::{MealElement, MealElementInput},
        session::SessionContext,
    },
};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Numeric YYYYMMDD form used by the stored documents.
pub fn date_key(date: NaiveDate) -> i32 {
    date.year() * 10_000 + date.month() as i32 * 100 + date.day() as i32
}

pub fn parse_date_key(value: i32) -> Option<NaiveDate> {
    if value <= 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(
        value / 10_000,
        (value / 100 % 100) as u32,
        (value % 100) as u32,
    )
}

/// A real calendar date, not after `today`.
pub fn record_date(field: &str, value: Option<i32>, today: NaiveDate) -> Result<i32, AppError> {
    let value = value.ok_or_else(|| AppError::validation(field, "Date is required."))?;
    let date = parse_date_key(value).ok_or_else(|| {
        AppError::validation(field, format!("{value} is not a valid YYYYMMDD date."))
    })?;
    if date > today {
        return Err(AppError::validation(field, "Date cannot be in the future."));
    }
    Ok(value)
}

/// Trimmed, non-empty text.
pub fn required_text(field: &str, value: Option<&str>, message: &str) -> Result<String, AppError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::validation(field, message))
}

pub fn positive(field: &str, value: Option<f64>, message: &str) -> Result<f64, AppError> {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(AppError::validation(field, message)),
    }
}

/// `HH:MM`, normalised to two-digit hours.
pub fn time_of_day(field: &str, value: Option<&str>) -> Result<String, AppError> {
    let raw = required_text(field, value, "Time is required.")?;
    NaiveTime::parse_from_str(&raw, "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| AppError::validation(field, "Time must be formatted as HH:MM."))
}

/// Validate one form element. `prefix` qualifies field names, e.g.
/// `meal_elements[2].`.
pub fn meal_element(prefix: &str, input: &MealElementInput) -> Result<MealElement, AppError> {
    let food_product = required_text(
        &format!("{prefix}food_product"),
        input.food_product.as_deref(),
        "Food element cannot be empty.",
    )?;
    let amount_value = positive(
        &format!("{prefix}amount_value"),
        input.amount_value,
        "Amount has to be larger than 0.",
    )?;
    let amount_unit = required_text(
        &format!("{prefix}amount_unit"),
        input.amount_unit.as_deref(),
        "Unit is required.",
    )?;
    let time = time_of_day(&format!("{prefix}time"), input.time.as_deref())?;

    Ok(MealElement {
        time,
        food_product,
        amount_value,
        amount_unit,
    })
}

/// The requested player, or the session's selection when none was sent.
pub fn resolve_player(requested: Option<&str>, session: &SessionContext) -> Result<String, AppError> {
    let requested = requested.map(str::trim).filter(|p| !p.is_empty());
    requested
        .or(session.selected_player())
        .map(str::to_string)
        .ok_or_else(|| AppError::validation("player_id", "Select your player ID."))
}
