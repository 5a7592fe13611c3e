use chrono::NaiveDate;
use mongodb::bson;

use crate::{
    config::CollectionNames,
    db::{DocumentStore, StoreError},
    error::AppError,
    models::{
        form::SubmissionReceipt,
        meal::{DayType, MealDiaryEntry, MealType, SubmitMealRequest},
        session::SessionContext,
    },
    services::{roster::RosterService, validation},
};

pub struct MealService;

impl MealService {
    /// Validate the request and append one document to the meal diary.
    ///
    /// On success the session keeps the player selected and its pending elements
    /// are cleared. On failure nothing is written and the session is untouched.
    /// Resubmitting the same meal stores it again.
    pub async fn submit(
        store: &dyn DocumentStore,
        collections: &CollectionNames,
        session: &mut SessionContext,
        req: SubmitMealRequest,
    ) -> Result<SubmissionReceipt, AppError> {
        let entry = Self::build_entry(session, req, validation::today()).inspect_err(|e| {
            tracing::info!(field = e.field().unwrap_or_default(), "Meal entry rejected: {e}")
        })?;
        RosterService::ensure_listed(store, &collections.roster, &entry.player_id).await?;

        let collection = collections.meal_diary_entries.as_str();
        tracing::info!(
            player_id = %entry.player_id,
            collection,
            meal_date = entry.meal_date,
            elements = entry.meal_elements.len(),
            "Submitting meal entry"
        );

        let document = bson::to_document(&entry).map_err(StoreError::from)?;
        let id = store.insert(collection, document).await.inspect_err(|e| {
            tracing::error!(player_id = %entry.player_id, collection, error = %e, "Failed to submit meal entry")
        })?;

        tracing::info!(player_id = %entry.player_id, collection, id = %id, "Meal entry stored");
        session.select_player(entry.player_id);
        session.clear_pending();

        Ok(SubmissionReceipt {
            id,
            message: "Your meal has been added successfully!",
        })
    }

    /// Build the document from the request, falling back to the session for the
    /// player and the meal elements.
    pub fn build_entry(
        session: &SessionContext,
        req: SubmitMealRequest,
        today: NaiveDate,
    ) -> Result<MealDiaryEntry, AppError> {
        let player_id = validation::resolve_player(req.player_id.as_deref(), session)?;
        let meal_date = validation::record_date("meal_date", req.meal_date, today)?;

        let day_type = validation::required_text(
            "day_type",
            req.day_type.as_deref(),
            "Select a day type.",
        )?;
        let day_type = DayType::parse(&day_type).ok_or_else(|| {
            AppError::validation("day_type", format!("Unknown day type: {day_type}"))
        })?;

        let meal_type = validation::required_text(
            "meal_type",
            req.meal_type.as_deref(),
            "Select a meal type.",
        )?;
        let meal_type = MealType::parse(&meal_type).ok_or_else(|| {
            AppError::validation("meal_type", format!("Unknown meal type: {meal_type}"))
        })?;

        let meal_elements = match req.meal_elements.filter(|e| !e.is_empty()) {
            Some(inputs) => inputs
                .iter()
                .enumerate()
                .map(|(i, input)| validation::meal_element(&format!("meal_elements[{i}]."), input))
                .collect::<Result<Vec<_>, _>>()?,
            None => session.pending_elements.clone(),
        };
        if meal_elements.is_empty() {
            return Err(AppError::validation(
                "meal_elements",
                "You must include at least one food element.",
            ));
        }

        Ok(MealDiaryEntry {
            player_id,
            meal_date,
            day_type,
            meal_type,
            meal_elements,
        })
    }
}
