use chrono::NaiveDate;
use mongodb::bson;

use crate::{
    config::CollectionNames,
    db::{DocumentStore, StoreError},
    error::AppError,
    models::{
        form::SubmissionReceipt,
        session::SessionContext,
        weight::{SubmitWeightRequest, WeightDayType, WeightRegistration},
    },
    services::{roster::RosterService, validation},
};

const WEIGHT_MESSAGE: &str = "Weight values must be positive numbers.";

pub struct WeightService;

impl WeightService {
    /// Validate the request and append one weight registration.
    pub async fn submit(
        store: &dyn DocumentStore,
        collections: &CollectionNames,
        session: &mut SessionContext,
        req: SubmitWeightRequest,
    ) -> Result<SubmissionReceipt, AppError> {
        let registration = Self::build_registration(session, req, validation::today())
            .inspect_err(|e| {
                tracing::info!(field = e.field().unwrap_or_default(), "Weight registration rejected: {e}")
            })?;
        RosterService::ensure_listed(store, &collections.roster, &registration.player_id).await?;

        let collection = collections.weight_registration.as_str();
        tracing::info!(
            player_id = %registration.player_id,
            collection,
            registration_date = registration.registration_date,
            "Submitting weight registration"
        );

        let document = bson::to_document(&registration).map_err(StoreError::from)?;
        let id = store.insert(collection, document).await.inspect_err(|e| {
            tracing::error!(player_id = %registration.player_id, collection, error = %e, "Failed to submit weight entry")
        })?;

        tracing::info!(player_id = %registration.player_id, collection, id = %id, "Weight registration stored");
        session.select_player(registration.player_id);

        Ok(SubmissionReceipt {
            id,
            message: "Weight registration added successfully!",
        })
    }

    pub fn build_registration(
        session: &SessionContext,
        req: SubmitWeightRequest,
        today: NaiveDate,
    ) -> Result<WeightRegistration, AppError> {
        let player_id = validation::resolve_player(req.player_id.as_deref(), session)?;
        let registration_date =
            validation::record_date("registration_date", req.registration_date, today)?;

        let day_type = validation::required_text(
            "day_type",
            req.day_type.as_deref(),
            "Select a day type.",
        )?;
        let day_type = WeightDayType::parse(&day_type).ok_or_else(|| {
            AppError::validation("day_type", format!("Unknown day type: {day_type}"))
        })?;

        let weight_before = validation::positive("weight_before", req.weight_before, WEIGHT_MESSAGE)?;
        let weight_after = validation::positive("weight_after", req.weight_after, WEIGHT_MESSAGE)?;

        Ok(WeightRegistration {
            player_id,
            registration_date,
            day_type,
            weight_before,
            weight_after,
        })
    }
}
