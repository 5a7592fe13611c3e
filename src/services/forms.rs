use crate::{
    config::CollectionNames,
    db::DocumentStore,
    models::{
        form::{FoodDiaryForm, WeightForm},
        meal::{DayType, MealType, AMOUNT_UNITS},
        session::SessionContext,
        weight::WeightDayType,
    },
    services::{roster::RosterService, validation},
};

pub const NO_PLAYERS_WARNING: &str = "No player data available. Please check database connection.";
pub const ROSTER_FAILED_WARNING: &str = "Failed to load player data. Please try again later.";

/// Roster plus the submission switch for a form.
struct RosterState {
    players: Vec<String>,
    selected_player: Option<String>,
    submission_enabled: bool,
    warning: Option<String>,
}

/// Builds form payloads. A roster that cannot be loaded disables submission
/// with a warning instead of failing the request.
pub struct FormService;

impl FormService {
    pub async fn food_diary(
        store: &dyn DocumentStore,
        collections: &CollectionNames,
        session: &SessionContext,
    ) -> FoodDiaryForm {
        let roster = load_roster(store, &collections.roster, session).await;
        let today = validation::date_key(validation::today());

        FoodDiaryForm {
            players: roster.players,
            selected_player: roster.selected_player,
            default_date: today,
            max_date: today,
            day_types: DayType::ALL.to_vec(),
            meal_types: MealType::ALL.to_vec(),
            amount_units: AMOUNT_UNITS.to_vec(),
            pending_elements: session.pending_elements.clone(),
            submission_enabled: roster.submission_enabled,
            warning: roster.warning,
        }
    }

    pub async fn weight(
        store: &dyn DocumentStore,
        collections: &CollectionNames,
        session: &SessionContext,
    ) -> WeightForm {
        let roster = load_roster(store, &collections.roster, session).await;
        let today = validation::date_key(validation::today());

        WeightForm {
            players: roster.players,
            selected_player: roster.selected_player,
            default_date: today,
            max_date: today,
            day_types: WeightDayType::ALL.to_vec(),
            submission_enabled: roster.submission_enabled,
            warning: roster.warning,
        }
    }
}

async fn load_roster(
    store: &dyn DocumentStore,
    collection: &str,
    session: &SessionContext,
) -> RosterState {
    match RosterService::list(store, collection).await {
        Ok(players) if players.is_empty() => RosterState {
            players,
            selected_player: None,
            submission_enabled: false,
            warning: Some(NO_PLAYERS_WARNING.into()),
        },
        Ok(players) => {
            // A selection that is no longer on the roster is not offered.
            let selected_player = session
                .selected_player()
                .filter(|p| players.iter().any(|listed| listed.as_str() == *p))
                .map(str::to_string);
            RosterState {
                players,
                selected_player,
                submission_enabled: true,
                warning: None,
            }
        }
        Err(e) => {
            tracing::error!("Failed to fetch player IDs: {e}");
            RosterState {
                players: Vec::new(),
                selected_player: None,
                submission_enabled: false,
                warning: Some(ROSTER_FAILED_WARNING.into()),
            }
        }
    }
}
