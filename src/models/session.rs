use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::meal::MealElement;

/// Per-session form state: the chosen player and the meal elements collected
/// so far. Passed explicitly into every recorder call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub id: Uuid,
    pub selected_player: Option<String>,
    #[serde(default)]
    pub pending_elements: Vec<MealElement>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            selected_player: None,
            pending_elements: Vec::new(),
        }
    }

    pub fn selected_player(&self) -> Option<&str> {
        self.selected_player.as_deref()
    }

    pub fn select_player(&mut self, player_id: impl Into<String>) {
        self.selected_player = Some(player_id.into());
    }

    pub fn push_pending(&mut self, element: MealElement) {
        self.pending_elements.push(element);
    }

    pub fn clear_pending(&mut self) {
        self.pending_elements.clear();
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Body for PUT /sessions/player.
#[derive(Debug, Deserialize)]
pub struct SelectPlayerRequest {
    pub player_id: Option<String>,
}
