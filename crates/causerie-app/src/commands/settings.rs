//! UI settings commands: dark mode and dashboard search.
//!
//! Settings live in their own persistence namespace (`ui-storage`) so
//! toggling the theme never rewrites the chat snapshot and vice versa.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::commands::chatrooms::ChatroomDto;
use crate::events::AppEvent;
use crate::state::App;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UiSettings {
    pub dark_mode: bool,
    pub search_query: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            search_query: String::new(),
        }
    }
}

impl App {
    pub fn ui_settings(&self) -> UiSettings {
        self.state().settings.clone()
    }

    /// Flip dark mode and return the new value.
    pub fn toggle_dark_mode(&self) -> bool {
        let dark_mode = {
            let mut state = self.state();
            state.settings.dark_mode = !state.settings.dark_mode;
            self.persist_ui(&state);
            state.settings.dark_mode
        };

        info!(dark_mode, "dark mode toggled");
        self.emit(AppEvent::DarkModeChanged { dark_mode });
        dark_mode
    }

    /// Store the dashboard search query.
    pub fn set_search_query(&self, query: &str) {
        let mut state = self.state();
        state.settings.search_query = query.to_string();
        self.persist_ui(&state);
    }

    /// Chatrooms whose title matches the stored search query
    /// (case-insensitive substring; an empty query matches everything).
    pub fn filtered_chatrooms(&self) -> Vec<ChatroomDto> {
        let state = self.state();
        let needle = state.settings.search_query.to_lowercase();

        state
            .store
            .chatrooms()
            .iter()
            .filter(|room| needle.is_empty() || room.title.to_lowercase().contains(&needle))
            .map(|room| ChatroomDto::from_room(room, &state))
            .collect()
    }
}
