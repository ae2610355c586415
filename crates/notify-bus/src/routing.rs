//! Category to transport-channel routing table.
//!
//! The bus itself has no transport knowledge; hosts consult this table inside
//! their subscriber callbacks to pick the logical channel a record's derived
//! category ships on (e.g. a room-service dashboard channel vs. the admin
//! channel).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::classify::Category;

/// Channel every category without an explicit route falls back to.
pub const DEFAULT_CHANNEL: &str = "admin";

/// Per-category transport channel names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelRouting {
    routes: HashMap<Category, String>,
}

impl Default for ChannelRouting {
    fn default() -> Self {
        let mut routes = HashMap::new();
        routes.insert(Category::RoomService, "room-service".to_string());
        routes.insert(Category::Admin, DEFAULT_CHANNEL.to_string());
        routes.insert(Category::Maintenance, DEFAULT_CHANNEL.to_string());
        routes.insert(Category::Housekeeping, DEFAULT_CHANNEL.to_string());
        routes.insert(Category::General, DEFAULT_CHANNEL.to_string());
        Self { routes }
    }
}

impl ChannelRouting {
    /// The channel name for a category; unrouted categories fall back to
    /// [`DEFAULT_CHANNEL`].
    pub fn channel_for(&self, category: Category) -> &str {
        self.routes
            .get(&category)
            .map_or(DEFAULT_CHANNEL, String::as_str)
    }

    pub fn set_route(&mut self, category: Category, channel: impl Into<String>) {
        self.routes.insert(category, channel.into());
    }

    pub fn routes(&self) -> &HashMap<Category, String> {
        &self.routes
    }
}
