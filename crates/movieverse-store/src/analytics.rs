use anyhow::Result;
use movieverse_models::ClickEvent;
use tracing::debug;

use crate::local::{keys, LocalStore};

/// Append-only log of interaction events under the `analytics` key.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    store: LocalStore,
}

impl ClickTracker {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn record(&self, action: &str, movie_id: &str, movie_title: &str) -> Result<()> {
        debug!(action, movie_id, movie_title, "tracking click");
        let mut events = self.events();
        events.push(ClickEvent::new(action, movie_id, movie_title));
        self.store.set(keys::ANALYTICS, &events)
    }

    pub fn events(&self) -> Vec<ClickEvent> {
        self.store
            .get(keys::ANALYTICS)
            .ok()
            .flatten()
            .unwrap_or_default()
    }
}
