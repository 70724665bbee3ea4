use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A locally recorded interaction event, appended to the persisted
/// analytics log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub action: String,
    pub movie_id: String,
    pub movie_title: String,
    pub timestamp: DateTime<Utc>,
}

impl ClickEvent {
    pub fn new(
        action: impl Into<String>,
        movie_id: impl Into<String>,
        movie_title: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            movie_id: movie_id.into(),
            movie_title: movie_title.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_wire_shape() {
        let event = ClickEvent::new("view_details", "603", "The Matrix");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "view_details");
        assert_eq!(json["movieId"], "603");
        assert_eq!(json["movieTitle"], "The Matrix");
        assert!(json["timestamp"].is_string());
    }
}
