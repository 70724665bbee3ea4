use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user review as stored by the backend. Ids are server-assigned
/// (`_id` on the wire).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

/// A reply scoped to exactly one parent review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for submitting a new review. Rating is optional and omitted
/// from the wire when unset.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewReview {
    pub text: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

/// Payload for submitting a reply to an existing review.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewReply {
    pub text: String,
    pub name: String,
    pub email: String,
}

/// Human-readable age of a timestamp relative to `now` ("2 days ago",
/// "Just now").
pub fn relative_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let days = elapsed.num_days();
    let hours = elapsed.num_hours();
    let minutes = elapsed.num_minutes();

    if days > 0 {
        format!("{} day{} ago", days, if days > 1 { "s" } else { "" })
    } else if hours > 0 {
        format!("{} hour{} ago", hours, if hours > 1 { "s" } else { "" })
    } else if minutes > 0 {
        format!("{} minute{} ago", minutes, if minutes > 1 { "s" } else { "" })
    } else {
        "Just now".to_string()
    }
}
