use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::reaction::ReactionCounts;

/// Identifying pair for a movie: the catalog it came from plus the
/// catalog-local id, e.g. ("tmdb", "603").
///
/// A movie is only addressable (details page, watchlist, reviews) when
/// both halves are present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MovieKey {
    pub source: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
}

impl MovieKey {
    pub fn new(source: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            external_id: external_id.into(),
        }
    }
}

impl std::fmt::Display for MovieKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.source, self.external_id)
    }
}

/// A movie as served by the backend catalog endpoints.
///
/// Everything beyond the identifying pair is optional; the backend mixes
/// catalog sources and not all of them carry the full attribute set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub external_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Genres>,
    #[serde(
        default,
        deserialize_with = "de_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub imdb_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub screenshots: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_providers: Option<HashMap<String, ProviderGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_counts: Option<ReactionCounts>,
    #[serde(default, rename = "genre_ids", skip_serializing_if = "Vec::is_empty")]
    pub genre_ids: Vec<u32>,
}

impl Movie {
    /// Minimal movie carrying only the identifying pair.
    pub fn from_key(source: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            external_id: external_id.into(),
            title: None,
            poster: None,
            release_year: None,
            genres: None,
            imdb_rating: None,
            trailer: None,
            overview: None,
            screenshots: Vec::new(),
            direct_link: None,
            watch_providers: None,
            reaction_counts: None,
            genre_ids: Vec::new(),
        }
    }

    /// True when both identifying fields are present and external_id is
    /// not the literal "undefined" placeholder the backend occasionally
    /// serves.
    pub fn has_valid_key(&self) -> bool {
        !self.source.is_empty() && !self.external_id.is_empty() && self.external_id != "undefined"
    }

    pub fn key(&self) -> MovieKey {
        MovieKey::new(self.source.clone(), self.external_id.clone())
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("N/A")
    }

    /// A trailer URL is only usable when it is non-empty and not the
    /// "N/A" placeholder.
    pub fn has_trailer(&self) -> bool {
        matches!(&self.trailer, Some(t) if !t.is_empty() && t != "N/A")
    }

    /// Providers offering the movie for free (with ads) in the given
    /// region.
    pub fn free_providers(&self, region: &str) -> Vec<&str> {
        self.watch_providers
            .as_ref()
            .and_then(|map| map.get(region))
            .map(|group| {
                group
                    .ads
                    .iter()
                    .map(|p| p.provider_name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Genres arrive in three shapes depending on the upstream catalog:
/// `[{"name": "Action"}]`, `["Action"]`, or `"Action, Drama"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Genres {
    List(Vec<GenreEntry>),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GenreEntry {
    Named { name: String },
    Plain(String),
}

impl Genres {
    pub fn display(&self) -> String {
        match self {
            Genres::Text(text) => text.clone(),
            Genres::List(entries) => {
                let names: Vec<&str> = entries
                    .iter()
                    .map(|entry| match entry {
                        GenreEntry::Named { name } => name.as_str(),
                        GenreEntry::Plain(name) => name.as_str(),
                    })
                    .collect();
                if names.is_empty() {
                    "N/A".to_string()
                } else {
                    names.join(", ")
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProviderGroup {
    #[serde(default)]
    pub ads: Vec<Provider>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Provider {
    pub provider_name: String,
}

/// The rating field is sometimes a string ("7.8") and sometimes a bare
/// number; normalize both to a display string.
fn de_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
