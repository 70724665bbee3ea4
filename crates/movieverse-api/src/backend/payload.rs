use movieverse_models::{Movie, Notice, ReactionCounts, Review};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// The category endpoint is not consistent about its envelope: a bare
/// array, `{data: [...]}`, or `{success, data}`. Decode all of them into
/// one movie list at the boundary so nothing downstream has to sniff
/// shapes.
///
/// `Status` must precede `Wrapped`: untagged decoding ignores unknown
/// fields, so a `{success, data}` body would otherwise match `Wrapped`
/// and lose the `success: false` signal. Bodies without `success` fail
/// `Status` and fall through to `Wrapped`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CategoryPayload {
    Movies(Vec<Value>),
    Status {
        success: bool,
        #[serde(default)]
        data: Option<Vec<Value>>,
    },
    Wrapped {
        data: Vec<Value>,
    },
    Other(Value),
}

impl CategoryPayload {
    pub(crate) fn into_movies(self) -> Vec<Movie> {
        let raw = match self {
            CategoryPayload::Movies(raw) => raw,
            CategoryPayload::Status { success, data } => {
                if success {
                    data.unwrap_or_default()
                } else {
                    Vec::new()
                }
            }
            CategoryPayload::Wrapped { data } => data,
            CategoryPayload::Other(_) => Vec::new(),
        };
        decode_elements(raw, "movie")
    }
}

/// Review and notice lists degrade to empty when the body is not an
/// array.
pub(crate) fn reviews_from(value: Value) -> Vec<Review> {
    match value {
        Value::Array(raw) => decode_elements(raw, "review"),
        _ => Vec::new(),
    }
}

pub(crate) fn notices_from(value: Value) -> Vec<Notice> {
    match value {
        Value::Array(raw) => decode_elements(raw, "notice"),
        _ => Vec::new(),
    }
}

/// Decode list elements one by one, skipping the ill-formed ones (a
/// single bad record must not lose the whole list).
fn decode_elements<T: serde::de::DeserializeOwned>(raw: Vec<Value>, what: &str) -> Vec<T> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(err) => {
                debug!(%err, "skipping undecodable {} record", what);
                None
            }
        })
        .collect()
}

/// The reaction endpoint answers either with the bare tally or wrapped
/// in `{reactionCounts: ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TallyPayload {
    Wrapped {
        #[serde(rename = "reactionCounts")]
        reaction_counts: ReactionCounts,
    },
    Direct(ReactionCounts),
}

impl TallyPayload {
    pub(crate) fn into_counts(self) -> ReactionCounts {
        match self {
            TallyPayload::Wrapped { reaction_counts } => reaction_counts,
            TallyPayload::Direct(counts) => counts,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
}
