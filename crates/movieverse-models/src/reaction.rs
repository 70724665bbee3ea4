use serde::{Deserialize, Serialize};

/// The fixed reaction vocabulary accepted by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Excellent,
    Good,
    Average,
    Sad,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 4] = [
        ReactionKind::Excellent,
        ReactionKind::Good,
        ReactionKind::Average,
        ReactionKind::Sad,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Excellent => "excellent",
            ReactionKind::Good => "good",
            ReactionKind::Average => "average",
            ReactionKind::Sad => "sad",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReactionKind::Excellent => "Excellent 👍",
            ReactionKind::Good => "Good 😊",
            ReactionKind::Average => "Average 😐",
            ReactionKind::Sad => "Sad 😢",
        }
    }
}

impl std::str::FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excellent" => Ok(ReactionKind::Excellent),
            "good" => Ok(ReactionKind::Good),
            "average" => Ok(ReactionKind::Average),
            "sad" => Ok(ReactionKind::Sad),
            other => Err(format!(
                "unknown reaction '{}', expected one of: excellent, good, average, sad",
                other
            )),
        }
    }
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-movie tally of reactions. Missing kinds count as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReactionCounts {
    #[serde(default)]
    pub excellent: u32,
    #[serde(default)]
    pub good: u32,
    #[serde(default)]
    pub average: u32,
    #[serde(default)]
    pub sad: u32,
}

impl ReactionCounts {
    pub fn get(&self, kind: ReactionKind) -> u32 {
        match kind {
            ReactionKind::Excellent => self.excellent,
            ReactionKind::Good => self.good,
            ReactionKind::Average => self.average,
            ReactionKind::Sad => self.sad,
        }
    }

    pub fn total(&self) -> u32 {
        self.excellent + self.good + self.average + self.sad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_wire_names() {
        assert_eq!(
            serde_json::to_string(&ReactionKind::Excellent).unwrap(),
            "\"excellent\""
        );
        let kind: ReactionKind = serde_json::from_str("\"sad\"").unwrap();
        assert_eq!(kind, ReactionKind::Sad);
    }

    #[test]
    fn test_partial_counts_default_to_zero() {
        let counts: ReactionCounts = serde_json::from_str(r#"{"excellent": 3}"#).unwrap();
        assert_eq!(counts.get(ReactionKind::Excellent), 3);
        assert_eq!(counts.get(ReactionKind::Sad), 0);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        assert!("meh".parse::<ReactionKind>().is_err());
        assert_eq!("GOOD".parse::<ReactionKind>().unwrap(), ReactionKind::Good);
    }
}
