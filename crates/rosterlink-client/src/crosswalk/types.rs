use serde::Serialize;

/// One of the two upstream data providers being reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    A,
    B,
}

impl Provider {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "provider A",
            Self::B => "provider B",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a" | "provider_a" => Some(Self::A),
            "b" | "provider_b" => Some(Self::B),
            _ => None,
        }
    }

    pub const fn counterpart(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Fantasy-relevant positions. Raw position strings are kept on the record;
/// this enum only exists to rank and validate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Qb,
    Rb,
    Wr,
    Te,
    K,
    Def,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::Qb,
        Position::Rb,
        Position::Wr,
        Position::Te,
        Position::K,
        Position::Def,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Self::Qb => "QB",
            Self::Rb => "RB",
            Self::Wr => "WR",
            Self::Te => "TE",
            Self::K => "K",
            Self::Def => "DEF",
        }
    }

    /// Parses a raw provider code, folding `DST`/`D/ST` into `DEF`.
    pub fn from_code(value: &str) -> Option<Self> {
        let compact = value
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_uppercase();
        match compact.as_str() {
            "QB" => Some(Self::Qb),
            "RB" => Some(Self::Rb),
            "WR" => Some(Self::Wr),
            "TE" => Some(Self::Te),
            "K" => Some(Self::K),
            "DEF" | "DST" => Some(Self::Def),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRecord {
    pub source_id: String,
    pub first_name: String,
    pub last_name: String,
    pub team: Option<String>,
    pub position: String,
}

impl PlayerRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    pub fn team_or_empty(&self) -> &str {
        self.team.as_deref().unwrap_or("")
    }

    pub fn describe(&self) -> String {
        format!(
            "{} ({} {}, id {})",
            self.full_name(),
            display_or_dash(self.team_or_empty()),
            display_or_dash(&self.position),
            self.source_id
        )
    }
}

fn display_or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchConfidence {
    Exact,
    Alias,
    Fuzzy,
    CrossPosition,
    Unmatched,
}

impl MatchConfidence {
    pub const ALL: [MatchConfidence; 5] = [
        MatchConfidence::Exact,
        MatchConfidence::Alias,
        MatchConfidence::Fuzzy,
        MatchConfidence::CrossPosition,
        MatchConfidence::Unmatched,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Alias => "alias",
            Self::Fuzzy => "fuzzy",
            Self::CrossPosition => "cross_position",
            Self::Unmatched => "unmatched",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|confidence| confidence.as_str() == value.trim())
    }
}

/// Static reference row translating provider A's spelling of a name into
/// provider B's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasEntry {
    pub sport: String,
    pub alias_name: String,
    pub canonical_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrosswalkEntry {
    pub canonical_key: String,
    pub sport: String,
    pub season: i64,
    pub provider_a_id: Option<String>,
    pub provider_b_id: Option<String>,
    pub match_confidence: MatchConfidence,
    pub manual_override: bool,
    pub notes: Option<String>,
}

impl CrosswalkEntry {
    pub fn is_matched(&self) -> bool {
        self.provider_a_id.is_some() && self.provider_b_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{MatchConfidence, PlayerRecord, Position, Provider};

    #[test]
    fn position_codes_fold_defense_synonyms() {
        assert_eq!(Position::from_code("DST"), Some(Position::Def));
        assert_eq!(Position::from_code("d/st"), Some(Position::Def));
        assert_eq!(Position::from_code("DEF"), Some(Position::Def));
        assert_eq!(Position::from_code(" wr "), Some(Position::Wr));
        assert_eq!(Position::from_code("LB"), None);
    }

    #[test]
    fn confidence_round_trips_through_its_label() {
        for confidence in MatchConfidence::ALL {
            assert_eq!(MatchConfidence::parse(confidence.as_str()), Some(confidence));
        }
        assert_eq!(MatchConfidence::parse("probable"), None);
    }

    #[test]
    fn provider_parse_accepts_short_and_long_forms() {
        assert_eq!(Provider::parse("A"), Some(Provider::A));
        assert_eq!(Provider::parse("provider_b"), Some(Provider::B));
        assert_eq!(Provider::parse("c"), None);
        assert_eq!(Provider::A.counterpart(), Provider::B);
    }

    #[test]
    fn describe_marks_missing_team() {
        let record = PlayerRecord {
            source_id: "77".to_string(),
            first_name: "Free".to_string(),
            last_name: "Agent".to_string(),
            team: None,
            position: "WR".to_string(),
        };
        assert_eq!(record.describe(), "Free Agent (- WR, id 77)");
    }
}
