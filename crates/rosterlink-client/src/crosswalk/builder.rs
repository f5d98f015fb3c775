use crate::crosswalk::index::NormalizedPlayer;
use crate::crosswalk::matcher::{MatchOutcome, MatchResults, unmatched_note};
use crate::crosswalk::types::{CrosswalkEntry, MatchConfidence, PlayerRecord, Provider};

/// Stable identity for an entry, taken from the normalized name, team and
/// position of whichever record anchors it.
pub fn canonical_key(record: &PlayerRecord) -> String {
    let normalized = NormalizedPlayer::from_record(record);
    let team = if normalized.team.is_empty() {
        "fa"
    } else {
        normalized.team.as_str()
    };
    format!("{}-{team}-{}", normalized.name, normalized.position)
}

pub fn build_entries(sport: &str, season: i64, results: &MatchResults<'_>) -> Vec<CrosswalkEntry> {
    let mut entries = Vec::with_capacity(results.outcomes.len() + results.unmatched_b.len());
    entries.extend(
        results
            .outcomes
            .iter()
            .map(|outcome| entry_from_outcome(sport, season, outcome)),
    );
    entries.extend(
        results
            .unmatched_b
            .iter()
            .map(|record| entry_for_provider_b_only(sport, season, record)),
    );
    entries
}

pub fn entry_from_outcome(sport: &str, season: i64, outcome: &MatchOutcome<'_>) -> CrosswalkEntry {
    CrosswalkEntry {
        canonical_key: canonical_key(outcome.provider_a),
        sport: sport.to_string(),
        season,
        provider_a_id: Some(outcome.provider_a.source_id.clone()),
        provider_b_id: outcome
            .provider_b
            .map(|record| record.source_id.clone()),
        match_confidence: outcome.confidence,
        manual_override: false,
        notes: outcome.note.clone(),
    }
}

pub fn entry_for_provider_b_only(sport: &str, season: i64, record: &PlayerRecord) -> CrosswalkEntry {
    CrosswalkEntry {
        canonical_key: canonical_key(record),
        sport: sport.to_string(),
        season,
        provider_a_id: None,
        provider_b_id: Some(record.source_id.clone()),
        match_confidence: MatchConfidence::Unmatched,
        manual_override: false,
        notes: Some(unmatched_note(Provider::B, record)),
    }
}

#[cfg(test)]
mod tests {
    use super::{build_entries, canonical_key, entry_for_provider_b_only};
    use crate::crosswalk::matcher::{MatchOutcome, MatchResults};
    use crate::crosswalk::types::{MatchConfidence, PlayerRecord};

    fn record(id: &str, team: Option<&str>, position: &str) -> PlayerRecord {
        PlayerRecord {
            source_id: id.to_string(),
            first_name: "Taysom".to_string(),
            last_name: "Hill".to_string(),
            team: team.map(std::string::ToString::to_string),
            position: position.to_string(),
        }
    }

    #[test]
    fn canonical_key_uses_normalized_fields() {
        assert_eq!(canonical_key(&record("1", Some("NO"), "TE")), "taysomhill-no-te");
        assert_eq!(canonical_key(&record("1", None, "DST")), "taysomhill-fa-def");
    }

    #[test]
    fn matched_outcome_prefers_provider_a_identity() {
        let provider_a = record("1", Some("NO"), "TE");
        let provider_b = record("b", Some("NO"), "QB");
        let results = MatchResults {
            outcomes: vec![MatchOutcome {
                provider_a: &provider_a,
                provider_b: Some(&provider_b),
                confidence: MatchConfidence::CrossPosition,
                note: Some("Position mismatch: A(TE) vs B(QB)".to_string()),
            }],
            unmatched_b: Vec::new(),
        };

        let entries = build_entries("nfl", 2024, &results);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].canonical_key, "taysomhill-no-te");
        assert_eq!(entries[0].provider_a_id.as_deref(), Some("1"));
        assert_eq!(entries[0].provider_b_id.as_deref(), Some("b"));
        assert_eq!(entries[0].match_confidence, MatchConfidence::CrossPosition);
        assert!(!entries[0].manual_override);
        assert!(entries[0].is_matched());
    }

    #[test]
    fn provider_b_only_entry_keeps_b_identity() {
        let entry = entry_for_provider_b_only("nfl", 2024, &record("b", Some("NO"), "QB"));
        assert_eq!(entry.canonical_key, "taysomhill-no-qb");
        assert_eq!(entry.provider_a_id, None);
        assert_eq!(entry.provider_b_id.as_deref(), Some("b"));
        assert_eq!(entry.match_confidence, MatchConfidence::Unmatched);
        assert!(
            entry
                .notes
                .as_deref()
                .is_some_and(|note| note.starts_with("No provider A record for provider B player"))
        );
    }
}
