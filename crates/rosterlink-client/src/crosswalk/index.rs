use std::collections::HashMap;

use crate::crosswalk::normalize::{normalize_name, normalize_position, normalize_team};
use crate::crosswalk::types::PlayerRecord;

const KEY_SEPARATOR: char = '|';

/// Comparison forms of one record, computed once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPlayer {
    pub name: String,
    pub team: String,
    pub position: String,
}

impl NormalizedPlayer {
    pub fn from_record(record: &PlayerRecord) -> Self {
        Self {
            name: normalize_name(&record.full_name()),
            team: normalize_team(record.team.as_deref()),
            position: normalize_position(&record.position),
        }
    }

    pub fn full_key(&self) -> String {
        format!(
            "{}{KEY_SEPARATOR}{}{KEY_SEPARATOR}{}",
            self.name, self.team, self.position
        )
    }

    pub fn name_position_key(&self) -> String {
        format!("{}{KEY_SEPARATOR}{}", self.name, self.position)
    }

    pub fn name_team_key(&self) -> String {
        format!("{}{KEY_SEPARATOR}{}", self.name, self.team)
    }
}

/// Lookup structures over provider B's roster. Buckets hold positions into
/// the borrowed slice, in input order.
#[derive(Debug)]
pub struct CandidateIndex<'a> {
    records: &'a [PlayerRecord],
    normalized: Vec<NormalizedPlayer>,
    exact: HashMap<String, usize>,
    by_name_position: HashMap<String, Vec<usize>>,
    by_name_team: HashMap<String, Vec<usize>>,
}

impl<'a> CandidateIndex<'a> {
    pub fn build(records: &'a [PlayerRecord]) -> Self {
        let mut normalized = Vec::with_capacity(records.len());
        let mut exact = HashMap::with_capacity(records.len());
        let mut by_name_position: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_name_team: HashMap<String, Vec<usize>> = HashMap::new();

        for (position, record) in records.iter().enumerate() {
            let player = NormalizedPlayer::from_record(record);
            // Duplicate full keys keep the later record.
            exact.insert(player.full_key(), position);
            by_name_position
                .entry(player.name_position_key())
                .or_default()
                .push(position);
            by_name_team
                .entry(player.name_team_key())
                .or_default()
                .push(position);
            normalized.push(player);
        }

        Self {
            records,
            normalized,
            exact,
            by_name_position,
            by_name_team,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &'a [PlayerRecord] {
        self.records
    }

    pub fn record(&self, position: usize) -> Option<&'a PlayerRecord> {
        self.records.get(position)
    }

    pub fn normalized(&self, position: usize) -> Option<&NormalizedPlayer> {
        self.normalized.get(position)
    }

    pub fn normalized_players(&self) -> &[NormalizedPlayer] {
        &self.normalized
    }

    pub fn exact(&self, full_key: &str) -> Option<usize> {
        self.exact.get(full_key).copied()
    }

    pub fn by_name_position(&self, key: &str) -> &[usize] {
        self.by_name_position
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn by_name_team(&self, key: &str) -> &[usize] {
        self.by_name_team
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::{CandidateIndex, NormalizedPlayer};
    use crate::crosswalk::types::PlayerRecord;

    fn player(id: &str, first: &str, last: &str, team: &str, position: &str) -> PlayerRecord {
        PlayerRecord {
            source_id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            team: Some(team.to_string()),
            position: position.to_string(),
        }
    }

    #[test]
    fn keys_combine_normalized_fields() {
        let normalized =
            NormalizedPlayer::from_record(&player("1", "Patrick", "Mahomes II", "KC", "QB"));
        assert_eq!(normalized.full_key(), "patrickmahomes|kc|qb");
        assert_eq!(normalized.name_position_key(), "patrickmahomes|qb");
        assert_eq!(normalized.name_team_key(), "patrickmahomes|kc");
    }

    #[test]
    fn defense_synonyms_share_name_position_bucket() {
        let records = vec![
            player("a", "Buffalo", "Bills", "BUF", "DST"),
            player("b", "Buffalo", "Bills", "BUF", "DEF"),
        ];
        let index = CandidateIndex::build(&records);
        assert_eq!(index.by_name_position("buffalobills|def"), &[0, 1]);
    }

    #[test]
    fn buckets_keep_input_order_and_exact_keeps_last_duplicate() {
        let records = vec![
            player("a", "Mike", "Williams", "NYJ", "WR"),
            player("b", "Mike", "Williams", "PIT", "WR"),
            player("c", "Mike", "Williams", "NYJ", "WR"),
        ];
        let index = CandidateIndex::build(&records);
        assert_eq!(index.len(), 3);
        assert_eq!(index.by_name_position("mikewilliams|wr"), &[0, 1, 2]);
        assert_eq!(index.by_name_team("mikewilliams|nyj"), &[0, 2]);
        assert_eq!(index.exact("mikewilliams|nyj|wr"), Some(2));
        assert_eq!(index.exact("mikewilliams|pit|wr"), Some(1));
    }

    #[test]
    fn missing_keys_yield_empty_buckets() {
        let records: Vec<PlayerRecord> = Vec::new();
        let index = CandidateIndex::build(&records);
        assert!(index.is_empty());
        assert!(index.by_name_team("nobody|kc").is_empty());
        assert_eq!(index.exact("nobody|kc|qb"), None);
    }
}
