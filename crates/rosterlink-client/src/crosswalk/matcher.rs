//! The matching cascade.
//!
//! Each provider A record is offered to four passes in a fixed order (exact,
//! alias, name+position, name+team) and the first pass that returns a
//! candidate wins. A provider B record is consumed by the first acceptance
//! and is invisible to every later pass and record in the same run.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::crosswalk::alias::AliasResolver;
use crate::crosswalk::index::{CandidateIndex, NormalizedPlayer};
use crate::crosswalk::types::{MatchConfidence, PlayerRecord, Position, Provider};

/// Tie-break order for name+team candidates that disagree on position.
pub const POSITION_PRIORITY: [Position; 6] = [
    Position::Wr,
    Position::Rb,
    Position::Qb,
    Position::Te,
    Position::K,
    Position::Def,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome<'a> {
    pub provider_a: &'a PlayerRecord,
    pub provider_b: Option<&'a PlayerRecord>,
    pub confidence: MatchConfidence,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MatchResults<'a> {
    /// One outcome per provider A record, in input order.
    pub outcomes: Vec<MatchOutcome<'a>>,
    /// Provider B records nobody claimed, in input order.
    pub unmatched_b: Vec<&'a PlayerRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Accepted {
    position: usize,
    confidence: MatchConfidence,
    note: Option<String>,
}

/// Owns the run-scoped consumed set. Build a fresh engine per run.
pub struct MatchEngine<'i, 'a> {
    index: &'i CandidateIndex<'a>,
    aliases: &'i AliasResolver,
    consumed_b: HashSet<String>,
}

impl<'i, 'a> MatchEngine<'i, 'a> {
    pub fn new(index: &'i CandidateIndex<'a>, aliases: &'i AliasResolver) -> Self {
        Self {
            index,
            aliases,
            consumed_b: HashSet::new(),
        }
    }

    pub fn match_all(mut self, provider_a: &'a [PlayerRecord]) -> MatchResults<'a> {
        let outcomes = provider_a
            .iter()
            .map(|record| self.match_record(record))
            .collect::<Vec<MatchOutcome<'a>>>();

        let unmatched_b = self
            .index
            .records()
            .iter()
            .filter(|record| !self.consumed_b.contains(&record.source_id))
            .collect();

        MatchResults {
            outcomes,
            unmatched_b,
        }
    }

    pub fn match_record(&mut self, record: &'a PlayerRecord) -> MatchOutcome<'a> {
        let player = NormalizedPlayer::from_record(record);
        let accepted = self
            .exact_pass(&player)
            .or_else(|| self.alias_pass(record, &player))
            .or_else(|| self.name_position_pass(record, &player))
            .or_else(|| self.cross_position_pass(record, &player));

        let Some(accepted) = accepted else {
            return MatchOutcome {
                provider_a: record,
                provider_b: None,
                confidence: MatchConfidence::Unmatched,
                note: Some(unmatched_note(Provider::A, record)),
            };
        };

        let provider_b = self.index.record(accepted.position);
        if let Some(matched) = provider_b {
            self.consumed_b.insert(matched.source_id.clone());
            if accepted.confidence != MatchConfidence::Exact || accepted.note.is_some() {
                debug!(
                    provider_a_id = %record.source_id,
                    provider_b_id = %matched.source_id,
                    confidence = accepted.confidence.as_str(),
                    note = accepted.note.as_deref().unwrap_or(""),
                    "accepted non-exact crosswalk match"
                );
            }
        }

        MatchOutcome {
            provider_a: record,
            provider_b,
            confidence: accepted.confidence,
            note: accepted.note,
        }
    }

    fn exact_pass(&self, player: &NormalizedPlayer) -> Option<Accepted> {
        let position = self.index.exact(&player.full_key())?;
        if self.is_consumed(position) {
            return None;
        }
        Some(Accepted {
            position,
            confidence: MatchConfidence::Exact,
            note: None,
        })
    }

    fn alias_pass(&self, record: &PlayerRecord, player: &NormalizedPlayer) -> Option<Accepted> {
        let translated = self.aliases.resolve(&record.full_name());
        if translated == player.name {
            return None;
        }

        let position = self
            .index
            .normalized_players()
            .iter()
            .enumerate()
            .find(|(position, candidate)| {
                candidate.name == translated
                    && candidate.team == player.team
                    && !self.is_consumed(*position)
            })
            .map(|(position, _)| position)?;

        Some(Accepted {
            position,
            confidence: MatchConfidence::Alias,
            note: Some(format!(
                "Alias: A({}) translated to B({translated})",
                player.name
            )),
        })
    }

    fn name_position_pass(
        &self,
        record: &PlayerRecord,
        player: &NormalizedPlayer,
    ) -> Option<Accepted> {
        let candidates = self.unconsumed(self.index.by_name_position(&player.name_position_key()));

        match candidates.as_slice() {
            [] => None,
            [only] => Some(Accepted {
                position: *only,
                confidence: MatchConfidence::Fuzzy,
                note: Some(team_mismatch_note(record, self.index.record(*only))),
            }),
            [first, ..] => {
                let same_team = candidates.iter().copied().find(|position| {
                    self.index
                        .normalized(*position)
                        .is_some_and(|candidate| candidate.team == player.team)
                });
                if let Some(position) = same_team {
                    // Name, team and position all agree even though the record
                    // was reached through the fuzzy bucket.
                    return Some(Accepted {
                        position,
                        confidence: MatchConfidence::Exact,
                        note: Some(format!(
                            "Resolved by team among {} name+position candidates",
                            candidates.len()
                        )),
                    });
                }

                Some(Accepted {
                    position: *first,
                    confidence: MatchConfidence::Fuzzy,
                    note: Some(format!(
                        "{} name+position candidates, none on team {}; took first. {}",
                        candidates.len(),
                        display_team(record),
                        team_mismatch_note(record, self.index.record(*first))
                    )),
                })
            }
        }
    }

    fn cross_position_pass(
        &self,
        record: &PlayerRecord,
        player: &NormalizedPlayer,
    ) -> Option<Accepted> {
        let mut candidates = self
            .unconsumed(self.index.by_name_team(&player.name_team_key()))
            .into_iter()
            .filter_map(|position| {
                self.index
                    .record(position)
                    .map(|candidate| (position, candidate))
            })
            .collect::<Vec<(usize, &PlayerRecord)>>();

        match candidates.len() {
            0 => None,
            1 => {
                let (position, candidate) = candidates[0];
                Some(Accepted {
                    position,
                    confidence: MatchConfidence::CrossPosition,
                    note: Some(position_mismatch_note(record, candidate)),
                })
            }
            count => {
                candidates.sort_by(|left, right| {
                    position_priority_cmp(
                        (left.0, left.1.position.as_str()),
                        (right.0, right.1.position.as_str()),
                    )
                });
                let (position, candidate) = candidates[0];
                Some(Accepted {
                    position,
                    confidence: MatchConfidence::CrossPosition,
                    note: Some(format!(
                        "{count} name+team candidates; chose {} by position priority. {}",
                        candidate.position,
                        position_mismatch_note(record, candidate)
                    )),
                })
            }
        }
    }

    fn unconsumed(&self, bucket: &[usize]) -> Vec<usize> {
        bucket
            .iter()
            .copied()
            .filter(|position| !self.is_consumed(*position))
            .collect()
    }

    fn is_consumed(&self, position: usize) -> bool {
        self.index
            .record(position)
            .is_none_or(|record| self.consumed_b.contains(&record.source_id))
    }
}

/// Rank of a raw position code in [`POSITION_PRIORITY`]; unlisted codes rank
/// after every listed one.
pub fn position_rank(position: &str) -> usize {
    Position::from_code(position)
        .and_then(|parsed| POSITION_PRIORITY.iter().position(|ranked| *ranked == parsed))
        .unwrap_or(POSITION_PRIORITY.len())
}

/// Orders `(input_order, position_code)` pairs by position priority, then by
/// input order.
pub fn position_priority_cmp(left: (usize, &str), right: (usize, &str)) -> Ordering {
    position_rank(left.1)
        .cmp(&position_rank(right.1))
        .then_with(|| left.0.cmp(&right.0))
}

fn team_mismatch_note(record: &PlayerRecord, candidate: Option<&PlayerRecord>) -> String {
    let candidate_team = candidate.map(display_team).unwrap_or_default();
    format!(
        "Team mismatch: A({}) vs B({candidate_team})",
        display_team(record)
    )
}

fn position_mismatch_note(record: &PlayerRecord, candidate: &PlayerRecord) -> String {
    format!(
        "Position mismatch: A({}) vs B({})",
        record.position, candidate.position
    )
}

pub(crate) fn unmatched_note(side: Provider, record: &PlayerRecord) -> String {
    format!(
        "No {} record for {} player {}",
        side.counterpart().label(),
        side.label(),
        record.describe()
    )
}

fn display_team(record: &PlayerRecord) -> String {
    record.team_or_empty().to_string()
}
