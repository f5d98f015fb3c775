pub mod alias;
pub mod builder;
pub mod index;
pub mod matcher;
pub mod normalize;
pub mod types;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::low_match_rate_threshold;
use crate::crosswalk::alias::AliasResolver;
use crate::crosswalk::builder::build_entries;
use crate::crosswalk::index::CandidateIndex;
use crate::crosswalk::matcher::MatchEngine;
use crate::crosswalk::types::{CrosswalkEntry, MatchConfidence, PlayerRecord, Provider};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrosswalkSummary {
    pub entries: i64,
    pub provider_a_total: i64,
    pub provider_b_total: i64,
    pub matched_exact: i64,
    pub matched_alias: i64,
    pub matched_fuzzy: i64,
    pub matched_cross_position: i64,
    pub unmatched: i64,
    pub unmatched_provider_a: i64,
    pub unmatched_provider_b: i64,
    pub match_rate: f64,
}

impl CrosswalkSummary {
    pub fn from_entries(
        entries: &[CrosswalkEntry],
        provider_a_total: usize,
        provider_b_total: usize,
    ) -> Self {
        let mut summary = Self {
            entries: entries.len() as i64,
            provider_a_total: provider_a_total as i64,
            provider_b_total: provider_b_total as i64,
            ..Self::default()
        };

        for entry in entries {
            match entry.match_confidence {
                MatchConfidence::Exact => summary.matched_exact += 1,
                MatchConfidence::Alias => summary.matched_alias += 1,
                MatchConfidence::Fuzzy => summary.matched_fuzzy += 1,
                MatchConfidence::CrossPosition => summary.matched_cross_position += 1,
                MatchConfidence::Unmatched => {
                    summary.unmatched += 1;
                    if entry.provider_a_id.is_some() {
                        summary.unmatched_provider_a += 1;
                    } else {
                        summary.unmatched_provider_b += 1;
                    }
                }
            }
        }

        summary.match_rate = if provider_a_total == 0 {
            0.0
        } else {
            summary.matched() as f64 / provider_a_total as f64
        };
        summary
    }

    pub fn matched(&self) -> i64 {
        self.matched_exact + self.matched_alias + self.matched_fuzzy + self.matched_cross_position
    }
}

#[derive(Debug, Clone)]
pub struct CrosswalkRun {
    pub sport: String,
    pub season: i64,
    pub entries: Vec<CrosswalkEntry>,
    pub summary: CrosswalkSummary,
}

/// Resolves provider A's roster against provider B's for one
/// `(sport, season)`. Pure and synchronous; every call builds its own index
/// and consumed set.
pub fn resolve_crosswalk(
    sport: &str,
    season: i64,
    provider_a: &[PlayerRecord],
    provider_b: &[PlayerRecord],
    aliases: &AliasResolver,
) -> ClientResult<CrosswalkRun> {
    if provider_a.is_empty() {
        return Err(ClientError::empty_input(Provider::A, sport, season));
    }
    if provider_b.is_empty() {
        return Err(ClientError::empty_input(Provider::B, sport, season));
    }

    let index = CandidateIndex::build(provider_b);
    let results = MatchEngine::new(&index, aliases).match_all(provider_a);
    let entries = build_entries(sport, season, &results);
    let summary = CrosswalkSummary::from_entries(&entries, provider_a.len(), provider_b.len());

    info!(
        sport,
        season,
        entries = summary.entries,
        matched_exact = summary.matched_exact,
        matched_alias = summary.matched_alias,
        matched_fuzzy = summary.matched_fuzzy,
        matched_cross_position = summary.matched_cross_position,
        unmatched = summary.unmatched,
        aliases = aliases.len(),
        "resolved crosswalk"
    );

    let threshold = low_match_rate_threshold();
    if summary.match_rate < threshold {
        warn!(
            sport,
            season,
            match_rate = summary.match_rate,
            threshold,
            "provider A match rate is below the warning threshold"
        );
    }

    Ok(CrosswalkRun {
        sport: sport.to_string(),
        season,
        entries,
        summary,
    })
}
