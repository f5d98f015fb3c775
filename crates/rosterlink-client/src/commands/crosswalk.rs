use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{load_setup, normalize_sport, validate_season};
use crate::config::low_match_rate_threshold;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{
    CrosswalkBuildData, CrosswalkListData, CrosswalkPreview, CrosswalkRunsData, NextStep,
};
use crate::crosswalk::alias::AliasResolver;
use crate::crosswalk::resolve_crosswalk;
use crate::crosswalk::types::{CrosswalkEntry, MatchConfidence, Provider};
use crate::store;

const BUILD_COMMAND: &str = "crosswalk build";
const LIST_COMMAND: &str = "crosswalk list";
const RUNS_COMMAND: &str = "crosswalk runs";
const PREVIEW_LIMIT: usize = 50;

#[derive(Debug, Default)]
pub struct CrosswalkBuildOptions<'a> {
    pub sport: String,
    pub season: i64,
    pub dry_run: bool,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct CrosswalkListOptions<'a> {
    pub sport: String,
    pub season: i64,
    pub confidence: Option<MatchConfidence>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct CrosswalkRunsOptions<'a> {
    pub sport: String,
    pub season: i64,
    pub home_override: Option<&'a Path>,
}

pub fn build(sport: &str, season: i64, dry_run: bool) -> ClientResult<SuccessEnvelope> {
    build_with_options(CrosswalkBuildOptions {
        sport: sport.to_string(),
        season,
        dry_run,
        home_override: None,
    })
}

/// Loads both rosters and the sport's alias table, runs the matching
/// cascade, and unless `dry_run` replaces the stored crosswalk for
/// `(sport, season)` with the result.
#[doc(hidden)]
pub fn build_with_options(options: CrosswalkBuildOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let sport = normalize_sport(&options.sport, BUILD_COMMAND)?;
    let season = validate_season(options.season, BUILD_COMMAND)?;
    let setup = load_setup(options.home_override)?;
    let mut connection = setup.open()?;

    let provider_a = store::load_players(&connection, &setup.db_path, &sport, season, Provider::A)?;
    let provider_b = store::load_players(&connection, &setup.db_path, &sport, season, Provider::B)?;
    let aliases = AliasResolver::new(store::load_alias_table(
        &connection,
        &setup.db_path,
        &sport,
    ));

    let run = resolve_crosswalk(&sport, season, &provider_a, &provider_b, &aliases)?;

    let run_id = if options.dry_run {
        None
    } else {
        Some(store::replace_crosswalk(
            &mut connection,
            &setup.db_path,
            &run,
        )?)
    };

    let message = if options.dry_run {
        format!(
            "Resolved {} entries for {sport} {season}. Dry run: nothing was written.",
            run.summary.entries
        )
    } else {
        format!(
            "Stored {} crosswalk entries for {sport} {season}.",
            run.summary.entries
        )
    };
    let next_step = if options.dry_run {
        NextStep {
            label: "Persist this crosswalk".to_string(),
            command: format!("rosterlink crosswalk build --sport {sport} --season {season}"),
        }
    } else {
        NextStep {
            label: "Review fuzzy matches".to_string(),
            command: format!(
                "rosterlink crosswalk list --sport {sport} --season {season} --confidence fuzzy"
            ),
        }
    };

    let data = CrosswalkBuildData {
        dry_run: options.dry_run,
        run_id,
        low_match_rate: run.summary.match_rate < low_match_rate_threshold(),
        flagged_preview: flagged_preview(&run.entries),
        summary: run.summary,
        message,
        next_step,
        sport,
        season,
    };
    success(BUILD_COMMAND, data)
}

pub fn list(
    sport: &str,
    season: i64,
    confidence: Option<MatchConfidence>,
) -> ClientResult<SuccessEnvelope> {
    list_with_options(CrosswalkListOptions {
        sport: sport.to_string(),
        season,
        confidence,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn list_with_options(options: CrosswalkListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let sport = normalize_sport(&options.sport, LIST_COMMAND)?;
    let season = validate_season(options.season, LIST_COMMAND)?;
    let setup = load_setup(options.home_override)?;
    let connection = setup.open()?;
    let rows = store::load_crosswalk(
        &connection,
        &setup.db_path,
        &sport,
        season,
        options.confidence,
    )?;

    let data = CrosswalkListData {
        sport,
        season,
        confidence: options
            .confidence
            .map(|confidence| confidence.as_str().to_string()),
        total: rows.len() as i64,
        rows,
    };
    success(LIST_COMMAND, data)
}

pub fn runs(sport: &str, season: i64) -> ClientResult<SuccessEnvelope> {
    runs_with_options(CrosswalkRunsOptions {
        sport: sport.to_string(),
        season,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn runs_with_options(options: CrosswalkRunsOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let sport = normalize_sport(&options.sport, RUNS_COMMAND)?;
    let season = validate_season(options.season, RUNS_COMMAND)?;
    let setup = load_setup(options.home_override)?;
    let connection = setup.open()?;
    let rows = store::list_runs(&connection, &setup.db_path, &sport, season)?;

    success(RUNS_COMMAND, CrosswalkRunsData { sport, season, rows })
}

/// Entries a human should look at: every non-exact outcome plus exact ones
/// that carry a note.
fn flagged_preview(entries: &[CrosswalkEntry]) -> CrosswalkPreview {
    let flagged = entries
        .iter()
        .filter(|entry| entry.match_confidence != MatchConfidence::Exact || entry.notes.is_some())
        .collect::<Vec<&CrosswalkEntry>>();
    let rows = flagged
        .iter()
        .take(PREVIEW_LIMIT)
        .map(|entry| (*entry).clone())
        .collect::<Vec<CrosswalkEntry>>();

    CrosswalkPreview {
        returned: rows.len() as i64,
        truncated: flagged.len() > PREVIEW_LIMIT,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::flagged_preview;
    use crate::crosswalk::types::{CrosswalkEntry, MatchConfidence};

    fn entry(confidence: MatchConfidence, notes: Option<&str>) -> CrosswalkEntry {
        CrosswalkEntry {
            canonical_key: "key".to_string(),
            sport: "nfl".to_string(),
            season: 2024,
            provider_a_id: Some("1".to_string()),
            provider_b_id: Some("a".to_string()),
            match_confidence: confidence,
            manual_override: false,
            notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn preview_skips_clean_exact_matches() {
        let entries = vec![
            entry(MatchConfidence::Exact, None),
            entry(MatchConfidence::Exact, Some("Resolved by team among 2 name+position candidates")),
            entry(MatchConfidence::Fuzzy, Some("Team mismatch: A(TEN) vs B(BAL)")),
        ];
        let preview = flagged_preview(&entries);
        assert_eq!(preview.returned, 2);
        assert!(!preview.truncated);
    }

    #[test]
    fn preview_is_truncated() {
        let entries = (0..60)
            .map(|_| entry(MatchConfidence::Unmatched, Some("none")))
            .collect::<Vec<CrosswalkEntry>>();
        let preview = flagged_preview(&entries);
        assert_eq!(preview.returned, 50);
        assert!(preview.truncated);
    }
}
