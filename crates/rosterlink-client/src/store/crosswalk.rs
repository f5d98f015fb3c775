use std::path::Path;

use rusqlite::{Connection, TransactionBehavior, params};
use tracing::debug;
use ulid::Ulid;

use crate::contracts::types::CrosswalkRunRow;
use crate::crosswalk::CrosswalkRun;
use crate::crosswalk::types::{CrosswalkEntry, MatchConfidence};
use crate::state::sqlite_failure;
use crate::store::{bool_to_sql, now_timestamp};
use crate::{ClientError, ClientResult};

/// Swaps the stored crosswalk for the run's `(sport, season)` and records the
/// run. Readers see the old crosswalk or the new one, never a mix.
pub fn replace_crosswalk(
    connection: &mut Connection,
    db_path: &Path,
    run: &CrosswalkRun,
) -> ClientResult<String> {
    let run_id = format!("run_{}", Ulid::new());
    let timestamp = now_timestamp();

    let transaction = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(sqlite_failure(db_path))?;

    let removed = transaction
        .execute(
            "DELETE FROM internal_crosswalk WHERE sport = ?1 AND season = ?2",
            params![&run.sport, run.season],
        )
        .map_err(sqlite_failure(db_path))?;

    {
        let mut insert = transaction
            .prepare(
                "INSERT INTO internal_crosswalk (
                    sport,
                    season,
                    entry_order,
                    canonical_key,
                    provider_a_id,
                    provider_b_id,
                    match_confidence,
                    manual_override,
                    notes
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )
            .map_err(sqlite_failure(db_path))?;

        for (entry_order, entry) in run.entries.iter().enumerate() {
            insert
                .execute(params![
                    &entry.sport,
                    entry.season,
                    entry_order as i64,
                    &entry.canonical_key,
                    &entry.provider_a_id,
                    &entry.provider_b_id,
                    entry.match_confidence.as_str(),
                    bool_to_sql(entry.manual_override),
                    &entry.notes,
                ])
                .map_err(sqlite_failure(db_path))?;
        }
    }

    let summary = &run.summary;
    transaction
        .execute(
            "INSERT INTO internal_crosswalk_runs (
                run_id,
                sport,
                season,
                created_at,
                entries,
                matched_exact,
                matched_alias,
                matched_fuzzy,
                matched_cross_position,
                unmatched
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                &run_id,
                &run.sport,
                run.season,
                &timestamp,
                summary.entries,
                summary.matched_exact,
                summary.matched_alias,
                summary.matched_fuzzy,
                summary.matched_cross_position,
                summary.unmatched,
            ],
        )
        .map_err(sqlite_failure(db_path))?;

    transaction
        .commit()
        .map_err(sqlite_failure(db_path))?;

    debug!(
        %run_id,
        sport = %run.sport,
        season = run.season,
        removed,
        written = run.entries.len(),
        "replaced crosswalk"
    );
    Ok(run_id)
}

struct StoredEntry {
    canonical_key: String,
    provider_a_id: Option<String>,
    provider_b_id: Option<String>,
    match_confidence: String,
    manual_override: bool,
    notes: Option<String>,
}

pub fn load_crosswalk(
    connection: &Connection,
    db_path: &Path,
    sport: &str,
    season: i64,
    confidence: Option<MatchConfidence>,
) -> ClientResult<Vec<CrosswalkEntry>> {
    let mut statement = connection
        .prepare(
            "SELECT
                canonical_key,
                provider_a_id,
                provider_b_id,
                match_confidence,
                manual_override,
                notes
             FROM internal_crosswalk
             WHERE sport = ?1 AND season = ?2 AND (?3 IS NULL OR match_confidence = ?3)
             ORDER BY entry_order ASC",
        )
        .map_err(sqlite_failure(db_path))?;

    let filter = confidence.map(MatchConfidence::as_str);
    let rows_iter = statement
        .query_map(params![sport, season, filter], |row| {
            Ok(StoredEntry {
                canonical_key: row.get(0)?,
                provider_a_id: row.get(1)?,
                provider_b_id: row.get(2)?,
                match_confidence: row.get(3)?,
                manual_override: row.get::<_, i64>(4)? != 0,
                notes: row.get(5)?,
            })
        })
        .map_err(sqlite_failure(db_path))?;

    let mut entries = Vec::new();
    for row in rows_iter {
        let stored = row.map_err(sqlite_failure(db_path))?;
        let match_confidence = MatchConfidence::parse(&stored.match_confidence)
            .ok_or_else(|| ClientError::store_corrupt(db_path))?;
        entries.push(CrosswalkEntry {
            canonical_key: stored.canonical_key,
            sport: sport.to_string(),
            season,
            provider_a_id: stored.provider_a_id,
            provider_b_id: stored.provider_b_id,
            match_confidence,
            manual_override: stored.manual_override,
            notes: stored.notes,
        });
    }
    Ok(entries)
}

/// Persisted builds for `(sport, season)`, newest first.
pub fn list_runs(
    connection: &Connection,
    db_path: &Path,
    sport: &str,
    season: i64,
) -> ClientResult<Vec<CrosswalkRunRow>> {
    let mut statement = connection
        .prepare(
            "SELECT
                run_id,
                sport,
                season,
                created_at,
                entries,
                matched_exact,
                matched_alias,
                matched_fuzzy,
                matched_cross_position,
                unmatched
             FROM internal_crosswalk_runs
             WHERE sport = ?1 AND season = ?2
             ORDER BY CAST(created_at AS INTEGER) DESC, run_id DESC",
        )
        .map_err(sqlite_failure(db_path))?;

    let rows_iter = statement
        .query_map(params![sport, season], |row| {
            Ok(CrosswalkRunRow {
                run_id: row.get(0)?,
                sport: row.get(1)?,
                season: row.get(2)?,
                created_at: row.get(3)?,
                entries: row.get(4)?,
                matched_exact: row.get(5)?,
                matched_alias: row.get(6)?,
                matched_fuzzy: row.get(7)?,
                matched_cross_position: row.get(8)?,
                unmatched: row.get(9)?,
            })
        })
        .map_err(sqlite_failure(db_path))?;

    let mut rows = Vec::new();
    for row in rows_iter {
        rows.push(row.map_err(sqlite_failure(db_path))?);
    }
    Ok(rows)
}
