use std::collections::HashMap;
use std::path::Path;

use rusqlite::{Connection, TransactionBehavior, params};
use tracing::warn;

use crate::ClientResult;
use crate::contracts::types::AliasRow;
use crate::crosswalk::normalize::normalize_name;
use crate::crosswalk::types::AliasEntry;
use crate::state::sqlite_failure;
use crate::store::Replaced;

/// Alias map for `sport`, keyed by normalized alias. A store that cannot be
/// read yields an empty map so a build still runs without the alias pass.
pub fn load_alias_table(
    connection: &Connection,
    db_path: &Path,
    sport: &str,
) -> HashMap<String, String> {
    match load_alias_rows(connection, db_path, sport) {
        Ok(rows) => rows
            .into_iter()
            .map(|row| (row.alias_name, row.canonical_name))
            .collect(),
        Err(error) => {
            warn!(
                sport,
                code = %error.code,
                message = %error.message,
                "alias table unavailable; continuing without aliases"
            );
            HashMap::new()
        }
    }
}

pub fn load_alias_rows(
    connection: &Connection,
    db_path: &Path,
    sport: &str,
) -> ClientResult<Vec<AliasRow>> {
    let mut statement = connection
        .prepare(
            "SELECT alias_name, canonical_name
             FROM internal_player_aliases
             WHERE sport = ?1
             ORDER BY alias_name ASC",
        )
        .map_err(sqlite_failure(db_path))?;

    let rows_iter = statement
        .query_map([sport], |row| {
            Ok(AliasRow {
                alias_name: row.get(0)?,
                canonical_name: row.get(1)?,
            })
        })
        .map_err(sqlite_failure(db_path))?;

    let mut rows = Vec::new();
    for row in rows_iter {
        rows.push(row.map_err(sqlite_failure(db_path))?);
    }
    Ok(rows)
}

/// Replaces the alias table of `sport`. Names are stored normalized; a later
/// row with the same alias wins.
pub fn replace_aliases(
    connection: &mut Connection,
    db_path: &Path,
    sport: &str,
    entries: &[AliasEntry],
) -> ClientResult<Replaced> {
    let transaction = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(sqlite_failure(db_path))?;

    let removed = transaction
        .execute(
            "DELETE FROM internal_player_aliases WHERE sport = ?1",
            [sport],
        )
        .map_err(sqlite_failure(db_path))?;

    {
        let mut insert = transaction
            .prepare(
                "INSERT OR REPLACE INTO internal_player_aliases (sport, alias_name, canonical_name)
                 VALUES (?1, ?2, ?3)",
            )
            .map_err(sqlite_failure(db_path))?;

        for entry in entries {
            let alias_name = normalize_name(&entry.alias_name);
            let canonical_name = normalize_name(&entry.canonical_name);
            if alias_name.is_empty() || canonical_name.is_empty() {
                continue;
            }
            insert
                .execute(params![sport, alias_name, canonical_name])
                .map_err(sqlite_failure(db_path))?;
        }
    }

    let written = transaction
        .query_row(
            "SELECT COUNT(*) FROM internal_player_aliases WHERE sport = ?1",
            [sport],
            |row| row.get::<_, i64>(0),
        )
        .map_err(sqlite_failure(db_path))?;

    transaction
        .commit()
        .map_err(sqlite_failure(db_path))?;

    Ok(Replaced {
        removed: removed as i64,
        written,
    })
}
