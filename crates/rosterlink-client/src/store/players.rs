use std::path::Path;

use rusqlite::{Connection, TransactionBehavior, params};
use tracing::debug;

use crate::ClientResult;
use crate::crosswalk::types::{PlayerRecord, Provider};
use crate::state::sqlite_failure;
use crate::store::Replaced;

/// Roster for one provider, in the order it was imported.
pub fn load_players(
    connection: &Connection,
    db_path: &Path,
    sport: &str,
    season: i64,
    provider: Provider,
) -> ClientResult<Vec<PlayerRecord>> {
    let mut statement = connection
        .prepare(
            "SELECT source_id, first_name, last_name, team, position
             FROM internal_players
             WHERE sport = ?1 AND season = ?2 AND provider = ?3
             ORDER BY input_order ASC",
        )
        .map_err(sqlite_failure(db_path))?;

    let rows_iter = statement
        .query_map(params![sport, season, provider.as_str()], |row| {
            Ok(PlayerRecord {
                source_id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                team: row.get(3)?,
                position: row.get(4)?,
            })
        })
        .map_err(sqlite_failure(db_path))?;

    let mut players = Vec::new();
    for row in rows_iter {
        players.push(row.map_err(sqlite_failure(db_path))?);
    }
    Ok(players)
}

pub fn count_players(
    connection: &Connection,
    db_path: &Path,
    sport: &str,
    season: i64,
    provider: Provider,
) -> ClientResult<i64> {
    connection
        .query_row(
            "SELECT COUNT(*) FROM internal_players
             WHERE sport = ?1 AND season = ?2 AND provider = ?3",
            params![sport, season, provider.as_str()],
            |row| row.get::<_, i64>(0),
        )
        .map_err(sqlite_failure(db_path))
}

/// Drops the stored roster for `(sport, season, provider)` and writes `rows`
/// in its place.
pub fn replace_players(
    connection: &mut Connection,
    db_path: &Path,
    sport: &str,
    season: i64,
    provider: Provider,
    rows: &[PlayerRecord],
) -> ClientResult<Replaced> {
    let transaction = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(sqlite_failure(db_path))?;

    let removed = transaction
        .execute(
            "DELETE FROM internal_players WHERE sport = ?1 AND season = ?2 AND provider = ?3",
            params![sport, season, provider.as_str()],
        )
        .map_err(sqlite_failure(db_path))?;

    {
        let mut insert = transaction
            .prepare(
                "INSERT INTO internal_players (
                    sport,
                    season,
                    provider,
                    source_id,
                    first_name,
                    last_name,
                    team,
                    position,
                    input_order
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )
            .map_err(sqlite_failure(db_path))?;

        for (input_order, player) in rows.iter().enumerate() {
            insert
                .execute(params![
                    sport,
                    season,
                    provider.as_str(),
                    &player.source_id,
                    &player.first_name,
                    &player.last_name,
                    &player.team,
                    &player.position,
                    input_order as i64,
                ])
                .map_err(sqlite_failure(db_path))?;
        }
    }

    transaction
        .commit()
        .map_err(sqlite_failure(db_path))?;

    debug!(
        sport,
        season,
        provider = provider.as_str(),
        removed,
        written = rows.len(),
        "replaced roster"
    );
    Ok(Replaced {
        removed: removed as i64,
        written: rows.len() as i64,
    })
}
