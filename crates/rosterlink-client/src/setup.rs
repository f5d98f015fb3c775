use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use crate::contracts::types::StoreContext;
use crate::migrations::{
    EXPECTED_USER_VERSION, REQUIRED_INDEX_NAMES, REQUIRED_META_KEYS, REQUIRED_VIEW_NAMES,
    run_pending, safe_repair_statement,
};
use crate::state::{
    ensure_store_directory, map_sqlite_error, open_connection, resolve_store_home, sqlite_failure,
    store_db_path,
};
use crate::{ClientError, ClientResult};

const INTERNAL_META_COLUMNS: [&str; 2] = ["key", "value"];
const INTERNAL_PLAYERS_COLUMNS: [&str; 9] = [
    "sport",
    "season",
    "provider",
    "source_id",
    "first_name",
    "last_name",
    "team",
    "position",
    "input_order",
];
const INTERNAL_PLAYER_ALIASES_COLUMNS: [&str; 3] = ["sport", "alias_name", "canonical_name"];
const INTERNAL_CROSSWALK_COLUMNS: [&str; 9] = [
    "sport",
    "season",
    "entry_order",
    "canonical_key",
    "provider_a_id",
    "provider_b_id",
    "match_confidence",
    "manual_override",
    "notes",
];
const INTERNAL_CROSSWALK_RUNS_COLUMNS: [&str; 10] = [
    "run_id",
    "sport",
    "season",
    "created_at",
    "entries",
    "matched_exact",
    "matched_alias",
    "matched_fuzzy",
    "matched_cross_position",
    "unmatched",
];

const REQUIRED_CORE_TABLES: [(&str, &[&str]); 5] = [
    ("internal_meta", &INTERNAL_META_COLUMNS),
    ("internal_players", &INTERNAL_PLAYERS_COLUMNS),
    ("internal_player_aliases", &INTERNAL_PLAYER_ALIASES_COLUMNS),
    ("internal_crosswalk", &INTERNAL_CROSSWALK_COLUMNS),
    ("internal_crosswalk_runs", &INTERNAL_CROSSWALK_RUNS_COLUMNS),
];

#[derive(Debug, Clone)]
pub struct SetupContext {
    pub db_path: PathBuf,
    pub schema_version: String,
}

impl SetupContext {
    pub fn open(&self) -> ClientResult<Connection> {
        open_connection(&self.db_path)
    }

    pub fn store_context(&self) -> StoreContext {
        StoreContext {
            db_path: self.db_path.display().to_string(),
            schema_version: self.schema_version.clone(),
        }
    }
}

pub fn ensure_initialized() -> ClientResult<SetupContext> {
    ensure_initialized_with_home_override(None)
}

pub fn ensure_initialized_at(home_override: &Path) -> ClientResult<SetupContext> {
    ensure_initialized_with_home_override(Some(home_override))
}

pub(crate) fn ensure_initialized_with_home_override(
    home_override: Option<&Path>,
) -> ClientResult<SetupContext> {
    let store_home = resolve_store_home(home_override)?;
    ensure_store_directory(&store_home)?;

    let db_path = store_db_path(&store_home);
    let mut connection = open_connection(&db_path)?;

    run_pending(&mut connection).map_err(|error| map_migration_error(&db_path, &error))?;

    verify_core_tables(&connection, &db_path)?;
    repair_safe_objects(&connection, &db_path)?;
    verify_post_repair_objects(&connection, &db_path)?;

    let schema_version = read_schema_version(&connection, &db_path)?;
    debug!(db_path = %db_path.display(), %schema_version, "store ready");

    Ok(SetupContext {
        db_path,
        schema_version,
    })
}

fn map_migration_error(db_path: &Path, error: &rusqlite_migration::Error) -> ClientError {
    match error {
        rusqlite_migration::Error::RusqliteError { query: _, err } => {
            let mapped = map_sqlite_error(db_path, err);
            if matches!(
                mapped.code.as_str(),
                "store_locked" | "store_corrupt" | "store_init_permission_denied"
            ) {
                mapped
            } else {
                ClientError::migration_failed(db_path, &error.to_string())
            }
        }
        _ => ClientError::migration_failed(db_path, &error.to_string()),
    }
}

fn verify_core_tables(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    for (table_name, required_columns) in REQUIRED_CORE_TABLES {
        if !sqlite_object_exists(connection, "table", table_name, db_path)? {
            return Err(ClientError::store_corrupt(db_path));
        }

        let columns = table_columns(connection, table_name, db_path)?;
        if required_columns
            .iter()
            .any(|required| !columns.iter().any(|column| column == required))
        {
            return Err(ClientError::store_corrupt(db_path));
        }
    }

    Ok(())
}

fn repair_safe_objects(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    // Missing meta keys are restored; drifted values are rejected later.
    for (meta_key, default_value) in REQUIRED_META_KEYS {
        connection
            .execute(
                "INSERT OR IGNORE INTO internal_meta (key, value) VALUES (?1, ?2)",
                params![meta_key, default_value],
            )
            .map_err(sqlite_failure(db_path))?;
    }

    for (object_type, names) in [
        ("view", REQUIRED_VIEW_NAMES.as_slice()),
        ("index", REQUIRED_INDEX_NAMES.as_slice()),
    ] {
        for name in names {
            if sqlite_object_exists(connection, object_type, name, db_path)? {
                continue;
            }
            let sql = safe_repair_statement(name).ok_or_else(|| {
                ClientError::store_init_failed(db_path, "Missing canonical SQL for repair.")
            })?;
            connection
                .execute_batch(&sql)
                .map_err(sqlite_failure(db_path))?;
            info!(object_type, name = *name, "restored missing store object");
        }
    }

    Ok(())
}

fn verify_post_repair_objects(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    let user_version = connection
        .query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
        .map_err(sqlite_failure(db_path))?;
    if user_version != EXPECTED_USER_VERSION {
        return Err(ClientError::store_corrupt(db_path));
    }

    for (meta_key, expected_value) in REQUIRED_META_KEYS {
        let value = connection
            .query_row(
                "SELECT value FROM internal_meta WHERE key = ?1 LIMIT 1",
                [meta_key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(sqlite_failure(db_path))?;

        if value.as_deref() != Some(expected_value) {
            return Err(ClientError::store_corrupt(db_path));
        }
    }

    for view_name in REQUIRED_VIEW_NAMES {
        verify_canonical_view_sql(connection, view_name, db_path)?;
    }

    for index_name in REQUIRED_INDEX_NAMES {
        if !sqlite_object_exists(connection, "index", index_name, db_path)? {
            return Err(ClientError::store_corrupt(db_path));
        }
    }

    Ok(())
}

fn verify_canonical_view_sql(
    connection: &Connection,
    view_name: &str,
    db_path: &Path,
) -> ClientResult<()> {
    let actual_sql = connection
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'view' AND name = ?1 LIMIT 1",
            [view_name],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(sqlite_failure(db_path))?;

    let Some(actual_view_sql) = actual_sql else {
        return Err(ClientError::store_corrupt(db_path));
    };

    let expected_block = safe_repair_statement(view_name).ok_or_else(|| {
        ClientError::store_init_failed(db_path, "Missing canonical SQL for view verification.")
    })?;

    if normalize_sql(&actual_view_sql) != normalize_sql(&expected_block) {
        return Err(ClientError::store_corrupt(db_path));
    }

    Ok(())
}

fn normalize_sql(sql: &str) -> String {
    sql.chars()
        .filter(|value| !value.is_whitespace() && *value != ';')
        .flat_map(char::to_lowercase)
        .collect()
}

fn sqlite_object_exists(
    connection: &Connection,
    object_type: &str,
    object_name: &str,
    db_path: &Path,
) -> ClientResult<bool> {
    let exists = connection
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2 LIMIT 1",
            params![object_type, object_name],
            |_row| Ok(true),
        )
        .optional()
        .map_err(sqlite_failure(db_path))?
        .unwrap_or(false);

    Ok(exists)
}

fn table_columns(
    connection: &Connection,
    table_name: &str,
    db_path: &Path,
) -> ClientResult<Vec<String>> {
    if !REQUIRED_CORE_TABLES
        .iter()
        .any(|(required_name, _)| *required_name == table_name)
    {
        return Err(ClientError::store_init_failed(
            db_path,
            "Refused PRAGMA table inspection for non-core table.",
        ));
    }

    // `table_name` comes from REQUIRED_CORE_TABLES only.
    let sql = format!("PRAGMA table_info({table_name})");
    let mut statement = connection
        .prepare(&sql)
        .map_err(sqlite_failure(db_path))?;

    let column_iter = statement
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(sqlite_failure(db_path))?;

    let mut columns = Vec::new();
    for row in column_iter {
        columns.push(row.map_err(sqlite_failure(db_path))?);
    }

    Ok(columns)
}

fn read_schema_version(connection: &Connection, db_path: &Path) -> ClientResult<String> {
    let value = connection
        .query_row(
            "SELECT value FROM internal_meta WHERE key = 'schema_version' LIMIT 1",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(sqlite_failure(db_path))?;

    Ok(value.unwrap_or_else(|| "v1".to_string()))
}
