//! SQLite-backed persistence for rosters, alias tables and crosswalks.
//!
//! Every write replaces a whole scope (one provider roster, one sport's alias
//! table, one `(sport, season)` crosswalk) inside a single immediate
//! transaction. Nothing is patched in place.

mod aliases;
mod crosswalk;
mod players;

use std::time::{SystemTime, UNIX_EPOCH};

pub use aliases::{load_alias_rows, load_alias_table, replace_aliases};
pub use crosswalk::{list_runs, load_crosswalk, replace_crosswalk};
pub use players::{count_players, load_players, replace_players};

/// Row counts from a wholesale replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replaced {
    pub removed: i64,
    pub written: i64,
}

pub(crate) fn now_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or(0);
    now.to_string()
}

pub(crate) fn bool_to_sql(value: bool) -> i64 {
    i64::from(value)
}
