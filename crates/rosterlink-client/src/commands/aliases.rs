use std::path::Path;

use tracing::info;

use crate::ClientResult;
use crate::commands::common::{load_setup, normalize_sport};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{AliasImportData, AliasListData};
use crate::import;
use crate::store;

const IMPORT_COMMAND: &str = "aliases import";
const LIST_COMMAND: &str = "aliases list";

#[derive(Debug, Default)]
pub struct AliasesImportOptions<'a> {
    pub sport: String,
    pub path: Option<String>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

#[derive(Debug, Default)]
pub struct AliasesListOptions<'a> {
    pub sport: String,
    pub home_override: Option<&'a Path>,
}

pub fn import(sport: &str, path: Option<String>) -> ClientResult<SuccessEnvelope> {
    import_with_options(AliasesImportOptions {
        sport: sport.to_string(),
        path,
        home_override: None,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn import_with_options(options: AliasesImportOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let sport = normalize_sport(&options.sport, IMPORT_COMMAND)?;
    let intake = import::read_aliases(options.path, options.stdin_override, &sport)?;

    let setup = load_setup(options.home_override)?;
    let mut connection = setup.open()?;
    let replaced = store::replace_aliases(
        &mut connection,
        &setup.db_path,
        &sport,
        &intake.validated.rows,
    )?;

    info!(%sport, written = replaced.written, removed = replaced.removed, "imported alias table");

    let mut summary = intake.validated.summary;
    summary.written = replaced.written;
    let data = AliasImportData {
        message: format!("Stored {} aliases for {sport}.", replaced.written),
        sport,
        source_used: intake.source.kind.as_str().to_string(),
        path: intake.source.path,
        replaced: replaced.removed,
        summary,
        store: setup.store_context(),
    };
    success(IMPORT_COMMAND, data)
}

pub fn list(sport: &str) -> ClientResult<SuccessEnvelope> {
    list_with_options(AliasesListOptions {
        sport: sport.to_string(),
        home_override: None,
    })
}

#[doc(hidden)]
pub fn list_with_options(options: AliasesListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let sport = normalize_sport(&options.sport, LIST_COMMAND)?;
    let setup = load_setup(options.home_override)?;
    let connection = setup.open()?;
    let rows = store::load_alias_rows(&connection, &setup.db_path, &sport)?;

    let data = AliasListData {
        sport,
        total: rows.len() as i64,
        rows,
    };
    success(LIST_COMMAND, data)
}
