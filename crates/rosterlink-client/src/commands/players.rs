use std::path::Path;

use tracing::info;

use crate::ClientResult;
use crate::commands::common::{load_setup, normalize_sport, validate_season};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{NextStep, PlayerImportData, PlayerListData};
use crate::crosswalk::types::Provider;
use crate::import;
use crate::store;

const IMPORT_COMMAND: &str = "players import";
const LIST_COMMAND: &str = "players list";

#[derive(Debug)]
pub struct PlayersImportOptions<'a> {
    pub provider: Provider,
    pub sport: String,
    pub season: i64,
    pub path: Option<String>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

#[derive(Debug)]
pub struct PlayersListOptions<'a> {
    pub provider: Provider,
    pub sport: String,
    pub season: i64,
    pub home_override: Option<&'a Path>,
}

pub fn import(
    provider: Provider,
    sport: &str,
    season: i64,
    path: Option<String>,
) -> ClientResult<SuccessEnvelope> {
    import_with_options(PlayersImportOptions {
        provider,
        sport: sport.to_string(),
        season,
        path,
        home_override: None,
        stdin_override: None,
    })
}

/// Replaces one provider's roster for `(sport, season)` with the rows of the
/// input file. An invalid file writes nothing.
#[doc(hidden)]
pub fn import_with_options(options: PlayersImportOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let sport = normalize_sport(&options.sport, IMPORT_COMMAND)?;
    let season = validate_season(options.season, IMPORT_COMMAND)?;
    let intake = import::read_players(options.path, options.stdin_override)?;

    let setup = load_setup(options.home_override)?;
    let mut connection = setup.open()?;
    let replaced = store::replace_players(
        &mut connection,
        &setup.db_path,
        &sport,
        season,
        options.provider,
        &intake.validated.rows,
    )?;

    info!(
        provider = options.provider.as_str(),
        %sport,
        season,
        written = replaced.written,
        removed = replaced.removed,
        "imported roster"
    );

    let mut summary = intake.validated.summary;
    summary.written = replaced.written;
    let data = PlayerImportData {
        provider: options.provider.as_str().to_string(),
        sport: sport.clone(),
        season,
        source_used: intake.source.kind.as_str().to_string(),
        path: intake.source.path,
        replaced: replaced.removed,
        message: format!(
            "Stored {} {} players for {sport} {season}.",
            replaced.written,
            options.provider.label()
        ),
        summary,
        next_step: NextStep {
            label: "Build the crosswalk".to_string(),
            command: format!("rosterlink crosswalk build --sport {sport} --season {season}"),
        },
        store: setup.store_context(),
    };

    success(IMPORT_COMMAND, data)
}

pub fn list(provider: Provider, sport: &str, season: i64) -> ClientResult<SuccessEnvelope> {
    list_with_options(PlayersListOptions {
        provider,
        sport: sport.to_string(),
        season,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn list_with_options(options: PlayersListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let sport = normalize_sport(&options.sport, LIST_COMMAND)?;
    let season = validate_season(options.season, LIST_COMMAND)?;
    let setup = load_setup(options.home_override)?;
    let connection = setup.open()?;
    let rows = store::load_players(&connection, &setup.db_path, &sport, season, options.provider)?;

    let data = PlayerListData {
        provider: options.provider.as_str().to_string(),
        sport,
        season,
        total: rows.len() as i64,
        rows,
    };
    success(LIST_COMMAND, data)
}
