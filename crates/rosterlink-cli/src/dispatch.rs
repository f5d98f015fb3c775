use chrono::{Datelike, Local};
use rosterlink_client::commands;
use rosterlink_client::{ClientResult, SuccessEnvelope};

use crate::cli::{AliasesCommand, Cli, Commands, CrosswalkCommand, PlayersCommand};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Players { command } => match command {
            PlayersCommand::Import {
                provider,
                sport,
                season,
                path,
                ..
            } => commands::players::import(
                *provider,
                sport,
                season_or_current(*season),
                path.clone(),
            ),
            PlayersCommand::List {
                provider,
                sport,
                season,
                ..
            } => commands::players::list(*provider, sport, season_or_current(*season)),
        },
        Commands::Aliases { command } => match command {
            AliasesCommand::Import { sport, path, .. } => {
                commands::aliases::import(sport, path.clone())
            }
            AliasesCommand::List { sport, .. } => commands::aliases::list(sport),
        },
        Commands::Crosswalk { command } => match command {
            CrosswalkCommand::Build {
                sport,
                season,
                dry_run,
                ..
            } => commands::crosswalk::build(sport, season_or_current(*season), *dry_run),
            CrosswalkCommand::List {
                sport,
                season,
                confidence,
                ..
            } => commands::crosswalk::list(sport, season_or_current(*season), *confidence),
            CrosswalkCommand::Runs { sport, season, .. } => {
                commands::crosswalk::runs(sport, season_or_current(*season))
            }
        },
    }
}

fn season_or_current(season: Option<i64>) -> i64 {
    season.unwrap_or_else(|| i64::from(Local::now().year()))
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Local};

    use super::season_or_current;

    #[test]
    fn explicit_season_wins() {
        assert_eq!(season_or_current(Some(2019)), 2019);
    }

    #[test]
    fn missing_season_uses_current_year() {
        assert_eq!(season_or_current(None), i64::from(Local::now().year()));
    }
}
