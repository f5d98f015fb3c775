use clap::{Parser, Subcommand};
use rosterlink_client::crosswalk::types::{MatchConfidence, Provider};

pub fn parse_provider(value: &str) -> Result<Provider, String> {
    Provider::parse(value).ok_or_else(|| "provider must be one of: a, b".to_string())
}

pub fn parse_confidence(value: &str) -> Result<MatchConfidence, String> {
    MatchConfidence::parse(value).ok_or_else(|| {
        "confidence must be one of: exact, alias, fuzzy, cross_position, unmatched".to_string()
    })
}

pub fn parse_season(value: &str) -> Result<i64, String> {
    let season = value
        .trim()
        .parse::<i64>()
        .map_err(|_| "season must be a four-digit year".to_string())?;
    if !(1900..=2200).contains(&season) {
        return Err("season must be a four-digit year".to_string());
    }
    Ok(season)
}

/// Extended help shown after `rosterlink players import --help`.
pub const PLAYERS_IMPORT_AFTER_HELP: &str = "\
How roster import works:
  Each import replaces one provider's roster for one sport and season.
  Rows from an earlier import that are missing from the new file are removed.

  Accepted formats:
    JSON  one top-level array of player objects
    CSV   one header row with the field names below

  <path> is a local file path. Use `-` to read stdin.
  Example: cat espn.csv | rosterlink players import --provider a --sport nfl -

Fields:
  source_id (required)   Provider's id for the player. Unique within the file.
  first_name (required)  May be empty when last_name is set.
  last_name (required)   May be empty when first_name is set.
  team (optional)        Team code, e.g. KC. Empty means free agent.
  position (required)    QB, RB, WR, TE, K or DEF. DST and D/ST are stored as DEF.

  CSV example:
  source_id,first_name,last_name,team,position
  3139477,Patrick,Mahomes,KC,QB
  16,Buffalo,Bills,BUF,DST

What to do next:
  1. Import provider A and provider B for the same sport and season.
  2. Run `rosterlink crosswalk build --sport <sport> --dry-run` to preview.
";

/// Extended help shown after `rosterlink aliases import --help`.
pub const ALIASES_IMPORT_AFTER_HELP: &str = "\
How alias import works:
  An alias translates provider A's spelling of a name into provider B's.
  Each import replaces the sport's whole alias table.

  CSV example:
  alias_name,canonical_name
  Gabe Davis,Gabriel Davis
  DJ Moore,D.J. Moore

  Names are compared after normalization (case, punctuation and suffixes such
  as Jr. or III are ignored), so one row covers every spelling variant.
";

#[derive(Debug, Parser)]
#[command(
    name = "rosterlink",
    version,
    about = "player identity crosswalk between two fantasy data providers",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import and inspect provider rosters
    #[command(arg_required_else_help = true)]
    Players {
        #[command(subcommand)]
        command: PlayersCommand,
    },
    /// Manage the per-sport name alias table
    #[command(arg_required_else_help = true)]
    Aliases {
        #[command(subcommand)]
        command: AliasesCommand,
    },
    /// Build and inspect the player crosswalk
    #[command(arg_required_else_help = true)]
    Crosswalk {
        #[command(subcommand)]
        command: CrosswalkCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum PlayersCommand {
    /// Replace one provider's roster with the rows of a JSON or CSV file
    #[command(after_long_help = PLAYERS_IMPORT_AFTER_HELP)]
    Import {
        /// Which provider the file comes from (a or b)
        #[arg(long, value_parser = parse_provider)]
        provider: Provider,
        /// Sport code, e.g. nfl
        #[arg(long)]
        sport: String,
        /// Season year (defaults to the current year)
        #[arg(long, value_parser = parse_season)]
        season: Option<i64>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
        /// Path to a JSON or CSV file (use `-` for stdin)
        path: Option<String>,
    },
    /// List one provider's stored roster in input order
    List {
        /// Which provider to list (a or b)
        #[arg(long, value_parser = parse_provider)]
        provider: Provider,
        /// Sport code, e.g. nfl
        #[arg(long)]
        sport: String,
        /// Season year (defaults to the current year)
        #[arg(long, value_parser = parse_season)]
        season: Option<i64>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum AliasesCommand {
    /// Replace the sport's alias table with the rows of a JSON or CSV file
    #[command(after_long_help = ALIASES_IMPORT_AFTER_HELP)]
    Import {
        /// Sport code, e.g. nfl
        #[arg(long)]
        sport: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
        /// Path to a JSON or CSV file (use `-` for stdin)
        path: Option<String>,
    },
    /// List the sport's stored aliases
    List {
        /// Sport code, e.g. nfl
        #[arg(long)]
        sport: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum CrosswalkCommand {
    /// Match provider A against provider B and store the crosswalk
    Build {
        /// Sport code, e.g. nfl
        #[arg(long)]
        sport: String,
        /// Season year (defaults to the current year)
        #[arg(long, value_parser = parse_season)]
        season: Option<i64>,
        /// Resolve and report without writing the crosswalk
        #[arg(long)]
        dry_run: bool,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List stored crosswalk entries
    List {
        /// Sport code, e.g. nfl
        #[arg(long)]
        sport: String,
        /// Season year (defaults to the current year)
        #[arg(long, value_parser = parse_season)]
        season: Option<i64>,
        /// Only show entries with this confidence
        #[arg(long, value_parser = parse_confidence)]
        confidence: Option<MatchConfidence>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List persisted crosswalk builds, newest first
    Runs {
        /// Sport code, e.g. nfl
        #[arg(long)]
        sport: String,
        /// Season year (defaults to the current year)
        #[arg(long, value_parser = parse_season)]
        season: Option<i64>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use rosterlink_client::crosswalk::types::{MatchConfidence, Provider};

    use super::{Commands, CrosswalkCommand, PlayersCommand, parse_from};

    #[test]
    fn parse_command_paths() {
        let cases: [Vec<&str>; 11] = [
            vec!["rosterlink", "players", "import", "--provider", "a", "--sport", "nfl", "a.csv"],
            vec![
                "rosterlink", "players", "import", "--provider", "b", "--sport", "nfl",
                "--season", "2024", "-", "--json",
            ],
            vec!["rosterlink", "players", "list", "--provider", "a", "--sport", "nfl"],
            vec!["rosterlink", "aliases", "import", "--sport", "nfl", "aliases.csv"],
            vec!["rosterlink", "aliases", "list", "--sport", "nfl", "--json"],
            vec!["rosterlink", "crosswalk", "build", "--sport", "nfl"],
            vec!["rosterlink", "crosswalk", "build", "--sport", "nfl", "--dry-run", "--json"],
            vec!["rosterlink", "crosswalk", "list", "--sport", "nfl", "--season", "2023"],
            vec![
                "rosterlink", "crosswalk", "list", "--sport", "nfl", "--confidence",
                "cross_position",
            ],
            vec!["rosterlink", "crosswalk", "runs", "--sport", "nfl"],
            vec!["rosterlink", "crosswalk", "runs", "--sport", "nfl", "--json"],
        ];

        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse: {case:?}");
        }
    }

    #[test]
    fn parse_players_import_arguments() {
        let parsed = parse_from([
            "rosterlink", "players", "import", "--provider", "B", "--sport", "NFL", "--season",
            "2024", "rows.json",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Players {
                    command: PlayersCommand::Import {
                        provider: Provider::B,
                        season: Some(2024),
                        json: false,
                        ..
                    }
                }
            ));
        }
    }

    #[test]
    fn parse_crosswalk_confidence_filter() {
        let parsed = parse_from([
            "rosterlink", "crosswalk", "list", "--sport", "nfl", "--confidence", "fuzzy",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Crosswalk {
                    command: CrosswalkCommand::List {
                        confidence: Some(MatchConfidence::Fuzzy),
                        season: None,
                        ..
                    }
                }
            ));
        }
    }

    #[test]
    fn invalid_values_are_rejected() {
        let provider = parse_from([
            "rosterlink", "players", "list", "--provider", "c", "--sport", "nfl",
        ]);
        assert!(provider.is_err());

        let confidence = parse_from([
            "rosterlink", "crosswalk", "list", "--sport", "nfl", "--confidence", "probable",
        ]);
        assert!(confidence.is_err());

        let season = parse_from([
            "rosterlink", "crosswalk", "build", "--sport", "nfl", "--season", "24",
        ]);
        assert!(season.is_err());
    }

    #[test]
    fn sport_is_required() {
        let parsed = parse_from(["rosterlink", "crosswalk", "build"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        }
    }

    #[test]
    fn bare_group_shows_help() {
        let parsed = parse_from(["rosterlink", "crosswalk"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(
                err.kind(),
                ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            );
        }
    }
}
