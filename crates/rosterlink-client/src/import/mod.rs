pub(crate) mod input;
pub(crate) mod parse;
pub(crate) mod validate;

use crate::crosswalk::types::{AliasEntry, PlayerRecord};
use crate::import::input::ResolvedSource;
use crate::import::validate::Validated;
use crate::error::IMPORT_HELP_COMMAND;
use crate::{ClientError, ClientResult};

/// Field layout accepted for one kind of input file.
#[derive(Debug)]
pub(crate) struct RowSchema {
    pub(crate) noun: &'static str,
    pub(crate) required: &'static [&'static str],
    pub(crate) optional: &'static [&'static str],
    pub(crate) help_command: &'static str,
}

impl RowSchema {
    pub(crate) fn fields(&self) -> impl Iterator<Item = &'static str> {
        self.required.iter().chain(self.optional.iter()).copied()
    }

    pub(crate) fn headers_are_valid(&self, headers: &[String]) -> bool {
        let has_required = self
            .required
            .iter()
            .all(|required| headers.iter().any(|header| header.as_str() == *required));
        let all_known = headers
            .iter()
            .all(|header| self.fields().any(|field| field == header.as_str()));
        has_required && all_known
    }
}

pub(crate) const PLAYER_SCHEMA: RowSchema = RowSchema {
    noun: "player",
    required: &["source_id", "first_name", "last_name", "position"],
    optional: &["team"],
    help_command: IMPORT_HELP_COMMAND,
};

pub(crate) const ALIAS_SCHEMA: RowSchema = RowSchema {
    noun: "alias",
    required: &["alias_name", "canonical_name"],
    optional: &[],
    help_command: "rosterlink aliases import --help",
};

pub(crate) struct Intake<T> {
    pub(crate) source: ResolvedSource,
    pub(crate) validated: Validated<T>,
}

pub(crate) fn read_players(
    path: Option<String>,
    stdin_override: Option<String>,
) -> ClientResult<Intake<PlayerRecord>> {
    let source = input::resolve_source(path, stdin_override, &PLAYER_SCHEMA)?;
    let parsed = parse::parse_source(&source.content, &PLAYER_SCHEMA)?;
    let validated = validate::validate_players(parsed, &PLAYER_SCHEMA)?;
    Ok(Intake { source, validated })
}

pub(crate) fn read_aliases(
    path: Option<String>,
    stdin_override: Option<String>,
    sport: &str,
) -> ClientResult<Intake<AliasEntry>> {
    let source = input::resolve_source(path, stdin_override, &ALIAS_SCHEMA)?;
    let parsed = parse::parse_source(&source.content, &ALIAS_SCHEMA)?;
    let validated = validate::validate_aliases(parsed, sport, &ALIAS_SCHEMA)?;
    Ok(Intake { source, validated })
}

pub(crate) fn invalid_input_error(message: &str, schema: &RowSchema) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        message,
        vec![
            "Provide a JSON array or CSV via a file path, or `-` with piped stdin.".to_string(),
            format!("Run `{}` to confirm the expected fields.", schema.help_command),
        ],
    )
    .with_import_help(schema.help_command)
}

#[cfg(test)]
mod tests {
    use super::{ALIAS_SCHEMA, PLAYER_SCHEMA, read_players};

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn header_check_requires_known_and_required_fields() {
        assert!(PLAYER_SCHEMA.headers_are_valid(&headers(&[
            "position",
            "source_id",
            "first_name",
            "last_name",
        ])));
        assert!(!PLAYER_SCHEMA.headers_are_valid(&headers(&[
            "source_id",
            "first_name",
            "last_name",
        ])));
        assert!(!ALIAS_SCHEMA.headers_are_valid(&headers(&[
            "alias_name",
            "canonical_name",
            "team",
        ])));
    }

    #[test]
    fn players_flow_from_stdin_to_validated_rows() {
        let body = "source_id,first_name,last_name,team,position\n\
                    10,Justin,Jefferson,MIN,WR\n\
                    11,Ja'Marr,Chase,CIN,WR\n";
        let intake = read_players(Some("-".to_string()), Some(body.to_string()));
        assert!(intake.is_ok());
        if let Ok(intake) = intake {
            assert_eq!(intake.validated.rows.len(), 2);
            assert_eq!(intake.validated.rows[1].last_name, "Chase");
            assert_eq!(intake.validated.summary.rows_read, 2);
        }
    }
}
