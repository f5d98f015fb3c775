use std::path::Path;

use crate::setup::{SetupContext, ensure_initialized, ensure_initialized_at};
use crate::{ClientError, ClientResult};

/// Seasons outside this range are almost certainly typos.
const SEASON_RANGE: std::ops::RangeInclusive<i64> = 1900..=2200;

pub(crate) fn load_setup(home_override: Option<&Path>) -> ClientResult<SetupContext> {
    if let Some(home) = home_override {
        return ensure_initialized_at(home);
    }
    ensure_initialized()
}

/// Sports are free text; stored and compared trimmed and lower case.
pub fn normalize_sport(sport: &str, command: &str) -> ClientResult<String> {
    let normalized = sport.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "`--sport` must not be empty.",
            Some(command),
        ));
    }
    Ok(normalized)
}

pub fn validate_season(season: i64, command: &str) -> ClientResult<i64> {
    if !SEASON_RANGE.contains(&season) {
        return Err(ClientError::invalid_argument_for_command(
            &format!(
                "`--season {season}` is out of range; expected a year between {} and {}.",
                SEASON_RANGE.start(),
                SEASON_RANGE.end()
            ),
            Some(command),
        ));
    }
    Ok(season)
}

#[cfg(test)]
mod tests {
    use super::{normalize_sport, validate_season};

    #[test]
    fn sport_is_trimmed_and_lowercased() {
        let sport = normalize_sport("  NFL ", "players list");
        assert!(sport.is_ok());
        if let Ok(value) = sport {
            assert_eq!(value, "nfl");
        }

        let empty = normalize_sport("   ", "players list");
        assert!(empty.is_err());
        if let Err(error) = empty {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.recovery_steps[0].contains("rosterlink players list --help"));
        }
    }

    #[test]
    fn season_must_look_like_a_year() {
        assert!(validate_season(2024, "crosswalk build").is_ok());
        assert!(validate_season(24, "crosswalk build").is_err());
    }
}
