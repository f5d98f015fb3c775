use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::{ImportIssue, ImportSummary};
use crate::crosswalk::types::Provider;

pub(crate) const IMPORT_HELP_COMMAND: &str = "rosterlink players import --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_import_help(self, help_command: &str) -> Self {
        self.with_import_help_data(help_command, json!({}))
    }

    pub fn with_import_help_data(self, help_command: &str, data: Value) -> Self {
        self.with_data(merge_help_command(data, help_command))
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `rosterlink {cmd} --help` for usage."),
            None => "Run `rosterlink --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_import_format(message: &str, received_format: &str, help_command: &str) -> Self {
        Self::invalid_argument_with_recovery(
            message,
            vec![
                "Provide a supported input format (JSON array or CSV).".to_string(),
                format!("Run `{help_command}` to confirm field requirements."),
            ],
        )
        .with_import_help_data(
            help_command,
            json!({
                "received_format": received_format,
                "supported_formats": ["json_array", "csv"],
            }),
        )
    }

    pub fn import_schema_mismatch(
        required_headers: Vec<String>,
        optional_headers: Vec<String>,
        actual_headers: Vec<String>,
        help_command: &str,
    ) -> Self {
        let mut expected_headers = required_headers.clone();
        expected_headers.extend(optional_headers.clone());

        Self::new(
            "import_schema_mismatch",
            "CSV headers do not satisfy the input schema.",
            vec![
                "Include all required headers; optional headers may be omitted.".to_string(),
                "Do not include unknown headers.".to_string(),
                format!("Run `{help_command}` to review required and optional fields."),
            ],
        )
        .with_import_help_data(
            help_command,
            json!({
                "required_headers": required_headers,
                "optional_headers": optional_headers,
                "expected_headers": expected_headers,
                "actual_headers": actual_headers,
            }),
        )
    }

    pub fn import_validation_failed(
        summary: ImportSummary,
        issues: Vec<ImportIssue>,
        help_command: &str,
    ) -> Self {
        let issue_count = summary.rows_invalid;
        Self::new(
            "import_validation_failed",
            &format!("Input failed validation: {issue_count} rows need fixes. No rows were written."),
            vec![
                "Fix the listed issues in your source file.".to_string(),
                "Rerun the import with the corrected file.".to_string(),
            ],
        )
        .with_import_help_data(
            help_command,
            json!({
                "summary": summary,
                "issues": issues,
            }),
        )
    }

    pub fn empty_input(provider: Provider, sport: &str, season: i64) -> Self {
        Self::new(
            "empty_input",
            &format!(
                "No {} players are stored for {sport} {season}. A crosswalk needs both rosters; nothing was written.",
                provider.label()
            ),
            vec![
                format!(
                    "Run `rosterlink players import --provider {} --sport {sport} --season {season} <path>`.",
                    provider.as_str()
                ),
                "Then rerun `rosterlink crosswalk build`.".to_string(),
            ],
        )
        .with_data(json!({
            "provider": provider.as_str(),
            "sport": sport,
            "season": season,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn store_init_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_init_permission_denied",
            &format!("Cannot initialize store at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `ROSTERLINK_HOME` to a writable directory."
            )],
        )
    }

    pub fn store_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_locked",
            &format!("Store database is locked at `{location}`."),
            vec![format!(
                "Close other processes using `{location}` so the lock is released."
            )],
        )
    }

    pub fn store_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_corrupt",
            &format!("Store database appears corrupt at `{location}`."),
            vec![format!(
                "Move `{location}` aside and re-import both rosters and the alias table."
            )],
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "migration_failed",
            &format!("Store migration failed at `{location}`: {detail}"),
            vec!["Resolve conflicting schema objects referenced in the error details.".to_string()],
        )
    }

    pub fn store_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_init_failed",
            &format!("Store operation failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }

    pub fn is_internal(&self) -> bool {
        self.code.starts_with("internal_")
            || matches!(
                self.code.as_str(),
                "store_init_permission_denied"
                    | "store_locked"
                    | "store_corrupt"
                    | "migration_failed"
                    | "store_init_failed"
            )
    }
}

fn merge_help_command(mut data: Value, help_command: &str) -> Value {
    if !data.is_object() {
        data = json!({});
    }

    if let Some(object) = data.as_object_mut() {
        object.insert(
            "help_command".to_string(),
            Value::String(help_command.to_string()),
        );
    }

    data
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{ClientError, IMPORT_HELP_COMMAND};
    use crate::crosswalk::types::Provider;

    #[test]
    fn empty_input_names_the_missing_roster() {
        let error = ClientError::empty_input(Provider::B, "nfl", 2024);
        assert_eq!(error.code, "empty_input");
        assert!(error.message.contains("provider B"));
        assert!(error.recovery_steps[0].contains("--provider b --sport nfl --season 2024"));
        assert!(!error.is_internal());
    }

    #[test]
    fn help_data_is_merged_into_non_object_payloads() {
        let error = ClientError::invalid_argument("bad")
            .with_import_help_data(IMPORT_HELP_COMMAND, serde_json::json!("scalar"));
        let help = error
            .data
            .as_ref()
            .and_then(|data| data.get("help_command"))
            .and_then(serde_json::Value::as_str);
        assert_eq!(help, Some(IMPORT_HELP_COMMAND));
    }

    #[test]
    fn store_errors_are_internal() {
        assert!(ClientError::store_locked(Path::new("/tmp/x.db")).is_internal());
        assert!(ClientError::internal_serialization("boom").is_internal());
    }
}
