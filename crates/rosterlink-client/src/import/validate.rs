use std::collections::{HashMap, HashSet};

use crate::contracts::types::{ImportIssue, ImportSummary};
use crate::crosswalk::normalize::{canonical_position_code, normalize_name};
use crate::crosswalk::types::{AliasEntry, PlayerRecord};
use crate::import::RowSchema;
use crate::import::parse::ParsedRow;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub(crate) struct Validated<T> {
    pub(crate) rows: Vec<T>,
    pub(crate) summary: ImportSummary,
}

pub(crate) fn validate_players(
    parsed_rows: Vec<ParsedRow>,
    schema: &RowSchema,
) -> ClientResult<Validated<PlayerRecord>> {
    let rows_read = parsed_rows.len();
    let mut rows = Vec::with_capacity(rows_read);
    let mut issues = Vec::new();
    let mut first_row_by_id: HashMap<String, i64> = HashMap::new();

    for mut raw in parsed_rows {
        let mut row_issues = Vec::new();

        let source_id = required(&mut raw, "source_id", &mut row_issues);
        let first_name = optional(raw.take("first_name"));
        let last_name = optional(raw.take("last_name"));
        let team = optional(raw.take("team"));
        let position = required(&mut raw, "position", &mut row_issues);

        if first_name.is_none() && last_name.is_none() {
            row_issues.push(ImportIssue {
                row: raw.row,
                field: "last_name".to_string(),
                code: "missing_required_field".to_string(),
                description: "At least one of first_name or last_name must be non-empty."
                    .to_string(),
                expected: Some("non-empty string".to_string()),
                received: Some(String::new()),
            });
        }

        let first_name = first_name.unwrap_or_default();
        let last_name = last_name.unwrap_or_default();
        let full_name = format!("{first_name} {last_name}");
        if !full_name.trim().is_empty() && normalize_name(&full_name).is_empty() {
            row_issues.push(ImportIssue {
                row: raw.row,
                field: "last_name".to_string(),
                code: "unmatchable_name".to_string(),
                description: "Name has no letters or digits left after normalization."
                    .to_string(),
                expected: Some("name containing letters or digits".to_string()),
                received: Some(full_name.trim().to_string()),
            });
        }

        if let Some(id) = source_id.as_ref() {
            if let Some(first_row) = first_row_by_id.get(id) {
                row_issues.push(ImportIssue {
                    row: raw.row,
                    field: "source_id".to_string(),
                    code: "duplicate_source_id".to_string(),
                    description: format!("source_id \"{id}\" already appears on row {first_row}."),
                    expected: Some("source_id unique within the roster".to_string()),
                    received: Some(id.clone()),
                });
            } else {
                first_row_by_id.insert(id.clone(), raw.row);
            }
        }

        match (source_id, position) {
            (Some(source_id), Some(position)) if row_issues.is_empty() => {
                rows.push(PlayerRecord {
                    source_id,
                    first_name,
                    last_name,
                    team,
                    position: canonical_position_code(&position),
                });
            }
            _ => issues.extend(row_issues),
        }
    }

    finish(rows, rows_read, issues, schema)
}

pub(crate) fn validate_aliases(
    parsed_rows: Vec<ParsedRow>,
    sport: &str,
    schema: &RowSchema,
) -> ClientResult<Validated<AliasEntry>> {
    let rows_read = parsed_rows.len();
    let mut rows = Vec::with_capacity(rows_read);
    let mut issues = Vec::new();

    for mut raw in parsed_rows {
        let mut row_issues = Vec::new();

        let alias_name = required(&mut raw, "alias_name", &mut row_issues);
        let canonical_name = required(&mut raw, "canonical_name", &mut row_issues);

        for (field, value) in [
            ("alias_name", alias_name.as_deref()),
            ("canonical_name", canonical_name.as_deref()),
        ] {
            if let Some(name) = value
                && normalize_name(name).is_empty()
            {
                row_issues.push(ImportIssue {
                    row: raw.row,
                    field: field.to_string(),
                    code: "unmatchable_name".to_string(),
                    description: format!("{field} has no letters or digits after normalization."),
                    expected: Some("name containing letters or digits".to_string()),
                    received: Some(name.to_string()),
                });
            }
        }

        match (alias_name, canonical_name) {
            (Some(alias_name), Some(canonical_name)) if row_issues.is_empty() => {
                rows.push(AliasEntry {
                    sport: sport.to_string(),
                    alias_name,
                    canonical_name,
                });
            }
            _ => issues.extend(row_issues),
        }
    }

    finish(rows, rows_read, issues, schema)
}

fn finish<T>(
    rows: Vec<T>,
    rows_read: usize,
    issues: Vec<ImportIssue>,
    schema: &RowSchema,
) -> ClientResult<Validated<T>> {
    let summary = ImportSummary {
        rows_read: rows_read as i64,
        rows_valid: rows.len() as i64,
        rows_invalid: issues
            .iter()
            .map(|issue| issue.row)
            .collect::<HashSet<i64>>()
            .len() as i64,
        written: 0,
    };

    if !issues.is_empty() {
        return Err(ClientError::import_validation_failed(
            summary,
            issues,
            schema.help_command,
        ));
    }

    Ok(Validated { rows, summary })
}

fn required(raw: &mut ParsedRow, field: &str, issues: &mut Vec<ImportIssue>) -> Option<String> {
    let value = optional(raw.take(field));
    if value.is_none() {
        issues.push(ImportIssue {
            row: raw.row,
            field: field.to_string(),
            code: "missing_required_field".to_string(),
            description: format!("{field} must be present and non-empty."),
            expected: Some("non-empty string".to_string()),
            received: Some(String::new()),
        });
    }
    value
}

fn optional(value: Option<String>) -> Option<String> {
    let raw = value?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}
