use std::collections::HashMap;

use serde_json::Value;

use crate::import::{RowSchema, invalid_input_error};
use crate::{ClientError, ClientResult};

/// One input row keyed by field name; absent and null fields are `None`.
#[derive(Debug, Clone, Default)]
pub(crate) struct ParsedRow {
    pub(crate) row: i64,
    pub(crate) fields: HashMap<String, Option<String>>,
}

impl ParsedRow {
    pub(crate) fn take(&mut self, field: &str) -> Option<String> {
        self.fields.remove(field).flatten()
    }
}

pub(crate) fn parse_source(content: &str, schema: &RowSchema) -> ClientResult<Vec<ParsedRow>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(invalid_input_error("Input is empty.", schema));
    }

    if looks_like_ndjson(trimmed) {
        return Err(ClientError::invalid_import_format(
            "NDJSON is not supported. Provide a JSON array or CSV.",
            "ndjson",
            schema.help_command,
        ));
    }

    if trimmed.starts_with('[') {
        return parse_json_array(trimmed, schema);
    }

    if looks_like_csv(trimmed) {
        return parse_csv(trimmed, schema);
    }

    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(ClientError::invalid_import_format(
            &format!("JSON input must be a top-level array of {} objects.", schema.noun),
            "json_non_array",
            schema.help_command,
        ));
    }

    Err(ClientError::invalid_import_format(
        "Unsupported input format. Provide a JSON array or CSV with headers.",
        "unknown",
        schema.help_command,
    ))
}

fn parse_json_array(content: &str, schema: &RowSchema) -> ClientResult<Vec<ParsedRow>> {
    let parsed = serde_json::from_str::<Value>(content).map_err(|_| {
        invalid_input_error("Invalid JSON input. Provide a valid JSON array.", schema)
    })?;

    let Some(items) = parsed.as_array() else {
        return Err(invalid_input_error(
            "JSON input must be a top-level array.",
            schema,
        ));
    };

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(invalid_input_error(
                &format!("JSON array entries must all be {} objects.", schema.noun),
                schema,
            ));
        };

        let fields = schema
            .fields()
            .map(|field| (field.to_string(), read_optional_string(object.get(field))))
            .collect();
        rows.push(ParsedRow {
            row: (index as i64) + 1,
            fields,
        });
    }

    Ok(rows)
}

fn parse_csv(content: &str, schema: &RowSchema) -> ClientResult<Vec<ParsedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| invalid_input_error("CSV header row is missing or unreadable.", schema))?
        .iter()
        .map(str::to_string)
        .collect::<Vec<String>>();

    if !schema.headers_are_valid(&headers) {
        return Err(ClientError::import_schema_mismatch(
            schema.required.iter().map(|value| value.to_string()).collect(),
            schema.optional.iter().map(|value| value.to_string()).collect(),
            headers,
            schema.help_command,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.clone(), index))
        .collect::<HashMap<String, usize>>();

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record = result_row.map_err(|_| {
            invalid_input_error("CSV rows are malformed or not UTF-8.", schema)
        })?;

        let fields = schema
            .fields()
            .map(|field| {
                let value = index_by_name
                    .get(field)
                    .and_then(|index| record.get(*index))
                    .map(str::to_string);
                (field.to_string(), value)
            })
            .collect();
        rows.push(ParsedRow {
            row: (row_index as i64) + 1,
            fields,
        });
    }

    Ok(rows)
}

fn read_optional_string(value: Option<&Value>) -> Option<String> {
    let current = value?;

    if current.is_null() {
        return None;
    }

    if let Some(string_value) = current.as_str() {
        return Some(string_value.to_string());
    }

    // Numeric provider ids arrive unquoted in some feeds.
    Some(current.to_string())
}

fn looks_like_ndjson(content: &str) -> bool {
    let lines = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<&str>>();
    if lines.len() < 2 {
        return false;
    }

    lines.iter().all(|line| {
        serde_json::from_str::<Value>(line.trim())
            .map(|value| value.is_object())
            .unwrap_or(false)
    })
}

fn looks_like_csv(content: &str) -> bool {
    content
        .lines()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|first_line| first_line.contains(','))
}

#[cfg(test)]
mod tests {
    use super::parse_source;
    use crate::import::{ALIAS_SCHEMA, PLAYER_SCHEMA};

    #[test]
    fn json_array_rows_keep_numeric_ids_and_null_team() {
        let body = r#"[
            {"source_id": 4046, "first_name": "Patrick", "last_name": "Mahomes", "team": "KC", "position": "QB"},
            {"source_id": "9", "first_name": "Free", "last_name": "Agent", "team": null, "position": "WR"}
        ]"#;
        let parsed = parse_source(body, &PLAYER_SCHEMA);
        assert!(parsed.is_ok());
        if let Ok(mut rows) = parsed {
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].take("source_id").as_deref(), Some("4046"));
            assert_eq!(rows[1].row, 2);
            assert_eq!(rows[1].take("team"), None);
        }
    }

    #[test]
    fn csv_without_optional_team_column_is_accepted() {
        let body = "source_id,first_name,last_name,position\n1,Justin,Tucker,K\n";
        let parsed = parse_source(body, &PLAYER_SCHEMA);
        assert!(parsed.is_ok());
        if let Ok(mut rows) = parsed {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].take("position").as_deref(), Some("K"));
            assert_eq!(rows[0].take("team"), None);
        }
    }

    #[test]
    fn csv_with_unknown_header_is_a_schema_mismatch() {
        let body = "alias_name,canonical_name,league\nGabe Davis,Gabriel Davis,nfl\n";
        let parsed = parse_source(body, &ALIAS_SCHEMA);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "import_schema_mismatch");
        }
    }

    #[test]
    fn ndjson_and_bare_objects_are_rejected() {
        let ndjson = "{\"alias_name\":\"a\"}\n{\"alias_name\":\"b\"}\n";
        let parsed = parse_source(ndjson, &ALIAS_SCHEMA);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(
                error
                    .data
                    .as_ref()
                    .and_then(|data| data.get("received_format"))
                    .and_then(serde_json::Value::as_str),
                Some("ndjson")
            );
        }

        let object = "{\"alias_name\":\"a\",\"canonical_name\":\"b\"}";
        let parsed = parse_source(object, &ALIAS_SCHEMA);
        assert!(parsed.is_err());
    }
}
