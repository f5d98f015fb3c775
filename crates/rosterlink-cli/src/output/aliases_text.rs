use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};
use super::players_text::source_label;

pub fn render_aliases_import(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("aliases import output requires summary"))?;

    let mut lines = vec![
        format::text(data, "message").to_string(),
        String::new(),
        "Summary:".to_string(),
    ];
    lines.extend(format::key_value_rows(
        &[
            ("Sport:", format::text(data, "sport").to_string()),
            ("Source:", source_label(data)),
            ("Rows read:", format::count(summary, "rows_read").to_string()),
            ("Aliases stored:", format::count(summary, "written").to_string()),
            ("Replaced:", format::count(data, "replaced").to_string()),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_aliases_list(data: &Value) -> io::Result<String> {
    let rows = format::rows(data, "aliases list")?;
    let sport = format::text(data, "sport");

    if rows.is_empty() {
        return Ok([
            format!("No aliases stored for {sport}."),
            String::new(),
            "The alias pass is skipped until a table is imported:".to_string(),
            format!("  rosterlink aliases import --sport {sport} <path>"),
        ]
        .join("\n"));
    }

    let columns = [
        Column {
            name: "Alias (provider A)",
            align: Align::Left,
        },
        Column {
            name: "Canonical (provider B)",
            align: Align::Left,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                format::text(row, "alias_name").to_string(),
                format::text(row, "canonical_name").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![format!("{} aliases for {sport}.", rows.len()), String::new()];
    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Alias",
    ));
    Ok(lines.join("\n"))
}
