use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_players_import(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("players import output requires summary"))?;

    let mut lines = vec![
        format::text(data, "message").to_string(),
        String::new(),
        "Summary:".to_string(),
    ];
    lines.extend(format::key_value_rows(
        &[
            ("Provider:", format::text(data, "provider").to_string()),
            ("Source:", source_label(data)),
            ("Rows read:", format::count(summary, "rows_read").to_string()),
            ("Rows valid:", format::count(summary, "rows_valid").to_string()),
            ("Written:", format::count(summary, "written").to_string()),
            ("Replaced:", format::count(data, "replaced").to_string()),
        ],
        2,
    ));

    let next_step = format::next_step_lines(data);
    if !next_step.is_empty() {
        lines.push(String::new());
        lines.extend(next_step);
    }

    Ok(lines.join("\n"))
}

pub fn render_players_list(data: &Value) -> io::Result<String> {
    let rows = format::rows(data, "players list")?;
    let provider = format::text(data, "provider");
    let sport = format::text(data, "sport");
    let season = format::count(data, "season");

    if rows.is_empty() {
        return Ok([
            format!("No provider {provider} players stored for {sport} {season}."),
            String::new(),
            "Import a roster:".to_string(),
            format!(
                "  rosterlink players import --provider {provider} --sport {sport} --season {season} <path>"
            ),
        ]
        .join("\n"));
    }

    let columns = [
        Column {
            name: "Source ID",
            align: Align::Left,
        },
        Column {
            name: "Name",
            align: Align::Left,
        },
        Column {
            name: "Team",
            align: Align::Left,
        },
        Column {
            name: "Position",
            align: Align::Left,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                format::text(row, "source_id").to_string(),
                format!(
                    "{} {}",
                    format::text(row, "first_name"),
                    format::text(row, "last_name")
                )
                .trim()
                .to_string(),
                format::text_or_dash(row, "team"),
                format::text(row, "position").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![
        format!(
            "{} provider {provider} players for {sport} {season}.",
            rows.len()
        ),
        String::new(),
    ];
    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Player",
    ));
    Ok(lines.join("\n"))
}

pub(super) fn source_label(data: &Value) -> String {
    match data.get("path").and_then(Value::as_str) {
        Some(path) => path.to_string(),
        None => format::text(data, "source_used").to_string(),
    }
}
