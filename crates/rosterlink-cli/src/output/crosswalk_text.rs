use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

const ENTRY_COLUMNS: [Column<'static>; 4] = [
    Column {
        name: "Provider A",
        align: Align::Left,
    },
    Column {
        name: "Provider B",
        align: Align::Left,
    },
    Column {
        name: "Confidence",
        align: Align::Left,
    },
    Column {
        name: "Notes",
        align: Align::Left,
    },
];

pub fn render_crosswalk_build(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("crosswalk build output requires summary"))?;
    let dry_run = data
        .get("dry_run")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let mut lines = vec![
        format::text(data, "message").to_string(),
        String::new(),
        "Summary:".to_string(),
    ];

    let mut entries = Vec::new();
    if let Some(run_id) = data.get("run_id").and_then(Value::as_str) {
        entries.push(("Run ID:", run_id.to_string()));
    }
    entries.extend([
        (
            "Provider A:",
            format!("{} players", format::count(summary, "provider_a_total")),
        ),
        (
            "Provider B:",
            format!("{} players", format::count(summary, "provider_b_total")),
        ),
        ("Exact:", format::count(summary, "matched_exact").to_string()),
        ("Alias:", format::count(summary, "matched_alias").to_string()),
        ("Fuzzy:", format::count(summary, "matched_fuzzy").to_string()),
        (
            "Cross-position:",
            format::count(summary, "matched_cross_position").to_string(),
        ),
        (
            "Unmatched:",
            format!(
                "{} ({} A only, {} B only)",
                format::count(summary, "unmatched"),
                format::count(summary, "unmatched_provider_a"),
                format::count(summary, "unmatched_provider_b")
            ),
        ),
        ("Match rate:", match_rate_label(summary)),
    ]);
    lines.extend(format::key_value_rows(&entries, 2));

    if data
        .get("low_match_rate")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        lines.push(String::new());
        lines.push("Warning: fewer provider A players matched than expected.".to_string());
        lines.push(
            "  Check that both rosters are for the same sport and season.".to_string(),
        );
    }

    if let Some(preview) = data.get("flagged_preview") {
        let rows = preview
            .get("rows")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        if !rows.is_empty() {
            lines.push(String::new());
            lines.push("Entries to review:".to_string());
            lines.extend(render_entry_table(&rows));
            if preview
                .get("truncated")
                .and_then(Value::as_bool)
                .unwrap_or(false)
            {
                lines.push(format!(
                    "  Showing the first {}. Use `crosswalk list --confidence <c>` for the rest.",
                    rows.len()
                ));
            }
        }
    }

    if dry_run {
        lines.push(String::new());
        lines.push("No entries were written because this was a dry run.".to_string());
    }

    let next_step = format::next_step_lines(data);
    if !next_step.is_empty() {
        lines.push(String::new());
        lines.extend(next_step);
    }

    Ok(lines.join("\n"))
}

pub fn render_crosswalk_list(data: &Value) -> io::Result<String> {
    let rows = format::rows(data, "crosswalk list")?;
    let sport = format::text(data, "sport");
    let season = format::count(data, "season");
    let filter = data
        .get("confidence")
        .and_then(Value::as_str)
        .map(|confidence| format!(" with confidence {confidence}"))
        .unwrap_or_default();

    if rows.is_empty() {
        return Ok([
            format!("No crosswalk entries{filter} for {sport} {season}."),
            String::new(),
            "Build one:".to_string(),
            format!("  rosterlink crosswalk build --sport {sport} --season {season}"),
        ]
        .join("\n"));
    }

    let mut lines = vec![
        format!("{} crosswalk entries{filter} for {sport} {season}.", rows.len()),
        String::new(),
    ];
    lines.extend(render_entry_table(rows));
    Ok(lines.join("\n"))
}

pub fn render_crosswalk_runs(data: &Value) -> io::Result<String> {
    let rows = format::rows(data, "crosswalk runs")?;
    let sport = format::text(data, "sport");
    let season = format::count(data, "season");

    if rows.is_empty() {
        return Ok(format!("No crosswalk builds stored for {sport} {season}."));
    }

    let columns = [
        Column {
            name: "Run ID",
            align: Align::Left,
        },
        Column {
            name: "Created (local)",
            align: Align::Left,
        },
        Column {
            name: "Entries",
            align: Align::Right,
        },
        Column {
            name: "Exact",
            align: Align::Right,
        },
        Column {
            name: "Alias",
            align: Align::Right,
        },
        Column {
            name: "Fuzzy",
            align: Align::Right,
        },
        Column {
            name: "Cross",
            align: Align::Right,
        },
        Column {
            name: "Unmatched",
            align: Align::Right,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                format::text(row, "run_id").to_string(),
                format::local_timestamp(format::text(row, "created_at")),
                format::count(row, "entries").to_string(),
                format::count(row, "matched_exact").to_string(),
                format::count(row, "matched_alias").to_string(),
                format::count(row, "matched_fuzzy").to_string(),
                format::count(row, "matched_cross_position").to_string(),
                format::count(row, "unmatched").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![
        format!("{} crosswalk builds for {sport} {season}, newest first.", rows.len()),
        String::new(),
    ];
    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Run",
    ));
    Ok(lines.join("\n"))
}

fn render_entry_table(rows: &[Value]) -> Vec<String> {
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                format::text_or_dash(row, "provider_a_id"),
                format::text_or_dash(row, "provider_b_id"),
                format::text(row, "match_confidence").to_string(),
                format::text(row, "notes").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table_or_blocks(
        &ENTRY_COLUMNS,
        &table_rows,
        format::terminal_width(),
        "Entry",
    )
}

fn match_rate_label(summary: &Value) -> String {
    let rate = summary
        .get("match_rate")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    format!("{:.1}%", rate * 100.0)
}
