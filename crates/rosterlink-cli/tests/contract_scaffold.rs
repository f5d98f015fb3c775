use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

const PROVIDER_A_CSV: &str = "source_id,first_name,last_name,team,position
1,Patrick,Mahomes,KC,QB
2,DeAndre,Hopkins,TEN,WR
3,Taysom,Hill,NO,TE
4,Gabe,Davis,BUF,WR
5,Rookie,Nobody,CHI,RB
";

const PROVIDER_B_JSON: &str = r#"[
  {"source_id": "a", "first_name": "Patrick", "last_name": "Mahomes", "team": "KC", "position": "QB"},
  {"source_id": "b", "first_name": "DeAndre", "last_name": "Hopkins", "team": "BAL", "position": "WR"},
  {"source_id": "c", "first_name": "Taysom", "last_name": "Hill", "team": "NO", "position": "QB"},
  {"source_id": "d", "first_name": "Gabriel", "last_name": "Davis", "team": "BUF", "position": "WR"},
  {"source_id": "e", "first_name": "Old", "last_name": "Veteran", "team": "DAL", "position": "RB"}
]"#;

const ALIASES_CSV: &str = "alias_name,canonical_name\nGabe Davis,Gabriel Davis\n";

static TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

struct CliRun {
    code: Option<i32>,
    stdout: String,
}

fn unique_test_home() -> PathBuf {
    let mut path = std::env::temp_dir();
    let stamp = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(value) => value.as_nanos(),
        Err(_) => 0,
    };
    let sequence = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!(
        "rosterlink-cli-test-{}-{stamp}-{sequence}",
        std::process::id()
    ));
    path
}

fn run_cli_in_home(home: &Path, args: &[&str], input: Option<&str>) -> CliRun {
    let mut command = Command::new(env!("CARGO_BIN_EXE_rosterlink"));
    command.args(args);
    command.env("ROSTERLINK_HOME", home);
    command.env_remove("ROSTERLINK_LOG");
    command.env_remove("RUST_LOG");
    command.env("COLUMNS", "200");
    command.stdin(if input.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    let child_spawn = command.spawn();
    assert!(child_spawn.is_ok());
    if let Ok(mut child) = child_spawn {
        if let Some(body) = input
            && let Some(mut pipe) = child.stdin.take()
        {
            assert!(pipe.write_all(body.as_bytes()).is_ok());
        }

        let output = child.wait_with_output();
        assert!(output.is_ok());
        if let Ok(result) = output {
            return CliRun {
                code: result.status.code(),
                stdout: String::from_utf8_lossy(&result.stdout).to_string(),
            };
        }
    }

    CliRun {
        code: None,
        stdout: String::new(),
    }
}

fn parse_json(text: &str) -> Value {
    let parsed = serde_json::from_str::<Value>(text);
    assert!(parsed.is_ok(), "stdout was not JSON: {text}");
    parsed.unwrap_or(Value::Null)
}

fn seed(home: &Path) {
    let a = run_cli_in_home(
        home,
        &[
            "players", "import", "--provider", "a", "--sport", "nfl", "--season", "2024", "-",
        ],
        Some(PROVIDER_A_CSV),
    );
    assert_eq!(a.code, Some(0), "{}", a.stdout);
    let b = run_cli_in_home(
        home,
        &[
            "players", "import", "--provider", "b", "--sport", "nfl", "--season", "2024", "-",
        ],
        Some(PROVIDER_B_JSON),
    );
    assert_eq!(b.code, Some(0), "{}", b.stdout);
    let aliases = run_cli_in_home(
        home,
        &["aliases", "import", "--sport", "nfl", "-"],
        Some(ALIASES_CSV),
    );
    assert_eq!(aliases.code, Some(0), "{}", aliases.stdout);
}

#[test]
fn bare_invocation_prints_top_level_help() {
    let home = unique_test_home();
    let run = run_cli_in_home(&home, &[], None);
    assert_eq!(run.code, Some(0));
    assert!(run.stdout.starts_with("rosterlink - player identity crosswalk"));
    assert!(run.stdout.contains("rosterlink crosswalk build --sport nfl --dry-run"));
}

#[test]
fn import_help_describes_roster_fields() {
    let home = unique_test_home();
    let run = run_cli_in_home(&home, &["players", "import", "--help"], None);
    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("How roster import works:"));
    assert!(run.stdout.contains("DST and D/ST are stored as DEF"));
}

#[test]
fn parse_errors_exit_one_with_command_hint() {
    let home = unique_test_home();
    let run = run_cli_in_home(
        &home,
        &["crosswalk", "list", "--sport", "nfl", "--confidence", "probable", "--json"],
        None,
    );
    assert_eq!(run.code, Some(1));
    let value = parse_json(&run.stdout);
    assert_eq!(value["ok"], Value::Bool(false));
    assert_eq!(value["error"]["code"], "invalid_argument");
    assert_eq!(value["data"]["command_hint"], "crosswalk list");
}

#[test]
fn full_flow_builds_and_lists_crosswalk_as_json() {
    let home = unique_test_home();
    seed(&home);

    let build = run_cli_in_home(
        &home,
        &["crosswalk", "build", "--sport", "nfl", "--season", "2024", "--json"],
        None,
    );
    assert_eq!(build.code, Some(0), "{}", build.stdout);
    let built = parse_json(&build.stdout);
    assert_eq!(built["ok"], Value::Bool(true));
    assert_eq!(built["data"]["summary"]["entries"], 6);
    assert_eq!(built["data"]["summary"]["matched_alias"], 1);
    assert_eq!(built["data"]["summary"]["matched_cross_position"], 1);

    let list = run_cli_in_home(
        &home,
        &[
            "crosswalk", "list", "--sport", "nfl", "--season", "2024", "--confidence", "fuzzy",
            "--json",
        ],
        None,
    );
    assert_eq!(list.code, Some(0));
    let rows = parse_json(&list.stdout);
    assert!(rows.is_array());
    assert_eq!(rows[0]["provider_a_id"], "2");
    assert_eq!(rows[0]["provider_b_id"], "b");
    assert_eq!(rows[0]["notes"], "Team mismatch: A(TEN) vs B(BAL)");

    let runs = run_cli_in_home(
        &home,
        &["crosswalk", "runs", "--sport", "nfl", "--season", "2024", "--json"],
        None,
    );
    assert_eq!(runs.code, Some(0));
    let history = parse_json(&runs.stdout);
    assert_eq!(history.as_array().map(Vec::len), Some(1));
}

#[test]
fn text_build_output_summarizes_counts() {
    let home = unique_test_home();
    seed(&home);

    let run = run_cli_in_home(
        &home,
        &["crosswalk", "build", "--sport", "NFL", "--season", "2024", "--dry-run"],
        None,
    );
    assert_eq!(run.code, Some(0), "{}", run.stdout);
    assert!(run.stdout.contains("Dry run: nothing was written."));
    assert!(run.stdout.contains("Entries to review:"));
    assert!(run.stdout.contains("cross_position"));
    assert!(run.stdout.contains("No entries were written because this was a dry run."));
}

#[test]
fn build_without_provider_b_roster_fails_with_empty_input() {
    let home = unique_test_home();
    let a = run_cli_in_home(
        &home,
        &[
            "players", "import", "--provider", "a", "--sport", "nfl", "--season", "2024", "-",
        ],
        Some(PROVIDER_A_CSV),
    );
    assert_eq!(a.code, Some(0));

    let run = run_cli_in_home(
        &home,
        &["crosswalk", "build", "--sport", "nfl", "--season", "2024"],
        None,
    );
    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("  Error:    empty_input"));
    assert!(run.stdout.contains("--provider b --sport nfl --season 2024"));
}

#[test]
fn invalid_roster_lists_rows_to_fix() {
    let home = unique_test_home();
    let run = run_cli_in_home(
        &home,
        &[
            "players", "import", "--provider", "a", "--sport", "nfl", "--season", "2024", "-",
        ],
        Some("source_id,first_name,last_name,team,position\n1,A,B,KC,QB\n1,C,D,KC,WR\n"),
    );
    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("import_validation_failed"));
    assert!(run.stdout.contains("Rows to fix:"));
    assert!(run.stdout.contains("  Row 2 source_id:"));
}

#[test]
fn corrupt_store_exits_two() {
    let home = unique_test_home();
    assert!(std::fs::create_dir_all(&home).is_ok());
    assert!(std::fs::write(home.join("rosterlink.db"), "not-a-sqlite-database").is_ok());

    let run = run_cli_in_home(
        &home,
        &["aliases", "list", "--sport", "nfl", "--json"],
        None,
    );
    assert_eq!(run.code, Some(2));
    let value = parse_json(&run.stdout);
    assert_eq!(value["error"]["code"], "store_corrupt");
}
