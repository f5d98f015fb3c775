use std::io;

use rosterlink_client::contracts::envelope::failure_from_error;
use rosterlink_client::{ClientError, SuccessEnvelope};
use serde::Serialize;
use serde_json::{Value, json};

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    let value = match success.command.as_str() {
        "players import" | "aliases import" | "crosswalk build" => {
            render_structured_json(&success.data)
        }
        "players list" | "aliases list" | "crosswalk list" | "crosswalk runs" => {
            render_rows_json(&success.data)
        }
        _ => {
            return Err(io::Error::other(format!(
                "JSON output is not supported for command `{}`",
                success.command
            )));
        }
    };

    serialize_json_pretty(&value)
}

/// Errors carry their structured `data` (validation issues, help command)
/// next to the code and recovery steps.
pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    serialize_json_pretty(&failure_from_error(error))
}

fn render_structured_json(data: &Value) -> Value {
    json!({
        "ok": true,
        "version": JSON_VERSION,
        "data": data.clone()
    })
}

/// List commands print the bare row array so the output pipes straight into
/// `jq`.
fn render_rows_json(data: &Value) -> Value {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    Value::Array(rows)
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use rosterlink_client::{ClientError, SuccessEnvelope};
    use serde_json::{Value, json};

    use super::{render_error_json, render_success_json};

    fn success(command: &str, data: Value) -> SuccessEnvelope {
        SuccessEnvelope {
            ok: true,
            command: command.to_string(),
            version: "0.1.0".to_string(),
            data,
        }
    }

    #[test]
    fn crosswalk_list_json_returns_raw_array() {
        let payload = success(
            "crosswalk list",
            json!({
                "sport": "nfl",
                "season": 2024,
                "total": 1,
                "rows": [
                    {"canonical_key": "patrick-mahomes-kc-qb", "match_confidence": "exact"}
                ]
            }),
        );

        let rendered = render_success_json(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert!(value.is_array());
                assert_eq!(value[0]["match_confidence"], "exact");
            }
        }
    }

    #[test]
    fn build_json_uses_structured_envelope() {
        let payload = success(
            "crosswalk build",
            json!({"dry_run": true, "summary": {"entries": 3}}),
        );

        let rendered = render_success_json(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["ok"], Value::Bool(true));
                assert_eq!(value["version"], "v1");
                assert_eq!(value["data"]["summary"]["entries"], 3);
            }
        }
    }

    #[test]
    fn error_json_keeps_code_steps_and_data() {
        let error = ClientError::new("empty_input", "missing", vec!["import b".to_string()])
            .with_data(json!({"provider": "b"}));
        let rendered = render_error_json(&error);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["ok"], Value::Bool(false));
                assert_eq!(value["error"]["code"], "empty_input");
                assert_eq!(value["error"]["recovery_steps"][0], "import b");
                assert_eq!(value["data"]["provider"], "b");
            }
        }
    }

    #[test]
    fn unknown_command_is_rejected() {
        let rendered = render_success_json(&success("teams", json!({})));
        assert!(rendered.is_err());
    }
}
