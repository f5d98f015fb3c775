mod aliases_text;
mod crosswalk_text;
mod error_text;
mod format;
mod json;
mod mode;
mod players_text;

use std::io;

use rosterlink_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "players import" => players_text::render_players_import(&success.data),
        "players list" => players_text::render_players_list(&success.data),
        "aliases import" => aliases_text::render_aliases_import(&success.data),
        "aliases list" => aliases_text::render_aliases_list(&success.data),
        "crosswalk build" => crosswalk_text::render_crosswalk_build(&success.data),
        "crosswalk list" => crosswalk_text::render_crosswalk_list(&success.data),
        "crosswalk runs" => crosswalk_text::render_crosswalk_runs(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
