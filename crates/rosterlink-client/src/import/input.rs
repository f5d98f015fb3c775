use std::fs;
use std::io::{IsTerminal, Read};

use crate::import::{RowSchema, invalid_input_error};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum SourceKind {
    File,
    Stdin,
}

impl SourceKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stdin => "stdin",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSource {
    pub(crate) kind: SourceKind,
    pub(crate) path: Option<String>,
    pub(crate) content: String,
}

/// A path other than `-` is read from disk and stdin is left alone; `-` or no
/// path reads stdin.
pub(crate) fn resolve_source(
    path: Option<String>,
    stdin_override: Option<String>,
    schema: &RowSchema,
) -> ClientResult<ResolvedSource> {
    if let Some(path_value) = path.filter(|value| value != "-") {
        let content = fs::read_to_string(&path_value).map_err(|error| {
            ClientError::invalid_argument_with_recovery(
                &format!("Could not read input file `{path_value}`: {error}"),
                vec![
                    "Verify the path exists and is readable.".to_string(),
                    format!("Run `{}` to confirm the expected fields.", schema.help_command),
                ],
            )
        })?;

        return Ok(ResolvedSource {
            kind: SourceKind::File,
            path: Some(path_value),
            content,
        });
    }

    match read_stdin(stdin_override)? {
        Some(content) => Ok(ResolvedSource {
            kind: SourceKind::Stdin,
            path: None,
            content,
        }),
        None => Err(invalid_input_error(
            "No input provided. Pass a file path, or `-` with JSON/CSV piped on stdin.",
            schema,
        )),
    }
}

fn read_stdin(stdin_override: Option<String>) -> ClientResult<Option<String>> {
    let buffer = match stdin_override {
        Some(value) => value,
        None => {
            if std::io::stdin().is_terminal() {
                return Ok(None);
            }

            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|error| {
                    ClientError::invalid_argument_with_recovery(
                        &format!("Could not read stdin: {error}"),
                        vec![
                            "Retry with an explicit file path argument.".to_string(),
                            "Or rerun with valid stdin content.".to_string(),
                        ],
                    )
                })?;
            buffer
        }
    };

    if buffer.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(buffer))
}

#[cfg(test)]
mod tests {
    use super::{SourceKind, resolve_source};
    use crate::import::PLAYER_SCHEMA;

    #[test]
    fn dash_reads_stdin_override() {
        let resolved = resolve_source(
            Some("-".to_string()),
            Some("[]".to_string()),
            &PLAYER_SCHEMA,
        );
        assert!(resolved.is_ok());
        if let Ok(source) = resolved {
            assert_eq!(source.kind, SourceKind::Stdin);
            assert_eq!(source.path, None);
        }
    }

    #[test]
    fn blank_stdin_is_an_invalid_argument() {
        let resolved = resolve_source(None, Some("  \n".to_string()), &PLAYER_SCHEMA);
        assert!(resolved.is_err());
        if let Err(error) = resolved {
            assert_eq!(error.code, "invalid_argument");
        }
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let resolved = resolve_source(
            Some("/definitely/not/here.csv".to_string()),
            None,
            &PLAYER_SCHEMA,
        );
        assert!(resolved.is_err());
        if let Err(error) = resolved {
            assert!(error.message.contains("/definitely/not/here.csv"));
        }
    }
}
