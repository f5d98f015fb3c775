use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, Error as SqliteError, ffi::ErrorCode};

use crate::{ClientError, ClientResult};

pub const HOME_ENV: &str = "ROSTERLINK_HOME";
const DEFAULT_HOME_DIR: &str = ".rosterlink";
const DB_FILE_NAME: &str = "rosterlink.db";

pub fn resolve_store_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os(HOME_ENV) {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(DEFAULT_HOME_DIR)
            } else {
                return Err(ClientError::store_init_failed(
                    Path::new("."),
                    "Could not resolve a home directory for the roster store.",
                ));
            }
        }
    };

    absolutize(&candidate)
}

pub fn ensure_store_directory(path: &Path) -> ClientResult<()> {
    fs::create_dir_all(path).map_err(|error| map_io_error(path, &error))?;
    set_private_permissions_best_effort(path);
    Ok(())
}

pub fn store_db_path(home: &Path) -> PathBuf {
    home.join(DB_FILE_NAME)
}

pub fn open_connection(db_path: &Path) -> ClientResult<Connection> {
    let connection =
        Connection::open(db_path).map_err(sqlite_failure(db_path))?;
    connection
        .busy_timeout(Duration::from_millis(250))
        .map_err(sqlite_failure(db_path))?;
    Ok(connection)
}

pub fn map_io_error(path: &Path, error: &std::io::Error) -> ClientError {
    if error.kind() == std::io::ErrorKind::PermissionDenied {
        return ClientError::store_init_permission_denied(path, &error.to_string());
    }

    ClientError::store_init_failed(path, &error.to_string())
}

/// `map_err` adapter over [`map_sqlite_error`] for a fixed store path.
pub(crate) fn sqlite_failure(path: &Path) -> impl Fn(SqliteError) -> ClientError + '_ {
    move |error| map_sqlite_error(path, &error)
}

pub fn map_sqlite_error(path: &Path, error: &SqliteError) -> ClientError {
    match error.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => {
            ClientError::store_locked(path)
        }
        Some(ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt) => {
            ClientError::store_corrupt(path)
        }
        Some(ErrorCode::CannotOpen | ErrorCode::ReadOnly) => {
            ClientError::store_init_permission_denied(path, &error.to_string())
        }
        _ => ClientError::store_init_failed(path, &error.to_string()),
    }
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::store_init_failed(path, &error.to_string()))
}

#[cfg(unix)]
fn set_private_permissions_best_effort(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o700));
}

#[cfg(not(unix))]
fn set_private_permissions_best_effort(_path: &Path) {}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{resolve_store_home, store_db_path};

    #[test]
    fn override_wins_and_db_lives_under_home() {
        let resolved = resolve_store_home(Some(Path::new("/tmp/rosterlink-test-home")));
        assert!(resolved.is_ok());
        if let Ok(home) = resolved {
            assert_eq!(
                store_db_path(&home),
                Path::new("/tmp/rosterlink-test-home/rosterlink.db")
            );
        }
    }

    #[test]
    fn relative_override_is_made_absolute() {
        let resolved = resolve_store_home(Some(Path::new("relative-home")));
        assert!(resolved.is_ok());
        if let Ok(home) = resolved {
            assert!(home.is_absolute());
            assert!(home.ends_with("relative-home"));
        }
    }
}
