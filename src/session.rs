use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const SESSION_FILE_DEFAULT: &str = ".attendash_session.json";

/// The persisted user-identity record: who logged in and when. This is the
/// whole of the client's session handling; the backend keeps the real
/// session in its cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub username: String,
    pub login_time: DateTime<Utc>,
}

impl UserSession {
    pub fn begin(username: &str) -> Self {
        Self {
            username: username.to_string(),
            login_time: Utc::now(),
        }
    }
}

pub fn session_path() -> PathBuf {
    env::var("ATTENDASH_SESSION")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(SESSION_FILE_DEFAULT))
}

pub fn store(path: &Path, session: &UserSession) -> std::io::Result<()> {
    fs::write(path, serde_json::to_string(session)?)
}

/// A missing or corrupt session file means "not logged in", never an error.
pub fn restore(path: &Path) -> Option<UserSession> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(err) => {
            log::warn!("ignoring corrupt session file {}: {}", path.display(), err);
            None
        }
    }
}

pub fn clear(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != std::io::ErrorKind::NotFound {
            log::warn!("failed to remove session file {}: {}", path.display(), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = UserSession::begin("Shanmukh");
        store(&path, &session).unwrap();
        assert_eq!(restore(&path), Some(session));

        clear(&path);
        assert_eq!(restore(&path), None);
    }

    #[test]
    fn corrupt_session_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(restore(&path), None);
    }

    #[test]
    fn clearing_a_missing_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        clear(&dir.path().join("absent.json"));
    }
}
