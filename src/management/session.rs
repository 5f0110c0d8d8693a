use std::{fmt, io::Error, path::PathBuf};

use crate::{
    config,
    types::{LoginResponse, Session},
};

#[derive(Debug)]
pub enum SessionError {
    IoError(Error),
    SerdeError(serde_json::Error),
    NotLoggedIn,
}

impl From<Error> for SessionError {
    fn from(err: Error) -> Self {
        SessionError::IoError(err)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::SerdeError(err)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::IoError(e) => write!(f, "session file error: {}", e),
            SessionError::SerdeError(e) => write!(f, "session file is corrupt: {}", e),
            SessionError::NotLoggedIn => write!(f, "you are not logged in"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Owns the persisted login state.
///
/// The session lives in `session.json` inside the data directory and is the
/// only source of truth for "is logged in" at startup. Every change goes
/// through `login`, `logout` or `set_premium` and is written back at once.
pub struct SessionManager {
    path: PathBuf,
    session: Option<Session>,
}

impl SessionManager {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            session: None,
        }
    }

    /// Loads the session from the default location.
    pub async fn load() -> Result<Self, SessionError> {
        Self::load_from(Self::session_path()).await
    }

    /// Loads the session stored at `path`; a missing file means logged out.
    pub async fn load_from(path: PathBuf) -> Result<Self, SessionError> {
        if !path.is_file() {
            return Ok(Self::new(path));
        }

        let content = async_fs::read_to_string(&path).await?;
        let session: Option<Session> = serde_json::from_str(&content)?;
        Ok(Self { path, session })
    }

    pub async fn persist(&self) -> Result<(), SessionError> {
        match &self.session {
            Some(session) => {
                if let Some(parent) = self.path.parent() {
                    async_fs::create_dir_all(parent).await?;
                }
                let json = serde_json::to_string_pretty(session)?;
                async_fs::write(&self.path, json).await?;
            }
            None => {
                if self.path.is_file() {
                    async_fs::remove_file(&self.path).await?;
                }
            }
        }
        Ok(())
    }

    pub async fn login(&mut self, response: LoginResponse) -> Result<&Session, SessionError> {
        self.session = Some(response.into());
        self.persist().await?;
        self.current().ok_or(SessionError::NotLoggedIn)
    }

    pub async fn logout(&mut self) -> Result<(), SessionError> {
        self.session = None;
        self.persist().await
    }

    pub async fn set_premium(&mut self, is_premium: bool) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NotLoggedIn)?;
        session.is_premium = is_premium;
        self.persist().await
    }

    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The session, or [`SessionError::NotLoggedIn`] for commands that need one.
    pub fn require(&self) -> Result<&Session, SessionError> {
        self.current()
            .filter(|s| !s.token.is_empty())
            .ok_or(SessionError::NotLoggedIn)
    }

    pub fn is_logged_in(&self) -> bool {
        self.require().is_ok()
    }

    pub fn is_premium(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_premium)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn session_path() -> PathBuf {
        config::data_dir().join("session.json")
    }
}
