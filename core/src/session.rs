//! Session State
//!
//! Whether the user is signed in, held in an explicit [`Session`] owned by a
//! [`SessionManager`] and passed to whoever needs it. Persistence happens
//! only at the [`SessionStore`] boundary: load once at startup, save on
//! sign-in, clear on sign-out.
//!
//! # Stores
//!
//! - [`FileSessionStore`]: JSON file, async I/O
//! - [`MemorySessionStore`]: process memory, for tests and ephemeral runs

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::{AuthError, CredentialVerifier, Credentials};

/// Session persistence and sign-in errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the session file failed
    #[error("session file {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Session could not be encoded
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),

    /// Sign-in was refused
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Signed-in state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    /// Whether the user is signed in
    pub authenticated: bool,
    /// Who is signed in
    pub username: Option<String>,
    /// When they signed in (Unix timestamp ms)
    pub signed_in_at_ms: Option<u64>,
}

impl Session {
    /// A fresh signed-in session
    #[must_use]
    pub fn signed_in(username: String) -> Self {
        Self {
            authenticated: true,
            username: Some(username),
            signed_in_at_ms: Some(now_ms()),
        }
    }
}

/// Where sessions live between runs
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the stored session, `None` if nothing is stored
    async fn load(&self) -> Result<Option<Session>, SessionError>;

    /// Store a session, replacing any previous one
    async fn save(&self, session: &Session) -> Result<(), SessionError>;

    /// Forget the stored session
    async fn clear(&self) -> Result<(), SessionError>;
}

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Box<T> {
    async fn load(&self) -> Result<Option<Session>, SessionError> {
        (**self).load().await
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        (**self).save(session).await
    }

    async fn clear(&self) -> Result<(), SessionError> {
        (**self).clear().await
    }
}

/// JSON file store
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at `path` (created on first save)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `$XDG_DATA_HOME/swifter/session.json`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("swifter").join("session.json"))
    }

    /// File backing this store
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>, SessionError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Ignoring unreadable session file"
                );
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(session)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| self.io_error(e))
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// In-process store
///
/// Clones share the same slot, so a test can keep one clone to inspect what
/// the manager saved.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<Session>>>,
}

impl MemorySessionStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with a session
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(session))),
        }
    }

    /// Peek at the stored session
    #[must_use]
    pub fn stored(&self) -> Option<Session> {
        self.slot.lock().clone()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.slot.lock().clone())
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.slot.lock() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.slot.lock() = None;
        Ok(())
    }
}

/// Owns the current session and its store
pub struct SessionManager<S: SessionStore> {
    store: S,
    session: Session,
}

impl<S: SessionStore> SessionManager<S> {
    /// Load whatever session the store has (signed out if none)
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read at all. An unreadable
    /// session file is not an error; it restores as signed out.
    pub async fn restore(store: S) -> Result<Self, SessionError> {
        let session = store.load().await?.unwrap_or_default();

        tracing::debug!(
            authenticated = session.authenticated,
            username = ?session.username,
            "Session restored"
        );

        Ok(Self { store, session })
    }

    /// Verify credentials, then persist the signed-in session
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Auth`] when the verifier refuses, or a store
    /// error if the session cannot be saved. The in-memory session only
    /// changes once the save succeeded.
    pub async fn sign_in(
        &mut self,
        verifier: &dyn CredentialVerifier,
        credentials: &Credentials,
    ) -> Result<(), SessionError> {
        let identity = verifier.verify(credentials).await?;
        let session = Session::signed_in(identity.username);

        self.store.save(&session).await?;
        self.session = session;

        tracing::info!(username = ?self.session.username, "Signed in");
        Ok(())
    }

    /// Forget the session both in memory and in the store
    ///
    /// # Errors
    ///
    /// Returns a store error if the stored session cannot be removed. The
    /// in-memory session is signed out regardless.
    pub async fn sign_out(&mut self) -> Result<(), SessionError> {
        let username = self.session.username.take();
        self.session = Session::default();

        tracing::info!(?username, "Signed out");
        self.store.clear().await
    }

    /// Current session
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether someone is signed in
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }

    /// Underlying store
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Get current time in milliseconds since Unix epoch
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentialVerifier;
    use pretty_assertions::assert_eq;

    fn verifier() -> StaticCredentialVerifier {
        StaticCredentialVerifier::new("demo", "demo")
    }

    #[tokio::test]
    async fn test_restore_empty_is_signed_out() {
        let manager = SessionManager::restore(MemorySessionStore::new())
            .await
            .unwrap();
        assert!(!manager.is_authenticated());
        assert_eq!(manager.session(), &Session::default());
    }

    #[tokio::test]
    async fn test_sign_in_persists() {
        let store = MemorySessionStore::new();
        let mut manager = SessionManager::restore(store.clone()).await.unwrap();

        manager
            .sign_in(&verifier(), &Credentials::new("demo", "demo"))
            .await
            .unwrap();

        assert!(manager.is_authenticated());
        let stored = store.stored().unwrap();
        assert!(stored.authenticated);
        assert_eq!(stored.username.as_deref(), Some("demo"));
        assert!(stored.signed_in_at_ms.is_some());
    }

    #[tokio::test]
    async fn test_failed_sign_in_leaves_session_untouched() {
        let store = MemorySessionStore::new();
        let mut manager = SessionManager::restore(store.clone()).await.unwrap();

        let err = manager
            .sign_in(&verifier(), &Credentials::new("demo", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Auth(AuthError::InvalidCredentials)));
        assert!(!manager.is_authenticated());
        assert_eq!(store.stored(), None);
    }

    #[tokio::test]
    async fn test_sign_out_clears_store() {
        let store = MemorySessionStore::with_session(Session::signed_in("demo".into()));
        let mut manager = SessionManager::restore(store.clone()).await.unwrap();
        assert!(manager.is_authenticated());

        manager.sign_out().await.unwrap();
        assert!(!manager.is_authenticated());
        assert_eq!(store.stored(), None);
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));

        assert_eq!(store.load().await.unwrap(), None);

        let session = Session::signed_in("demo".into());
        store.save(&session).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
        // Clearing twice is fine
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_restores_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let manager = SessionManager::restore(FileSessionStore::new(path))
            .await
            .unwrap();
        assert!(!manager.is_authenticated());
    }
}
