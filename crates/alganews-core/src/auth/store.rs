//! Token storage and retrieval.
//!
//! The file store keeps the session in `<base>/session.json` with restricted
//! permissions (0600). Tokens are never logged or displayed in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Persisted client-side session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// PKCE verifier of the login currently in progress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_verifier: Option<String>,
    /// `state` parameter sent with that login; the redirect must echo it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_state: Option<String>,
}

/// Client-side storage for tokens and the pending login.
pub trait TokenStore: Send + Sync {
    /// Reads the whole stored session.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn load(&self) -> Result<StoredSession>;

    /// Replaces the whole stored session.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn save(&self, session: &StoredSession) -> Result<()>;

    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn access_token(&self) -> Result<Option<String>> {
        Ok(self.load()?.access_token)
    }

    /// Stores a freshly obtained token pair, keeping the verifier.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read or written.
    fn set_tokens(&self, access_token: &str, refresh_token: &str) -> Result<()> {
        let mut session = self.load()?;
        session.access_token = Some(access_token.to_string());
        session.refresh_token = Some(refresh_token.to_string());
        self.save(&session)
    }

    /// Records the verifier and state of a login that was just started.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read or written.
    fn begin_login(&self, verifier: &str, state: &str) -> Result<()> {
        let mut session = self.load()?;
        session.code_verifier = Some(verifier.to_string());
        session.login_state = Some(state.to_string());
        self.save(&session)
    }

    /// Removes every stored value.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn clear(&self) -> Result<()> {
        self.save(&StoredSession::default())
    }
}

/// File-backed token store.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store at the default session path under `ALGANEWS_HOME`.
    pub fn new() -> Self {
        Self::at(paths::session_path())
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<StoredSession> {
        if !self.path.exists() {
            return Ok(StoredSession::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))
    }

    fn save(&self, session: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

/// In-memory token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    session: Mutex<StoredSession>,
}

impl MemoryTokenStore {
    pub fn with_session(session: StoredSession) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<StoredSession> {
        let guard = self
            .session
            .lock()
            .map_err(|e| anyhow::anyhow!("session lock poisoned: {e}"))?;
        Ok(guard.clone())
    }

    fn save(&self, session: &StoredSession) -> Result<()> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| anyhow::anyhow!("session lock poisoned: {e}"))?;
        *guard = session.clone();
        Ok(())
    }
}
