//! Authentication session
//!
//! Holds the bearer token, its expiry and the user's roles. Persistence goes
//! through a [`CredentialStore`]; the session itself keeps the in-memory copy
//! that guards and role checks read from.

use crate::error::ListkitError;
use crate::format::parse_timestamp;
use crate::roles::RoleEvaluator;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Stored login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    /// Expiry timestamp as sent by the server (RFC 3339)
    pub expires_at: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Credential {
    /// Valid when the expiry parses and lies after `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        if self.access_token.is_empty() || self.expires_at.is_empty() {
            return false;
        }
        parse_timestamp(&self.expires_at)
            .map(|expires| expires > now)
            .unwrap_or(false)
    }
}

/// Login endpoint response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_at: String,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

impl From<LoginResponse> for Credential {
    fn from(response: LoginResponse) -> Self {
        Self {
            access_token: response.access_token,
            expires_at: response.expires_at,
            roles: response.roles.unwrap_or_default(),
        }
    }
}

/// Read/write access to the current credential.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<Credential>, ListkitError>;
    fn save(&self, credential: &Credential) -> Result<(), ListkitError>;
    fn clear(&self) -> Result<(), ListkitError>;
}

/// Process-local store.
#[derive(Default)]
pub struct MemoryCredentialStore {
    credential: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credential>, ListkitError> {
        Ok(self.credential.read().clone())
    }

    fn save(&self, credential: &Credential) -> Result<(), ListkitError> {
        *self.credential.write() = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ListkitError> {
        *self.credential.write() = None;
        Ok(())
    }
}

/// JSON file store, by default under the platform data directory.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/listkit/credentials.json`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "listkit").map(|dirs| dirs.data_dir().join("credentials.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credential>, ListkitError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(credential) => Ok(Some(credential)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable credential file");
                Ok(None)
            }
        }
    }

    fn save(&self, credential: &Credential) -> Result<(), ListkitError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ListkitError::Credential(format!("Failed to create credential directory: {}", e))
            })?;
        }
        let content = serde_json::to_string_pretty(credential)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), ListkitError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Current login state backed by a credential store.
pub struct AuthSession {
    store: Arc<dyn CredentialStore>,
    current: RwLock<Option<Credential>>,
}

impl AuthSession {
    /// Open a session, reading whatever credential the store already holds.
    pub fn open(store: Arc<dyn CredentialStore>) -> Result<Self, ListkitError> {
        let current = store.load()?;
        debug!(has_credential = current.is_some(), "Auth session opened");
        Ok(Self {
            store,
            current: RwLock::new(current),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        self.current
            .read()
            .as_ref()
            .map(|c| c.is_valid_at(now))
            .unwrap_or(false)
    }

    /// The stored credential, expired or not.
    pub fn credential(&self) -> Option<Credential> {
        self.current.read().clone()
    }

    /// Bearer token, if one is stored (expired or not).
    pub fn access_token(&self) -> Option<String> {
        self.current.read().as_ref().map(|c| c.access_token.clone())
    }

    pub fn roles(&self) -> Vec<String> {
        self.current
            .read()
            .as_ref()
            .map(|c| c.roles.clone())
            .unwrap_or_default()
    }

    /// Role checks with this session as the primary source and `token` as
    /// the fallback.
    pub fn role_evaluator(&self, token: Option<&serde_json::Value>) -> RoleEvaluator {
        let roles = self.roles();
        RoleEvaluator::new(Some(roles.as_slice()), token)
    }

    /// Persist a successful login.
    pub fn login(&self, response: LoginResponse) -> Result<Credential, ListkitError> {
        let credential = Credential::from(response);
        self.store.save(&credential)?;
        *self.current.write() = Some(credential.clone());
        info!(roles = ?credential.roles, "Logged in");
        Ok(credential)
    }

    pub fn logout(&self) -> Result<(), ListkitError> {
        self.store.clear()?;
        *self.current.write() = None;
        info!("Logged out");
        Ok(())
    }
}
