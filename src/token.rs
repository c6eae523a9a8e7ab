//! Session token and user persistence
//!
//! ## Table of Contents
//! - **TokenPair**: Access/refresh token pair issued by the identity service
//! - **StoredUser**: Persisted user profile record
//! - **TokenStore**: Trait for session storage backends
//! - **MemoryTokenStore**: In-process store (default)
//! - **FileTokenStore**: JSON-file persistent store
//!
//! The store owns the only shared mutable state in the SDK. The auth
//! interceptor is its sole writer on refresh and sole resetter on logout or
//! irrecoverable auth failure; service clients only read the current token.

use crate::error::{ClientError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Access/refresh token pair as issued by the identity service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived bearer token attached to authorized requests
    pub access_token: String,
    /// Long-lived token exchanged for a new pair on expiry
    pub refresh_token: String,
    /// Token scheme, `"Bearer"` unless the backend says otherwise
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Persisted user profile record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    /// User id
    pub id: String,
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Assigned roles (`STUDENT`, `TEACHER`, `ADMIN`)
    #[serde(default)]
    pub roles: Vec<String>,
}

impl StoredUser {
    /// Check whether the user holds a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Check whether the user holds any of the given roles
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|r| self.has_role(r))
    }
}

/// Fixed keys for the persisted session state
pub mod keys {
    /// Access token key
    pub const ACCESS_TOKEN: &str = "access_token";
    /// Refresh token key
    pub const REFRESH_TOKEN: &str = "refresh_token";
    /// User profile key
    pub const USER_DATA: &str = "user_data";
}

/// Trait for session storage backends
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Current access token, if a session is active
    async fn access_token(&self) -> Option<String>;

    /// Current refresh token, if a session is active
    async fn refresh_token(&self) -> Option<String>;

    /// Persisted user profile, if any
    async fn user(&self) -> Option<StoredUser>;

    /// Persist a token pair, overwriting any previous one
    async fn save_tokens(&self, tokens: &TokenPair) -> Result<()>;

    /// Persist the user profile
    async fn save_user(&self, user: &StoredUser) -> Result<()>;

    /// Remove access token, refresh token, and user data as one group
    async fn clear_auth(&self) -> Result<()>;

    /// Store name for logging
    fn name(&self) -> &str;
}

/// In-process session store, the default backend
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    data: RwLock<HashMap<String, Value>>,
}

impl MemoryTokenStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn access_token(&self) -> Option<String> {
        let data = self.data.read().await;
        data.get(keys::ACCESS_TOKEN)
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    async fn refresh_token(&self) -> Option<String> {
        let data = self.data.read().await;
        data.get(keys::REFRESH_TOKEN)
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    async fn user(&self) -> Option<StoredUser> {
        let data = self.data.read().await;
        data.get(keys::USER_DATA)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    async fn save_tokens(&self, tokens: &TokenPair) -> Result<()> {
        let mut data = self.data.write().await;
        data.insert(
            keys::ACCESS_TOKEN.to_string(),
            Value::String(tokens.access_token.clone()),
        );
        data.insert(
            keys::REFRESH_TOKEN.to_string(),
            Value::String(tokens.refresh_token.clone()),
        );
        Ok(())
    }

    async fn save_user(&self, user: &StoredUser) -> Result<()> {
        let mut data = self.data.write().await;
        data.insert(keys::USER_DATA.to_string(), serde_json::to_value(user)?);
        Ok(())
    }

    async fn clear_auth(&self) -> Result<()> {
        let mut data = self.data.write().await;
        data.remove(keys::ACCESS_TOKEN);
        data.remove(keys::REFRESH_TOKEN);
        data.remove(keys::USER_DATA);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// JSON-file session store
///
/// One file holds the whole session group. Every write flushes, and
/// `clear_auth` removes the three keys under a single lock so a crash can
/// never leave a partially cleared session behind.
pub struct FileTokenStore {
    path: PathBuf,
    data: RwLock<HashMap<String, Value>>,
}

impl FileTokenStore {
    /// Open or create a session file at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let data = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ClientError::storage(format!("Failed to read session file: {}", e)))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            HashMap::new()
        };

        info!(path = %path.display(), "Session store opened");

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Open the session file at the platform-default location
    /// (`<local data dir>/LearnHub/session.json`)
    pub fn open_default() -> Result<Self> {
        let base = dirs::data_local_dir()
            .ok_or_else(|| ClientError::storage("No local data directory available"))?;
        Self::open(base.join("LearnHub").join("session.json"))
    }

    fn flush_locked(&self, data: &HashMap<String, Value>) -> Result<()> {
        let contents = serde_json::to_string_pretty(data)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::storage(format!("Failed to create dir: {}", e)))?;
        }

        std::fs::write(&self.path, contents)
            .map_err(|e| ClientError::storage(format!("Failed to write session file: {}", e)))?;

        debug!(path = %self.path.display(), "Session store flushed");
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn access_token(&self) -> Option<String> {
        let data = self.data.read().await;
        data.get(keys::ACCESS_TOKEN)
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    async fn refresh_token(&self) -> Option<String> {
        let data = self.data.read().await;
        data.get(keys::REFRESH_TOKEN)
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    async fn user(&self) -> Option<StoredUser> {
        let data = self.data.read().await;
        data.get(keys::USER_DATA)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    async fn save_tokens(&self, tokens: &TokenPair) -> Result<()> {
        let mut data = self.data.write().await;
        data.insert(
            keys::ACCESS_TOKEN.to_string(),
            Value::String(tokens.access_token.clone()),
        );
        data.insert(
            keys::REFRESH_TOKEN.to_string(),
            Value::String(tokens.refresh_token.clone()),
        );
        self.flush_locked(&data)
    }

    async fn save_user(&self, user: &StoredUser) -> Result<()> {
        let mut data = self.data.write().await;
        data.insert(keys::USER_DATA.to_string(), serde_json::to_value(user)?);
        self.flush_locked(&data)
    }

    async fn clear_auth(&self) -> Result<()> {
        let mut data = self.data.write().await;
        data.remove(keys::ACCESS_TOKEN);
        data.remove(keys::REFRESH_TOKEN);
        data.remove(keys::USER_DATA);
        self.flush_locked(&data)
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tokens() -> TokenPair {
        TokenPair {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            token_type: "Bearer".to_string(),
        }
    }

    fn sample_user() -> StoredUser {
        StoredUser {
            id: "u-1".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            roles: vec!["STUDENT".to_string()],
        }
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::new();

        assert!(store.access_token().await.is_none());

        store.save_tokens(&sample_tokens()).await.unwrap();
        store.save_user(&sample_user()).await.unwrap();

        assert_eq!(store.access_token().await.as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().await.as_deref(), Some("refresh-1"));
        assert_eq!(store.user().await.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_clear_auth_removes_whole_group() {
        let store = MemoryTokenStore::new();
        store.save_tokens(&sample_tokens()).await.unwrap();
        store.save_user(&sample_user()).await.unwrap();

        store.clear_auth().await.unwrap();

        assert!(store.access_token().await.is_none());
        assert!(store.refresh_token().await.is_none());
        assert!(store.user().await.is_none());
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        {
            let store = FileTokenStore::open(&path).unwrap();
            store.save_tokens(&sample_tokens()).await.unwrap();
            store.save_user(&sample_user()).await.unwrap();
        }

        let store = FileTokenStore::open(&path).unwrap();
        assert_eq!(store.access_token().await.as_deref(), Some("access-1"));
        assert_eq!(store.user().await.unwrap().id, "u-1");
    }

    #[tokio::test]
    async fn test_file_store_clear_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileTokenStore::open(&path).unwrap();
        store.save_tokens(&sample_tokens()).await.unwrap();
        store.clear_auth().await.unwrap();

        let reopened = FileTokenStore::open(&path).unwrap();
        assert!(reopened.access_token().await.is_none());
        assert!(reopened.refresh_token().await.is_none());
        assert!(reopened.user().await.is_none());
    }

    #[test]
    fn test_token_type_defaults_to_bearer() {
        let pair: TokenPair =
            serde_json::from_str(r#"{"accessToken": "a", "refreshToken": "r"}"#).unwrap();
        assert_eq!(pair.token_type, "Bearer");
    }

    #[test]
    fn test_role_checks() {
        let user = sample_user();
        assert!(user.has_role("STUDENT"));
        assert!(!user.has_role("ADMIN"));
        assert!(user.has_any_role(&["ADMIN", "STUDENT"]));
        assert!(!user.has_any_role(&["ADMIN", "TEACHER"]));
    }
}
