use std::{collections::HashSet, io::Error, path::PathBuf};

use crate::types::Profile;

const KEY_ACCESS_TOKEN: &str = "access_token";
const KEY_PROFILE: &str = "profile.json";
const KEY_CODE_VERIFIER: &str = "code_verifier";

#[derive(Debug)]
pub enum SessionError {
    IoError(Error),
    SerdeError(serde_json::Error),
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

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::IoError(e) => write!(f, "session io error: {}", e),
            SessionError::SerdeError(e) => write!(f, "session serde error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

/// Snapshot of the persisted session at load time.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub access_token: Option<String>,
    pub user: Option<Profile>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Durable key/value store for the authenticated session.
///
/// Persists the access token, the cached user profile and the single-use
/// pending PKCE verifier as files under the store root; every mutation is
/// written out before the call returns, so the session survives a full
/// process restart between flow start and callback.
///
/// The set of already-processed authorization codes is held in memory only.
/// It exists to make callback handling idempotent when the same inbound
/// redirect is delivered twice, which does not need to survive a restart.
pub struct SessionStore {
    root: PathBuf,
    processed_codes: HashSet<String>,
}

impl SessionStore {
    /// Opens the store at the default location in the local data directory
    /// (`topalcli/session/`).
    pub fn open() -> Self {
        let mut root = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        root.push("topalcli/session");
        Self::at(root)
    }

    /// Opens the store at an explicit root directory.
    pub fn at(root: PathBuf) -> Self {
        SessionStore {
            root,
            processed_codes: HashSet::new(),
        }
    }

    /// Reads the persisted token and profile. Absent or unreadable values
    /// default to a not-authenticated session.
    pub async fn load(&self) -> Session {
        let access_token = async_fs::read_to_string(self.key_path(KEY_ACCESS_TOKEN))
            .await
            .ok();
        let user = match async_fs::read_to_string(self.key_path(KEY_PROFILE)).await {
            Ok(json) => serde_json::from_str::<Profile>(&json).ok(),
            Err(_) => None,
        };

        Session { access_token, user }
    }

    pub async fn save_token(&self, token: &str) -> Result<(), SessionError> {
        self.write_key(KEY_ACCESS_TOKEN, token).await
    }

    pub async fn save_profile(&self, profile: &Profile) -> Result<(), SessionError> {
        let json = serde_json::to_string_pretty(profile)?;
        self.write_key(KEY_PROFILE, &json).await
    }

    pub async fn save_pending_verifier(&self, verifier: &str) -> Result<(), SessionError> {
        self.write_key(KEY_CODE_VERIFIER, verifier).await
    }

    /// Reads and consumes the pending verifier in one step. The verifier is
    /// single-use: a second call returns `None`, and a stale verifier from an
    /// abandoned attempt can never leak into a later exchange.
    pub async fn take_pending_verifier(&self) -> Option<String> {
        let path = self.key_path(KEY_CODE_VERIFIER);
        let verifier = async_fs::read_to_string(&path).await.ok()?;
        let _ = async_fs::remove_file(&path).await;
        Some(verifier)
    }

    pub async fn clear_verifier(&self) {
        let _ = async_fs::remove_file(self.key_path(KEY_CODE_VERIFIER)).await;
    }

    /// Records an authorization code as processed. Returns `true` the first
    /// time a code is seen and `false` on every repeat.
    pub fn mark_code_processed(&mut self, code: &str) -> bool {
        self.processed_codes.insert(code.to_string())
    }

    /// Logout: removes token, profile and any pending verifier.
    pub async fn clear(&self) -> Result<(), SessionError> {
        for key in [KEY_ACCESS_TOKEN, KEY_PROFILE, KEY_CODE_VERIFIER] {
            let path = self.key_path(key);
            if let Err(e) = async_fs::remove_file(&path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    return Err(SessionError::IoError(e));
                }
            }
        }
        Ok(())
    }

    async fn write_key(&self, key: &str, value: &str) -> Result<(), SessionError> {
        async_fs::create_dir_all(&self.root).await?;
        async_fs::write(self.key_path(key), value).await?;
        Ok(())
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}
