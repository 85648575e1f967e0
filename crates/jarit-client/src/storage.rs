//! Durable persistence for the session token.
//!
//! One key, one value: the raw bearer token. Absence of the key means logged
//! out. The store writes through synchronously on every token mutation, so
//! implementations must not defer their writes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key-value persistence contract for the auth token.
pub trait TokenStorage: Send + Sync {
    /// Read the persisted token, if any.
    fn load(&self) -> Option<String>;

    /// Persist the token, replacing any previous value.
    fn persist(&self, token: &str) -> io::Result<()>;

    /// Remove the persisted token. Removing an absent token is not an error.
    fn clear(&self) -> io::Result<()>;
}

/// File-backed token storage: a single file holding the raw token string.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default token location under the platform's local data directory.
    ///
    /// Returns `None` when the platform exposes no data directory; callers
    /// should fall back to [`MemoryTokenStorage`] in that case.
    pub fn from_default_location() -> Option<Self> {
        let data_dir = dirs::data_local_dir()?;
        Some(Self::new(data_dir.join("jarit").join("auth_token")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Option<String> {
        let token = fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn persist(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;

        // Owner read/write only; the token grants full account access.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}

/// In-memory token storage for tests and runtimes without durable storage.
#[derive(Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token already present, as if restored from a prior run.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<String> {
        self.token.lock().expect("token lock").clone()
    }

    fn persist(&self, token: &str) -> io::Result<()> {
        *self.token.lock().expect("token lock") = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.token.lock().expect("token lock") = None;
        Ok(())
    }
}
