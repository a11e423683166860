use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::error::StoreError;
use crate::session::credentials::CredentialPair;

/// Durable storage for the session's credential pair.
///
/// Two named string slots on the wire format (`accessCredential`,
/// `refreshCredential`), read on demand and replaced wholesale on login and
/// refresh.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<CredentialPair>, StoreError>;
    fn save(&self, pair: &CredentialPair) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// File-backed store holding the credential pair as a small JSON document.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<CredentialPair>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let pair: CredentialPair = serde_json::from_str(&raw)?;
        Ok(Some(pair))
    }

    fn save(&self, pair: &CredentialPair) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(pair)?;
        fs::write(&self.path, raw)?;
        debug!("Credentials persisted to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and embedders that manage persistence
/// themselves.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<CredentialPair>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pair(pair: CredentialPair) -> Self {
        Self {
            slot: Mutex::new(Some(pair)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<CredentialPair>, StoreError> {
        Ok(self.slot.lock().unwrap().clone())
    }

    fn save(&self, pair: &CredentialPair) -> Result<(), StoreError> {
        *self.slot.lock().unwrap() = Some(pair.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}
