//! Anonymous per-profile identity.
//!
//! The identity is created once, on the first submission that passes
//! validation, and read many times afterwards. It is never rotated or deleted.

use anyhow::{anyhow, Result};
use cinelog_config::LocalStorage;
use cinelog_models::AnonymousIdentity;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Fixed key under which the identity is persisted
pub const IDENTITY_KEY: &str = "user_identifier";

/// Persistent string key/value storage for client state.
pub trait IdentityStorage: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Supplies the visitor identity to the submission workflow and the movie page.
pub trait IdentityProvider: Send + Sync {
    /// The stored identity, if one was ever created. Never creates one.
    fn current(&self) -> Option<AnonymousIdentity>;

    /// The stored identity, creating and persisting a new one when absent.
    fn get_or_create(&self) -> AnonymousIdentity;
}

/// Identity storage in the profile's local state file.
pub struct FileIdentityStorage {
    path: PathBuf,
}

impl FileIdentityStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl IdentityStorage for FileIdentityStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let storage = LocalStorage::open(self.path.clone())?;
        Ok(storage.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        // Re-read before writing so other keys in the file survive
        let mut storage = LocalStorage::open(self.path.clone())?;
        storage.set(key.to_string(), value.to_string());
        storage.save()
    }
}

/// Identity storage held in memory. Can be marked unavailable.
pub struct MemoryIdentityStorage {
    entries: Mutex<HashMap<String, String>>,
    available: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryIdentityStorage {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
            writes: AtomicUsize::new(0),
        }
    }

    /// Storage that fails every read and write
    pub fn unavailable() -> Self {
        let storage = Self::new();
        storage.available.store(false, Ordering::SeqCst);
        storage
    }

    /// How many successful writes happened
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(anyhow!("local storage is unavailable"))
        }
    }
}

impl Default for MemoryIdentityStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityStorage for MemoryIdentityStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.check_available()?;
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Identity provider over any `IdentityStorage`.
///
/// When the storage cannot be read or written, a process-lifetime identity is
/// used instead so repeated calls still agree.
pub struct StoredIdentityProvider<S: IdentityStorage> {
    storage: S,
    ephemeral: Mutex<Option<AnonymousIdentity>>,
    // Held across read, generate and write in `get_or_create`
    create_lock: Mutex<()>,
}

impl<S: IdentityStorage> StoredIdentityProvider<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            ephemeral: Mutex::new(None),
            create_lock: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn read_stored(&self) -> Result<Option<AnonymousIdentity>> {
        Ok(self
            .storage
            .read(IDENTITY_KEY)?
            .filter(|value| !value.trim().is_empty())
            .map(AnonymousIdentity::new))
    }

    fn ephemeral_identity(&self) -> AnonymousIdentity {
        let mut ephemeral = self.ephemeral.lock().unwrap_or_else(|e| e.into_inner());
        ephemeral
            .get_or_insert_with(|| AnonymousIdentity::new(Uuid::new_v4().to_string()))
            .clone()
    }
}

impl<S: IdentityStorage> IdentityProvider for StoredIdentityProvider<S> {
    fn current(&self) -> Option<AnonymousIdentity> {
        if let Some(identity) = self.ephemeral.lock().unwrap_or_else(|e| e.into_inner()).clone() {
            return Some(identity);
        }

        match self.read_stored() {
            Ok(identity) => identity,
            Err(e) => {
                warn!("Could not read visitor identity from local storage: {}", e);
                None
            }
        }
    }

    fn get_or_create(&self) -> AnonymousIdentity {
        let _guard = self.create_lock.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(identity) = self.ephemeral.lock().unwrap_or_else(|e| e.into_inner()).clone() {
            return identity;
        }

        match self.read_stored() {
            Ok(Some(identity)) => {
                debug!("Using stored visitor identity");
                identity
            }
            Ok(None) => {
                let identity = AnonymousIdentity::new(Uuid::new_v4().to_string());
                match self.storage.write(IDENTITY_KEY, identity.as_str()) {
                    Ok(()) => {
                        info!("Created new visitor identity");
                        identity
                    }
                    Err(e) => {
                        warn!("Could not persist visitor identity, using a session one: {}", e);
                        let mut ephemeral =
                            self.ephemeral.lock().unwrap_or_else(|e| e.into_inner());
                        ephemeral.get_or_insert(identity).clone()
                    }
                }
            }
            Err(e) => {
                warn!(
                    "Could not read visitor identity, using a temporary one for this session: {}",
                    e
                );
                self.ephemeral_identity()
            }
        }
    }
}
