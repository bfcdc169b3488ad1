use crate::local_storage::LocalStorage;
use anyhow::Result;
use std::path::PathBuf;

const TMDB_API_KEY: &str = "tmdb_api_key";
const SUPABASE_ANON_KEY: &str = "supabase_anon_key";

/// Secrets needed to reach the catalog and the hosted review table.
///
/// Environment variables take precedence over the file so containers can
/// inject keys without writing them to disk.
pub struct CredentialStore {
    storage: LocalStorage,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            storage: LocalStorage::new(path),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        self.storage.load()
    }

    pub fn save(&self) -> Result<()> {
        self.storage.save()
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.storage.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.storage.set(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.storage.remove(key);
    }

    pub fn get_tmdb_api_key(&self) -> Option<String> {
        env_or(self.get(TMDB_API_KEY), "TMDB_API_KEY")
    }

    pub fn set_tmdb_api_key(&mut self, key: String) {
        self.set(TMDB_API_KEY.to_string(), key);
    }

    pub fn get_supabase_anon_key(&self) -> Option<String> {
        env_or(self.get(SUPABASE_ANON_KEY), "SUPABASE_ANON_KEY")
    }

    pub fn set_supabase_anon_key(&mut self, key: String) {
        self.set(SUPABASE_ANON_KEY.to_string(), key);
    }
}

fn env_or(stored: Option<&String>, var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| stored.cloned())
}
