//! Factories that build the catalog client and the configured review store
//!
//! Store creation is centralized here so the CLI and tests never need to know
//! which backend is active.

use anyhow::Result;
use cinelog_config::{Config, CredentialStore, PathManager, StoreBackend};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use crate::{ReviewStore, TmdbClient};

/// Build the TMDB client from config and stored credentials
pub fn create_catalog(config: &Config, credentials: &CredentialStore) -> TmdbClient {
    TmdbClient::new(&config.catalog, credentials.get_tmdb_api_key())
}

/// Factory trait for creating review stores from configuration
pub trait StoreFactory: Send + Sync {
    /// The backend this factory creates
    fn backend(&self) -> StoreBackend;

    /// Validate the backend's configuration before creating it
    fn validate_config(&self, config: &Config, credentials: &CredentialStore) -> Result<()>;

    fn create_store(
        &self,
        config: &Config,
        credentials: &CredentialStore,
        paths: &PathManager,
    ) -> Result<Arc<dyn ReviewStore>>;
}

/// Registry of store factories, keyed by backend
pub struct StoreFactoryRegistry {
    factories: HashMap<StoreBackend, Box<dyn StoreFactory>>,
}

impl StoreFactoryRegistry {
    /// Create a new registry with all built-in factories registered
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };

        registry.register(Box::new(local::LocalStoreFactory));
        registry.register(Box::new(supabase::SupabaseStoreFactory));

        registry
    }

    pub fn register(&mut self, factory: Box<dyn StoreFactory>) {
        self.factories.insert(factory.backend(), factory);
    }

    /// Create the store selected by `config.store.backend`
    pub fn create_store(
        &self,
        config: &Config,
        credentials: &CredentialStore,
        paths: &PathManager,
    ) -> Result<Arc<dyn ReviewStore>> {
        let factory = self
            .factories
            .get(&config.store.backend)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No factory registered for store backend {:?}",
                    config.store.backend
                )
            })?;

        factory.validate_config(config, credentials)?;
        factory.create_store(config, credentials, paths)
    }

    pub fn is_registered(&self, backend: StoreBackend) -> bool {
        self.factories.contains_key(&backend)
    }
}

impl Default for StoreFactoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

mod local {
    use super::*;
    use crate::LocalReviewStore;

    pub struct LocalStoreFactory;

    impl StoreFactory for LocalStoreFactory {
        fn backend(&self) -> StoreBackend {
            StoreBackend::Local
        }

        fn validate_config(&self, _config: &Config, _credentials: &CredentialStore) -> Result<()> {
            Ok(())
        }

        fn create_store(
            &self,
            config: &Config,
            _credentials: &CredentialStore,
            paths: &PathManager,
        ) -> Result<Arc<dyn ReviewStore>> {
            let store = LocalReviewStore::new(paths.local_reviews_file())
                .with_unique_constraint(config.reviews.enforce_unique_per_identity);
            Ok(Arc::new(store))
        }
    }
}

mod supabase {
    use super::*;
    use crate::SupabaseReviewStore;

    pub struct SupabaseStoreFactory;

    impl StoreFactory for SupabaseStoreFactory {
        fn backend(&self) -> StoreBackend {
            StoreBackend::Supabase
        }

        fn validate_config(&self, config: &Config, credentials: &CredentialStore) -> Result<()> {
            if config.store.supabase.is_none() {
                return Err(anyhow::anyhow!(
                    "Store backend is 'supabase' but [store.supabase] is not configured"
                ));
            }
            if credentials.get_supabase_anon_key().is_none() {
                return Err(anyhow::anyhow!(
                    "Supabase anon key is not configured (run 'cinelog config store' or set SUPABASE_ANON_KEY)"
                ));
            }
            Ok(())
        }

        fn create_store(
            &self,
            config: &Config,
            credentials: &CredentialStore,
            _paths: &PathManager,
        ) -> Result<Arc<dyn ReviewStore>> {
            let supabase_config = config
                .store
                .supabase
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("Supabase is not configured"))?;
            let anon_key = credentials
                .get_supabase_anon_key()
                .ok_or_else(|| anyhow::anyhow!("Supabase anon key is not configured"))?;

            Ok(Arc::new(SupabaseReviewStore::new(
                supabase_config,
                anon_key,
                Duration::from_secs(config.catalog.request_timeout_secs),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinelog_config::SupabaseConfig;
    use tempfile::TempDir;

    #[test]
    fn test_registry_has_builtin_backends() {
        let registry = StoreFactoryRegistry::new();
        assert!(registry.is_registered(StoreBackend::Local));
        assert!(registry.is_registered(StoreBackend::Supabase));
    }

    #[test]
    fn test_create_local_store() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::with_base(dir.path().to_path_buf());
        let credentials = CredentialStore::new(paths.credentials_file());

        let store = StoreFactoryRegistry::new()
            .create_store(&Config::default(), &credentials, &paths)
            .unwrap();
        assert_eq!(store.store_name(), "local");
    }

    #[test]
    fn test_supabase_requires_url() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::with_base(dir.path().to_path_buf());
        let mut credentials = CredentialStore::new(paths.credentials_file());
        credentials.set_supabase_anon_key("anon".to_string());

        let mut config = Config::default();
        config.store.backend = StoreBackend::Supabase;
        let registry = StoreFactoryRegistry::new();
        assert!(registry.create_store(&config, &credentials, &paths).is_err());

        config.store.supabase = Some(SupabaseConfig::new("https://abc.supabase.co".to_string()));
        let store = registry.create_store(&config, &credentials, &paths).unwrap();
        assert_eq!(store.store_name(), "supabase");
    }
}
