pub mod config;
pub mod identity;
pub mod movie;
pub mod prompts;
pub mod review;
pub mod search;
pub mod ui;

use cinelog_config::{Config, CredentialStore, PathManager};
use cinelog_core::{FileIdentityStorage, StoredIdentityProvider, SubmissionWorkflow};
use cinelog_sources::{create_catalog, ReviewStore, StoreFactoryRegistry, TmdbClient};
use color_eyre::Result;
use std::sync::Arc;
use tracing::debug;

/// Services shared by the commands, built from config and credentials on disk.
pub struct AppContext {
    pub config: Config,
    pub paths: PathManager,
    pub catalog: TmdbClient,
    pub store: Arc<dyn ReviewStore>,
    pub identity: Arc<StoredIdentityProvider<FileIdentityStorage>>,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let paths = PathManager::default();
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| {
                color_eyre::eyre::eyre!(
                    "Failed to load config from {}: {}",
                    config_file.display(),
                    e
                )
            })?;
        config
            .validate()
            .map_err(|e| {
                color_eyre::eyre::eyre!("Invalid configuration in {}: {}", config_file.display(), e)
            })?;

        let mut credentials = CredentialStore::new(paths.credentials_file());
        credentials
            .load()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;

        let catalog = create_catalog(&config, &credentials);
        let store = StoreFactoryRegistry::new()
            .create_store(&config, &credentials, &paths)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to set up review store: {}", e))?;
        let identity = Arc::new(StoredIdentityProvider::new(FileIdentityStorage::new(
            paths.local_storage_file(),
        )));

        debug!(
            store = store.store_name(),
            config_file = %config_file.display(),
            "Application context loaded"
        );

        Ok(Self {
            config,
            paths,
            catalog,
            store,
            identity,
        })
    }

    pub fn workflow(&self) -> SubmissionWorkflow {
        SubmissionWorkflow::new(self.store.clone(), self.identity.clone())
            .with_unique_enforcement(self.config.reviews.enforce_unique_per_identity)
    }

    /// Fail early with a setup hint when no catalog key is available
    pub fn require_catalog_key(&self) -> Result<()> {
        if self.catalog.has_api_key() {
            Ok(())
        } else {
            Err(color_eyre::eyre::eyre!(
                "TMDB API key is not configured. Run 'cinelog config tmdb' or set TMDB_API_KEY."
            ))
        }
    }
}
