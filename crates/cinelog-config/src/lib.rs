pub mod config;
pub mod credentials;
pub mod local_storage;
pub mod paths;

pub use config::{
    CatalogConfig, Config, ConfigError, ReviewOptions, StoreBackend, StoreConfig, SupabaseConfig,
};
pub use credentials::CredentialStore;
pub use local_storage::LocalStorage;
pub use paths::{PathManager, container_base_path};
