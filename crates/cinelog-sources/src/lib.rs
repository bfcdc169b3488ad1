pub mod traits;
pub mod error;
pub mod factory;
pub mod http;
pub mod tmdb;
pub mod supabase;
pub mod local;
pub mod memory;

pub use traits::{CatalogService, ReviewStore};
pub use error::{CatalogError, StoreError};
pub use factory::{StoreFactory, StoreFactoryRegistry, create_catalog};
pub use tmdb::TmdbClient;
pub use supabase::SupabaseReviewStore;
pub use local::LocalReviewStore;
pub use memory::InMemoryReviewStore;
