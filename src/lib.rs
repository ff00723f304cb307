pub mod app;
pub mod crypto;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{IdentityService, ListingService, ServiceError, TelcoService};
pub use domain::model::Document;
pub use infra::config::AppConfig;
pub use storage::DocumentStore;
