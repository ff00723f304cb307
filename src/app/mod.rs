pub mod analytics_service;
pub mod error;
pub mod identity_service;
pub mod listing_service;
pub mod telco_service;

pub use analytics_service::AnalyticsService;
pub use error::ServiceError;
pub use identity_service::{IdentityService, Session};
pub use listing_service::ListingService;
pub use telco_service::{NewWifiSource, ProvisionOrder, ProvisionOutcome, SimRegistration, TelcoService};

/// Treats an empty string the same as an absent field.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
