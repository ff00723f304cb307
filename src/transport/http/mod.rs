pub mod landing;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod identity;
    pub mod listings;
    pub mod status;
    pub mod telco;
}

pub use landing::write_landing_page;
pub use router::{create_router, ApiDoc};
pub use types::AppState;
