pub mod error;
pub mod lookup;
pub mod models;
pub mod origin;

// Re-export commonly used types
pub use error::{ApiError, ApiResult};
pub use lookup::SpatialLookup;
pub use models::*;
pub use origin::OriginSelector;
