pub mod error;
pub mod models;
pub mod registry;

pub use error::{ApiError, ApiResult};
pub use models::*;
pub use registry::TypeRegistry;
