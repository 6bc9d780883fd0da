pub mod error;
pub mod ids;
pub mod traits;
pub mod types;

pub use error::*;
pub use ids::sanitize_asset_id;
pub use traits::*;
pub use types::*;
