//! Domain error types.

mod asset_error;
mod run_error;

pub use asset_error::AssetError;
pub use run_error::RunError;
