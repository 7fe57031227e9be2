pub mod config;
pub mod models;
pub mod traits;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::*;
pub use models::*;
pub use traits::*;
