//! Data models
//!
//! Shared between the billing engine and the back-office services that
//! persist or display its results.

pub mod adjustment;
pub mod calc_config;
pub mod service;
pub mod summary;

// Re-exports
pub use adjustment::*;
pub use calc_config::*;
pub use service::*;
pub use summary::*;
