//! Shared types for the billing engine
//!
//! Data contract between the billing & commission engine and the rest of
//! the agency back-office: adjustment rules, billing configuration,
//! per-service financial inputs and breakdowns, per-currency summaries,
//! and the engine error type.

pub mod error;
pub mod models;

// Re-exports
pub use error::{BillingError, BillingResult};
pub use serde::{Deserialize, Serialize};
