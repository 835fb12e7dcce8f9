//! Billing & commission calculation engine
//!
//! Pure, deterministic calculators for the agency back-office: per-service
//! tax/commission breakdown, configurable cost/tax adjustments, net
//! commission resolution and per-currency booking summaries. The engine
//! performs no I/O and holds no state; callers own persistence,
//! recomputation scheduling and display.

pub mod adjustments;
pub mod breakdown;
pub mod commission;
pub mod money;
pub mod pipeline;
pub mod summary;
pub mod validate;

// Re-exports
pub use adjustments::*;
pub use breakdown::*;
pub use commission::*;
pub use pipeline::*;
pub use summary::*;
pub use validate::*;
