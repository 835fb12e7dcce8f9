//! Adjustment rule models
//!
//! Agency-configurable extra costs and taxes applied on top of each
//! service's own figures. Rules live in the agency settings record and
//! are evaluated by the billing engine in configuration order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calc_config::MAX_AMOUNT;
use crate::error::{BillingError, BillingResult};

/// Which running total an adjustment amount feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    /// Operational overhead charged to the agency
    Cost,
    /// Tax-like charge (gross-revenue tax, municipal levy)
    Tax,
}

/// The quantity a rule is applied against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentBasis {
    Sale,
    Cost,
    /// Sale minus cost, floored at zero
    Margin,
}

/// How the rule value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentValueType {
    /// Value is a proportion of the basis amount (0.024 = 2.4%)
    Percent,
    /// Value is an absolute amount in the service currency
    Fixed,
}

/// One configurable adjustment rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentConfig {
    /// Opaque stable identifier, minted when the rule is created
    pub id: String,
    /// Display label shown on breakdown screens
    pub label: String,
    pub kind: AdjustmentKind,
    pub basis: AdjustmentBasis,
    pub value_type: AdjustmentValueType,
    /// Proportion for `percent` rules, absolute amount for `fixed` rules
    pub value: f64,
    /// Inactive rules are skipped but kept for later reactivation
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl AdjustmentConfig {
    /// Create an active rule with a freshly minted id
    pub fn new(
        label: impl Into<String>,
        kind: AdjustmentKind,
        basis: AdjustmentBasis,
        value_type: AdjustmentValueType,
        value: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            kind,
            basis,
            value_type,
            value,
            active: true,
        }
    }

    /// Reject rule values that should never have been saved
    pub fn validate(&self) -> BillingResult<()> {
        if self.label.trim().is_empty() {
            return Err(BillingError::invalid_config("label", "must not be empty"));
        }
        if !self.value.is_finite() {
            return Err(BillingError::invalid_config(
                "value",
                format!("must be a finite number, got {}", self.value),
            ));
        }
        if self.value < 0.0 {
            return Err(BillingError::invalid_config(
                "value",
                format!("must be non-negative, got {}", self.value),
            ));
        }
        if self.value > MAX_AMOUNT {
            return Err(BillingError::invalid_config(
                "value",
                format!("exceeds maximum allowed ({MAX_AMOUNT}), got {}", self.value),
            ));
        }
        Ok(())
    }
}

/// An adjustment rule evaluated against one service
///
/// Carries a full copy of the rule fields so a persisted record stays
/// readable after the rule itself is edited or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentComputed {
    pub id: String,
    pub label: String,
    pub kind: AdjustmentKind,
    pub basis: AdjustmentBasis,
    pub value_type: AdjustmentValueType,
    pub value: f64,
    /// Amount derived from the rule for this evaluation
    pub amount: f64,
}

impl AdjustmentComputed {
    /// Create a computed record from a rule and its calculated amount
    pub fn from_config(config: &AdjustmentConfig, amount: f64) -> Self {
        Self {
            id: config.id.clone(),
            label: config.label.clone(),
            kind: config.kind,
            basis: config.basis,
            value_type: config.value_type,
            value: config.value,
            amount,
        }
    }
}

/// Aggregate of every adjustment computed for one evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentTotals {
    /// Computed rules in configuration order
    pub items: Vec<AdjustmentComputed>,
    /// Sum of `cost` amounts
    pub total_costs: f64,
    /// Sum of `tax` amounts
    pub total_taxes: f64,
    /// total_costs + total_taxes
    pub total: f64,
}
