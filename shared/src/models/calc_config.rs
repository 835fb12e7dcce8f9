//! Billing configuration model
//!
//! Agency-wide billing settings, stored as a single record per agency.
//! Older agency records may miss any of these fields, so every one
//! carries a default and legacy settings deserialize cleanly.

use serde::{Deserialize, Serialize};

use super::adjustment::AdjustmentConfig;
use crate::error::{BillingError, BillingResult};

/// Default bank-transfer fee: 2.4% of the sale price
pub const DEFAULT_TRANSFER_FEE_PCT: f64 = 0.024;

/// Currency assumed for services saved without a currency code
pub const DEFAULT_FALLBACK_CURRENCY: &str = "ARS";

/// Largest monetary amount any single figure may carry
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

/// How a service's sale is decomposed into tax brackets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalcMode {
    /// Itemized categorization of the sale into VAT brackets
    #[default]
    Auto,
    /// Single aggregate tax figure, no bracket decomposition
    Manual,
}

/// Agency-wide billing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcConfig {
    #[serde(rename = "billing_breakdown_mode", default)]
    pub mode: CalcMode,

    /// Proportion of the sale withheld as bank/card processing cost
    #[serde(default = "default_transfer_fee_pct")]
    pub transfer_fee_pct: f64,

    /// Adjustment rules, evaluated in this order
    #[serde(rename = "billing_adjustments", default)]
    pub adjustments: Vec<AdjustmentConfig>,

    /// Price services at booking level instead of per service
    #[serde(default)]
    pub use_booking_sale_total: bool,

    /// Currency assumed when a service carries a blank code
    #[serde(default = "default_fallback_currency")]
    pub fallback_currency: String,
}

fn default_transfer_fee_pct() -> f64 {
    DEFAULT_TRANSFER_FEE_PCT
}

fn default_fallback_currency() -> String {
    DEFAULT_FALLBACK_CURRENCY.to_string()
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            mode: CalcMode::default(),
            transfer_fee_pct: DEFAULT_TRANSFER_FEE_PCT,
            adjustments: Vec::new(),
            use_booking_sale_total: false,
            fallback_currency: default_fallback_currency(),
        }
    }
}

impl CalcConfig {
    /// Validate the whole settings record before saving it
    pub fn validate(&self) -> BillingResult<()> {
        if !self.transfer_fee_pct.is_finite() {
            return Err(BillingError::invalid_config(
                "transfer_fee_pct",
                format!("must be a finite number, got {}", self.transfer_fee_pct),
            ));
        }
        if !(0.0..=1.0).contains(&self.transfer_fee_pct) {
            return Err(BillingError::invalid_config(
                "transfer_fee_pct",
                format!(
                    "must be a proportion between 0 and 1, got {}",
                    self.transfer_fee_pct
                ),
            ));
        }
        if self.fallback_currency.trim().is_empty() {
            return Err(BillingError::invalid_config(
                "fallback_currency",
                "must not be empty",
            ));
        }
        for (index, rule) in self.adjustments.iter().enumerate() {
            rule.validate().map_err(|err| match err {
                BillingError::InvalidConfig { field, reason } => BillingError::InvalidConfig {
                    field: format!("billing_adjustments[{index}].{field}"),
                    reason,
                },
                other => other,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::adjustment::{AdjustmentBasis, AdjustmentKind, AdjustmentValueType};

    #[test]
    fn test_defaults() {
        let config = CalcConfig::default();
        assert_eq!(config.mode, CalcMode::Auto);
        assert_eq!(config.transfer_fee_pct, DEFAULT_TRANSFER_FEE_PCT);
        assert!(config.adjustments.is_empty());
        assert!(!config.use_booking_sale_total);
        assert_eq!(config.fallback_currency, "ARS");
    }

    #[test]
    fn test_empty_record_deserializes_to_defaults() {
        let config: CalcConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CalcConfig::default());
    }

    #[test]
    fn test_partial_legacy_record() {
        // A record saved before booking-level pricing existed
        let json = r#"{
            "billing_breakdown_mode": "manual",
            "transfer_fee_pct": 0.03
        }"#;
        let config: CalcConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.mode, CalcMode::Manual);
        assert_eq!(config.transfer_fee_pct, 0.03);
        assert!(config.adjustments.is_empty());
        assert!(!config.use_booking_sale_total);
    }

    #[test]
    fn test_wire_field_names() {
        let config = CalcConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["billing_breakdown_mode"], "auto");
        assert!(json["billing_adjustments"].is_array());
        assert_eq!(json["use_booking_sale_total"], false);
        assert_eq!(json["fallback_currency"], "ARS");
    }

    #[test]
    fn test_settings_record_roundtrip() {
        let config = CalcConfig {
            mode: CalcMode::Manual,
            transfer_fee_pct: 0.03,
            adjustments: vec![AdjustmentConfig::new(
                "IIBB",
                AdjustmentKind::Tax,
                AdjustmentBasis::Sale,
                AdjustmentValueType::Percent,
                0.035,
            )],
            use_booking_sale_total: true,
            fallback_currency: "USD".to_string(),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: CalcConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_validate_rejects_fee_above_one() {
        let config = CalcConfig {
            transfer_fee_pct: 2.4,
            ..CalcConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("transfer_fee_pct"));
    }

    #[test]
    fn test_validate_names_offending_adjustment() {
        let mut bad = AdjustmentConfig::new(
            "IIBB",
            AdjustmentKind::Tax,
            AdjustmentBasis::Sale,
            AdjustmentValueType::Percent,
            0.035,
        );
        bad.value = f64::NAN;
        let config = CalcConfig {
            adjustments: vec![
                AdjustmentConfig::new(
                    "Courier",
                    AdjustmentKind::Cost,
                    AdjustmentBasis::Sale,
                    AdjustmentValueType::Fixed,
                    1500.0,
                ),
                bad,
            ],
            ..CalcConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("billing_adjustments[1].value"));
    }
}
