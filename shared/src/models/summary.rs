//! Per-currency booking summary model

use serde::{Deserialize, Serialize};

/// Sums of every breakdown and adjustment figure for the services sharing
/// one currency within a booking
///
/// Amounts in different currencies are never combined; a booking holds
/// one of these per distinct currency code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencySummary {
    /// Services aggregated into this entry
    pub service_count: usize,

    /// Booking-level figure when booking pricing is enabled, per-service
    /// sum otherwise
    pub sale_total: f64,

    pub cost_total: f64,

    pub taxable_card_interest: f64,
    pub vat_on_card_interest: f64,
    pub non_computable_amount: f64,
    pub taxable_base_21: f64,
    #[serde(rename = "taxableBase10_5")]
    pub taxable_base_10_5: f64,
    pub commission_exempt: f64,
    pub commission_21: f64,
    #[serde(rename = "commission10_5")]
    pub commission_10_5: f64,
    pub vat_on_commission_21: f64,
    #[serde(rename = "vatOnCommission10_5")]
    pub vat_on_commission_10_5: f64,
    pub total_commission_without_vat: f64,
    pub total_vat_impact: f64,

    /// Sum of adjustment `cost` amounts
    pub adjustment_costs: f64,
    /// Sum of adjustment `tax` amounts
    pub adjustment_taxes: f64,
    pub adjustment_total: f64,

    /// Bank-transfer fees; recomputed on the booking-level sale figure
    /// when booking pricing is enabled
    pub transfer_fees_amount: f64,
}
