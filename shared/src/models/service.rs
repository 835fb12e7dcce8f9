//! Service financial models
//!
//! The raw monetary facts captured for one booked service and the
//! tax/commission breakdown derived from them.

use serde::{Deserialize, Serialize};

use super::calc_config::CalcConfig;

/// Raw monetary facts for one booked service
///
/// Captured by the booking wizard in the service's own currency; amounts
/// are never converted. In automatic mode `tax21`, `tax105`, `exempt` and
/// `other_taxes` itemize the sale; in manual mode only `other_taxes`
/// carries the collapsed aggregate tax figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFinancialInput {
    /// Sale price in the service currency
    pub sale_price: f64,

    /// Operator cost in the service currency
    pub cost_price: f64,

    /// VAT-inclusive slice of the sale sold under the 21% regime
    #[serde(rename = "tax21", default)]
    pub tax_21: f64,

    /// VAT-inclusive slice of the sale sold under the 10.5% regime
    #[serde(rename = "tax105", default)]
    pub tax_10_5: f64,

    /// VAT-exempt slice of the sale
    #[serde(default)]
    pub exempt: f64,

    /// Non-computable taxes; in manual mode, the whole aggregate figure
    #[serde(default)]
    pub other_taxes: f64,

    /// Card-processing surcharge, charged on top of the sale price
    #[serde(default)]
    pub card_interest: f64,

    /// VAT on the card-processing surcharge
    #[serde(default)]
    pub card_interest_vat: f64,

    /// Aggregation key; blank means "use the agency fallback"
    #[serde(default)]
    pub currency_code: String,

    /// Proportion of the sale withheld as bank/card processing cost
    #[serde(default)]
    pub transfer_fee_pct: f64,

    /// Explicit fee amount; takes precedence over the percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_fee_override: Option<f64>,
}

impl ServiceFinancialInput {
    /// Blank wizard entry for one currency, fee percentage seeded from the
    /// agency settings and overridable per service afterwards
    pub fn new(currency_code: impl Into<String>, config: &CalcConfig) -> Self {
        Self {
            currency_code: currency_code.into(),
            transfer_fee_pct: config.transfer_fee_pct,
            ..Self::default()
        }
    }
}

/// Tax/commission decomposition derived for one service
///
/// A complete value computed wholesale from one [`ServiceFinancialInput`];
/// any input change produces a fresh result, individual fields are never
/// patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBreakdown {
    /// Card surcharge net amount, a pass-through that never enters the
    /// commission figures
    pub taxable_card_interest: f64,

    /// VAT on the card surcharge
    pub vat_on_card_interest: f64,

    /// Slice of the sale yielding no commission: contained VAT, other
    /// taxes and the uncategorized remainder
    pub non_computable_amount: f64,

    /// Net base contained in the 21% slice
    pub taxable_base_21: f64,

    /// Net base contained in the 10.5% slice
    #[serde(rename = "taxableBase10_5")]
    pub taxable_base_10_5: f64,

    /// Margin share attributed to the exempt slice
    pub commission_exempt: f64,

    /// VAT-exclusive margin share attributed to the 21% slice
    pub commission_21: f64,

    /// VAT-exclusive margin share attributed to the 10.5% slice
    #[serde(rename = "commission10_5")]
    pub commission_10_5: f64,

    pub vat_on_commission_21: f64,

    #[serde(rename = "vatOnCommission10_5")]
    pub vat_on_commission_10_5: f64,

    /// commission_exempt + commission_21 + commission_10_5
    pub total_commission_without_vat: f64,

    /// VAT the agency must remit: both commission brackets plus the card
    /// surcharge VAT
    pub total_vat_impact: f64,

    /// Bank-transfer fee withheld from the commission
    pub transfer_fee_amount: f64,
}
