//! Boundary validation helpers
//!
//! The calculators compute with whatever figures they are given; these
//! checks run at the boundary instead, at form-submission and settings-save
//! time, so a configuration bug surfaces as a validation error and not as
//! a silent financial discrepancy.

use shared::error::{BillingError, BillingResult};
use shared::models::{CalcMode, MAX_AMOUNT, ServiceFinancialInput};

use crate::money::{MONEY_TOLERANCE, to_decimal};

fn require_finite(value: f64, field: &str) -> BillingResult<()> {
    if !value.is_finite() {
        return Err(BillingError::invalid_service_input(
            field,
            format!("must be a finite number, got {value}"),
        ));
    }
    Ok(())
}

fn require_non_negative(value: f64, field: &str) -> BillingResult<()> {
    require_finite(value, field)?;
    if value < 0.0 {
        return Err(BillingError::invalid_service_input(
            field,
            format!("must be non-negative, got {value}"),
        ));
    }
    Ok(())
}

/// Monetary amount: finite, non-negative, within the supported magnitude
fn require_amount(value: f64, field: &str) -> BillingResult<()> {
    require_non_negative(value, field)?;
    if value > MAX_AMOUNT {
        return Err(BillingError::invalid_service_input(
            field,
            format!("exceeds maximum allowed ({MAX_AMOUNT}), got {value}"),
        ));
    }
    Ok(())
}

/// Validate one service's figures before submission
///
/// Mode matters: automatic mode checks the itemization against the sale
/// price, manual mode rejects card-interest figures since those are only
/// entered when the sale is itemized.
pub fn validate_service_input(
    input: &ServiceFinancialInput,
    mode: CalcMode,
) -> BillingResult<()> {
    require_amount(input.sale_price, "salePrice")?;
    require_amount(input.cost_price, "costPrice")?;
    require_amount(input.tax_21, "tax21")?;
    require_amount(input.tax_10_5, "tax105")?;
    require_amount(input.exempt, "exempt")?;
    require_amount(input.other_taxes, "otherTaxes")?;
    require_amount(input.card_interest, "cardInterest")?;
    require_amount(input.card_interest_vat, "cardInterestVat")?;

    require_finite(input.transfer_fee_pct, "transferFeePct")?;
    if !(0.0..=1.0).contains(&input.transfer_fee_pct) {
        return Err(BillingError::invalid_service_input(
            "transferFeePct",
            format!(
                "must be a proportion between 0 and 1, got {}",
                input.transfer_fee_pct
            ),
        ));
    }
    if let Some(fee) = input.transfer_fee_override {
        require_amount(fee, "transferFeeOverride")?;
    }

    match mode {
        CalcMode::Auto => {
            let itemized = to_decimal(input.tax_21)
                + to_decimal(input.tax_10_5)
                + to_decimal(input.exempt)
                + to_decimal(input.other_taxes);
            if itemized > to_decimal(input.sale_price) + MONEY_TOLERANCE {
                return Err(BillingError::invalid_service_input(
                    "salePrice",
                    format!(
                        "itemized slices ({itemized}) exceed the sale price ({})",
                        input.sale_price
                    ),
                ));
            }
        }
        CalcMode::Manual => {
            if input.card_interest != 0.0 || input.card_interest_vat != 0.0 {
                return Err(BillingError::invalid_service_input(
                    "cardInterest",
                    "card interest is only entered when the sale is itemized",
                ));
            }
        }
    }

    Ok(())
}
