//! Service breakdown calculator
//!
//! Decomposes one service's sale into VAT-bracket bases and extracts the
//! agency commission per bracket. Automatic mode works from the user's
//! itemized categorization of the sale; manual mode collapses everything
//! into a single aggregate tax figure and leaves the margin exempt.
//!
//! The calculator is pure: it computes with the figures it is given and
//! never rejects them. Input consistency is the caller's concern, checked
//! at form-submission time (see [`crate::validate`]).

use rust_decimal::prelude::*;

use shared::models::{CalcMode, ServiceBreakdown, ServiceFinancialInput};

use crate::money::{round_amount, to_decimal, to_f64};

/// Standard VAT rate (21%)
pub const VAT_STANDARD: Decimal = Decimal::from_parts(21, 0, 0, false, 2);

/// Reduced VAT rate (10.5%)
pub const VAT_REDUCED: Decimal = Decimal::from_parts(105, 0, 0, false, 3);

/// Net base contained in a VAT-inclusive amount
#[inline]
fn base_of(amount: Decimal, rate: Decimal) -> Decimal {
    amount / (Decimal::ONE + rate)
}

/// Bank-transfer fee for a service; an explicit override wins over the
/// percentage
fn transfer_fee(input: &ServiceFinancialInput, sale: Decimal) -> Decimal {
    match input.transfer_fee_override {
        Some(explicit) => to_decimal(explicit),
        None => sale * to_decimal(input.transfer_fee_pct),
    }
}

/// Compute the tax/commission breakdown for one service
///
/// Returns a complete value; callers replace any previously stored
/// breakdown rather than merging fields. Switching modes changes how the
/// margin is attributed to brackets, never the margin itself.
pub fn compute_breakdown(input: &ServiceFinancialInput, mode: CalcMode) -> ServiceBreakdown {
    match mode {
        CalcMode::Auto => compute_auto(input),
        CalcMode::Manual => compute_manual(input),
    }
}

/// Automatic mode: itemized VAT-bracket decomposition
fn compute_auto(input: &ServiceFinancialInput) -> ServiceBreakdown {
    let sale = to_decimal(input.sale_price);
    let cost = to_decimal(input.cost_price);
    let slice_21 = to_decimal(input.tax_21);
    let slice_10_5 = to_decimal(input.tax_10_5);
    let exempt = to_decimal(input.exempt);

    // Net bases inside the VAT-inclusive slices, rounded to the exported
    // precision so the residual below reconciles against the sale exactly
    let base_21 = round_amount(base_of(slice_21, VAT_STANDARD));
    let base_10_5 = round_amount(base_of(slice_10_5, VAT_REDUCED));

    // Whatever the bases and the exempt slice do not cover: contained VAT,
    // other taxes, uncategorized remainder. Clamped so over-itemized input
    // cannot drive it negative.
    let non_computable = (sale - base_21 - base_10_5 - exempt).max(Decimal::ZERO);

    // Gross margin, attributed to brackets pro rata to the categorization
    let margin = (sale - cost).max(Decimal::ZERO);
    let weights = slice_21 + slice_10_5 + exempt;
    // Each ratio is at most one, so a bracket share never exceeds the
    // margin itself
    let (margin_21, margin_10_5, margin_exempt) = if weights > Decimal::ZERO {
        (
            margin * (slice_21 / weights),
            margin * (slice_10_5 / weights),
            margin * (exempt / weights),
        )
    } else {
        // Uncategorized sale: the whole margin stays exempt
        (Decimal::ZERO, Decimal::ZERO, margin)
    };

    // Bracket margin shares are VAT-inclusive; the commission is the net
    // part, the rest is VAT the agency must remit
    let commission_21 = base_of(margin_21, VAT_STANDARD);
    let vat_on_commission_21 = margin_21 - commission_21;
    let commission_10_5 = base_of(margin_10_5, VAT_REDUCED);
    let vat_on_commission_10_5 = margin_10_5 - commission_10_5;

    // Card surcharge is charged on top of the sale and passed through; it
    // never contributes commission
    let card_interest = to_decimal(input.card_interest);
    let card_interest_vat = to_decimal(input.card_interest_vat);

    ServiceBreakdown {
        taxable_card_interest: to_f64(card_interest),
        vat_on_card_interest: to_f64(card_interest_vat),
        non_computable_amount: to_f64(non_computable),
        taxable_base_21: to_f64(base_21),
        taxable_base_10_5: to_f64(base_10_5),
        commission_exempt: to_f64(margin_exempt),
        commission_21: to_f64(commission_21),
        commission_10_5: to_f64(commission_10_5),
        vat_on_commission_21: to_f64(vat_on_commission_21),
        vat_on_commission_10_5: to_f64(vat_on_commission_10_5),
        total_commission_without_vat: to_f64(margin_exempt + commission_21 + commission_10_5),
        total_vat_impact: to_f64(vat_on_commission_21 + vat_on_commission_10_5 + card_interest_vat),
        transfer_fee_amount: to_f64(transfer_fee(input, sale)),
    }
}

/// Manual mode: no bracket decomposition, the margin stays exempt
fn compute_manual(input: &ServiceFinancialInput) -> ServiceBreakdown {
    let sale = to_decimal(input.sale_price);
    let cost = to_decimal(input.cost_price);
    let margin = (sale - cost).max(Decimal::ZERO);

    ServiceBreakdown {
        non_computable_amount: to_f64(to_decimal(input.other_taxes)),
        commission_exempt: to_f64(margin),
        total_commission_without_vat: to_f64(margin),
        transfer_fee_amount: to_f64(transfer_fee(input, sale)),
        ..ServiceBreakdown::default()
    }
}
