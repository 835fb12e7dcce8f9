//! Adjustment evaluator
//!
//! Evaluates the agency's configured extra cost/tax rules against one
//! service's sale and cost figures. Rules are read in configuration
//! order; inactive rules are skipped entirely. Amounts accumulate into
//! separate cost and tax running totals by rule kind.

use rust_decimal::prelude::*;

use shared::models::{
    AdjustmentBasis, AdjustmentComputed, AdjustmentConfig, AdjustmentKind, AdjustmentTotals,
    AdjustmentValueType,
};

use crate::money::{to_decimal, to_f64};

/// The figure a rule's basis selects
fn basis_amount(basis: AdjustmentBasis, sale: Decimal, cost: Decimal) -> Decimal {
    match basis {
        AdjustmentBasis::Sale => sale,
        AdjustmentBasis::Cost => cost,
        AdjustmentBasis::Margin => (sale - cost).max(Decimal::ZERO),
    }
}

/// Amount a single rule derives from the given figures
fn rule_amount(rule: &AdjustmentConfig, sale: Decimal, cost: Decimal) -> Decimal {
    let value = to_decimal(rule.value);
    match rule.value_type {
        AdjustmentValueType::Percent => basis_amount(rule.basis, sale, cost) * value,
        // Fixed amounts ignore the basis; it stays as display context
        AdjustmentValueType::Fixed => value,
    }
}

/// Percent rules against sale or margin need a sale figure to evaluate
fn needs_sale_figure(rule: &AdjustmentConfig) -> bool {
    rule.value_type == AdjustmentValueType::Percent
        && matches!(rule.basis, AdjustmentBasis::Sale | AdjustmentBasis::Margin)
}

fn evaluate_filtered<F>(
    rules: &[AdjustmentConfig],
    sale: f64,
    cost: f64,
    keep: F,
) -> AdjustmentTotals
where
    F: Fn(&AdjustmentConfig) -> bool,
{
    let sale = to_decimal(sale);
    let cost = to_decimal(cost);

    let mut items = Vec::new();
    let mut total_costs = Decimal::ZERO;
    let mut total_taxes = Decimal::ZERO;

    for rule in rules {
        if !rule.active || !keep(rule) {
            continue;
        }
        let amount = rule_amount(rule, sale, cost);
        match rule.kind {
            AdjustmentKind::Cost => total_costs += amount,
            AdjustmentKind::Tax => total_taxes += amount,
        }
        items.push(AdjustmentComputed::from_config(rule, to_f64(amount)));
    }

    AdjustmentTotals {
        items,
        total_costs: to_f64(total_costs),
        total_taxes: to_f64(total_taxes),
        total: to_f64(total_costs + total_taxes),
    }
}

/// Evaluate every active rule against one service's figures
///
/// Pure function: identical rule lists and figures yield identical item
/// order and amounts.
pub fn evaluate_adjustments(
    rules: &[AdjustmentConfig],
    sale_price: f64,
    cost_price: f64,
) -> AdjustmentTotals {
    evaluate_filtered(rules, sale_price, cost_price, |_| true)
}

/// Per-service evaluation when the booking is priced as a whole
///
/// No per-service sale exists in that mode, so percent rules against sale
/// or margin are deferred to the booking-level pass; everything else
/// (cost-based and fixed rules) still evaluates per service.
pub fn evaluate_adjustments_service_side(
    rules: &[AdjustmentConfig],
    cost_price: f64,
) -> AdjustmentTotals {
    evaluate_filtered(rules, 0.0, cost_price, |rule| !needs_sale_figure(rule))
}

/// Booking-level pass when the booking is priced as a whole
///
/// Evaluates exactly the rules the per-service pass deferred, once per
/// currency, against the booking-level sale figure and the currency's
/// summed cost.
pub fn evaluate_adjustments_booking_side(
    rules: &[AdjustmentConfig],
    booking_sale: f64,
    cost_sum: f64,
) -> AdjustmentTotals {
    evaluate_filtered(rules, booking_sale, cost_sum, needs_sale_figure)
}
