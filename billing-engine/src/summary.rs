//! Cross-service aggregation
//!
//! Folds per-service computations into one summary per currency. Amounts
//! in different currencies are never combined or converted; the result is
//! keyed by normalized currency code, one entry per code observed.

use std::collections::BTreeMap;

use rust_decimal::prelude::*;

use shared::error::{BillingError, BillingResult};
use shared::models::{CalcConfig, CurrencySummary};

use crate::adjustments::evaluate_adjustments_booking_side;
use crate::money::{to_decimal, to_f64};
use crate::pipeline::ServiceComputation;

/// Normalize a currency code for grouping
///
/// Blank codes fall back to the configured default: an unpriced currency
/// is a data-entry gap, and showing the figure under the agency currency
/// beats refusing to display anything.
pub fn normalize_currency(code: &str, fallback: &str) -> String {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        tracing::warn!(fallback, "service without currency code, using fallback");
        // The fallback is agency data too; it gets the same normalization
        return fallback.trim().to_uppercase();
    }
    trimmed.to_uppercase()
}

/// Running Decimal sums for one currency group
#[derive(Default)]
struct SummaryBuilder {
    service_count: usize,
    sale_total: Decimal,
    cost_total: Decimal,
    taxable_card_interest: Decimal,
    vat_on_card_interest: Decimal,
    non_computable_amount: Decimal,
    taxable_base_21: Decimal,
    taxable_base_10_5: Decimal,
    commission_exempt: Decimal,
    commission_21: Decimal,
    commission_10_5: Decimal,
    vat_on_commission_21: Decimal,
    vat_on_commission_10_5: Decimal,
    total_commission_without_vat: Decimal,
    total_vat_impact: Decimal,
    adjustment_costs: Decimal,
    adjustment_taxes: Decimal,
    adjustment_total: Decimal,
    transfer_fees_amount: Decimal,
}

impl SummaryBuilder {
    /// Fold a service's breakdown and adjustment figures into the sums
    ///
    /// Sale total and transfer fees are handled by the caller; they follow
    /// the pricing mode instead of being plain per-service sums.
    fn add_service(&mut self, service: &ServiceComputation) {
        self.service_count += 1;
        self.cost_total += to_decimal(service.cost_price);

        let breakdown = &service.breakdown;
        self.taxable_card_interest += to_decimal(breakdown.taxable_card_interest);
        self.vat_on_card_interest += to_decimal(breakdown.vat_on_card_interest);
        self.non_computable_amount += to_decimal(breakdown.non_computable_amount);
        self.taxable_base_21 += to_decimal(breakdown.taxable_base_21);
        self.taxable_base_10_5 += to_decimal(breakdown.taxable_base_10_5);
        self.commission_exempt += to_decimal(breakdown.commission_exempt);
        self.commission_21 += to_decimal(breakdown.commission_21);
        self.commission_10_5 += to_decimal(breakdown.commission_10_5);
        self.vat_on_commission_21 += to_decimal(breakdown.vat_on_commission_21);
        self.vat_on_commission_10_5 += to_decimal(breakdown.vat_on_commission_10_5);
        self.total_commission_without_vat += to_decimal(breakdown.total_commission_without_vat);
        self.total_vat_impact += to_decimal(breakdown.total_vat_impact);

        let adjustments = &service.adjustments;
        self.adjustment_costs += to_decimal(adjustments.total_costs);
        self.adjustment_taxes += to_decimal(adjustments.total_taxes);
        self.adjustment_total += to_decimal(adjustments.total);
    }

    fn build(&self) -> CurrencySummary {
        CurrencySummary {
            service_count: self.service_count,
            sale_total: to_f64(self.sale_total),
            cost_total: to_f64(self.cost_total),
            taxable_card_interest: to_f64(self.taxable_card_interest),
            vat_on_card_interest: to_f64(self.vat_on_card_interest),
            non_computable_amount: to_f64(self.non_computable_amount),
            taxable_base_21: to_f64(self.taxable_base_21),
            taxable_base_10_5: to_f64(self.taxable_base_10_5),
            commission_exempt: to_f64(self.commission_exempt),
            commission_21: to_f64(self.commission_21),
            commission_10_5: to_f64(self.commission_10_5),
            vat_on_commission_21: to_f64(self.vat_on_commission_21),
            vat_on_commission_10_5: to_f64(self.vat_on_commission_10_5),
            total_commission_without_vat: to_f64(self.total_commission_without_vat),
            total_vat_impact: to_f64(self.total_vat_impact),
            adjustment_costs: to_f64(self.adjustment_costs),
            adjustment_taxes: to_f64(self.adjustment_taxes),
            adjustment_total: to_f64(self.adjustment_total),
            transfer_fees_amount: to_f64(self.transfer_fees_amount),
        }
    }
}

/// Aggregate per-service computations, one summary per currency
///
/// Sale totals and transfer fees are plain sums of the per-service figures.
pub fn summarize_by_currency(
    services: &[ServiceComputation],
    fallback_currency: &str,
) -> BTreeMap<String, CurrencySummary> {
    let mut groups: BTreeMap<String, SummaryBuilder> = BTreeMap::new();

    for service in services {
        let key = normalize_currency(&service.currency, fallback_currency);
        let builder = groups.entry(key).or_default();
        builder.add_service(service);
        builder.sale_total += to_decimal(service.sale_price);
        builder.transfer_fees_amount += to_decimal(service.breakdown.transfer_fee_amount);
    }

    let summaries: BTreeMap<String, CurrencySummary> = groups
        .into_iter()
        .map(|(code, builder)| (code, builder.build()))
        .collect();

    tracing::debug!(
        services = services.len(),
        currencies = summaries.len(),
        "aggregated booking summary"
    );
    summaries
}

/// Aggregate when the booking is priced as a whole
///
/// The caller supplies one sale figure per currency; per-service sale sums
/// do not exist in this mode. The transfer fee is recomputed on the
/// booking figure with the agency percentage, and the adjustment rules the
/// per-service pass deferred are evaluated here, once per currency.
///
/// Every currency observed in the services must have a sale figure;
/// missing ones are collected into a single validation error rather than
/// silently treated as zero revenue.
pub fn summarize_booking_sale(
    services: &[ServiceComputation],
    booking_sale_totals: &BTreeMap<String, f64>,
    config: &CalcConfig,
) -> BillingResult<BTreeMap<String, CurrencySummary>> {
    // The caller's keys get the same normalization as service codes
    let sale_totals: BTreeMap<String, f64> = booking_sale_totals
        .iter()
        .map(|(code, amount)| {
            (
                normalize_currency(code, &config.fallback_currency),
                *amount,
            )
        })
        .collect();

    let mut groups: BTreeMap<String, SummaryBuilder> = BTreeMap::new();
    for service in services {
        let key = normalize_currency(&service.currency, &config.fallback_currency);
        groups.entry(key).or_default().add_service(service);
    }

    let mut missing = Vec::new();
    let mut summaries = BTreeMap::new();

    for (code, mut builder) in groups {
        let booking_sale = match sale_totals.get(&code) {
            Some(amount) => *amount,
            None => {
                missing.push(code);
                continue;
            }
        };

        let booking_adjustments = evaluate_adjustments_booking_side(
            &config.adjustments,
            booking_sale,
            to_f64(builder.cost_total),
        );
        builder.adjustment_costs += to_decimal(booking_adjustments.total_costs);
        builder.adjustment_taxes += to_decimal(booking_adjustments.total_taxes);
        builder.adjustment_total += to_decimal(booking_adjustments.total);

        builder.sale_total = to_decimal(booking_sale);
        builder.transfer_fees_amount =
            to_decimal(booking_sale) * to_decimal(config.transfer_fee_pct);

        summaries.insert(code, builder.build());
    }

    if !missing.is_empty() {
        return Err(BillingError::MissingBookingSaleTotal {
            currencies: missing,
        });
    }

    tracing::debug!(
        services = services.len(),
        currencies = summaries.len(),
        "aggregated booking summary from booking-level sale figures"
    );
    Ok(summaries)
}
