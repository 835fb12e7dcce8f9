//! Per-service and per-booking computation pipelines
//!
//! Composes the calculators the way the booking flow consumes them:
//! breakdown, then adjustments, then net commission per service, then the
//! per-currency summary for the whole booking. Each run works from one
//! configuration snapshot; a staler snapshot racing a newer one is the
//! caller's scheduling problem, the engine just computes what it is
//! handed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use shared::error::BillingResult;
use shared::models::{
    AdjustmentTotals, CalcConfig, CurrencySummary, ServiceBreakdown, ServiceFinancialInput,
};

use crate::adjustments::{evaluate_adjustments, evaluate_adjustments_service_side};
use crate::breakdown::compute_breakdown;
use crate::commission::resolve_net_commission;
use crate::summary::{normalize_currency, summarize_booking_sale, summarize_by_currency};

/// Everything the engine derives for one service
///
/// A complete snapshot: recomputation replaces the whole value, stored
/// results are never patched field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceComputation {
    /// Normalized currency code the service aggregates under
    pub currency: String,
    pub sale_price: f64,
    pub cost_price: f64,
    pub breakdown: ServiceBreakdown,
    pub adjustments: AdjustmentTotals,
    /// `None` when there was no commission to net against
    pub net_commission: Option<f64>,
}

/// Result of computing a whole booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingComputation {
    /// Per-service results, in input order
    pub services: Vec<ServiceComputation>,
    /// One summary per currency observed
    pub by_currency: BTreeMap<String, CurrencySummary>,
}

/// Run the per-service stages under one configuration snapshot
pub fn compute_service(
    input: &ServiceFinancialInput,
    config: &CalcConfig,
) -> ServiceComputation {
    let breakdown = compute_breakdown(input, config.mode);

    // Booking-level pricing defers sale-dependent rules to the aggregation
    // pass; everything else evaluates against this service's figures
    let adjustments = if config.use_booking_sale_total {
        evaluate_adjustments_service_side(&config.adjustments, input.cost_price)
    } else {
        evaluate_adjustments(&config.adjustments, input.sale_price, input.cost_price)
    };

    let net_commission = resolve_net_commission(&breakdown, &adjustments);

    ServiceComputation {
        currency: normalize_currency(&input.currency_code, &config.fallback_currency),
        sale_price: input.sale_price,
        cost_price: input.cost_price,
        breakdown,
        adjustments,
        net_commission,
    }
}

/// Compute every service and fold the per-currency booking summary
///
/// `booking_sale_totals` carries the per-currency sale figures and is only
/// consulted when the configuration prices the booking as a whole; passing
/// `None` in that mode reports every observed currency as missing.
pub fn compute_booking(
    inputs: &[ServiceFinancialInput],
    config: &CalcConfig,
    booking_sale_totals: Option<&BTreeMap<String, f64>>,
) -> BillingResult<BookingComputation> {
    let services: Vec<ServiceComputation> = inputs
        .iter()
        .map(|input| compute_service(input, config))
        .collect();

    let by_currency = if config.use_booking_sale_total {
        let empty = BTreeMap::new();
        let sale_totals = booking_sale_totals.unwrap_or(&empty);
        summarize_booking_sale(&services, sale_totals, config)?
    } else {
        summarize_by_currency(&services, &config.fallback_currency)
    };

    tracing::debug!(
        services = services.len(),
        currencies = by_currency.len(),
        mode = ?config.mode,
        booking_level = config.use_booking_sale_total,
        "booking computation complete"
    );

    Ok(BookingComputation {
        services,
        by_currency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use shared::models::{AdjustmentBasis, AdjustmentConfig, AdjustmentKind, AdjustmentValueType};

    fn service(currency: &str, sale: f64, cost: f64) -> ServiceFinancialInput {
        ServiceFinancialInput {
            sale_price: sale,
            cost_price: cost,
            currency_code: currency.to_string(),
            transfer_fee_pct: 0.024,
            ..ServiceFinancialInput::default()
        }
    }

    fn percent_rule(kind: AdjustmentKind, basis: AdjustmentBasis, value: f64) -> AdjustmentConfig {
        AdjustmentConfig {
            id: format!("{kind:?}-{basis:?}"),
            label: "rule".to_string(),
            kind,
            basis,
            value_type: AdjustmentValueType::Percent,
            value,
            active: true,
        }
    }

    #[test]
    fn test_compute_service_chains_the_stages() {
        let config = CalcConfig {
            adjustments: vec![percent_rule(
                AdjustmentKind::Cost,
                AdjustmentBasis::Margin,
                0.10,
            )],
            ..CalcConfig::default()
        };
        // Uncategorized sale: margin stays exempt
        let result = compute_service(&service("ARS", 100_000.0, 60_000.0), &config);

        assert_eq!(result.currency, "ARS");
        assert_eq!(result.breakdown.commission_exempt, 40_000.0);
        assert_eq!(result.adjustments.total_costs, 4_000.0);
        // 40,000 gross - 2,400 fee - 4,000 adjustments
        assert_eq!(result.net_commission, Some(33_600.0));
    }

    #[test]
    fn test_compute_service_normalizes_currency() {
        let config = CalcConfig::default();
        let result = compute_service(&service("  usd ", 1_000.0, 800.0), &config);
        assert_eq!(result.currency, "USD");

        let blank = compute_service(&service("", 1_000.0, 800.0), &config);
        assert_eq!(blank.currency, "ARS");
    }

    #[test]
    fn test_compute_booking_groups_by_currency() {
        let config = CalcConfig::default();
        let inputs = vec![
            service("ARS", 100_000.0, 80_000.0),
            service("USD", 1_000.0, 800.0),
            service("ARS", 50_000.0, 40_000.0),
        ];
        let booking = compute_booking(&inputs, &config, None).unwrap();

        assert_eq!(booking.services.len(), 3);
        assert_eq!(booking.by_currency.len(), 2);
        assert_eq!(booking.by_currency["ARS"].service_count, 2);
        assert_eq!(booking.by_currency["ARS"].sale_total, 150_000.0);
        assert_eq!(booking.by_currency["USD"].sale_total, 1_000.0);
    }

    #[test]
    fn test_booking_mode_without_figures_reports_all_currencies() {
        let config = CalcConfig {
            use_booking_sale_total: true,
            ..CalcConfig::default()
        };
        let inputs = vec![
            service("ARS", 0.0, 80_000.0),
            service("USD", 0.0, 800.0),
        ];
        let err = compute_booking(&inputs, &config, None).unwrap_err();
        assert_eq!(
            err,
            shared::error::BillingError::MissingBookingSaleTotal {
                currencies: vec!["ARS".to_string(), "USD".to_string()],
            }
        );
    }

    #[test]
    fn test_booking_mode_defers_sale_rules_to_booking_pass() {
        let config = CalcConfig {
            use_booking_sale_total: true,
            adjustments: vec![
                percent_rule(AdjustmentKind::Tax, AdjustmentBasis::Sale, 0.035),
                percent_rule(AdjustmentKind::Cost, AdjustmentBasis::Cost, 0.01),
            ],
            ..CalcConfig::default()
        };
        let inputs = vec![
            service("ARS", 0.0, 80_000.0),
            service("ARS", 0.0, 40_000.0),
        ];
        let mut booking_sales = BTreeMap::new();
        booking_sales.insert("ARS".to_string(), 200_000.0);

        let booking = compute_booking(&inputs, &config, Some(&booking_sales)).unwrap();

        // Cost-based rule evaluated per service
        assert_eq!(booking.services[0].adjustments.total_costs, 800.0);
        assert_eq!(booking.services[1].adjustments.total_costs, 400.0);
        assert!(booking.services[0].adjustments.items.iter().all(|i| i.id != "Tax-Sale"));

        // Sale-based rule evaluated once on the booking figure
        let ars = &booking.by_currency["ARS"];
        assert_eq!(ars.adjustment_taxes, 7_000.0);
        assert_eq!(ars.adjustment_costs, 1_200.0);
        assert_eq!(ars.adjustment_total, 8_200.0);
        assert_eq!(ars.sale_total, 200_000.0);
        assert_eq!(ars.transfer_fees_amount, 4_800.0);
    }

    #[test]
    fn test_computation_serde_roundtrip() {
        let config = CalcConfig::default();
        let inputs = vec![service("ARS", 121_000.0, 96_800.0)];
        let booking = compute_booking(&inputs, &config, None).unwrap();

        let json = serde_json::to_string(&booking).unwrap();
        let back: BookingComputation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, booking);
    }
}
