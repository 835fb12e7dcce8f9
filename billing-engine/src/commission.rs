//! Net commission resolver
//!
//! The agency's net take for one service: gross commission minus the
//! bank-transfer fee minus the adjustment total, floored at zero.

use rust_decimal::prelude::*;

use shared::models::{AdjustmentTotals, ServiceBreakdown};

use crate::money::{to_decimal, to_f64};

/// Resolve the net commission for one service
///
/// Returns `None` when there is no commission to net against, so display
/// code can distinguish "nothing earned" from an earned figure that
/// deductions consumed. A positive gross never resolves below zero.
pub fn resolve_net_commission(
    breakdown: &ServiceBreakdown,
    adjustments: &AdjustmentTotals,
) -> Option<f64> {
    let gross = to_decimal(breakdown.total_commission_without_vat);
    if gross <= Decimal::ZERO {
        return None;
    }

    let net = gross - to_decimal(breakdown.transfer_fee_amount) - to_decimal(adjustments.total);
    Some(to_f64(net.max(Decimal::ZERO)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(gross: f64, fee: f64) -> ServiceBreakdown {
        ServiceBreakdown {
            total_commission_without_vat: gross,
            transfer_fee_amount: fee,
            ..ServiceBreakdown::default()
        }
    }

    fn adjustments(total: f64) -> AdjustmentTotals {
        AdjustmentTotals {
            items: Vec::new(),
            total_costs: total,
            total_taxes: 0.0,
            total,
        }
    }

    #[test]
    fn test_net_deducts_fee_and_adjustments() {
        let net = resolve_net_commission(&breakdown(20_000.0, 1_200.0), &adjustments(4_000.0));
        assert_eq!(net, Some(14_800.0));
    }

    #[test]
    fn test_floors_at_zero_when_deductions_exceed_gross() {
        // Gross 1,000 against a 1,200 fee resolves to 0, never -200
        let net = resolve_net_commission(&breakdown(1_000.0, 1_200.0), &adjustments(0.0));
        assert_eq!(net, Some(0.0));
    }

    #[test]
    fn test_none_when_no_commission() {
        assert_eq!(
            resolve_net_commission(&breakdown(0.0, 500.0), &adjustments(100.0)),
            None
        );
        assert_eq!(
            resolve_net_commission(&breakdown(-50.0, 0.0), &adjustments(0.0)),
            None
        );
    }

    #[test]
    fn test_zero_deductions_pass_gross_through() {
        let net = resolve_net_commission(&breakdown(7_000.0, 0.0), &adjustments(0.0));
        assert_eq!(net, Some(7_000.0));
    }
}
