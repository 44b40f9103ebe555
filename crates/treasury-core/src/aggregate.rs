//! Entity-level treasury rollup.
//!
//! Folds per-tranche debt and preferred metrics into a single summary:
//! total obligations, debt-only and total coverage, years of dividend
//! coverage, notional-weighted average duration, and the breakeven BTC
//! appreciation rate.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coverage;
use crate::tranche::validate_assumptions;
use crate::types::{Assumptions, DebtTrancheMetrics, Money, PreferredTrancheMetrics, TreasuryMetrics};
use crate::TreasuryResult;

/// Explicit user adjustments layered on top of the catalog totals.
///
/// Stored as deltas per class rather than back-computed from an edited
/// total, so repeated edits cannot accumulate precision drift. A negative
/// delta may push an effective total below zero; the rollup clamps it to
/// zero for reporting and raises `adjustment_clamped`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassAdjustments {
    /// Additional debt notional, in millions. May be negative.
    pub additional_debt: Money,
    /// Additional preferred notional, in millions. May be negative.
    pub additional_preferred: Money,
}

/// Roll per-tranche metrics up into entity-level treasury metrics.
pub fn calculate_treasury_metrics(
    debt_metrics: &[DebtTrancheMetrics],
    preferred_metrics: &[PreferredTrancheMetrics],
    assumptions: &Assumptions,
    adjustments: &ClassAdjustments,
) -> TreasuryResult<TreasuryMetrics> {
    validate_assumptions(assumptions)?;

    let nav = coverage::nav(assumptions.btc_holdings, assumptions.btc_price);
    let treasury_value = coverage::treasury_value(nav, assumptions.cash_reserve);

    let catalog_debt: Decimal = debt_metrics.iter().map(|m| m.instrument.notional).sum();
    let catalog_preferred: Decimal = preferred_metrics
        .iter()
        .map(|m| m.instrument.notional)
        .sum();

    let (total_debt_m, debt_clamped) =
        clamp_non_negative(catalog_debt + adjustments.additional_debt);
    let (total_preferred_m, preferred_clamped) =
        clamp_non_negative(catalog_preferred + adjustments.additional_preferred);
    let total_obligations_m = total_debt_m + total_preferred_m;

    let debt_coverage = coverage::coverage_ratio(treasury_value, total_debt_m);
    let total_coverage = coverage::coverage_ratio(treasury_value, total_obligations_m);

    let annual_dividends: Decimal = preferred_metrics.iter().map(|m| m.annual_dividend).sum();
    let btc_years_of_dividends = if annual_dividends > Decimal::ZERO {
        treasury_value / (annual_dividends * coverage::MILLION)
    } else {
        Decimal::MAX
    };

    // Duration weighting uses catalog notionals only; an adjustment delta
    // carries no maturity.
    let weighted_duration: Decimal = debt_metrics
        .iter()
        .map(|m| m.instrument.notional * m.duration)
        .chain(
            preferred_metrics
                .iter()
                .map(|m| m.instrument.notional * m.duration),
        )
        .sum();
    let catalog_obligations = catalog_debt + catalog_preferred;
    let avg_duration = if catalog_obligations > Decimal::ZERO {
        weighted_duration / catalog_obligations
    } else {
        Decimal::ZERO
    };

    let btc_breakeven_arr = if treasury_value > Decimal::ZERO && avg_duration > Decimal::ZERO {
        (total_obligations_m * coverage::MILLION) / treasury_value / avg_duration
    } else {
        Decimal::ZERO
    };

    Ok(TreasuryMetrics {
        nav,
        treasury_value,
        total_debt: total_debt_m * coverage::MILLION,
        total_preferred: total_preferred_m * coverage::MILLION,
        total_obligations: total_obligations_m * coverage::MILLION,
        debt_coverage,
        total_coverage,
        btc_years_of_dividends,
        avg_duration,
        btc_breakeven_arr,
        adjustment_clamped: debt_clamped || preferred_clamped,
    })
}

fn clamp_non_negative(value: Decimal) -> (Decimal, bool) {
    if value < Decimal::ZERO {
        (Decimal::ZERO, true)
    } else {
        (value, false)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
