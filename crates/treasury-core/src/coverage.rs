//! Coverage formula kernel.
//!
//! Pure functions shared by the tranche pipeline, the treasury rollup and
//! the sensitivity grid:
//! - NAV and treasury value (BTC value + cash reserve)
//! - Coverage ratio over cumulative notional
//! - Duration, volatility-scaled risk and the credit spread proxy
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Notional amounts are quoted in millions; treasury values in full units.
pub const MILLION: Decimal = dec!(1_000_000);

/// Floor on debt duration, to avoid blow-ups for near-maturity notes.
pub const MIN_DEBT_DURATION: Decimal = dec!(0.5);

/// Proxy duration for perpetual preferred stock (no maturity).
pub const PERPETUAL_DURATION_YEARS: Decimal = dec!(30);

// ---------------------------------------------------------------------------
// Formulas
// ---------------------------------------------------------------------------

/// NAV = holdings × price (full currency units).
pub fn nav(holdings: Decimal, price: Decimal) -> Decimal {
    holdings * price
}

/// Treasury value = NAV + cash reserve (reserve quoted in millions).
pub fn treasury_value(nav: Decimal, cash_reserve_millions: Decimal) -> Decimal {
    nav + cash_reserve_millions * MILLION
}

/// Coverage ratio = treasury value / cumulative notional.
///
/// Cumulative notional is in millions. Returns `Decimal::MAX` (the
/// unbounded sentinel) when cumulative notional is zero or negative:
/// nothing to cover means infinite coverage, not an error.
pub fn coverage_ratio(treasury_value: Decimal, cumulative_notional_millions: Decimal) -> Decimal {
    if cumulative_notional_millions <= Decimal::ZERO {
        return Decimal::MAX;
    }
    treasury_value / (cumulative_notional_millions * MILLION)
}

/// Years to maturity, floored at half a year.
pub fn debt_duration(maturity_year: i32, current_year: i32) -> Decimal {
    let duration = Decimal::from(maturity_year - current_year);
    duration.max(MIN_DEBT_DURATION)
}

/// BTC risk = volatility × sqrt(duration).
pub fn btc_risk(volatility: Decimal, duration: Decimal) -> Decimal {
    volatility * sqrt_decimal(duration)
}

/// Credit spread proxy, discounted by coverage.
///
/// At or below 1x the treasury does not cover the tranche and the full
/// risk applies. Above 1x the spread is `risk / coverage`: continuous at
/// the 1x boundary, shrinking toward zero as coverage grows but never
/// reaching it for finite coverage.
pub fn btc_credit(risk: Decimal, coverage: Decimal) -> Decimal {
    if coverage <= Decimal::ONE {
        return risk;
    }
    risk / coverage
}

/// Decimal square root, clamped at zero for non-positive input.
fn sqrt_decimal(value: Decimal) -> Decimal {
    if value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    value.sqrt().unwrap_or(Decimal::ZERO)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn approx_eq(a: Decimal, b: Decimal, eps: Decimal) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_nav_is_holdings_times_price() {
        assert_eq!(nav(dec!(550_000), dec!(100_000)), dec!(55_000_000_000));
    }

    #[test]
    fn test_treasury_value_adds_reserve_in_millions() {
        let tv = treasury_value(dec!(50_000_000_000), dec!(2_250));
        assert_eq!(tv, dec!(52_250_000_000));
    }

    #[test]
    fn test_coverage_ratio_basic() {
        // $50,000M treasury over 1,050M notional = 47.6x
        let cov = coverage_ratio(dec!(50_000_000_000), dec!(1050));
        assert!(
            approx_eq(cov, dec!(47.6), dec!(0.1)),
            "coverage {} should be ~47.6",
            cov
        );
    }

    #[test]
    fn test_coverage_unbounded_at_zero_notional() {
        assert_eq!(coverage_ratio(dec!(1_000_000), Decimal::ZERO), Decimal::MAX);
        assert_eq!(coverage_ratio(Decimal::ZERO, Decimal::ZERO), Decimal::MAX);
    }

    #[test]
    fn test_coverage_unbounded_at_negative_notional() {
        assert_eq!(coverage_ratio(dec!(1_000_000), dec!(-5)), Decimal::MAX);
    }

    #[test]
    fn test_coverage_zero_when_no_treasury() {
        assert_eq!(coverage_ratio(Decimal::ZERO, dec!(1000)), Decimal::ZERO);
    }

    #[test]
    fn test_coverage_strictly_decreases_with_notional() {
        let tv = dec!(10_000_000_000);
        let c1 = coverage_ratio(tv, dec!(500));
        let c2 = coverage_ratio(tv, dec!(1500));
        assert!(c1 > c2, "coverage must fall as obligations accumulate");
    }

    #[test]
    fn test_debt_duration_simple() {
        assert_eq!(debt_duration(2030, 2026), dec!(4));
    }

    #[test]
    fn test_debt_duration_floors_at_half_year() {
        assert_eq!(debt_duration(2026, 2026), dec!(0.5));
        assert_eq!(debt_duration(2024, 2026), dec!(0.5));
    }

    #[test]
    fn test_btc_risk_scales_with_sqrt_duration() {
        let risk = btc_risk(dec!(0.60), dec!(4));
        assert_eq!(risk, dec!(1.20));
    }

    #[test]
    fn test_btc_risk_zero_volatility() {
        assert_eq!(btc_risk(Decimal::ZERO, dec!(9)), Decimal::ZERO);
    }

    #[test]
    fn test_btc_credit_full_risk_at_or_below_par() {
        assert_eq!(btc_credit(dec!(0.9), dec!(0.5)), dec!(0.9));
        assert_eq!(btc_credit(dec!(0.9), Decimal::ONE), dec!(0.9));
    }

    #[test]
    fn test_btc_credit_continuous_at_par() {
        // Both branches agree at coverage = 1.
        let risk = dec!(1.2);
        let below = btc_credit(risk, Decimal::ONE);
        let above = btc_credit(risk, dec!(1.000001));
        assert!(
            approx_eq(below, above, dec!(0.0001)),
            "credit must be continuous at 1x: {} vs {}",
            below,
            above
        );
    }

    #[test]
    fn test_btc_credit_shrinks_with_coverage() {
        let risk = dec!(1.2);
        let c2 = btc_credit(risk, dec!(2));
        let c10 = btc_credit(risk, dec!(10));
        assert!(c2 > c10);
        assert!(c10 > Decimal::ZERO, "finite coverage never fully discharges risk");
    }

    #[test]
    fn test_btc_credit_vanishes_at_unbounded_coverage() {
        let credit = btc_credit(dec!(1.2), Decimal::MAX);
        assert!(
            credit < dec!(0.0000001),
            "credit {} should vanish for unbounded coverage",
            credit
        );
    }

    #[test]
    fn test_btc_credit_zero_risk() {
        assert_eq!(btc_credit(Decimal::ZERO, dec!(50)), Decimal::ZERO);
    }

    #[test]
    fn test_sqrt_decimal_non_positive() {
        assert_eq!(sqrt_decimal(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(sqrt_decimal(dec!(-4)), Decimal::ZERO);
    }
}
