//! Per-tranche metric pipeline.
//!
//! Runs the waterfall ordering and accumulation over a catalog, then
//! applies the coverage kernel to each tranche:
//! - Debt: sorted by maturity, duration from years-to-maturity
//! - Preferred: catalog order, continuing from the debt total, perpetual
//!   proxy duration, annual dividend obligation
//!
//! Stateless: every call is a pure function of catalog + assumptions.

use rust_decimal::Decimal;

use crate::coverage;
use crate::error::TreasuryError;
use crate::types::{
    Assumptions, DebtInstrument, DebtTrancheMetrics, PreferredInstrument, PreferredTrancheMetrics,
    Years,
};
use crate::waterfall;
use crate::TreasuryResult;

/// Compute per-tranche metrics for the debt stack, in waterfall order.
pub fn calculate_debt_metrics(
    instruments: &[DebtInstrument],
    assumptions: &Assumptions,
) -> TreasuryResult<Vec<DebtTrancheMetrics>> {
    validate_assumptions(assumptions)?;

    let ordered = waterfall::order_debt(instruments);
    let notionals: Vec<Decimal> = ordered.iter().map(|d| d.notional).collect();
    let cumulative = waterfall::accumulate(&notionals, Decimal::ZERO)?;

    let nav = coverage::nav(assumptions.btc_holdings, assumptions.btc_price);
    let treasury_value = coverage::treasury_value(nav, assumptions.cash_reserve);

    let metrics = ordered
        .into_iter()
        .zip(cumulative)
        .map(|(instrument, cumulative_notional)| {
            let duration = coverage::debt_duration(instrument.maturity_year, assumptions.current_year);
            let cov = coverage::coverage_ratio(treasury_value, cumulative_notional);
            let risk = coverage::btc_risk(assumptions.btc_volatility, duration);
            let credit = coverage::btc_credit(risk, cov);
            DebtTrancheMetrics {
                instrument,
                cumulative_notional,
                duration,
                coverage: cov,
                btc_risk: risk,
                btc_credit: credit,
            }
        })
        .collect();

    Ok(metrics)
}

/// Compute per-tranche metrics for the preferred stack.
///
/// Preferred keeps catalog order and continues the waterfall from
/// `starting_cumulative` (pass total debt notional when preferred sits
/// below debt). `perpetual_duration` overrides the 30-year proxy.
pub fn calculate_preferred_metrics(
    instruments: &[PreferredInstrument],
    assumptions: &Assumptions,
    starting_cumulative: Decimal,
    perpetual_duration: Option<Years>,
) -> TreasuryResult<Vec<PreferredTrancheMetrics>> {
    validate_assumptions(assumptions)?;

    let duration = perpetual_duration.unwrap_or(coverage::PERPETUAL_DURATION_YEARS);
    if duration <= Decimal::ZERO {
        return Err(TreasuryError::InvalidInput {
            field: "perpetual_duration".into(),
            reason: "Perpetual duration must be positive.".into(),
        });
    }

    for p in instruments {
        if p.dividend_rate < Decimal::ZERO {
            return Err(TreasuryError::InvalidInput {
                field: format!("preferred.{}.dividend_rate", p.ticker),
                reason: "Dividend rate cannot be negative.".into(),
            });
        }
    }

    let notionals: Vec<Decimal> = instruments.iter().map(|p| p.notional).collect();
    let cumulative = waterfall::accumulate(&notionals, starting_cumulative)?;

    let nav = coverage::nav(assumptions.btc_holdings, assumptions.btc_price);
    let treasury_value = coverage::treasury_value(nav, assumptions.cash_reserve);
    let risk = coverage::btc_risk(assumptions.btc_volatility, duration);

    let metrics = instruments
        .iter()
        .cloned()
        .zip(cumulative)
        .map(|(instrument, cumulative_notional)| {
            let annual_dividend = instrument.notional * instrument.dividend_rate;
            let cov = coverage::coverage_ratio(treasury_value, cumulative_notional);
            let credit = coverage::btc_credit(risk, cov);
            PreferredTrancheMetrics {
                instrument,
                cumulative_notional,
                annual_dividend,
                duration,
                coverage: cov,
                btc_risk: risk,
                btc_credit: credit,
            }
        })
        .collect();

    Ok(metrics)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub(crate) fn validate_assumptions(assumptions: &Assumptions) -> TreasuryResult<()> {
    if assumptions.btc_price <= Decimal::ZERO {
        return Err(TreasuryError::InvalidInput {
            field: "btc_price".into(),
            reason: "BTC price must be positive.".into(),
        });
    }
    if assumptions.btc_holdings < Decimal::ZERO {
        return Err(TreasuryError::InvalidInput {
            field: "btc_holdings".into(),
            reason: "BTC holdings cannot be negative.".into(),
        });
    }
    if assumptions.btc_volatility < Decimal::ZERO {
        return Err(TreasuryError::InvalidInput {
            field: "btc_volatility".into(),
            reason: "BTC volatility cannot be negative.".into(),
        });
    }
    if assumptions.cash_reserve < Decimal::ZERO {
        return Err(TreasuryError::InvalidInput {
            field: "cash_reserve".into(),
            reason: "Cash reserve cannot be negative.".into(),
        });
    }
    Ok(())
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

    fn assumptions_for_nav_50b() -> Assumptions {
        // 500,000 BTC at $100,000 = $50,000M NAV, no reserve.
        Assumptions {
            btc_price: dec!(100_000),
            btc_holdings: dec!(500_000),
            btc_volatility: dec!(0.60),
            btc_arr: dec!(0.20),
            cash_reserve: Decimal::ZERO,
            current_year: 2026,
        }
    }

    fn note(id: &str, maturity_year: i32, notional: Decimal) -> DebtInstrument {
        DebtInstrument {
            id: id.into(),
            name: id.into(),
            notional,
            maturity_year,
            coupon_rate: Decimal::ZERO,
            conversion_price: None,
        }
    }

    fn pref(ticker: &str, dividend_rate: Decimal, notional: Decimal) -> PreferredInstrument {
        PreferredInstrument {
            id: ticker.to_lowercase(),
            ticker: ticker.into(),
            name: ticker.into(),
            notional,
            dividend_rate,
            liquidation_preference: dec!(100),
            shares_outstanding: notional * dec!(10_000),
            market: None,
        }
    }

    #[test]
    fn test_debt_metrics_waterfall_cumulatives_and_coverage() {
        let debt = vec![
            note("a", 2028, dec!(1050)),
            note("b", 2029, dec!(1010)),
            note("c", 2030, dec!(800)),
        ];
        let out = calculate_debt_metrics(&debt, &assumptions_for_nav_50b()).unwrap();

        let cumulative: Vec<Decimal> = out.iter().map(|m| m.cumulative_notional).collect();
        assert_eq!(cumulative, vec![dec!(1050), dec!(2060), dec!(2860)]);

        assert!(approx_eq(out[0].coverage, dec!(47.6), dec!(0.1)));
        assert!(approx_eq(out[1].coverage, dec!(24.3), dec!(0.1)));
        assert!(approx_eq(out[2].coverage, dec!(17.5), dec!(0.1)));
    }

    #[test]
    fn test_debt_metrics_sorts_unsorted_catalog() {
        let debt = vec![
            note("c", 2030, dec!(800)),
            note("a", 2028, dec!(1050)),
            note("b", 2029, dec!(1010)),
        ];
        let out = calculate_debt_metrics(&debt, &assumptions_for_nav_50b()).unwrap();
        assert_eq!(out[0].instrument.id, "a");
        assert_eq!(out[0].cumulative_notional, dec!(1050));
        assert_eq!(out[2].cumulative_notional, dec!(2860));
    }

    #[test]
    fn test_debt_coverage_non_increasing_down_waterfall() {
        let debt = vec![
            note("a", 2028, dec!(1050)),
            note("b", 2029, dec!(1010)),
            note("c", 2030, dec!(800)),
        ];
        let out = calculate_debt_metrics(&debt, &assumptions_for_nav_50b()).unwrap();
        for pair in out.windows(2) {
            assert!(
                pair[1].coverage <= pair[0].coverage,
                "junior tranches cannot be better covered"
            );
        }
    }

    #[test]
    fn test_debt_duration_and_risk() {
        let debt = vec![note("a", 2030, dec!(100))];
        let out = calculate_debt_metrics(&debt, &assumptions_for_nav_50b()).unwrap();
        assert_eq!(out[0].duration, dec!(4));
        // risk = 0.60 * sqrt(4) = 1.20
        assert!(approx_eq(out[0].btc_risk, dec!(1.20), dec!(0.0001)));
    }

    #[test]
    fn test_preferred_metrics_continue_from_debt_total() {
        let preferred = vec![
            pref("STRF", dec!(0.10), dec!(584)),
            pref("STRK", dec!(0.08), dec!(563)),
        ];
        let out = calculate_preferred_metrics(
            &preferred,
            &assumptions_for_nav_50b(),
            dec!(2860),
            None,
        )
        .unwrap();

        let cumulative: Vec<Decimal> = out.iter().map(|m| m.cumulative_notional).collect();
        assert_eq!(cumulative, vec![dec!(3444), dec!(4007)]);

        assert_eq!(out[0].annual_dividend, dec!(58.4));
        assert!(approx_eq(out[1].annual_dividend, dec!(45.04), dec!(0.001)));
    }

    #[test]
    fn test_preferred_keeps_catalog_order() {
        // Deliberately not sorted by anything; order must be preserved.
        let preferred = vec![
            pref("STRC", dec!(0.1125), dec!(3379)),
            pref("STRF", dec!(0.10), dec!(1284)),
        ];
        let out =
            calculate_preferred_metrics(&preferred, &assumptions_for_nav_50b(), Decimal::ZERO, None)
                .unwrap();
        assert_eq!(out[0].instrument.ticker, "STRC");
        assert_eq!(out[1].instrument.ticker, "STRF");
    }

    #[test]
    fn test_preferred_uses_perpetual_duration() {
        let preferred = vec![pref("SATA", dec!(0.12), dec!(500))];
        let out =
            calculate_preferred_metrics(&preferred, &assumptions_for_nav_50b(), Decimal::ZERO, None)
                .unwrap();
        assert_eq!(out[0].duration, coverage::PERPETUAL_DURATION_YEARS);

        let out = calculate_preferred_metrics(
            &preferred,
            &assumptions_for_nav_50b(),
            Decimal::ZERO,
            Some(dec!(25)),
        )
        .unwrap();
        assert_eq!(out[0].duration, dec!(25));
    }

    #[test]
    fn test_preferred_without_quote_still_computes() {
        let preferred = vec![pref("STRD", dec!(0.10), dec!(1402))];
        let out =
            calculate_preferred_metrics(&preferred, &assumptions_for_nav_50b(), Decimal::ZERO, None)
                .unwrap();
        assert!(out[0].instrument.market.is_none());
        assert!(out[0].coverage > Decimal::ZERO);
    }

    #[test]
    fn test_zero_nav_zero_reserve_gives_zero_coverage() {
        let mut assumptions = assumptions_for_nav_50b();
        assumptions.btc_holdings = Decimal::ZERO;
        let debt = vec![note("a", 2028, dec!(1050))];
        let out = calculate_debt_metrics(&debt, &assumptions).unwrap();
        assert_eq!(out[0].coverage, Decimal::ZERO);
    }

    #[test]
    fn test_cash_reserve_counts_toward_coverage() {
        let mut assumptions = assumptions_for_nav_50b();
        assumptions.btc_holdings = Decimal::ZERO;
        assumptions.cash_reserve = dec!(2100);
        let debt = vec![note("a", 2028, dec!(1050))];
        let out = calculate_debt_metrics(&debt, &assumptions).unwrap();
        // 2,100M reserve over 1,050M notional = 2x
        assert_eq!(out[0].coverage, dec!(2));
    }

    #[test]
    fn test_empty_debt_catalog_is_valid() {
        let out = calculate_debt_metrics(&[], &assumptions_for_nav_50b()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_reject_negative_notional() {
        let debt = vec![note("a", 2028, dec!(-1))];
        assert!(calculate_debt_metrics(&debt, &assumptions_for_nav_50b()).is_err());
    }

    #[test]
    fn test_reject_non_positive_price() {
        let mut assumptions = assumptions_for_nav_50b();
        assumptions.btc_price = Decimal::ZERO;
        assert!(calculate_debt_metrics(&[], &assumptions).is_err());
    }

    #[test]
    fn test_reject_negative_holdings() {
        let mut assumptions = assumptions_for_nav_50b();
        assumptions.btc_holdings = dec!(-1);
        assert!(calculate_debt_metrics(&[], &assumptions).is_err());
    }

    #[test]
    fn test_reject_negative_volatility() {
        let mut assumptions = assumptions_for_nav_50b();
        assumptions.btc_volatility = dec!(-0.1);
        assert!(calculate_debt_metrics(&[], &assumptions).is_err());
    }

    #[test]
    fn test_reject_negative_dividend_rate() {
        let preferred = vec![pref("STRF", dec!(-0.10), dec!(584))];
        assert!(calculate_preferred_metrics(
            &preferred,
            &assumptions_for_nav_50b(),
            Decimal::ZERO,
            None
        )
        .is_err());
    }

    #[test]
    fn test_reject_non_positive_perpetual_duration() {
        let preferred = vec![pref("STRF", dec!(0.10), dec!(584))];
        assert!(calculate_preferred_metrics(
            &preferred,
            &assumptions_for_nav_50b(),
            Decimal::ZERO,
            Some(Decimal::ZERO)
        )
        .is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let debt = vec![note("a", 2028, dec!(1050))];
        let out = calculate_debt_metrics(&debt, &assumptions_for_nav_50b()).unwrap();
        let json = serde_json::to_string(&out).unwrap();
        let _: Vec<DebtTrancheMetrics> = serde_json::from_str(&json).unwrap();
    }
}
