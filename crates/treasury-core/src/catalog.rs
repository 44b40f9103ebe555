//! Built-in reference catalogs for the two covered issuers.
//!
//! Static security definitions: the convertible-note-and-preferred issuer
//! ("Strategy", MSTR) and the preferred-only issuer ("Strive", ASST).
//! Notionals and contractual rates come from the issuers' prospectuses;
//! they are modelling inputs, not live data — callers overlay market
//! quotes via [`crate::market`] and edit notionals with `with_notional`.

use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Assumptions, DebtInstrument, PreferredInstrument};

/// The six outstanding Strategy convertible notes.
pub fn strategy_debt() -> Vec<DebtInstrument> {
    vec![
        convert("convert-2028", "Convert 2028", dec!(1010), 2028, dec!(0.00625), dec!(183.19)),
        convert("convert-2030-b", "Convert 2030 B", dec!(2000), 2030, dec!(0.00625), dec!(433.43)),
        convert("convert-2029", "Convert 2029", dec!(3000), 2029, Decimal::ZERO, dec!(672.40)),
        convert("convert-2030-a", "Convert 2030 A", dec!(800), 2030, Decimal::ZERO, dec!(149.77)),
        convert("convert-2031", "Convert 2031", dec!(604), 2031, dec!(0.00875), dec!(142.38)),
        convert("convert-2032", "Convert 2032", dec!(800), 2032, dec!(0.0225), dec!(204.33)),
    ]
}

/// The four listed Strategy preferred series, in seniority order.
pub fn strategy_preferred() -> Vec<PreferredInstrument> {
    vec![
        preferred("STRF", "Strife Preferred", dec!(1284), dec!(0.10)),
        preferred("STRC", "Stretch Preferred", dec!(3379), dec!(0.1125)),
        preferred("STRK", "Strike Preferred", dec!(1402), dec!(0.08)),
        preferred("STRD", "Stride Preferred", dec!(1402), dec!(0.10)),
    ]
}

/// Strive's single preferred series; Strive carries no convertible debt.
pub fn strive_preferred() -> Vec<PreferredInstrument> {
    vec![preferred("SATA", "Strive Preferred A", dec!(500), dec!(0.12))]
}

/// Fallback assumptions for the Strategy entity when no live snapshot is
/// available.
pub fn default_assumptions() -> Assumptions {
    Assumptions {
        btc_price: dec!(97_000),
        btc_holdings: dec!(713_502),
        btc_volatility: dec!(0.60),
        btc_arr: dec!(0.20),
        cash_reserve: dec!(2_250),
        current_year: current_year(),
    }
}

/// Fallback assumptions for the Strive entity.
pub fn strive_default_assumptions() -> Assumptions {
    Assumptions {
        btc_holdings: dec!(50_000),
        cash_reserve: dec!(100),
        ..default_assumptions()
    }
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}

fn convert(
    id: &str,
    name: &str,
    notional: Decimal,
    maturity_year: i32,
    coupon_rate: Decimal,
    conversion_price: Decimal,
) -> DebtInstrument {
    DebtInstrument {
        id: id.into(),
        name: name.into(),
        notional,
        maturity_year,
        coupon_rate,
        conversion_price: Some(conversion_price),
    }
}

fn preferred(ticker: &str, name: &str, notional: Decimal, dividend_rate: Decimal) -> PreferredInstrument {
    // All series carry a $100 liquidation preference per share.
    let liquidation_preference = dec!(100);
    PreferredInstrument {
        id: ticker.to_lowercase(),
        ticker: ticker.into(),
        name: name.into(),
        notional,
        dividend_rate,
        liquidation_preference,
        shares_outstanding: notional * crate::coverage::MILLION / liquidation_preference,
        market: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_strategy_debt_totals() {
        let total: Decimal = strategy_debt().iter().map(|d| d.notional).sum();
        assert_eq!(total, dec!(8214));
    }

    #[test]
    fn test_strategy_preferred_totals() {
        let total: Decimal = strategy_preferred().iter().map(|p| p.notional).sum();
        assert_eq!(total, dec!(7467));
    }

    #[test]
    fn test_strive_has_single_preferred() {
        let catalog = strive_preferred();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].ticker, "SATA");
        assert_eq!(catalog[0].dividend_rate, dec!(0.12));
    }

    #[test]
    fn test_catalog_carries_no_market_overlay() {
        assert!(strategy_preferred().iter().all(|p| p.market.is_none()));
    }

    #[test]
    fn test_shares_consistent_with_liquidation_preference() {
        for p in strategy_preferred() {
            assert_eq!(
                p.shares_outstanding * p.liquidation_preference,
                p.notional * crate::coverage::MILLION
            );
        }
    }

    #[test]
    fn test_with_notional_does_not_mutate() {
        let catalog = strategy_debt();
        let edited = catalog[0].with_notional(dec!(1500));
        assert_eq!(edited.notional, dec!(1500));
        assert_eq!(catalog[0].notional, dec!(1010));
        assert_eq!(edited.id, catalog[0].id);
    }

    #[test]
    fn test_default_assumptions_sane() {
        let a = default_assumptions();
        assert!(a.btc_price > Decimal::ZERO);
        assert!(a.btc_holdings > Decimal::ZERO);
        assert!(a.current_year >= 2026);
    }
}
