use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// A convertible note or other debt security.
///
/// Notional is in millions of currency units. Reference data: editing a
/// notional produces a new value via [`DebtInstrument::with_notional`],
/// never an in-place mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtInstrument {
    /// Stable identifier (e.g. "convert-2028").
    pub id: String,
    /// Display name (e.g. "Convert 2028").
    pub name: String,
    /// Face value outstanding, in millions.
    pub notional: Money,
    /// Calendar year of maturity.
    pub maturity_year: i32,
    /// Annual coupon rate (decimal: 0.0063 = 0.63%).
    pub coupon_rate: Rate,
    /// Conversion price per share, for convertible notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_price: Option<Money>,
}

impl DebtInstrument {
    /// Copy of this instrument with a different notional.
    pub fn with_notional(&self, notional: Money) -> Self {
        Self {
            notional,
            ..self.clone()
        }
    }
}

/// Live market overlay for a listed preferred series.
///
/// Sourced from the market data adapter; not part of the instrument's
/// identity. A preferred with no quote is still fully computable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Last traded price per share.
    pub price: Money,
    /// Daily change in percent (e.g. -2.3 = down 2.3%).
    pub change_percent: Decimal,
}

/// A perpetual preferred stock series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferredInstrument {
    /// Stable identifier.
    pub id: String,
    /// Exchange ticker (e.g. "STRF").
    pub ticker: String,
    /// Display name.
    pub name: String,
    /// Aggregate liquidation preference outstanding, in millions.
    pub notional: Money,
    /// Annual dividend rate (decimal: 0.10 = 10%).
    pub dividend_rate: Rate,
    /// Liquidation preference per share.
    pub liquidation_preference: Money,
    /// Shares outstanding.
    pub shares_outstanding: Decimal,
    /// Optional live quote overlay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<MarketQuote>,
}

impl PreferredInstrument {
    /// Copy of this instrument with a different notional.
    pub fn with_notional(&self, notional: Money) -> Self {
        Self {
            notional,
            ..self.clone()
        }
    }
}

/// Caller-owned snapshot of modelling assumptions.
///
/// Every computation is a pure function of a passed-in `Assumptions` plus
/// the instrument catalog; the engine never retains or mutates one.
/// Holdings are whole BTC — callers must not mix units across fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// BTC spot price in currency units.
    pub btc_price: Money,
    /// BTC held, in whole coins.
    pub btc_holdings: Decimal,
    /// Annualized BTC volatility (decimal: 0.60 = 60%).
    pub btc_volatility: Rate,
    /// Assumed annual BTC appreciation rate.
    pub btc_arr: Rate,
    /// Cash reserve counted alongside BTC, in millions.
    pub cash_reserve: Money,
    /// Calendar year used for debt duration.
    pub current_year: i32,
}

/// Per-instrument metrics for a debt tranche, in waterfall order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtTrancheMetrics {
    pub instrument: DebtInstrument,
    /// Cumulative notional through this tranche, in millions.
    pub cumulative_notional: Money,
    /// Years to maturity, floored at half a year.
    pub duration: Years,
    /// Treasury value / cumulative notional. `Decimal::MAX` when unbounded.
    pub coverage: Decimal,
    /// Volatility-scaled duration risk.
    pub btc_risk: Decimal,
    /// Coverage-discounted credit spread proxy.
    pub btc_credit: Decimal,
}

/// Per-instrument metrics for a preferred tranche, in waterfall order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferredTrancheMetrics {
    pub instrument: PreferredInstrument,
    /// Cumulative notional through this tranche, in millions. Continues
    /// from the debt total when preferred sits below debt in the waterfall.
    pub cumulative_notional: Money,
    /// Annual dividend obligation, in millions.
    pub annual_dividend: Money,
    /// Fixed perpetual proxy duration.
    pub duration: Years,
    pub coverage: Decimal,
    pub btc_risk: Decimal,
    pub btc_credit: Decimal,
}

/// Entity-level treasury summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryMetrics {
    /// BTC holdings valued at the assumed price, in full currency units.
    pub nav: Money,
    /// NAV plus cash reserve, in full currency units.
    pub treasury_value: Money,
    /// Total debt notional, in full currency units.
    pub total_debt: Money,
    /// Total preferred notional, in full currency units.
    pub total_preferred: Money,
    /// Debt plus preferred, in full currency units.
    pub total_obligations: Money,
    /// Coverage of debt alone.
    pub debt_coverage: Decimal,
    /// Coverage of all obligations.
    pub total_coverage: Decimal,
    /// Treasury value / annual preferred dividends. `Decimal::MAX` when
    /// there are no dividend obligations.
    pub btc_years_of_dividends: Decimal,
    /// Notional-weighted average duration across both classes, in years.
    pub avg_duration: Years,
    /// Minimum compound annual BTC appreciation for NAV growth to outpace
    /// obligations over the weighted horizon.
    pub btc_breakeven_arr: Rate,
    /// True when a negative class adjustment pushed an effective total
    /// below zero and it was clamped for reporting.
    pub adjustment_clamped: bool,
}

/// One point in the coverage sensitivity grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityCell {
    /// Hypothetical BTC holdings, whole coins.
    pub holdings: Decimal,
    /// Hypothetical BTC price.
    pub price: Money,
    /// Coverage of total obligations at this point.
    pub coverage: Decimal,
}
