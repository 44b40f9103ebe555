//! Market data snapshot boundary.
//!
//! The engine never polls: an external adapter delivers one complete
//! snapshot per cycle (price, holdings and per-ticker preferred quotes
//! from the same poll), or nothing at all. This module is the whole
//! contract — merging a snapshot into caller-owned assumptions and
//! overlaying quotes onto preferred instruments. A cycle with no
//! snapshot simply leaves the last-known assumptions in force.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::TreasuryError;
use crate::types::{Assumptions, MarketQuote, PreferredInstrument};
use crate::TreasuryResult;

/// One atomic poll cycle from the market data adapter.
///
/// Fields must come from the same cycle; pairing a new price with stale
/// holdings produces inconsistent coverage numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// BTC spot price.
    pub btc_price: Decimal,
    /// BTC held by the entity, whole coins.
    pub btc_holdings: Decimal,
    /// Per-ticker preferred quotes. Missing tickers are fine.
    #[serde(default)]
    pub preferred_quotes: BTreeMap<String, MarketQuote>,
}

impl MarketSnapshot {
    pub fn validate(&self) -> TreasuryResult<()> {
        if self.btc_price <= Decimal::ZERO {
            return Err(TreasuryError::InvalidInput {
                field: "btc_price".into(),
                reason: "Snapshot BTC price must be positive.".into(),
            });
        }
        if self.btc_holdings < Decimal::ZERO {
            return Err(TreasuryError::InvalidInput {
                field: "btc_holdings".into(),
                reason: "Snapshot BTC holdings cannot be negative.".into(),
            });
        }
        Ok(())
    }
}

impl Assumptions {
    /// New assumptions with the snapshot's price and holdings merged in.
    ///
    /// Volatility, appreciation rate, cash reserve and current year are
    /// caller-owned modelling inputs and carry over unchanged.
    pub fn apply_snapshot(&self, snapshot: &MarketSnapshot) -> TreasuryResult<Assumptions> {
        snapshot.validate()?;
        Ok(Assumptions {
            btc_price: snapshot.btc_price,
            btc_holdings: snapshot.btc_holdings,
            ..self.clone()
        })
    }
}

/// Overlay snapshot quotes onto preferred instruments by ticker.
///
/// Instruments without a matching quote keep `market: None`; coverage
/// computes from notional alone either way.
pub fn overlay_quotes(
    instruments: &[PreferredInstrument],
    snapshot: &MarketSnapshot,
) -> Vec<PreferredInstrument> {
    instruments
        .iter()
        .map(|p| {
            let market = snapshot.preferred_quotes.get(&p.ticker).cloned();
            PreferredInstrument {
                market: market.or_else(|| p.market.clone()),
                ..p.clone()
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
