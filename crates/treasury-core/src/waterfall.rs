//! Seniority waterfall ordering and cumulative notional accumulation.
//!
//! Debt ranks ahead of preferred; within debt, nearest maturity is most
//! senior. Accumulation runs a cumulative sum down the ordered stack,
//! optionally continuing from a prior tranche class's total (preferred
//! continues from total debt).
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::Decimal;

use crate::error::TreasuryError;
use crate::types::DebtInstrument;
use crate::TreasuryResult;

/// Order debt instruments by ascending maturity year.
///
/// Stable: catalog order breaks ties. Preferred instruments are never
/// re-sorted; they stay in catalog-declared order below all debt.
pub fn order_debt(instruments: &[DebtInstrument]) -> Vec<DebtInstrument> {
    let mut ordered = instruments.to_vec();
    ordered.sort_by_key(|d| d.maturity_year);
    ordered
}

/// Running cumulative notional down an ordered stack.
///
/// `starting_cumulative` carries a prior class's total (pass total debt
/// when accumulating preferred). Rejects negative notionals; a user-level
/// "additional" delta that turns an effective total negative is handled
/// upstream, not here.
pub fn accumulate(
    notionals: &[Decimal],
    starting_cumulative: Decimal,
) -> TreasuryResult<Vec<Decimal>> {
    if starting_cumulative < Decimal::ZERO {
        return Err(TreasuryError::InvalidInput {
            field: "starting_cumulative".into(),
            reason: "Starting cumulative cannot be negative.".into(),
        });
    }

    let mut cumulative = starting_cumulative;
    let mut out = Vec::with_capacity(notionals.len());
    for (i, notional) in notionals.iter().enumerate() {
        if *notional < Decimal::ZERO {
            return Err(TreasuryError::InvalidInput {
                field: format!("notional[{}]", i),
                reason: "Notional cannot be negative.".into(),
            });
        }
        cumulative += notional;
        out.push(cumulative);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
