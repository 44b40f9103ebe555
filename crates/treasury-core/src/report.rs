//! Full coverage report pipeline.
//!
//! Composes the engine end to end the way the consuming UI does: debt
//! tranches first, preferred continuing from the debt total, then the
//! entity rollup. One input struct, one call, one serializable report.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::{self, ClassAdjustments};
use crate::tranche;
use crate::types::{
    Assumptions, DebtInstrument, DebtTrancheMetrics, PreferredInstrument,
    PreferredTrancheMetrics, TreasuryMetrics, Years,
};
use crate::TreasuryResult;

/// Input for a full treasury coverage report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryReportInput {
    /// Debt catalog; may be empty for preferred-only issuers.
    #[serde(default)]
    pub debt: Vec<DebtInstrument>,
    /// Preferred catalog, in declared seniority order.
    #[serde(default)]
    pub preferred: Vec<PreferredInstrument>,
    pub assumptions: Assumptions,
    /// Explicit per-class notional adjustments.
    #[serde(default)]
    pub adjustments: ClassAdjustments,
    /// Override for the preferred perpetual proxy duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perpetual_duration: Option<Years>,
}

/// Everything the presentation layer needs in one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryReport {
    /// Debt tranches in waterfall order.
    pub debt_tranches: Vec<DebtTrancheMetrics>,
    /// Preferred tranches continuing below the debt stack.
    pub preferred_tranches: Vec<PreferredTrancheMetrics>,
    pub treasury: TreasuryMetrics,
}

/// Run the whole pipeline over one catalog + assumptions snapshot.
pub fn run_report(input: &TreasuryReportInput) -> TreasuryResult<TreasuryReport> {
    let debt_tranches = tranche::calculate_debt_metrics(&input.debt, &input.assumptions)?;

    let total_debt: Decimal = debt_tranches.iter().map(|m| m.instrument.notional).sum();
    let preferred_tranches = tranche::calculate_preferred_metrics(
        &input.preferred,
        &input.assumptions,
        total_debt,
        input.perpetual_duration,
    )?;

    let treasury = aggregate::calculate_treasury_metrics(
        &debt_tranches,
        &preferred_tranches,
        &input.assumptions,
        &input.adjustments,
    )?;

    Ok(TreasuryReport {
        debt_tranches,
        preferred_tranches,
        treasury,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
