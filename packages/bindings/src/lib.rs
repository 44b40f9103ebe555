use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use treasury_core::types::{Assumptions, DebtInstrument, PreferredInstrument, Years};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Full report
// ---------------------------------------------------------------------------

#[napi]
pub fn treasury_report(input_json: String) -> NapiResult<String> {
    let input: treasury_core::report::TreasuryReportInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = treasury_core::report::run_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Tranche metrics
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct DebtTranchesRequest {
    debt: Vec<DebtInstrument>,
    assumptions: Assumptions,
}

#[napi]
pub fn debt_tranche_metrics(input_json: String) -> NapiResult<String> {
    let input: DebtTranchesRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = treasury_core::tranche::calculate_debt_metrics(&input.debt, &input.assumptions)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct PreferredTranchesRequest {
    preferred: Vec<PreferredInstrument>,
    assumptions: Assumptions,
    #[serde(default)]
    starting_cumulative: Decimal,
    #[serde(default)]
    perpetual_duration: Option<Years>,
}

#[napi]
pub fn preferred_tranche_metrics(input_json: String) -> NapiResult<String> {
    let input: PreferredTranchesRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = treasury_core::tranche::calculate_preferred_metrics(
        &input.preferred,
        &input.assumptions,
        input.starting_cumulative,
        input.perpetual_duration,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Sensitivity grid
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SensitivityRequest {
    total_obligations_millions: Decimal,
    holdings_range: Vec<Decimal>,
    price_range: Vec<Decimal>,
    #[serde(default)]
    cash_reserve_millions: Decimal,
}

#[napi]
pub fn sensitivity_matrix(input_json: String) -> NapiResult<String> {
    let input: SensitivityRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = treasury_core::sensitivity::generate_matrix(
        input.total_obligations_millions,
        &input.holdings_range,
        &input.price_range,
        input.cash_reserve_millions,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Market snapshot merge
// ---------------------------------------------------------------------------

#[napi]
pub fn apply_market_snapshot(
    assumptions_json: String,
    snapshot_json: String,
) -> NapiResult<String> {
    let assumptions: Assumptions =
        serde_json::from_str(&assumptions_json).map_err(to_napi_error)?;
    let snapshot: treasury_core::market::MarketSnapshot =
        serde_json::from_str(&snapshot_json).map_err(to_napi_error)?;
    let merged = assumptions
        .apply_snapshot(&snapshot)
        .map_err(to_napi_error)?;
    serde_json::to_string(&merged).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Reference catalogs
// ---------------------------------------------------------------------------

#[napi]
pub fn strategy_catalog() -> NapiResult<String> {
    let value = serde_json::json!({
        "debt": treasury_core::catalog::strategy_debt(),
        "preferred": treasury_core::catalog::strategy_preferred(),
        "assumptions": treasury_core::catalog::default_assumptions(),
    });
    serde_json::to_string(&value).map_err(to_napi_error)
}

#[napi]
pub fn strive_catalog() -> NapiResult<String> {
    let value = serde_json::json!({
        "debt": [],
        "preferred": treasury_core::catalog::strive_preferred(),
        "assumptions": treasury_core::catalog::strive_default_assumptions(),
    });
    serde_json::to_string(&value).map_err(to_napi_error)
}
