use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use treasury_core::tranche;
use treasury_core::types::{Assumptions, DebtInstrument, PreferredInstrument, Years};

use crate::input;

#[derive(Args)]
pub struct DebtTranchesArgs {
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Args)]
pub struct PreferredTranchesArgs {
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DebtTranchesInput {
    debt: Vec<DebtInstrument>,
    assumptions: Assumptions,
}

#[derive(Debug, Serialize, Deserialize)]
struct PreferredTranchesInput {
    preferred: Vec<PreferredInstrument>,
    assumptions: Assumptions,
    /// Prior tranche class total (usually total debt), in millions.
    #[serde(default)]
    starting_cumulative: Decimal,
    #[serde(default)]
    perpetual_duration: Option<Years>,
}

pub fn run_debt_tranches(args: DebtTranchesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input_data: DebtTranchesInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required".into());
    };
    let result = tranche::calculate_debt_metrics(&input_data.debt, &input_data.assumptions)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_preferred_tranches(
    args: PreferredTranchesArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let input_data: PreferredTranchesInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required".into());
    };
    let result = tranche::calculate_preferred_metrics(
        &input_data.preferred,
        &input_data.assumptions,
        input_data.starting_cumulative,
        input_data.perpetual_duration,
    )?;
    Ok(serde_json::to_value(result)?)
}
