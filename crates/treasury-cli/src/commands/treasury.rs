use clap::Args;
use serde_json::Value;

use treasury_core::aggregate::ClassAdjustments;
use treasury_core::catalog;
use treasury_core::market::{self, MarketSnapshot};
use treasury_core::report::{self, TreasuryReportInput};

use crate::input;

#[derive(Args)]
pub struct TreasuryArgs {
    /// Path to a JSON/YAML TreasuryReportInput; stdin is also accepted.
    /// Omit to use a built-in catalog.
    #[arg(long)]
    pub input: Option<String>,

    /// Built-in entity catalog to use when no input is given:
    /// strategy (debt + preferred) or strive (preferred only)
    #[arg(long, default_value = "strategy")]
    pub entity: String,

    /// Optional market snapshot JSON to merge over the assumptions
    #[arg(long)]
    pub snapshot: Option<String>,
}

pub fn run_treasury(args: TreasuryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut input_data: TreasuryReportInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        builtin_input(&args.entity)?
    };

    if let Some(ref path) = args.snapshot {
        let snapshot: MarketSnapshot = input::file::read_input(path)?;
        input_data.assumptions = input_data.assumptions.apply_snapshot(&snapshot)?;
        input_data.preferred = market::overlay_quotes(&input_data.preferred, &snapshot);
    }

    let result = report::run_report(&input_data)?;
    Ok(serde_json::to_value(result)?)
}

fn builtin_input(entity: &str) -> Result<TreasuryReportInput, Box<dyn std::error::Error>> {
    match entity {
        "strategy" => Ok(TreasuryReportInput {
            debt: catalog::strategy_debt(),
            preferred: catalog::strategy_preferred(),
            assumptions: catalog::default_assumptions(),
            adjustments: ClassAdjustments::default(),
            perpetual_duration: None,
        }),
        "strive" => Ok(TreasuryReportInput {
            debt: vec![],
            preferred: catalog::strive_preferred(),
            assumptions: catalog::strive_default_assumptions(),
            adjustments: ClassAdjustments::default(),
            perpetual_duration: None,
        }),
        other => Err(format!("Unknown entity '{}': expected strategy or strive", other).into()),
    }
}
