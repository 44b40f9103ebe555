use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use treasury_core::sensitivity::{self, DEFAULT_PRICE_STEPS};

use crate::input;

#[derive(Args)]
pub struct SensitivityArgs {
    /// Path to a JSON/YAML SensitivityInput; stdin is also accepted
    #[arg(long)]
    pub input: Option<String>,

    /// Total obligations in millions (alternative to --input)
    #[arg(long)]
    pub obligations: Option<Decimal>,

    /// Holdings window in format center:step:steps_each_side
    /// (e.g. "500000:50000:3")
    #[arg(long)]
    pub holdings_window: Option<String>,

    /// Price window in format center:step:steps_each_side.
    /// Defaults to the standard price columns when omitted.
    #[arg(long)]
    pub price_window: Option<String>,

    /// Cash reserve in millions counted into every cell
    #[arg(long, default_value = "0")]
    pub reserve: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
struct SensitivityInput {
    total_obligations_millions: Decimal,
    holdings_range: Vec<Decimal>,
    price_range: Vec<Decimal>,
    #[serde(default)]
    cash_reserve_millions: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
struct SensitivityOutput {
    total_obligations_millions: Decimal,
    cash_reserve_millions: Decimal,
    cells: Vec<treasury_core::types::SensitivityCell>,
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input_data: SensitivityInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(obligations) = args.obligations {
        let holdings_spec = args
            .holdings_window
            .as_deref()
            .ok_or("--holdings-window center:step:n required with --obligations")?;
        let holdings_range = parse_window(holdings_spec)?;
        let price_range = match args.price_window.as_deref() {
            Some(spec) => parse_window(spec)?,
            None => DEFAULT_PRICE_STEPS.to_vec(),
        };
        SensitivityInput {
            total_obligations_millions: obligations,
            holdings_range,
            price_range,
            cash_reserve_millions: args.reserve,
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json>, --obligations, or stdin required".into());
    };

    let cells = sensitivity::generate_matrix(
        input_data.total_obligations_millions,
        &input_data.holdings_range,
        &input_data.price_range,
        input_data.cash_reserve_millions,
    )?;

    let output = SensitivityOutput {
        total_obligations_millions: input_data.total_obligations_millions,
        cash_reserve_millions: input_data.cash_reserve_millions,
        cells,
    };
    Ok(serde_json::to_value(output)?)
}

fn parse_window(spec: &str) -> Result<Vec<Decimal>, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("Window must be center:step:n, got '{}'", spec).into());
    }
    let center: Decimal = parts[0].parse()?;
    let step: Decimal = parts[1].parse()?;
    let n: u32 = parts[2].parse()?;
    Ok(sensitivity::symmetric_range(center, step, n)?)
}
