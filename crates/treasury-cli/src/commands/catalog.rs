use clap::Args;
use serde_json::{json, Value};

use treasury_core::catalog;

#[derive(Args)]
pub struct CatalogArgs {
    /// Entity to dump: strategy or strive
    #[arg(long, default_value = "strategy")]
    pub entity: String,
}

pub fn run_catalog(args: CatalogArgs) -> Result<Value, Box<dyn std::error::Error>> {
    match args.entity.as_str() {
        "strategy" => Ok(json!({
            "debt": catalog::strategy_debt(),
            "preferred": catalog::strategy_preferred(),
            "assumptions": catalog::default_assumptions(),
        })),
        "strive" => Ok(json!({
            "debt": [],
            "preferred": catalog::strive_preferred(),
            "assumptions": catalog::strive_default_assumptions(),
        })),
        other => Err(format!("Unknown entity '{}': expected strategy or strive", other).into()),
    }
}
