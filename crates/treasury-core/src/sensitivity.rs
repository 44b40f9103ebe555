//! Coverage sensitivity grid.
//!
//! Re-evaluates coverage across the cross-product of candidate BTC
//! holdings and prices, reusing the coverage kernel exactly — the grid
//! never diverges from the per-tranche formula. Cells are ephemeral:
//! callers regenerate the grid on every input change.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::coverage;
use crate::error::TreasuryError;
use crate::types::SensitivityCell;
use crate::TreasuryResult;

/// Price columns used by the reference UI grid.
pub const DEFAULT_PRICE_STEPS: [Decimal; 6] = [
    dec!(30_000),
    dec!(50_000),
    dec!(75_000),
    dec!(100_000),
    dec!(150_000),
    dec!(200_000),
];

/// Generate the full holdings × price coverage grid, row-major over
/// holdings then price.
///
/// `total_obligations_millions` is the combined debt + preferred notional;
/// `cash_reserve_millions` is counted into the treasury value of every
/// cell (pass zero to grid NAV alone).
pub fn generate_matrix(
    total_obligations_millions: Decimal,
    holdings_range: &[Decimal],
    price_range: &[Decimal],
    cash_reserve_millions: Decimal,
) -> TreasuryResult<Vec<SensitivityCell>> {
    if holdings_range.is_empty() {
        return Err(TreasuryError::InsufficientData(
            "Holdings range must not be empty.".into(),
        ));
    }
    if price_range.is_empty() {
        return Err(TreasuryError::InsufficientData(
            "Price range must not be empty.".into(),
        ));
    }
    if total_obligations_millions < Decimal::ZERO {
        return Err(TreasuryError::InvalidInput {
            field: "total_obligations_millions".into(),
            reason: "Total obligations cannot be negative.".into(),
        });
    }
    if cash_reserve_millions < Decimal::ZERO {
        return Err(TreasuryError::InvalidInput {
            field: "cash_reserve_millions".into(),
            reason: "Cash reserve cannot be negative.".into(),
        });
    }
    for (i, h) in holdings_range.iter().enumerate() {
        if *h < Decimal::ZERO {
            return Err(TreasuryError::InvalidInput {
                field: format!("holdings_range[{}]", i),
                reason: "Holdings cannot be negative.".into(),
            });
        }
    }
    for (i, p) in price_range.iter().enumerate() {
        if *p < Decimal::ZERO {
            return Err(TreasuryError::InvalidInput {
                field: format!("price_range[{}]", i),
                reason: "Price cannot be negative.".into(),
            });
        }
    }

    let mut cells = Vec::with_capacity(holdings_range.len() * price_range.len());
    for holdings in holdings_range {
        for price in price_range {
            let nav = coverage::nav(*holdings, *price);
            let treasury_value = coverage::treasury_value(nav, cash_reserve_millions);
            let cov = coverage::coverage_ratio(treasury_value, total_obligations_millions);
            cells.push(SensitivityCell {
                holdings: *holdings,
                price: *price,
                coverage: cov,
            });
        }
    }
    Ok(cells)
}

/// Symmetric window around a current value: `center ± steps_each_side`
/// increments of `step`, ascending, with non-positive candidates dropped.
pub fn symmetric_range(
    center: Decimal,
    step: Decimal,
    steps_each_side: u32,
) -> TreasuryResult<Vec<Decimal>> {
    if center <= Decimal::ZERO {
        return Err(TreasuryError::InvalidInput {
            field: "center".into(),
            reason: "Range center must be positive.".into(),
        });
    }
    if step <= Decimal::ZERO {
        return Err(TreasuryError::InvalidInput {
            field: "step".into(),
            reason: "Range step must be positive.".into(),
        });
    }

    let n = i64::from(steps_each_side);
    let mut values = Vec::with_capacity(steps_each_side as usize * 2 + 1);
    for k in -n..=n {
        let value = center + Decimal::from(k) * step;
        if value > Decimal::ZERO {
            values.push(value);
        }
    }
    Ok(values)
}

/// Qualitative coverage band, mirroring the reference UI's color
/// thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageBand {
    /// >= 10x
    Excellent,
    /// >= 5x
    Good,
    /// >= 3x
    Adequate,
    /// >= 2x
    Warning,
    /// < 2x
    Critical,
}

impl CoverageBand {
    pub fn for_ratio(coverage: Decimal) -> Self {
        if coverage >= dec!(10) {
            CoverageBand::Excellent
        } else if coverage >= dec!(5) {
            CoverageBand::Good
        } else if coverage >= dec!(3) {
            CoverageBand::Adequate
        } else if coverage >= dec!(2) {
            CoverageBand::Warning
        } else {
            CoverageBand::Critical
        }
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
    fn test_grid_is_full_cross_product() {
        let holdings = vec![dec!(400_000), dec!(500_000), dec!(600_000)];
        let prices = DEFAULT_PRICE_STEPS.to_vec();
        let cells = generate_matrix(dec!(4000), &holdings, &prices, Decimal::ZERO).unwrap();
        assert_eq!(cells.len(), holdings.len() * prices.len());
    }

    #[test]
    fn test_grid_reference_values() {
        // 2x2 grid over 1,000M obligations: coverage = nav in millions / 1000.
        let cells = generate_matrix(
            dec!(1000),
            &[dec!(500_000), dec!(600_000)],
            &[dec!(50_000), dec!(100_000)],
            Decimal::ZERO,
        )
        .unwrap();
        let coverages: Vec<Decimal> = cells.iter().map(|c| c.coverage).collect();
        assert_eq!(coverages, vec![dec!(25), dec!(50), dec!(30), dec!(60)]);
    }

    #[test]
    fn test_grid_matches_direct_kernel_call() {
        let holdings = vec![dec!(250_000), dec!(750_000)];
        let prices = vec![dec!(40_000), dec!(90_000)];
        let obligations = dec!(8200);
        let cells =
            generate_matrix(obligations, &holdings, &prices, dec!(2_250)).unwrap();
        for cell in &cells {
            let tv = coverage::treasury_value(
                coverage::nav(cell.holdings, cell.price),
                dec!(2_250),
            );
            assert_eq!(cell.coverage, coverage::coverage_ratio(tv, obligations));
        }
    }

    #[test]
    fn test_grid_row_major_ordering() {
        let cells = generate_matrix(
            dec!(1000),
            &[dec!(1), dec!(2)],
            &[dec!(10), dec!(20)],
            Decimal::ZERO,
        )
        .unwrap();
        assert_eq!(
            (cells[0].holdings, cells[0].price),
            (dec!(1), dec!(10))
        );
        assert_eq!(
            (cells[1].holdings, cells[1].price),
            (dec!(1), dec!(20))
        );
        assert_eq!(
            (cells[2].holdings, cells[2].price),
            (dec!(2), dec!(10))
        );
    }

    #[test]
    fn test_grid_unbounded_for_zero_obligations() {
        let cells = generate_matrix(
            Decimal::ZERO,
            &[dec!(100)],
            &[dec!(100)],
            Decimal::ZERO,
        )
        .unwrap();
        assert_eq!(cells[0].coverage, Decimal::MAX);
    }

    #[test]
    fn test_reject_empty_ranges() {
        assert!(generate_matrix(dec!(1000), &[], &[dec!(1)], Decimal::ZERO).is_err());
        assert!(generate_matrix(dec!(1000), &[dec!(1)], &[], Decimal::ZERO).is_err());
    }

    #[test]
    fn test_reject_negative_obligations() {
        assert!(generate_matrix(dec!(-1), &[dec!(1)], &[dec!(1)], Decimal::ZERO).is_err());
    }

    #[test]
    fn test_reject_negative_candidates() {
        assert!(generate_matrix(dec!(1000), &[dec!(-1)], &[dec!(1)], Decimal::ZERO).is_err());
        assert!(generate_matrix(dec!(1000), &[dec!(1)], &[dec!(-1)], Decimal::ZERO).is_err());
    }

    #[test]
    fn test_symmetric_range_around_center() {
        let range = symmetric_range(dec!(500_000), dec!(50_000), 3).unwrap();
        assert_eq!(
            range,
            vec![
                dec!(350_000),
                dec!(400_000),
                dec!(450_000),
                dec!(500_000),
                dec!(550_000),
                dec!(600_000),
                dec!(650_000),
            ]
        );
    }

    #[test]
    fn test_symmetric_range_drops_non_positive() {
        let range = symmetric_range(dec!(100), dec!(60), 3).unwrap();
        // 100 - 180 and 100 - 120 fall away; 100 - 60 = 40 survives.
        assert_eq!(range, vec![dec!(40), dec!(100), dec!(160), dec!(220), dec!(280)]);
    }

    #[test]
    fn test_symmetric_range_rejects_bad_inputs() {
        assert!(symmetric_range(Decimal::ZERO, dec!(10), 3).is_err());
        assert!(symmetric_range(dec!(100), Decimal::ZERO, 3).is_err());
    }

    #[test]
    fn test_coverage_bands() {
        assert_eq!(CoverageBand::for_ratio(dec!(12)), CoverageBand::Excellent);
        assert_eq!(CoverageBand::for_ratio(dec!(10)), CoverageBand::Excellent);
        assert_eq!(CoverageBand::for_ratio(dec!(7)), CoverageBand::Good);
        assert_eq!(CoverageBand::for_ratio(dec!(4)), CoverageBand::Adequate);
        assert_eq!(CoverageBand::for_ratio(dec!(2.5)), CoverageBand::Warning);
        assert_eq!(CoverageBand::for_ratio(dec!(1.2)), CoverageBand::Critical);
        assert_eq!(CoverageBand::for_ratio(Decimal::MAX), CoverageBand::Excellent);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let cells = generate_matrix(
            dec!(1000),
            &[dec!(500_000)],
            &[dec!(50_000)],
            Decimal::ZERO,
        )
        .unwrap();
        let json = serde_json::to_string(&cells).unwrap();
        let _: Vec<SensitivityCell> = serde_json::from_str(&json).unwrap();
    }
}
