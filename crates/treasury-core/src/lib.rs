pub mod aggregate;
pub mod catalog;
pub mod coverage;
pub mod error;
pub mod market;
pub mod report;
pub mod sensitivity;
pub mod tranche;
pub mod types;
pub mod waterfall;

pub use error::TreasuryError;
pub use types::*;

/// Standard result type for all treasury operations
pub type TreasuryResult<T> = Result<T, TreasuryError>;
