pub mod catalog;
pub mod sensitivity;
pub mod tranches;
pub mod treasury;
