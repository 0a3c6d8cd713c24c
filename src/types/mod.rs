//! Type definitions for the fraud detector

pub mod transaction;
pub mod verdict;

pub use transaction::{Gender, TransactionInput};
pub use verdict::Verdict;
