//! Database record structures and the validation applied before anything is stored.
//!
//! Requests (`*CreateDBRequest`) are built through their validating constructors, so both store
//! implementations apply the same trimming, rounding and range rules.

pub mod check_ins;
pub mod clients;
