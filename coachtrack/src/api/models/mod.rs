//! Request and response bodies for the HTTP API.
//!
//! Responses are built from the store records in [`crate::db::models`] through `From` impls, so
//! the JSON shape is the same whichever store is configured.

pub mod check_ins;
pub mod clients;
pub mod health;
