//! Axum route handlers.
//!
//! Handlers only translate between HTTP and the [`Store`](crate::store::Store): they pull the
//! store out of [`AppState`](crate::AppState), call it, and map the outcome to a status code.
//! Validation and ordering live in the store.

pub mod check_ins;
pub mod clients;
pub mod health;
