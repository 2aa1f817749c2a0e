//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures
//! - **[`extractors`]**: Body and path extractors that reject with the API's JSON error format
//!
//! # API Structure
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/` | [`handlers::health::root`] |
//! | GET | `/health` | [`handlers::health::health`] |
//! | GET, POST | `/clients` | [`handlers::clients`] |
//! | GET, DELETE | `/clients/{id}` | [`handlers::clients`] |
//! | GET, POST | `/clients/{id}/checkins` | [`handlers::check_ins`] |
//!
//! Every error response has the body `{"error": "<message>"}`.

pub mod extractors;
pub mod handlers;
pub mod models;
