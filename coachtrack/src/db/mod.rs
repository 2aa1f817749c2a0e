//! Database layer for data persistence and access.
//!
//! This module implements the PostgreSQL side of the data access layer using SQLx.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │    Store    │  (crate::store - PostgresStore or InMemoryStore)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - queries, PostgresStore only)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  PostgreSQL │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations over a connection or transaction
//! - [`models`]: Record structures and the validating create requests shared by both stores
//! - [`errors`]: Store error type
//!
//! # Migrations
//!
//! Database migrations are managed by SQLx and located in the `migrations/` directory.
//! The [`crate::migrator`] function provides access to the migrator:
//!
//! ```ignore
//! coachtrack::migrator().run(&pool).await?;
//! ```

pub mod errors;
pub mod handlers;
pub mod models;
