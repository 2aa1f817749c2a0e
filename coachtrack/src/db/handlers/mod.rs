//! Repository implementations for PostgreSQL access.
//!
//! Each repository wraps a SQLx connection or transaction and provides strongly-typed
//! operations for one table, returning models from [`crate::db::models`].
//!
//! - [`Clients`]: coaching clients
//! - [`CheckIns`]: weight check-ins owned by a client
//!
//! Repositories don't open transactions themselves. The caller decides the unit of work:
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! CheckIns::new(&mut tx).delete_for_client(id).await?;
//! Clients::new(&mut tx).delete(id).await?;
//! tx.commit().await?;
//! ```

pub mod check_ins;
pub mod clients;

pub use check_ins::CheckIns;
pub use clients::Clients;
