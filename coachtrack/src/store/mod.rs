//! Backend-agnostic persistence for clients and their check-ins.
//!
//! [`Store`] is the only thing request handlers talk to. Two implementations exist:
//!
//! - [`PostgresStore`]: durable, backed by a SQLx connection pool
//! - [`InMemoryStore`]: a concurrent map, lost on restart
//!
//! Which one is used is decided once at startup by [`connect`] from the
//! [`StoreConfig`](crate::config::StoreConfig). The resulting `Arc<dyn Store>` is owned by
//! [`AppState`](crate::AppState) and closed when the server shuts down.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;

use crate::config::StoreConfig;
use crate::db::errors::Result;
use crate::db::models::{check_ins::CheckInDBResponse, clients::ClientDBResponse};
use crate::types::ClientId;

pub mod in_memory;
pub mod postgres;


pub use in_memory::InMemoryStore;
pub use postgres::PostgresStore;

/// Storage contract shared by every backend.
///
/// Every call is atomic: callers never observe a client without the check-ins written
/// alongside it, or a check-in whose client has been deleted.
#[async_trait]
pub trait Store: Send + Sync {
    /// Create a client named `name` (trimmed). The id and start date are assigned here.
    ///
    /// # Errors
    /// - `Validation` if the name is blank
    async fn create_client(&self, name: &str) -> Result<ClientDBResponse>;

    /// All clients, most recently started first, without their check-ins.
    async fn list_clients(&self) -> Result<Vec<ClientDBResponse>>;

    /// A single client together with its check-ins, newest first.
    async fn get_client(&self, id: ClientId) -> Result<Option<ClientDBResponse>>;

    /// Remove a client and every check-in it owns. Returns `false` if there was no such client.
    async fn delete_client(&self, id: ClientId) -> Result<bool>;

    /// Record a check-in for an existing client.
    ///
    /// # Errors
    /// - `NotFound` if the client doesn't exist (checked before the weight)
    /// - `Validation` if the weight is not positive or out of range
    async fn create_check_in(&self, client_id: ClientId, weight_kg: Decimal, notes: Option<&str>) -> Result<CheckInDBResponse>;

    /// A client's check-ins, newest first.
    ///
    /// # Errors
    /// - `NotFound` if the client doesn't exist
    async fn list_check_ins(&self, client_id: ClientId) -> Result<Vec<CheckInDBResponse>>;

    /// Cheap liveness probe of the backend.
    async fn health(&self) -> Result<()>;

    /// Release backend resources. Called once on shutdown.
    async fn close(&self);
}

/// Build the store selected by configuration.
pub async fn connect(config: &StoreConfig) -> anyhow::Result<Arc<dyn Store>> {
    match config {
        StoreConfig::Memory => {
            info!("Using in-memory store: data will be lost on shutdown");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StoreConfig::Postgres { url, pool, run_migrations } => {
            info!("Using PostgreSQL store");
            let store = PostgresStore::connect(url, pool).await?;
            if *run_migrations {
                crate::migrator().run(store.pool()).await?;
                info!("Database migrations applied");
            }
            Ok(Arc::new(store))
        }
    }
}
