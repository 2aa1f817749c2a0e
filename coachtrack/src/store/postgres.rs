//! PostgreSQL store.
//!
//! Each operation runs in its own transaction over the repositories in
//! [`crate::db::handlers`]. Reads use a repeatable-read snapshot so a client and its
//! check-ins are always seen together. Writes that attach a check-in hold a share lock on
//! the client row, so a concurrent delete waits for them (and vice versa).

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Executor, PgConnection};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::PoolSettings;
use crate::db::errors::{DbError, Result};
use crate::db::handlers::{CheckIns, Clients};
use crate::db::models::{
    check_ins::{CheckInCreateDBRequest, CheckInDBResponse},
    clients::{ClientCreateDBRequest, ClientDBResponse},
};
use crate::store::Store;
use crate::types::{ClientId, abbrev_uuid, now};

/// Durable [`Store`] backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wrap an existing pool. The schema is expected to be migrated already.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `url` using the given pool settings.
    pub async fn connect(url: &str, settings: &PoolSettings) -> anyhow::Result<Self> {
        let pool = pool_options(settings)
            .connect(url)
            .await
            .context("Failed to connect to PostgreSQL")?;
        info!(
            max_connections = settings.max_connections,
            min_connections = settings.min_connections,
            "Connected to PostgreSQL"
        );
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn pool_options(settings: &PoolSettings) -> PgPoolOptions {
    // 0 means "never" for the idle and lifetime limits
    let optional = |secs: u64| (secs > 0).then(|| Duration::from_secs(secs));

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .idle_timeout(optional(settings.idle_timeout_secs))
        .max_lifetime(optional(settings.max_lifetime_secs))
}

async fn snapshot(conn: &mut PgConnection) -> Result<()> {
    conn.execute("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY").await?;
    Ok(())
}

#[async_trait]
impl Store for PostgresStore {
    #[instrument(skip(self, name), err)]
    async fn create_client(&self, name: &str) -> Result<ClientDBResponse> {
        let request = ClientCreateDBRequest::new(name)?;

        let mut conn = self.pool.acquire().await?;
        Clients::new(&mut conn).create(Uuid::new_v4(), now(), &request).await
    }

    #[instrument(skip(self), err)]
    async fn list_clients(&self) -> Result<Vec<ClientDBResponse>> {
        let mut conn = self.pool.acquire().await?;
        Clients::new(&mut conn).list().await
    }

    #[instrument(skip(self), fields(client_id = %abbrev_uuid(&id)), err)]
    async fn get_client(&self, id: ClientId) -> Result<Option<ClientDBResponse>> {
        let mut tx = self.pool.begin().await?;
        snapshot(&mut tx).await?;

        let Some(client) = Clients::new(&mut tx).get_by_id(id).await? else {
            return Ok(None);
        };
        let check_ins = CheckIns::new(&mut tx).list_for_client(id).await?;
        tx.commit().await?;

        Ok(Some(client.with_check_ins(check_ins)))
    }

    #[instrument(skip(self), fields(client_id = %abbrev_uuid(&id)), err)]
    async fn delete_client(&self, id: ClientId) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let removed_check_ins = CheckIns::new(&mut tx).delete_for_client(id).await?;
        let deleted = Clients::new(&mut tx).delete(id).await?;
        if !deleted {
            tx.rollback().await?;
            return Ok(false);
        }
        tx.commit().await?;

        info!(removed_check_ins, "Deleted client");
        Ok(true)
    }

    #[instrument(skip(self, weight_kg, notes), fields(client_id = %abbrev_uuid(&client_id)), err)]
    async fn create_check_in(&self, client_id: ClientId, weight_kg: Decimal, notes: Option<&str>) -> Result<CheckInDBResponse> {
        let mut tx = self.pool.begin().await?;

        if !Clients::new(&mut tx).lock_for_share(client_id).await? {
            return Err(DbError::NotFound);
        }
        let request = CheckInCreateDBRequest::new(client_id, weight_kg, notes)?;
        let check_in = CheckIns::new(&mut tx).create(Uuid::new_v4(), now(), &request).await?;
        tx.commit().await?;

        Ok(check_in)
    }

    #[instrument(skip(self), fields(client_id = %abbrev_uuid(&client_id)), err)]
    async fn list_check_ins(&self, client_id: ClientId) -> Result<Vec<CheckInDBResponse>> {
        let mut tx = self.pool.begin().await?;
        snapshot(&mut tx).await?;

        if Clients::new(&mut tx).get_by_id(client_id).await?.is_none() {
            return Err(DbError::NotFound);
        }
        let check_ins = CheckIns::new(&mut tx).list_for_client(client_id).await?;
        tx.commit().await?;

        Ok(check_ins)
    }

    async fn health(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_options_treat_zero_as_unlimited() {
        let settings = PoolSettings {
            max_connections: 4,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 0,
            max_lifetime_secs: 60,
        };
        let options = pool_options(&settings);

        assert_eq!(options.get_max_connections(), 4);
        assert_eq!(options.get_min_connections(), 1);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(5));
        assert_eq!(options.get_idle_timeout(), None);
        assert_eq!(options.get_max_lifetime(), Some(Duration::from_secs(60)));
    }
}
