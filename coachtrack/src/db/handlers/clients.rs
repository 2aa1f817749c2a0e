//! Database repository for coaching clients.

use crate::db::{
    errors::Result,
    models::clients::{ClientCreateDBRequest, ClientDBResponse},
};
use crate::types::{ClientId, abbrev_uuid};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Client {
    pub id: ClientId,
    pub name: String,
    pub start_date: DateTime<Utc>,
}

impl From<Client> for ClientDBResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
            start_date: client.start_date,
            check_ins: None,
        }
    }
}

pub struct Clients<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Clients<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(client_id = %abbrev_uuid(&id), name = %request.name), err)]
    pub async fn create(&mut self, id: ClientId, start_date: DateTime<Utc>, request: &ClientCreateDBRequest) -> Result<ClientDBResponse> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (id, name, start_date)
            VALUES ($1, $2, $3)
            RETURNING id, name, start_date
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(start_date)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(ClientDBResponse::from(client))
    }

    #[instrument(skip(self), fields(client_id = %abbrev_uuid(&id)), err)]
    pub async fn get_by_id(&mut self, id: ClientId) -> Result<Option<ClientDBResponse>> {
        let client = sqlx::query_as::<_, Client>("SELECT id, name, start_date FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(client.map(ClientDBResponse::from))
    }

    /// Check that a client exists and hold a share lock on its row until the surrounding
    /// transaction ends, so it cannot be deleted while a child row is being attached.
    #[instrument(skip(self), fields(client_id = %abbrev_uuid(&id)), err)]
    pub async fn lock_for_share(&mut self, id: ClientId) -> Result<bool> {
        let row = sqlx::query_scalar::<_, ClientId>("SELECT id FROM clients WHERE id = $1 FOR SHARE")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(row.is_some())
    }

    /// All clients, most recently started first. Ties keep insertion order.
    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<ClientDBResponse>> {
        let clients = sqlx::query_as::<_, Client>("SELECT id, name, start_date FROM clients ORDER BY start_date DESC, seq ASC")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(clients.into_iter().map(ClientDBResponse::from).collect())
    }

    #[instrument(skip(self), fields(client_id = %abbrev_uuid(&id)), err)]
    pub async fn delete(&mut self, id: ClientId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
