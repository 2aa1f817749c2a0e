//! Database repository for client check-ins.

use crate::db::{
    errors::{DbError, Result},
    models::check_ins::{CheckInCreateDBRequest, CheckInDBResponse},
};
use crate::types::{CheckInId, ClientId, abbrev_uuid};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct CheckIn {
    pub id: CheckInId,
    pub client_id: ClientId,
    pub date: DateTime<Utc>,
    pub weight_kg: Decimal,
    pub notes: Option<String>,
}

impl From<CheckIn> for CheckInDBResponse {
    fn from(check_in: CheckIn) -> Self {
        Self {
            id: check_in.id,
            client_id: check_in.client_id,
            date: check_in.date,
            weight_kg: check_in.weight_kg,
            notes: check_in.notes,
        }
    }
}

pub struct CheckIns<'c> {
    db: &'c mut PgConnection,
}

impl<'c> CheckIns<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(client_id = %abbrev_uuid(&request.client_id), check_in_id = %abbrev_uuid(&id)), err)]
    pub async fn create(&mut self, id: CheckInId, date: DateTime<Utc>, request: &CheckInCreateDBRequest) -> Result<CheckInDBResponse> {
        match sqlx::query_as::<_, CheckIn>(
            r#"
            INSERT INTO check_ins (id, client_id, date, weight_kg, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, client_id, date, weight_kg, notes
            "#,
        )
        .bind(id)
        .bind(request.client_id)
        .bind(date)
        .bind(request.weight_kg)
        .bind(&request.notes)
        .fetch_one(&mut *self.db)
        .await
        {
            Ok(check_in) => Ok(CheckInDBResponse::from(check_in)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                // Foreign key violation means the client doesn't exist
                Err(DbError::NotFound)
            }
            Err(e) => Err(DbError::from(e)),
        }
    }

    /// A client's check-ins, newest first. Ties keep insertion order.
    #[instrument(skip(self), fields(client_id = %abbrev_uuid(&client_id)), err)]
    pub async fn list_for_client(&mut self, client_id: ClientId) -> Result<Vec<CheckInDBResponse>> {
        let check_ins = sqlx::query_as::<_, CheckIn>(
            r#"
            SELECT id, client_id, date, weight_kg, notes
            FROM check_ins
            WHERE client_id = $1
            ORDER BY date DESC, seq ASC
            "#,
        )
        .bind(client_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(check_ins.into_iter().map(CheckInDBResponse::from).collect())
    }

    /// Remove every check-in owned by a client, returning how many were removed
    #[instrument(skip(self), fields(client_id = %abbrev_uuid(&client_id)), err)]
    pub async fn delete_for_client(&mut self, client_id: ClientId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM check_ins WHERE client_id = $1")
            .bind(client_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected())
    }
}
