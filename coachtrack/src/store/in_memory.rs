//! In-memory store implementation.
//!
//! Clients live in a [`DashMap`] keyed by id, and each entry owns its check-ins. Attaching a
//! check-in goes through `get_mut`, which holds the entry's shard lock for the whole
//! lookup-validate-append step, so it can never race a delete of the same client. Removing
//! the entry removes its check-ins with it. Data is lost on restart.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::db::errors::{DbError, Result};
use crate::db::models::{
    check_ins::{CheckInCreateDBRequest, CheckInDBResponse},
    clients::{ClientCreateDBRequest, ClientDBResponse},
};
use crate::store::Store;
use crate::types::{ClientId, abbrev_uuid, now};

/// A client with the check-ins it owns, in insertion order.
#[derive(Debug, Clone)]
struct ClientRecord {
    client: ClientDBResponse,
    seq: u64,
    check_ins: Vec<CheckInDBResponse>,
}

impl ClientRecord {
    /// Check-ins newest first. The sort is stable, so equal dates keep insertion order.
    fn check_ins_newest_first(&self) -> Vec<CheckInDBResponse> {
        let mut check_ins = self.check_ins.clone();
        check_ins.sort_by(|a, b| b.date.cmp(&a.date));
        check_ins
    }
}

/// In-memory implementation of the [`Store`] trait.
///
/// # Example
/// ```ignore
/// let store = InMemoryStore::new();
/// let alice = store.create_client("Alice").await?;
/// store.create_check_in(alice.id, dec!(70.5), Some("felt great")).await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    clients: DashMap<ClientId, ClientRecord>,
    next_seq: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    #[instrument(skip(self, name), err)]
    async fn create_client(&self, name: &str) -> Result<ClientDBResponse> {
        let request = ClientCreateDBRequest::new(name)?;

        let client = ClientDBResponse {
            id: Uuid::new_v4(),
            name: request.name,
            start_date: now(),
            check_ins: None,
        };
        let record = ClientRecord {
            client: client.clone(),
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            check_ins: Vec::new(),
        };
        self.clients.insert(client.id, record);

        debug!(client_id = %abbrev_uuid(&client.id), "Created client");
        Ok(client)
    }

    #[instrument(skip(self), err)]
    async fn list_clients(&self) -> Result<Vec<ClientDBResponse>> {
        let mut records: Vec<(u64, ClientDBResponse)> = self
            .clients
            .iter()
            .map(|entry| (entry.seq, entry.client.clone()))
            .collect();
        records.sort_by(|(a_seq, a), (b_seq, b)| b.start_date.cmp(&a.start_date).then(a_seq.cmp(b_seq)));

        Ok(records.into_iter().map(|(_, client)| client).collect())
    }

    #[instrument(skip(self), fields(client_id = %abbrev_uuid(&id)), err)]
    async fn get_client(&self, id: ClientId) -> Result<Option<ClientDBResponse>> {
        Ok(self
            .clients
            .get(&id)
            .map(|record| record.client.clone().with_check_ins(record.check_ins_newest_first())))
    }

    #[instrument(skip(self), fields(client_id = %abbrev_uuid(&id)), err)]
    async fn delete_client(&self, id: ClientId) -> Result<bool> {
        match self.clients.remove(&id) {
            Some((_, record)) => {
                debug!(removed_check_ins = record.check_ins.len(), "Deleted client");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[instrument(skip(self, weight_kg, notes), fields(client_id = %abbrev_uuid(&client_id)), err)]
    async fn create_check_in(&self, client_id: ClientId, weight_kg: Decimal, notes: Option<&str>) -> Result<CheckInDBResponse> {
        let mut record = self.clients.get_mut(&client_id).ok_or(DbError::NotFound)?;

        let request = CheckInCreateDBRequest::new(client_id, weight_kg, notes)?;
        let check_in = CheckInDBResponse {
            id: Uuid::new_v4(),
            client_id,
            date: now(),
            weight_kg: request.weight_kg,
            notes: request.notes,
        };
        record.check_ins.push(check_in.clone());

        Ok(check_in)
    }

    #[instrument(skip(self), fields(client_id = %abbrev_uuid(&client_id)), err)]
    async fn list_check_ins(&self, client_id: ClientId) -> Result<Vec<CheckInDBResponse>> {
        self.clients
            .get(&client_id)
            .map(|record| record.check_ins_newest_first())
            .ok_or(DbError::NotFound)
    }

    async fn health(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) {
        self.clients.clear();
    }
}
