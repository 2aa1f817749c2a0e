//! Database models for coaching clients.

use crate::db::errors::{DbError, Result};
use crate::db::models::check_ins::CheckInDBResponse;
use crate::types::ClientId;
use chrono::{DateTime, Utc};

/// Database request for creating a new client
#[derive(Debug, Clone)]
pub struct ClientCreateDBRequest {
    pub name: String,
}

impl ClientCreateDBRequest {
    /// Validate and normalise a raw client name. The name is trimmed and must not be empty.
    pub fn new(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DbError::validation("Name is required."));
        }
        Ok(Self { name: name.to_string() })
    }
}

/// Database response for a client
///
/// `check_ins` is `None` when the client was loaded without its check-ins (list view) and
/// `Some` when they were fetched alongside it, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDBResponse {
    pub id: ClientId,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub check_ins: Option<Vec<CheckInDBResponse>>,
}

impl ClientDBResponse {
    pub fn with_check_ins(mut self, check_ins: Vec<CheckInDBResponse>) -> Self {
        self.check_ins = Some(check_ins);
        self
    }
}
