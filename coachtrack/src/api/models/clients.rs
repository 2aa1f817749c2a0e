//! API request/response models for coaching clients.

use crate::api::models::check_ins::CheckInResponse;
use crate::db::models::clients::ClientDBResponse;
use crate::types::ClientId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for creating a new client.
///
/// `name` is optional at the transport level so that a missing name is reported the same way
/// as a blank one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientCreate {
    #[serde(default)]
    pub name: Option<String>,
}

/// Client details returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientResponse {
    pub id: ClientId,
    pub name: String,
    pub start_date: DateTime<Utc>,
    /// Check-ins, newest first. Omitted from list responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_ins: Option<Vec<CheckInResponse>>,
}

impl From<ClientDBResponse> for ClientResponse {
    fn from(db: ClientDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            start_date: db.start_date,
            check_ins: db.check_ins.map(|check_ins| check_ins.into_iter().map(CheckInResponse::from).collect()),
        }
    }
}
