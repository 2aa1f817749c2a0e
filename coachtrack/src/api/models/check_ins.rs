//! API request/response models for client check-ins.

use crate::db::models::check_ins::CheckInDBResponse;
use crate::types::{CheckInId, ClientId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for recording a check-in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckInCreate {
    /// Body weight in kilograms. A missing weight is treated like zero and rejected.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub weight_kg: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Check-in details returned by the API. `weight_kg` is a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInResponse {
    pub id: CheckInId,
    pub client_id: ClientId,
    pub date: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub weight_kg: Decimal,
    pub notes: Option<String>,
}

impl From<CheckInDBResponse> for CheckInResponse {
    fn from(db: CheckInDBResponse) -> Self {
        Self {
            id: db.id,
            client_id: db.client_id,
            date: db.date,
            weight_kg: db.weight_kg,
            notes: db.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_weight_is_serialized_as_number() {
        let check_in = CheckInResponse {
            id: CheckInId::nil(),
            client_id: ClientId::nil(),
            date: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            weight_kg: Decimal::new(7050, 2),
            notes: None,
        };
        let value = serde_json::to_value(&check_in).unwrap();

        assert_eq!(value["weight_kg"], json!(70.5));
        assert_eq!(value["notes"], json!(null));
        assert_eq!(value["date"], json!("2023-11-14T22:13:20Z"));
    }

    #[test]
    fn test_create_accepts_numbers_and_missing_fields() {
        let create: CheckInCreate = serde_json::from_value(json!({"weight_kg": 70.5, "notes": "ok"})).unwrap();
        assert_eq!(create.weight_kg, Some(Decimal::new(705, 1)));
        assert_eq!(create.notes.as_deref(), Some("ok"));

        let create: CheckInCreate = serde_json::from_value(json!({"weight_kg": 82})).unwrap();
        assert_eq!(create.weight_kg, Some(Decimal::new(82, 0)));

        let create: CheckInCreate = serde_json::from_value(json!({})).unwrap();
        assert_eq!(create.weight_kg, None);
        assert_eq!(create.notes, None);
    }
}
