//! Database models for client check-ins.

use crate::db::errors::{DbError, Result};
use crate::types::{CheckInId, ClientId};
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits kept for `weight_kg` (the column is `NUMERIC(5, 2)`)
pub const WEIGHT_SCALE: u32 = 2;

/// Largest weight the column can hold
pub const MAX_WEIGHT_KG: Decimal = Decimal::from_parts(99_999, 0, 0, false, WEIGHT_SCALE);

/// Database request for creating a new check-in
#[derive(Debug, Clone)]
pub struct CheckInCreateDBRequest {
    pub client_id: ClientId,
    pub weight_kg: Decimal,
    pub notes: Option<String>,
}

impl CheckInCreateDBRequest {
    /// Validate and normalise a check-in.
    ///
    /// The weight is rounded to two decimal places the way PostgreSQL rounds `NUMERIC` input
    /// (half away from zero) and must be positive after rounding. Notes are trimmed; notes that
    /// are empty after trimming are dropped.
    pub fn new(client_id: ClientId, weight_kg: Decimal, notes: Option<&str>) -> Result<Self> {
        let weight_kg = weight_kg.round_dp_with_strategy(WEIGHT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        if weight_kg <= Decimal::ZERO {
            return Err(DbError::validation("weight_kg must be > 0."));
        }
        if weight_kg > MAX_WEIGHT_KG {
            return Err(DbError::validation(format!("weight_kg must be at most {MAX_WEIGHT_KG}.")));
        }

        let notes = notes.map(str::trim).filter(|n| !n.is_empty()).map(str::to_string);

        Ok(Self {
            client_id,
            weight_kg,
            notes,
        })
    }
}

/// Database response for a check-in
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInDBResponse {
    pub id: CheckInId,
    pub client_id: ClientId,
    pub date: DateTime<Utc>,
    pub weight_kg: Decimal,
    pub notes: Option<String>,
}
