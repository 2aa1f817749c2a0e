//! Common type definitions.
//!
//! All entity IDs are UUIDs wrapped in type aliases for readability:
//!
//! - [`ClientId`]: Coaching client identifier
//! - [`CheckInId`]: Check-in identifier
//!
//! # Utility Functions
//!
//! - [`abbrev_uuid`]: Abbreviate UUIDs to first 8 chars for logging
//! - [`now`]: Current UTC time at the precision both stores persist

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

// Type aliases for IDs
pub type ClientId = Uuid;
pub type CheckInId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

/// Current time truncated to microseconds.
///
/// PostgreSQL `TIMESTAMPTZ` keeps microseconds, so truncating here means a value handed back at
/// creation is identical to the one read back later, whichever store is in use.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_abbrev_uuid() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(abbrev_uuid(&id), "550e8400");
    }

    #[test]
    fn test_now_has_microsecond_precision() {
        let ts = now();
        assert_eq!(ts.nanosecond() % 1_000, 0);
    }
}
