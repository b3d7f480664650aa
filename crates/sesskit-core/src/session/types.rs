//! Session data types

use serde::{Deserialize, Serialize};

/// A snapshot of a registered session's bookkeeping slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Backend identifier at registration time
    pub id: String,
    /// Unix timestamp (seconds) when the session was registered
    pub started_at: i64,
    /// Unix timestamp (seconds) past which the session is expired
    pub expires_at: i64,
}

impl SessionRecord {
    /// Whether this record is expired at the given unix timestamp
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_comparison_is_strict() {
        let record = SessionRecord {
            id: "abc".to_string(),
            started_at: 1_000,
            expires_at: 2_000,
        };

        assert!(!record.is_expired_at(1_999));
        assert!(!record.is_expired_at(2_000));
        assert!(record.is_expired_at(2_001));
    }

    #[test]
    fn test_serde_round_trip() {
        let record = SessionRecord {
            id: "abc".to_string(),
            started_at: 1_000,
            expires_at: 2_000,
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: SessionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
