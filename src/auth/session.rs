//! In-memory session state.
//!
//! At most one token is live per process. It is acquired once at startup,
//! read-only afterwards, and shared across all button handlers without
//! locking. There is no refresh path: if the vendor expires the token
//! mid-run, individual commands fail with `Unauthorized` until the
//! process is restarted.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct SessionData {
    pub token: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(token: String, username: String) -> Self {
        Self {
            token,
            username,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = SessionData::new("T123".to_string(), "u".to_string());
        assert_eq!(session.token, "T123");
        assert_eq!(session.username, "u");
        assert!(session.created_at <= Utc::now());
    }
}
