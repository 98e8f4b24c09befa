//! Session record written at login.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::allow_list::normalize_email;
use crate::errors::CalcResult;

/// Default validity window of a session
pub const DEFAULT_VALIDITY_DAYS: i64 = 7;

/// Identity of the logged-in reader and its validity window.
///
/// Stored as JSON under [`SESSION_KEY`](super::SESSION_KEY).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub last_name: String,
    pub first_name: String,
    /// Always lowercase
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        email: &str,
        now: DateTime<Utc>,
        validity: Duration,
    ) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
            email: normalize_email(email),
            created_at: now,
            expires_at: now + validity,
        }
    }

    /// Valid up to and including `expires_at`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now <= self.expires_at
    }

    /// Time left before expiry, zero once expired
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
