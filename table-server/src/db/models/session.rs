//! Customer Session Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Phone-verification session (顾客验证会话)
///
/// Exactly one per (phone, restaurant, location, table) tuple, enforced by
/// a unique index. A fresh OTP request for an existing tuple rotates the
/// code and drops the verified flag; verification is required again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSession {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Normalized subscriber number, canonical identity key
    pub phone: String,
    /// Diner-supplied display name, trimmed
    pub name: String,
    pub restaurant_id: String,
    pub location_id: String,
    pub table_number: String,
    /// One-time code, cleared after successful verification
    #[serde(default)]
    pub otp_code: Option<String>,
    /// Code is unusable once this instant has passed
    #[serde(default)]
    pub otp_expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_verified: bool,
    /// Last successful verification
    #[serde(default)]
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomerSession {
    /// Whether the stored code can still be checked against
    pub fn code_usable(&self, now: DateTime<Utc>) -> bool {
        match (&self.otp_code, self.otp_expires_at) {
            (Some(_), Some(expires_at)) => now <= expires_at,
            _ => false,
        }
    }
}
