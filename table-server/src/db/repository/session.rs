//! Customer Session Repository
//!
//! One session document per identity tuple; uniqueness is backed by the
//! `uniq_session_identity` index.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{CustomerSession, TableIdentity};
use chrono::{DateTime, Utc};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "customer_session";

#[derive(Clone)]
pub struct SessionRepository {
    base: BaseRepository,
}

impl SessionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find the session for an exact identity tuple
    pub async fn find_by_identity(
        &self,
        identity: &TableIdentity,
    ) -> RepoResult<Option<CustomerSession>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM customer_session \
                 WHERE restaurant_id = $restaurant_id \
                   AND location_id = $location_id \
                   AND table_number = $table_number \
                   AND phone = $phone \
                 LIMIT 1",
            )
            .bind(("restaurant_id", identity.restaurant_id.clone()))
            .bind(("location_id", identity.location_id.clone()))
            .bind(("table_number", identity.table_number.clone()))
            .bind(("phone", identity.phone.clone()))
            .await?;
        let sessions: Vec<CustomerSession> = result.take(0)?;
        Ok(sessions.into_iter().next())
    }

    /// Create a new session document
    pub async fn create(&self, session: CustomerSession) -> RepoResult<CustomerSession> {
        let created: Option<CustomerSession> =
            self.base.db().create(TABLE).content(session).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create session".to_string()))
    }

    /// Rotate the one-time code on an existing session.
    ///
    /// Resets the verified flag: after a reissue the previous code (and any
    /// previous verification) is void and the diner must verify again.
    pub async fn rotate_code(
        &self,
        id: &RecordId,
        name: &str,
        code: &str,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> RepoResult<CustomerSession> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET \
                    name = $name, \
                    otp_code = $code, \
                    otp_expires_at = $expires_at, \
                    is_verified = false, \
                    verified_at = NONE, \
                    updated_at = $now \
                 RETURN AFTER",
            )
            .bind(("id", id.clone()))
            .bind(("name", name.to_string()))
            .bind(("code", code.to_string()))
            .bind(("expires_at", expires_at))
            .bind(("now", now))
            .await?;
        let sessions: Vec<CustomerSession> = result.take(0)?;
        sessions
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Session {id} not found")))
    }

    /// Flip a session to verified and consume the code (single-use)
    pub async fn mark_verified(
        &self,
        id: &RecordId,
        now: DateTime<Utc>,
    ) -> RepoResult<CustomerSession> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET \
                    is_verified = true, \
                    verified_at = $now, \
                    otp_code = NONE, \
                    otp_expires_at = NONE, \
                    updated_at = $now \
                 RETURN AFTER",
            )
            .bind(("id", id.clone()))
            .bind(("now", now))
            .await?;
        let sessions: Vec<CustomerSession> = result.take(0)?;
        sessions
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Session {id} not found")))
    }
}
