//! Session-to-Order Binding
//!
//! The authorization gate in front of every cart mutation. Stateless per
//! call: verification is re-checked against the store on each request, so
//! a session rotated mid-visit is re-enforced immediately instead of
//! riding on a cached trust decision.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{CustomerSession, TableIdentity};
use crate::db::repository::SessionRepository;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct SessionGate {
    repo: SessionRepository,
}

impl SessionGate {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            repo: SessionRepository::new(db),
        }
    }

    /// Demand a verified session for the exact identity tuple.
    ///
    /// A session for a different table or location does not count; the
    /// tuple must match field for field.
    pub async fn require_verified(&self, identity: &TableIdentity) -> AppResult<CustomerSession> {
        match self.repo.find_by_identity(identity).await? {
            Some(session) if session.is_verified => Ok(session),
            _ => Err(AppError::forbidden(
                "Please verify your phone number before ordering",
            )),
        }
    }
}
