//! Database Module
//!
//! Embedded SurrealDB connection and schema definitions.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "tableorder";
const DATABASE: &str = "main";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at the given path
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        Self::prepare(db).await
    }

    /// Open a throwaway in-memory database (tests, local experiments)
    pub async fn open_in_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;

        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!("Database connection established (embedded SurrealDB)");
        Ok(Self { db })
    }
}

/// Schema definitions, idempotent (IF NOT EXISTS)
///
/// The unique session index enforces the one-session-per-tuple invariant
/// at the storage layer rather than in application code.
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS customer_session SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS uniq_session_identity ON customer_session
            FIELDS restaurant_id, location_id, table_number, phone UNIQUE;

        DEFINE TABLE IF NOT EXISTS customer_order SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx_order_identity ON customer_order
            FIELDS restaurant_id, location_id, table_number, customer_phone;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{CustomerSession, TableIdentity};
    use crate::db::repository::{RepoError, SessionRepository};
    use chrono::Utc;

    fn session(phone: &str) -> CustomerSession {
        let now = Utc::now();
        CustomerSession {
            id: None,
            phone: phone.into(),
            name: "Asha".into(),
            restaurant_id: "rest-1".into(),
            location_id: "loc-1".into(),
            table_number: "12".into(),
            otp_code: Some("123456".into()),
            otp_expires_at: Some(now),
            is_verified: false,
            verified_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn disk_backed_database_persists_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.db");
        let service = DbService::new(&path.to_string_lossy()).await.unwrap();

        let repo = SessionRepository::new(service.db.clone());
        repo.create(session("919876543210")).await.unwrap();

        let identity = TableIdentity::new("919876543210", "rest-1", "loc-1", "12");
        let found = repo.find_by_identity(&identity).await.unwrap().unwrap();
        assert_eq!(found.name, "Asha");
    }

    #[tokio::test]
    async fn duplicate_session_tuple_is_rejected_by_the_index() {
        let service = DbService::open_in_memory().await.unwrap();
        let repo = SessionRepository::new(service.db.clone());

        repo.create(session("919876543210")).await.unwrap();
        let err = repo.create(session("919876543210")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_) | RepoError::Database(_)));
    }
}
