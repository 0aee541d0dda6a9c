//! Customer Order Repository
//!
//! Reads key on the identity tuple; writes are conditional updates that
//! compare-and-swap on `revision` (item merges) or on `status`
//! (state-machine transitions), so two concurrent writers cannot silently
//! lose each other's update. A conditional update that matched nothing
//! returns `None` and the caller decides whether to retry or reject.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{CustomerOrder, OrderItem, OrderStatus, TableIdentity};
use chrono::{DateTime, Utc};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "customer_order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a pending order, guarded against a concurrent one.
    ///
    /// The whole check-and-create runs in one store transaction: when a
    /// pending order for the tuple already exists the transaction aborts
    /// and this returns `false`, leaving the existing cart untouched. A
    /// commit lost to a concurrent write also reports `false`; the caller
    /// re-reads and merges instead.
    pub async fn try_create_pending(&self, order: CustomerOrder) -> RepoResult<bool> {
        let response = self
            .base
            .db()
            .query(
                "BEGIN; \
                 LET $existing = (SELECT VALUE id FROM customer_order \
                    WHERE restaurant_id = $restaurant_id \
                      AND location_id = $location_id \
                      AND table_number = $table_number \
                      AND customer_phone = $phone \
                      AND status = $status); \
                 IF array::len($existing) > 0 { THROW 'pending_exists' }; \
                 CREATE customer_order CONTENT $content; \
                 COMMIT;",
            )
            .bind(("restaurant_id", order.restaurant_id.clone()))
            .bind(("location_id", order.location_id.clone()))
            .bind(("table_number", order.table_number.clone()))
            .bind(("phone", order.customer_phone.clone()))
            .bind(("status", OrderStatus::Pending.as_str()))
            .bind(("content", order))
            .await?;

        match response.check() {
            Ok(_) => Ok(true),
            Err(e) => {
                let msg = e.to_string();
                if msg.contains("pending_exists") || msg.contains("conflict") {
                    Ok(false)
                } else {
                    Err(RepoError::Database(msg))
                }
            }
        }
    }

    /// Find order by "table:id" string
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<CustomerOrder>> {
        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid order ID: {id}")))?;
        let order: Option<CustomerOrder> = self.base.db().select(record_id).await?;
        Ok(order)
    }

    /// The diner's open cart: the single PENDING order for the tuple
    pub async fn find_pending(
        &self,
        identity: &TableIdentity,
    ) -> RepoResult<Option<CustomerOrder>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM customer_order \
                 WHERE restaurant_id = $restaurant_id \
                   AND location_id = $location_id \
                   AND table_number = $table_number \
                   AND customer_phone = $phone \
                   AND status = $status \
                 LIMIT 1",
            )
            .bind(("restaurant_id", identity.restaurant_id.clone()))
            .bind(("location_id", identity.location_id.clone()))
            .bind(("table_number", identity.table_number.clone()))
            .bind(("phone", identity.phone.clone()))
            .bind(("status", OrderStatus::Pending.as_str()))
            .await?;
        let orders: Vec<CustomerOrder> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// All orders for the tuple, newest first (table session screen)
    pub async fn find_all_for_identity(
        &self,
        identity: &TableIdentity,
    ) -> RepoResult<Vec<CustomerOrder>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM customer_order \
                 WHERE restaurant_id = $restaurant_id \
                   AND location_id = $location_id \
                   AND table_number = $table_number \
                   AND customer_phone = $phone \
                 ORDER BY created_at DESC",
            )
            .bind(("restaurant_id", identity.restaurant_id.clone()))
            .bind(("location_id", identity.location_id.clone()))
            .bind(("table_number", identity.table_number.clone()))
            .bind(("phone", identity.phone.clone()))
            .await?;
        let orders: Vec<CustomerOrder> = result.take(0)?;
        Ok(orders)
    }

    /// Replace the line list, guarded by the expected revision.
    ///
    /// Returns `None` when another writer got there first.
    pub async fn try_update_items(
        &self,
        id: &RecordId,
        items: &[OrderItem],
        customer_name: &str,
        expected_revision: u64,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<CustomerOrder>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET \
                    items = $items, \
                    customer_name = $customer_name, \
                    revision = revision + 1, \
                    updated_at = $now \
                 WHERE revision = $expected_revision \
                 RETURN AFTER",
            )
            .bind(("id", id.clone()))
            .bind(("items", items.to_vec()))
            .bind(("customer_name", customer_name.to_string()))
            .bind(("expected_revision", expected_revision))
            .bind(("now", now))
            .await?;
        let orders: Vec<CustomerOrder> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Transition status, guarded by the expected current status.
    ///
    /// The guard makes double-submit reject instead of duplicating: the
    /// second writer sees `None` because the order is no longer in `from`.
    pub async fn try_transition(
        &self,
        id: &RecordId,
        from: OrderStatus,
        to: OrderStatus,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<CustomerOrder>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET \
                    status = $to, \
                    revision = revision + 1, \
                    updated_at = $now \
                 WHERE status = $from \
                 RETURN AFTER",
            )
            .bind(("id", id.clone()))
            .bind(("to", to.as_str()))
            .bind(("from", from.as_str()))
            .bind(("now", now))
            .await?;
        let orders: Vec<CustomerOrder> = result.take(0)?;
        Ok(orders.into_iter().next())
    }
}
