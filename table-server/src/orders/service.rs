//! Order Service
//!
//! Cart aggregation and the order state machine, behind the session gate.
//!
//! The pending order for a tuple is the one shared mutable resource:
//! every browser tab holding the same verified phone at the same table
//! mutates the same cart. Writes re-read the current document, merge in
//! memory and persist with a revision compare-and-swap; a lost race
//! retries the whole read-merge-write instead of overwriting.

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::cart::{self, IncomingLine};
use crate::db::models::{CustomerOrder, OrderItem, OrderStatus, TableIdentity};
use crate::db::repository::{OrderRepository, SessionRepository};
use crate::sessions::SessionGate;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// CAS conflicts are rare (a handful of devices per table); a short retry
/// budget is enough and keeps a pathological writer from spinning.
const MAX_CAS_RETRIES: usize = 3;

/// Raw cart line as supplied by the client, before normalization
#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub item_id: Option<String>,
    pub name: String,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub special_instructions: Option<String>,
}

/// Result of a cart mutation; `created` distinguishes a fresh cart from
/// an update to an existing one for event fan-out
#[derive(Debug, Clone)]
pub struct CartUpdate {
    pub order: CustomerOrder,
    pub created: bool,
}

/// Table session read model: all orders for the tuple plus the diner name
#[derive(Debug, Clone)]
pub struct OrdersView {
    pub orders: Vec<CustomerOrder>,
    pub customer_name: Option<String>,
}

#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    sessions: SessionRepository,
    gate: SessionGate,
}

impl OrderService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            sessions: SessionRepository::new(db.clone()),
            gate: SessionGate::new(db),
        }
    }

    /// All orders for the tuple, newest first, with the session's name
    pub async fn list_orders(&self, identity: &TableIdentity) -> AppResult<OrdersView> {
        let orders = self.orders.find_all_for_identity(identity).await?;
        let customer_name = self
            .sessions
            .find_by_identity(identity)
            .await?
            .map(|s| s.name);
        Ok(OrdersView {
            orders,
            customer_name,
        })
    }

    /// Add items to the diner's open cart, creating it when none exists.
    ///
    /// Requires a verified session for the tuple. Lines merge on
    /// (item identity, special instructions); matches sum quantities. A
    /// line matching an existing one may be a bare reference (id or name
    /// plus quantity); name and price are required only for new lines.
    pub async fn add_items(
        &self,
        identity: &TableIdentity,
        name: &str,
        items: Vec<NewCartItem>,
    ) -> AppResult<CartUpdate> {
        let session = self.gate.require_verified(identity).await?;

        if items.is_empty() {
            return Err(AppError::validation("At least one item is required"));
        }
        let incoming: Vec<IncomingLine> = items
            .into_iter()
            .map(normalize_incoming)
            .collect::<AppResult<_>>()?;

        let name = name.trim();
        let customer_name = if name.is_empty() { &session.name } else { name };

        for _ in 0..MAX_CAS_RETRIES {
            let now = Utc::now();
            match self.orders.find_pending(identity).await? {
                Some(order) => {
                    let id = order
                        .id
                        .clone()
                        .ok_or_else(|| AppError::internal("Order record without id"))?;
                    let mut lines = order.items.clone();
                    cart::merge_lines(&mut lines, incoming.iter().cloned())?;

                    if let Some(updated) = self
                        .orders
                        .try_update_items(&id, &lines, customer_name, order.revision, now)
                        .await?
                    {
                        return Ok(CartUpdate {
                            order: updated,
                            created: false,
                        });
                    }
                    // Revision moved under us; re-read and merge again
                    tracing::debug!(identity = %identity, "Cart CAS conflict, retrying");
                }
                None => {
                    // A brand-new cart has no lines to merge into, so every
                    // incoming line must carry the full payload
                    let lines: Vec<OrderItem> = incoming
                        .iter()
                        .cloned()
                        .map(IncomingLine::into_item)
                        .collect::<AppResult<_>>()?;

                    let order = CustomerOrder {
                        id: None,
                        restaurant_id: identity.restaurant_id.clone(),
                        location_id: identity.location_id.clone(),
                        table_number: identity.table_number.clone(),
                        customer_phone: identity.phone.clone(),
                        customer_name: customer_name.to_string(),
                        items: lines,
                        status: OrderStatus::Pending,
                        revision: 0,
                        created_at: now,
                        updated_at: now,
                    };

                    // Guarded create: the store transaction refuses when a
                    // pending order for the tuple appeared since our read,
                    // so two concurrent first adds cannot open two carts
                    if self.orders.try_create_pending(order).await? {
                        let stored = self
                            .orders
                            .find_pending(identity)
                            .await?
                            .ok_or_else(|| AppError::internal("Created order vanished"))?;
                        return Ok(CartUpdate {
                            order: stored,
                            created: true,
                        });
                    }
                    // Another writer opened the cart first; merge into it
                    tracing::debug!(identity = %identity, "Concurrent cart creation, retrying");
                }
            }
        }

        Err(AppError::database(
            "Cart update kept conflicting, please retry",
        ))
    }

    /// Remove the line at `index` from the open cart
    pub async fn remove_item(
        &self,
        identity: &TableIdentity,
        index: usize,
    ) -> AppResult<CustomerOrder> {
        self.mutate_lines(identity, |lines| {
            if index >= lines.len() {
                return Err(AppError::not_found("No such item in the cart"));
            }
            lines.remove(index);
            Ok(())
        })
        .await
    }

    /// Set the quantity of the line at `index`; below 1 removes the line
    pub async fn update_quantity(
        &self,
        identity: &TableIdentity,
        index: usize,
        quantity: i64,
    ) -> AppResult<CustomerOrder> {
        self.mutate_lines(identity, |lines| {
            if index >= lines.len() {
                return Err(AppError::not_found("No such item in the cart"));
            }
            if quantity < 1 {
                lines.remove(index);
            } else {
                lines[index].quantity = quantity;
            }
            Ok(())
        })
        .await
    }

    /// Shared read-mutate-CAS loop for line edits on the pending order
    async fn mutate_lines(
        &self,
        identity: &TableIdentity,
        mutate: impl Fn(&mut Vec<OrderItem>) -> AppResult<()>,
    ) -> AppResult<CustomerOrder> {
        self.gate.require_verified(identity).await?;

        for _ in 0..MAX_CAS_RETRIES {
            let order = self
                .orders
                .find_pending(identity)
                .await?
                .ok_or_else(|| AppError::not_found("No open cart for this table"))?;
            let id = order
                .id
                .clone()
                .ok_or_else(|| AppError::internal("Order record without id"))?;

            let mut lines = order.items.clone();
            mutate(&mut lines)?;

            if let Some(updated) = self
                .orders
                .try_update_items(&id, &lines, &order.customer_name, order.revision, Utc::now())
                .await?
            {
                return Ok(updated);
            }
            tracing::debug!(identity = %identity, "Cart CAS conflict, retrying");
        }

        Err(AppError::database(
            "Cart update kept conflicting, please retry",
        ))
    }

    /// Submit the open cart to the kitchen.
    ///
    /// The order must belong to the tuple and still be pending; anything
    /// else rejects with not-found, which also makes a double submit safe.
    pub async fn submit_order(
        &self,
        order_id: &str,
        identity: &TableIdentity,
    ) -> AppResult<CustomerOrder> {
        self.gate.require_verified(identity).await?;

        let not_found = || AppError::not_found("Order already submitted or not found");

        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(not_found)?;

        let matches_identity = order.customer_phone == identity.phone
            && order.restaurant_id == identity.restaurant_id
            && order.location_id == identity.location_id
            && order.table_number == identity.table_number;
        if !matches_identity || order.status != OrderStatus::Pending {
            return Err(not_found());
        }

        if order.items.is_empty() {
            return Err(AppError::empty_cart(
                "Cannot submit an empty cart. Please add items first.",
            ));
        }

        let id = order
            .id
            .ok_or_else(|| AppError::internal("Order record without id"))?;
        let submitted = self
            .orders
            .try_transition(&id, OrderStatus::Pending, OrderStatus::Submitted, Utc::now())
            .await?
            // Lost the race against another submit: no longer pending
            .ok_or_else(not_found)?;

        tracing::info!(order_id = %order_id, identity = %identity, "Order submitted to kitchen");
        Ok(submitted)
    }

    /// Kitchen-side status transition (staff action).
    ///
    /// Legality comes from the state machine; an illegal hop or a
    /// concurrent change rejects without touching the document.
    pub async fn update_status(
        &self,
        order_id: &str,
        next: OrderStatus,
    ) -> AppResult<CustomerOrder> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;

        if !order.status.can_transition_to(next) {
            return Err(AppError::validation(format!(
                "Cannot move order from {} to {}",
                order.status, next
            )));
        }

        let id = order
            .id
            .ok_or_else(|| AppError::internal("Order record without id"))?;
        self.orders
            .try_transition(&id, order.status, next, Utc::now())
            .await?
            .ok_or_else(|| AppError::validation("Order status changed, please refresh"))
    }
}

/// Normalize a raw client line, tolerating a partial payload.
///
/// Quantity defaults to 1 when absent or below 1; instructions are
/// trimmed and default to empty; a blank item id or name counts as
/// absent, but at least one of the two must be present. Price, when
/// supplied, must be a finite non-negative number; whether it is
/// mandatory is decided at merge time.
fn normalize_incoming(raw: NewCartItem) -> AppResult<IncomingLine> {
    let item_id = raw
        .item_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());

    let name = Some(raw.name.trim().to_string()).filter(|n| !n.is_empty());
    if let Some(n) = &name {
        validate_required_text(n, "item name", MAX_NAME_LEN)?;
    }
    if item_id.is_none() && name.is_none() {
        return Err(AppError::validation(
            "Each item needs an item_id or a name",
        ));
    }

    if let Some(price) = raw.price
        && (!price.is_finite() || price < 0.0)
    {
        return Err(AppError::validation("Invalid item price"));
    }

    let special_instructions = raw
        .special_instructions
        .unwrap_or_default()
        .trim()
        .to_string();
    if special_instructions.len() > MAX_NOTE_LEN {
        return Err(AppError::validation(format!(
            "Special instructions too long (max {MAX_NOTE_LEN} chars)"
        )));
    }

    Ok(IncomingLine {
        item_id,
        name,
        price: raw.price,
        quantity: raw.quantity.filter(|q| *q >= 1).unwrap_or(1),
        special_instructions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::CustomerSession;

    const PHONE: &str = "919876543210";

    fn identity() -> TableIdentity {
        TableIdentity::new(PHONE, "rest-1", "loc-1", "12")
    }

    fn line(item_id: Option<&str>, name: &str, quantity: Option<i64>, note: &str) -> NewCartItem {
        NewCartItem {
            item_id: item_id.map(Into::into),
            name: name.into(),
            price: Some(250.0),
            quantity,
            special_instructions: if note.is_empty() {
                None
            } else {
                Some(note.into())
            },
        }
    }

    async fn setup() -> (OrderService, Surreal<Db>) {
        let db = DbService::open_in_memory().await.unwrap().db;
        (OrderService::new(db.clone()), db)
    }

    /// Plant a verified session for the given tuple
    async fn verify(db: &Surreal<Db>, identity: &TableIdentity) {
        let now = Utc::now();
        SessionRepository::new(db.clone())
            .create(CustomerSession {
                id: None,
                phone: identity.phone.clone(),
                name: "Asha".into(),
                restaurant_id: identity.restaurant_id.clone(),
                location_id: identity.location_id.clone(),
                table_number: identity.table_number.clone(),
                otp_code: None,
                otp_expires_at: None,
                is_verified: true,
                verified_at: Some(now),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
    }

    async fn pending_count(db: &Surreal<Db>, identity: &TableIdentity) -> usize {
        OrderRepository::new(db.clone())
            .find_all_for_identity(identity)
            .await
            .unwrap()
            .into_iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .count()
    }

    #[tokio::test]
    async fn add_without_verified_session_is_forbidden() {
        let (service, _db) = setup().await;

        let err = service
            .add_items(&identity(), "Asha", vec![line(Some("x1"), "Paneer Tikka", None, "")])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn session_at_another_table_does_not_authorize() {
        let (service, db) = setup().await;
        // Verified at table 13, ordering at table 12
        verify(&db, &TableIdentity::new(PHONE, "rest-1", "loc-1", "13")).await;

        let err = service
            .add_items(&identity(), "Asha", vec![line(Some("x1"), "Paneer Tikka", None, "")])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn first_add_creates_pending_cart_with_normalized_lines() {
        let (service, db) = setup().await;
        verify(&db, &identity()).await;

        let update = service
            .add_items(
                &identity(),
                "Asha",
                vec![NewCartItem {
                    item_id: Some("x1".into()),
                    name: "  Paneer Tikka  ".into(),
                    price: Some(250.0),
                    quantity: None,
                    special_instructions: Some("  less spicy  ".into()),
                }],
            )
            .await
            .unwrap();

        assert!(update.created);
        let order = update.order;
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].name, "Paneer Tikka");
        assert_eq!(order.items[0].quantity, 1);
        assert_eq!(order.items[0].special_instructions, "less spicy");
        assert_eq!(order.customer_name, "Asha");
    }

    #[tokio::test]
    async fn empty_items_array_is_rejected() {
        let (service, db) = setup().await;
        verify(&db, &identity()).await;

        let err = service.add_items(&identity(), "Asha", vec![]).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let (service, db) = setup().await;
        verify(&db, &identity()).await;

        let mut bad = line(Some("x1"), "Paneer Tikka", None, "");
        bad.price = Some(-1.0);
        let err = service
            .add_items(&identity(), "Asha", vec![bad])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn separate_adds_merge_into_one_line() {
        let (service, db) = setup().await;
        verify(&db, &identity()).await;

        service
            .add_items(&identity(), "Asha", vec![line(Some("x1"), "Paneer Tikka", Some(2), "less spicy")])
            .await
            .unwrap();
        let update = service
            .add_items(&identity(), "Asha", vec![line(Some("x1"), "Paneer Tikka", Some(1), "less spicy")])
            .await
            .unwrap();

        assert!(!update.created);
        assert_eq!(update.order.items.len(), 1);
        assert_eq!(update.order.items[0].quantity, 3);
        assert_eq!(pending_count(&db, &identity()).await, 1);
    }

    #[tokio::test]
    async fn readd_by_item_id_without_name_or_price_merges() {
        let (service, db) = setup().await;
        verify(&db, &identity()).await;

        service
            .add_items(&identity(), "Asha", vec![line(Some("x1"), "Paneer Tikka", Some(2), "less spicy")])
            .await
            .unwrap();

        // Re-add carries only the id, quantity and instructions
        let update = service
            .add_items(
                &identity(),
                "Asha",
                vec![NewCartItem {
                    item_id: Some("x1".into()),
                    name: String::new(),
                    price: None,
                    quantity: Some(1),
                    special_instructions: Some("less spicy".into()),
                }],
            )
            .await
            .unwrap();

        assert_eq!(update.order.items.len(), 1);
        assert_eq!(update.order.items[0].quantity, 3);
        assert_eq!(update.order.items[0].price, 250.0);
    }

    #[tokio::test]
    async fn bare_reference_to_an_unknown_line_is_rejected() {
        let (service, db) = setup().await;
        verify(&db, &identity()).await;

        service
            .add_items(&identity(), "Asha", vec![line(Some("x1"), "Paneer Tikka", Some(1), "")])
            .await
            .unwrap();

        let err = service
            .add_items(
                &identity(),
                "Asha",
                vec![NewCartItem {
                    item_id: Some("x9".into()),
                    name: String::new(),
                    price: None,
                    quantity: Some(1),
                    special_instructions: None,
                }],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn item_without_id_and_name_is_rejected() {
        let (service, db) = setup().await;
        verify(&db, &identity()).await;

        let err = service
            .add_items(
                &identity(),
                "Asha",
                vec![NewCartItem {
                    item_id: None,
                    name: "   ".into(),
                    price: Some(100.0),
                    quantity: Some(1),
                    special_instructions: None,
                }],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn concurrent_first_adds_keep_a_single_pending_order() {
        let (service, db) = setup().await;
        verify(&db, &identity()).await;

        let id = identity();
        let first = service.add_items(
            &id,
            "Asha",
            vec![line(Some("x1"), "Paneer Tikka", Some(1), "")],
        );
        let second = service.add_items(
            &id,
            "Asha",
            vec![line(Some("x2"), "Dal Makhani", Some(1), "")],
        );
        let (first, second) = tokio::join!(first, second);
        first.unwrap();
        second.unwrap();

        assert_eq!(pending_count(&db, &identity()).await, 1);
        let order = OrderRepository::new(db.clone())
            .find_pending(&identity())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.items.len(), 2);
    }

    #[tokio::test]
    async fn different_instructions_stay_separate_lines() {
        let (service, db) = setup().await;
        verify(&db, &identity()).await;

        service
            .add_items(&identity(), "Asha", vec![line(Some("x1"), "Paneer Tikka", Some(1), "less spicy")])
            .await
            .unwrap();
        let update = service
            .add_items(&identity(), "Asha", vec![line(Some("x1"), "Paneer Tikka", Some(1), "extra spicy")])
            .await
            .unwrap();

        assert_eq!(update.order.items.len(), 2);
    }

    #[tokio::test]
    async fn remove_and_requantify_lines() {
        let (service, db) = setup().await;
        verify(&db, &identity()).await;

        service
            .add_items(
                &identity(),
                "Asha",
                vec![
                    line(Some("x1"), "Paneer Tikka", Some(2), ""),
                    line(Some("x2"), "Dal Makhani", Some(1), ""),
                ],
            )
            .await
            .unwrap();

        let order = service.update_quantity(&identity(), 0, 5).await.unwrap();
        assert_eq!(order.items[0].quantity, 5);

        // Quantity below 1 removes the line
        let order = service.update_quantity(&identity(), 0, 0).await.unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].name, "Dal Makhani");

        let order = service.remove_item(&identity(), 0).await.unwrap();
        assert!(order.items.is_empty());

        let err = service.remove_item(&identity(), 5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn submitting_empty_cart_fails_and_stays_pending() {
        let (service, db) = setup().await;
        verify(&db, &identity()).await;

        service
            .add_items(&identity(), "Asha", vec![line(Some("x1"), "Paneer Tikka", Some(1), "")])
            .await
            .unwrap();
        let order = service.remove_item(&identity(), 0).await.unwrap();
        let order_id = order.id_string().unwrap();

        let err = service.submit_order(&order_id, &identity()).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyCart(_)));

        let still = OrderRepository::new(db.clone())
            .find_by_id(&order_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(still.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn submit_transitions_and_double_submit_rejects() {
        let (service, db) = setup().await;
        verify(&db, &identity()).await;

        let update = service
            .add_items(&identity(), "Asha", vec![line(Some("x1"), "Paneer Tikka", Some(2), "")])
            .await
            .unwrap();
        let order_id = update.order.id_string().unwrap();

        let submitted = service.submit_order(&order_id, &identity()).await.unwrap();
        assert_eq!(submitted.status, OrderStatus::Submitted);

        let err = service.submit_order(&order_id, &identity()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn submit_requires_matching_identity() {
        let (service, db) = setup().await;
        verify(&db, &identity()).await;
        let other = TableIdentity::new(PHONE, "rest-1", "loc-1", "13");
        verify(&db, &other).await;

        let update = service
            .add_items(&identity(), "Asha", vec![line(Some("x1"), "Paneer Tikka", Some(1), "")])
            .await
            .unwrap();
        let order_id = update.order.id_string().unwrap();

        // Verified session at another table cannot submit this order
        let err = service.submit_order(&order_id, &other).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn add_after_submit_opens_a_new_cart() {
        let (service, db) = setup().await;
        verify(&db, &identity()).await;

        let first = service
            .add_items(&identity(), "Asha", vec![line(Some("x1"), "Paneer Tikka", Some(1), "")])
            .await
            .unwrap();
        let first_id = first.order.id_string().unwrap();
        service.submit_order(&first_id, &identity()).await.unwrap();

        let second = service
            .add_items(&identity(), "Asha", vec![line(Some("x2"), "Dal Makhani", Some(1), "")])
            .await
            .unwrap();

        assert!(second.created);
        assert_ne!(second.order.id_string().unwrap(), first_id);
        assert_eq!(pending_count(&db, &identity()).await, 1);

        let view = service.list_orders(&identity()).await.unwrap();
        assert_eq!(view.orders.len(), 2);
        assert_eq!(view.customer_name.as_deref(), Some("Asha"));
    }

    #[tokio::test]
    async fn kitchen_walks_the_status_chain() {
        let (service, db) = setup().await;
        verify(&db, &identity()).await;

        let update = service
            .add_items(&identity(), "Asha", vec![line(Some("x1"), "Paneer Tikka", Some(1), "")])
            .await
            .unwrap();
        let order_id = update.order.id_string().unwrap();
        service.submit_order(&order_id, &identity()).await.unwrap();

        let order = service
            .update_status(&order_id, OrderStatus::Preparing)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);

        let order = service
            .update_status(&order_id, OrderStatus::Served)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Served);

        // Terminal: nothing moves a served order
        let err = service
            .update_status(&order_id, OrderStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn illegal_status_hop_is_rejected() {
        let (service, db) = setup().await;
        verify(&db, &identity()).await;

        let update = service
            .add_items(&identity(), "Asha", vec![line(Some("x1"), "Paneer Tikka", Some(1), "")])
            .await
            .unwrap();
        let order_id = update.order.id_string().unwrap();

        let err = service
            .update_status(&order_id, OrderStatus::Served)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Cancelling a pending order is a legal staff action
        let order = service
            .update_status(&order_id, OrderStatus::Cancelled)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
    }
}
