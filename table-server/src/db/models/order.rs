//! Customer Order Model
//!
//! A diner's running cart/ticket for one table visit. At most one order
//! with `Pending` status exists per identity tuple at any time; that order
//! is the only one the diner may mutate.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Kitchen workflow status
///
/// `PENDING → SUBMITTED → PREPARING → SERVED`, with `CANCELLED` reachable
/// from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Submitted,
    Preparing,
    Served,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Submitted => "SUBMITTED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Served => "SERVED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Served | OrderStatus::Cancelled)
    }

    /// Legal state-machine transitions
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Submitted)
                | (Submitted, Preparing)
                | (Preparing, Served)
                | (Pending, Cancelled)
                | (Submitted, Cancelled)
                | (Preparing, Cancelled)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "SUBMITTED" => Ok(OrderStatus::Submitted),
            "PREPARING" => Ok(OrderStatus::Preparing),
            "SERVED" => Ok(OrderStatus::Served),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// One line in an order's items list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Menu item reference; location-only items may lack a stable id
    #[serde(default)]
    pub item_id: Option<String>,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    /// Trimmed, defaults to empty; part of the merge key
    #[serde(default)]
    pub special_instructions: String,
}

impl OrderItem {
    /// Canonical merge identity: the stable item id when one exists,
    /// otherwise the item name, paired with the special instructions.
    pub fn merge_key(&self) -> (&str, &str) {
        (
            self.item_id.as_deref().unwrap_or(&self.name),
            &self.special_instructions,
        )
    }
}

/// Customer order entity (顾客订单)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerOrder {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub restaurant_id: String,
    pub location_id: String,
    pub table_number: String,
    pub customer_phone: String,
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Compare-and-swap token, bumped on every write
    #[serde(default)]
    pub revision: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomerOrder {
    /// Record id as a "table:id" string for API responses and lookups
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_string())
    }
}
