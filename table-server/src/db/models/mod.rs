//! Database Models
//!
//! Document shapes stored in SurrealDB plus the shared identity key type.

pub mod identity;
pub mod order;
pub mod serde_helpers;
pub mod session;

pub use identity::TableIdentity;
pub use order::{CustomerOrder, OrderItem, OrderStatus};
pub use session::CustomerSession;
