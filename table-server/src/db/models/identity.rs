//! Table Identity Key
//!
//! The composite key (phone, restaurant, location, table) that scopes one
//! diner's session and cart at one physical table during one visit. Both
//! session and order lookups key on this value; no ad-hoc string
//! concatenation of the tuple exists anywhere else.

use serde::{Deserialize, Serialize};

/// Composite identity of one diner at one ordering point.
///
/// `phone` must already be in canonical normalized form
/// (see [`crate::utils::validation::normalize_phone`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableIdentity {
    pub phone: String,
    pub restaurant_id: String,
    pub location_id: String,
    pub table_number: String,
}

impl TableIdentity {
    pub fn new(
        phone: impl Into<String>,
        restaurant_id: impl Into<String>,
        location_id: impl Into<String>,
        table_number: impl Into<String>,
    ) -> Self {
        Self {
            phone: phone.into(),
            restaurant_id: restaurant_id.into(),
            location_id: location_id.into(),
            table_number: table_number.into(),
        }
    }
}

impl std::fmt::Display for TableIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/table {} ({})",
            self.restaurant_id, self.location_id, self.table_number, self.phone
        )
    }
}
