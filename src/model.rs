//! Record types for the three stored entities
//!
//! Persisted rows carry their auto-assigned identity; the `New*` payloads
//! are what the writer accepts before the store assigns one.

use serde::{Deserialize, Serialize};

pub type CustomerId = i64;
pub type ItemId = i64;
pub type OrderId = i64;

/// A registered customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    /// Calendar date as typed, e.g. `2024-05-01`
    pub registration_date: String,
}

/// An entry on the menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub price: f64,
}

/// One ordered item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub item_id: ItemId,
    /// Date and time as typed, e.g. `2024-05-01 13:45:00`
    pub ordered_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub registration_date: String,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, email: impl Into<String>, registration_date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            registration_date: registration_date.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub category: String,
    pub price: f64,
}

impl NewMenuItem {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub item_id: ItemId,
    pub ordered_at: String,
}

impl NewOrder {
    pub fn new(customer_id: CustomerId, item_id: ItemId, ordered_at: impl Into<String>) -> Self {
        Self {
            customer_id,
            item_id,
            ordered_at: ordered_at.into(),
        }
    }
}
