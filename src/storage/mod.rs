//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - customers(customer_id, name, email UNIQUE, registration_date)
//! - menu_items(item_id, item_name, category, price)
//! - orders(order_id, customer_id, item_id, order_date)

pub mod schema;
pub mod sqlite;

pub use sqlite::{SqliteStore, DbStats};
