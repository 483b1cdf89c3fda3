//! Report engine implementation
//!
//! Provides the fixed ordering reports:
//! - Top menu items by order count (grouped by item name)
//! - Average orders per ordering customer
//! - Orders per menu category
//! - Orders per hour of day
//!
//! Every report is a single aggregate query; ties in count come back in
//! whatever order SQLite's grouping produces.

use serde::{Deserialize, Serialize};
use crate::Result;
use crate::storage::SqliteStore;

/// Orders for one menu item name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCount {
    pub name: String,
    pub orders: u64,
}

/// Orders for one menu category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub orders: u64,
}

/// Orders placed within one hour of the day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourCount {
    /// Two-digit hour `00`..`23`; `None` for timestamps SQLite cannot read
    pub hour: Option<String>,
    pub orders: u64,
}

impl HourCount {
    /// Display label such as `13:00`
    pub fn label(&self) -> String {
        format!("{}:00", self.hour.as_deref().unwrap_or("??"))
    }
}

/// Report engine over a borrowed store
pub struct ReportEngine<'a> {
    store: &'a SqliteStore,
}

impl<'a> ReportEngine<'a> {
    /// Create a new report engine
    pub fn new(store: &'a SqliteStore) -> Self {
        Self { store }
    }

    /// Most ordered items, at most `limit` rows.
    ///
    /// Rows sharing an item name are merged into one line even when they are
    /// distinct menu items.
    pub fn top_menu_items(&self, limit: usize) -> Result<Vec<ItemCount>> {
        let mut stmt = self.store.conn().prepare(
            r#"
            SELECT menu_items.item_name, COUNT(*) AS order_count
            FROM orders
            JOIN menu_items ON orders.item_id = menu_items.item_id
            GROUP BY menu_items.item_name
            ORDER BY order_count DESC
            LIMIT ?1
            "#,
        )?;

        let rows = stmt
            .query_map([limit as i64], |row| {
                Ok(ItemCount {
                    name: row.get(0)?,
                    orders: row.get::<_, i64>(1)? as u64,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    /// Mean order count over customers with at least one order.
    ///
    /// Returns `None` when no orders exist.
    pub fn average_orders_per_customer(&self) -> Result<Option<f64>> {
        let avg: Option<f64> = self.store.conn().query_row(
            r#"
            SELECT AVG(order_count)
            FROM (
                SELECT customer_id, COUNT(*) AS order_count
                FROM orders
                GROUP BY customer_id
            )
            "#,
            [],
            |row| row.get(0),
        )?;
        Ok(avg)
    }

    /// Orders per category, busiest first
    pub fn orders_by_category(&self) -> Result<Vec<CategoryCount>> {
        let mut stmt = self.store.conn().prepare(
            r#"
            SELECT menu_items.category, COUNT(*) AS order_count
            FROM orders
            JOIN menu_items ON orders.item_id = menu_items.item_id
            GROUP BY menu_items.category
            ORDER BY order_count DESC
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(CategoryCount {
                    category: row.get(0)?,
                    orders: row.get::<_, i64>(1)? as u64,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    /// Orders per hour of day, busiest first. Hours without orders are absent.
    ///
    /// The hour is the two characters after `YYYY-MM-DD ` exactly as stored;
    /// a trailing UTC offset is not applied. Text without that prefix lands
    /// in the `None` bucket.
    pub fn peak_ordering_times(&self) -> Result<Vec<HourCount>> {
        let mut stmt = self.store.conn().prepare(
            r#"
            SELECT
                CASE WHEN order_date GLOB '[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9][ T][0-2][0-9]*'
                    THEN substr(order_date, 12, 2)
                END AS hour,
                COUNT(*) AS order_count
            FROM orders
            GROUP BY hour
            ORDER BY order_count DESC
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(HourCount {
                    hour: row.get(0)?,
                    orders: row.get::<_, i64>(1)? as u64,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }
}
