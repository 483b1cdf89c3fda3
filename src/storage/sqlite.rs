//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params, OptionalExtension};
use crate::{Result, Error};
use crate::model::{Customer, CustomerId, ItemId, MenuItem, NewCustomer, NewMenuItem, NewOrder, Order, OrderId};
use super::schema;

const CUSTOMER_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM customers WHERE customer_id = ?1)";
const MENU_ITEM_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM menu_items WHERE item_id = ?1)";
const INSERT_ORDER: &str = "INSERT INTO orders (customer_id, item_id, order_date) VALUES (?1, ?2, ?3)";

/// SQLite-backed storage for customers, menu items and orders.
///
/// One handle is opened at startup and lent to the writer and the report
/// engine; every write runs in SQLite's autocommit mode or in its own
/// transaction, so it is durable before the call returns.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        tracing::debug!("Opened store at {}", path.display());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    ///
    /// Reference checks belong to the writer's policy, so the declared
    /// foreign keys are switched off for this connection.
    fn initialize_schema(&self) -> Result<()> {
        self.conn.pragma_update(None, "foreign_keys", false)?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Read-only access for report queries
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    // ========== Customer Operations ==========

    /// Insert a customer, returning its new identity.
    ///
    /// Fails with [`Error::DuplicateKey`] when the email is already taken;
    /// the table is left untouched in that case.
    pub fn insert_customer(&self, customer: &NewCustomer) -> Result<CustomerId> {
        let inserted = self.conn.execute(
            "INSERT INTO customers (name, email, registration_date) VALUES (?1, ?2, ?3)",
            params![customer.name, customer.email, customer.registration_date],
        );

        match inserted {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(e) if is_unique_violation(&e) => Err(Error::DuplicateKey {
                email: customer.email.clone(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a customer by id
    pub fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>> {
        self.conn
            .query_row(
                "SELECT customer_id, name, email, registration_date FROM customers WHERE customer_id = ?1",
                [id],
                row_to_customer,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All customers in identity order
    pub fn list_customers(&self) -> Result<Vec<Customer>> {
        let mut stmt = self.conn.prepare(
            "SELECT customer_id, name, email, registration_date FROM customers ORDER BY customer_id"
        )?;

        let customers = stmt
            .query_map([], row_to_customer)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(customers)
    }

    pub fn customer_exists(&self, id: CustomerId) -> Result<bool> {
        exists(&self.conn, CUSTOMER_EXISTS, id)
    }

    /// Count all customers
    pub fn count_customers(&self) -> Result<usize> {
        count(&self.conn, "SELECT COUNT(*) FROM customers")
    }

    // ========== Menu Item Operations ==========

    /// Insert a menu item, returning its new identity
    pub fn insert_menu_item(&self, item: &NewMenuItem) -> Result<ItemId> {
        self.conn.execute(
            "INSERT INTO menu_items (item_name, category, price) VALUES (?1, ?2, ?3)",
            params![item.name, item.category, item.price],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a menu item by id
    pub fn get_menu_item(&self, id: ItemId) -> Result<Option<MenuItem>> {
        self.conn
            .query_row(
                "SELECT item_id, item_name, category, price FROM menu_items WHERE item_id = ?1",
                [id],
                row_to_menu_item,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All menu items in identity order
    pub fn list_menu_items(&self) -> Result<Vec<MenuItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT item_id, item_name, category, price FROM menu_items ORDER BY item_id"
        )?;

        let items = stmt
            .query_map([], row_to_menu_item)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(items)
    }

    pub fn menu_item_exists(&self, id: ItemId) -> Result<bool> {
        exists(&self.conn, MENU_ITEM_EXISTS, id)
    }

    /// Count all menu items
    pub fn count_menu_items(&self) -> Result<usize> {
        count(&self.conn, "SELECT COUNT(*) FROM menu_items")
    }

    // ========== Order Operations ==========

    /// Insert an order without looking at the referenced rows
    pub fn insert_order(&self, order: &NewOrder) -> Result<OrderId> {
        self.conn.execute(INSERT_ORDER, params![order.customer_id, order.item_id, order.ordered_at])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert an order after checking that its customer and item exist.
    ///
    /// The checks and the insert share one transaction.
    pub fn insert_order_checked(&self, order: &NewOrder) -> Result<OrderId> {
        let tx = self.conn.unchecked_transaction()?;

        if !exists(&tx, CUSTOMER_EXISTS, order.customer_id)? {
            return Err(Error::DanglingReference { entity: "customer", id: order.customer_id });
        }
        if !exists(&tx, MENU_ITEM_EXISTS, order.item_id)? {
            return Err(Error::DanglingReference { entity: "menu item", id: order.item_id });
        }

        tx.execute(INSERT_ORDER, params![order.customer_id, order.item_id, order.ordered_at])?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    /// All orders in identity order
    pub fn list_orders(&self) -> Result<Vec<Order>> {
        let mut stmt = self.conn.prepare(
            "SELECT order_id, customer_id, item_id, order_date FROM orders ORDER BY order_id"
        )?;

        let orders = stmt
            .query_map([], |row| {
                Ok(Order {
                    id: row.get(0)?,
                    customer_id: row.get(1)?,
                    item_id: row.get(2)?,
                    ordered_at: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(orders)
    }

    /// Count all orders
    pub fn count_orders(&self) -> Result<usize> {
        count(&self.conn, "SELECT COUNT(*) FROM orders")
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            customers: self.count_customers()?,
            menu_items: self.count_menu_items()?,
            orders: self.count_orders()?,
        })
    }
}

fn row_to_customer(row: &rusqlite::Row) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        registration_date: row.get(3)?,
    })
}

fn row_to_menu_item(row: &rusqlite::Row) -> rusqlite::Result<MenuItem> {
    Ok(MenuItem {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        price: row.get(3)?,
    })
}

fn count(conn: &Connection, sql: &str) -> Result<usize> {
    let count: i64 = conn.query_row(sql, [], |row| row.get(0))?;
    Ok(count as usize)
}

fn exists(conn: &Connection, sql: &str, id: i64) -> Result<bool> {
    let found: i64 = conn.query_row(sql, [id], |row| row.get(0))?;
    Ok(found == 1)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DbStats {
    pub customers: usize,
    pub menu_items: usize,
    pub orders: usize,
}
