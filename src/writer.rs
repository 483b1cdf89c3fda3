//! Record writer
//!
//! The only write path into the store. Customers, menu items and orders are
//! append-only: each call inserts exactly one row or fails without a trace.

use crate::Result;
use crate::config::MenustatConfig;
use crate::model::{CustomerId, ItemId, NewCustomer, NewMenuItem, NewOrder, OrderId};
use crate::storage::SqliteStore;
use crate::validate;

/// Which checks run before a row is inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WritePolicy {
    /// Accept orders whose customer or item id has no row
    pub allow_dangling_references: bool,
    /// Reject malformed emails, dates, timestamps and negative prices
    pub check_formats: bool,
}

impl WritePolicy {
    pub fn from_config(config: &MenustatConfig) -> Self {
        let defaults = Self::default();
        Self {
            allow_dangling_references: config
                .allow_dangling_references
                .unwrap_or(defaults.allow_dangling_references),
            check_formats: config.check_formats.unwrap_or(defaults.check_formats),
        }
    }
}

/// Writer for customer, menu item and order rows
pub struct RecordWriter<'a> {
    store: &'a SqliteStore,
    policy: WritePolicy,
}

impl<'a> RecordWriter<'a> {
    /// Create a writer with the default policy
    pub fn new(store: &'a SqliteStore) -> Self {
        Self::with_policy(store, WritePolicy::default())
    }

    pub fn with_policy(store: &'a SqliteStore, policy: WritePolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    /// Register a customer.
    ///
    /// Fails with [`crate::Error::DuplicateKey`] when the email is taken.
    pub fn add_customer(&self, name: &str, email: &str, registration_date: &str) -> Result<CustomerId> {
        let customer = NewCustomer::new(name, email, registration_date);
        if self.policy.check_formats {
            validate::check_customer(&customer)?;
        }

        match self.store.insert_customer(&customer) {
            Ok(id) => {
                tracing::debug!("Added customer {} ({})", id, customer.email);
                Ok(id)
            }
            Err(e) => {
                tracing::debug!("Rejected customer {}: {}", customer.email, e);
                Err(e)
            }
        }
    }

    /// Add an item to the menu
    pub fn add_menu_item(&self, name: &str, category: &str, price: f64) -> Result<ItemId> {
        let item = NewMenuItem::new(name, category, price);
        if self.policy.check_formats {
            validate::check_menu_item(&item)?;
        }

        let id = self.store.insert_menu_item(&item)?;
        tracing::debug!("Added menu item {} ({} / {})", id, item.name, item.category);
        Ok(id)
    }

    /// Record an order.
    ///
    /// Unless dangling references are allowed, the customer and the item
    /// must already exist.
    pub fn add_order(&self, customer_id: CustomerId, item_id: ItemId, ordered_at: &str) -> Result<OrderId> {
        let order = NewOrder::new(customer_id, item_id, ordered_at);
        if self.policy.check_formats {
            validate::check_order(&order)?;
        }

        let inserted = if self.policy.allow_dangling_references {
            self.store.insert_order(&order)
        } else {
            self.store.insert_order_checked(&order)
        };

        match inserted {
            Ok(id) => {
                tracing::debug!("Added order {} (customer {}, item {})", id, customer_id, item_id);
                Ok(id)
            }
            Err(e) => {
                tracing::debug!("Rejected order for customer {}, item {}: {}", customer_id, item_id, e);
                Err(e)
            }
        }
    }
}
