//! # menustat - order records and ordering reports
//!
//! Records customers, menu items and orders into a local SQLite store and
//! runs a fixed set of aggregate reports over them.
//!
//! menustat provides:
//! - A three-table relational schema created idempotently on open
//! - A record writer enforcing email uniqueness and reference existence
//! - A read-only report engine (top items, average orders, categories, peak hours)
//! - A dispatch table that keeps all console I/O in the binary

pub mod model;
pub mod storage;
pub mod writer;
pub mod report;
pub mod validate;
pub mod dispatch;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use model::{Customer, CustomerId, ItemId, MenuItem, NewCustomer, NewMenuItem, NewOrder, Order, OrderId};
pub use storage::SqliteStore;
pub use writer::{RecordWriter, WritePolicy};
pub use report::{CategoryCount, HourCount, ItemCount, ReportEngine};
pub use dispatch::{Action, MenuChoice, Outcome, dispatch};

/// Result type alias for menustat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for menustat operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("A customer with email {email:?} already exists")]
    DuplicateKey { email: String },

    #[error("Malformed {field}: {value:?}")]
    MalformedInput { field: &'static str, value: String },

    #[error("Unknown {entity} id {id}")]
    DanglingReference { entity: &'static str, id: i64 },

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Errors a user can fix by re-entering input; the session continues.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::DuplicateKey { .. }
                | Error::MalformedInput { .. }
                | Error::DanglingReference { .. }
                | Error::InvalidField { .. }
        )
    }
}
