//! Report Engine - read-only aggregate queries over stored orders

pub mod engine;

pub use engine::{ReportEngine, ItemCount, CategoryCount, HourCount};
