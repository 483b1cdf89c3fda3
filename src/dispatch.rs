//! Command dispatch table
//!
//! Maps a menu choice and its collected arguments to exactly one writer or
//! report operation. Nothing here prompts or prints; the binary owns the
//! console and renders the returned [`Outcome`].

use std::fmt;
use std::str::FromStr;
use serde::Serialize;
use crate::{Error, Result};
use crate::model::{CustomerId, ItemId, NewCustomer, NewMenuItem, NewOrder, OrderId};
use crate::report::{CategoryCount, HourCount, ItemCount, ReportEngine};
use crate::storage::SqliteStore;
use crate::writer::{RecordWriter, WritePolicy};

/// Entries of the numbered interactive menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuChoice {
    AddCustomer,
    AddMenuItem,
    AddOrder,
    TopMenuItems,
    AverageOrders,
    OrdersByCategory,
    PeakOrderingTimes,
    Exit,
}

impl MenuChoice {
    /// Menu key typed by the user
    pub fn key(&self) -> &'static str {
        match self {
            MenuChoice::AddCustomer => "1",
            MenuChoice::AddMenuItem => "2",
            MenuChoice::AddOrder => "3",
            MenuChoice::TopMenuItems => "4",
            MenuChoice::AverageOrders => "5",
            MenuChoice::OrdersByCategory => "6",
            MenuChoice::PeakOrderingTimes => "7",
            MenuChoice::Exit => "8",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::AddCustomer => "Add Customer",
            MenuChoice::AddMenuItem => "Add Menu Item",
            MenuChoice::AddOrder => "Add Order",
            MenuChoice::TopMenuItems => "Top Menu Items",
            MenuChoice::AverageOrders => "Average Orders Per Customer",
            MenuChoice::OrdersByCategory => "Orders by Category",
            MenuChoice::PeakOrderingTimes => "Peak Ordering Times",
            MenuChoice::Exit => "Exit",
        }
    }

    /// Get all menu choices in display order
    pub fn all() -> &'static [MenuChoice] {
        &[
            MenuChoice::AddCustomer,
            MenuChoice::AddMenuItem,
            MenuChoice::AddOrder,
            MenuChoice::TopMenuItems,
            MenuChoice::AverageOrders,
            MenuChoice::OrdersByCategory,
            MenuChoice::PeakOrderingTimes,
            MenuChoice::Exit,
        ]
    }

    /// Field prompts to collect before the choice can be dispatched
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            MenuChoice::AddCustomer => &["customer name", "customer email", "registration date (YYYY-MM-DD)"],
            MenuChoice::AddMenuItem => &["menu item name", "menu item category", "menu item price"],
            MenuChoice::AddOrder => &["customer ID", "menu item ID", "order date and time (YYYY-MM-DD HH:MM:SS)"],
            _ => &[],
        }
    }
}

impl FromStr for MenuChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        MenuChoice::all()
            .iter()
            .copied()
            .find(|choice| choice.key() == key)
            .ok_or_else(|| Error::MalformedInput { field: "choice", value: s.to_string() })
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.key(), self.label())
    }
}

/// A choice together with its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddCustomer(NewCustomer),
    AddMenuItem(NewMenuItem),
    AddOrder(NewOrder),
    TopMenuItems { limit: usize },
    AverageOrders,
    OrdersByCategory,
    PeakOrderingTimes,
    Exit,
}

impl Action {
    /// Build an action from a menu choice and the answers to its
    /// [`MenuChoice::fields`] prompts, in order.
    pub fn from_answers(choice: MenuChoice, answers: &[String], top_limit: usize) -> Result<Self> {
        let answer = |idx: usize, field: &'static str| answer_at(answers, idx, field);

        let action = match choice {
            MenuChoice::AddCustomer => Action::AddCustomer(NewCustomer::new(
                answer(0, "name")?,
                answer(1, "email")?,
                answer(2, "registration date")?,
            )),
            MenuChoice::AddMenuItem => Action::AddMenuItem(NewMenuItem::new(
                answer(0, "item name")?,
                answer(1, "category")?,
                parse_price(answer(2, "price")?)?,
            )),
            MenuChoice::AddOrder => Action::AddOrder(NewOrder::new(
                parse_id("customer ID", answer(0, "customer ID")?)?,
                parse_id("menu item ID", answer(1, "menu item ID")?)?,
                answer(2, "order date")?,
            )),
            MenuChoice::TopMenuItems => Action::TopMenuItems { limit: top_limit },
            MenuChoice::AverageOrders => Action::AverageOrders,
            MenuChoice::OrdersByCategory => Action::OrdersByCategory,
            MenuChoice::PeakOrderingTimes => Action::PeakOrderingTimes,
            MenuChoice::Exit => Action::Exit,
        };
        Ok(action)
    }

    /// Stable command name, used in JSON envelopes and logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddCustomer(_) => "add-customer",
            Action::AddMenuItem(_) => "add-item",
            Action::AddOrder(_) => "add-order",
            Action::TopMenuItems { .. } => "top-items",
            Action::AverageOrders => "avg-orders",
            Action::OrdersByCategory => "by-category",
            Action::PeakOrderingTimes => "peak-times",
            Action::Exit => "exit",
        }
    }
}

/// Result of one dispatched action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    CustomerAdded(CustomerId),
    MenuItemAdded(ItemId),
    OrderAdded(OrderId),
    TopMenuItems(Vec<ItemCount>),
    AverageOrders(Option<f64>),
    OrdersByCategory(Vec<CategoryCount>),
    PeakOrderingTimes(Vec<HourCount>),
    Exit,
}

fn answer_at<'a>(answers: &'a [String], idx: usize, field: &'static str) -> Result<&'a str> {
    answers
        .get(idx)
        .map(String::as_str)
        .ok_or(Error::MalformedInput { field, value: String::new() })
}

/// Parse a price typed as text
pub fn parse_price(text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| Error::MalformedInput { field: "price", value: text.to_string() })
}

/// Parse a row identity typed as text
pub fn parse_id(field: &'static str, text: &str) -> Result<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| Error::MalformedInput { field, value: text.to_string() })
}

/// Run one action against the store
pub fn dispatch(store: &SqliteStore, policy: WritePolicy, action: Action) -> Result<Outcome> {
    tracing::debug!("Dispatching {}", action.name());

    let writer = RecordWriter::with_policy(store, policy);
    let reports = ReportEngine::new(store);

    let outcome = match action {
        Action::AddCustomer(c) => {
            Outcome::CustomerAdded(writer.add_customer(&c.name, &c.email, &c.registration_date)?)
        }
        Action::AddMenuItem(i) => Outcome::MenuItemAdded(writer.add_menu_item(&i.name, &i.category, i.price)?),
        Action::AddOrder(o) => Outcome::OrderAdded(writer.add_order(o.customer_id, o.item_id, &o.ordered_at)?),
        Action::TopMenuItems { limit } => Outcome::TopMenuItems(reports.top_menu_items(limit)?),
        Action::AverageOrders => Outcome::AverageOrders(reports.average_orders_per_customer()?),
        Action::OrdersByCategory => Outcome::OrdersByCategory(reports.orders_by_category()?),
        Action::PeakOrderingTimes => Outcome::PeakOrderingTimes(reports.peak_ordering_times()?),
        Action::Exit => Outcome::Exit,
    };
    Ok(outcome)
}
