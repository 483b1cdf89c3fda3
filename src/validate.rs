//! Opt-in format checks for typed field values
//!
//! Nothing here runs unless `check_formats` is enabled; the store itself
//! accepts any text for dates and any real number for prices.

use std::sync::OnceLock;
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use crate::model::{NewCustomer, NewMenuItem, NewOrder};
use crate::{Error, Result};

static EMAIL: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"))
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn invalid(field: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidField { field, reason: reason.into() }
}

pub fn check_customer(customer: &NewCustomer) -> Result<()> {
    if customer.name.trim().is_empty() {
        return Err(invalid("name", "must not be empty"));
    }
    if !email_pattern().is_match(&customer.email) {
        return Err(invalid("email", format!("{:?} is not an email address", customer.email)));
    }
    if NaiveDate::parse_from_str(&customer.registration_date, DATE_FORMAT).is_err() {
        return Err(invalid(
            "registration date",
            format!("{:?} is not YYYY-MM-DD", customer.registration_date),
        ));
    }
    Ok(())
}

pub fn check_menu_item(item: &NewMenuItem) -> Result<()> {
    if item.name.trim().is_empty() {
        return Err(invalid("item name", "must not be empty"));
    }
    if item.category.trim().is_empty() {
        return Err(invalid("category", "must not be empty"));
    }
    if !item.price.is_finite() || item.price < 0.0 {
        return Err(invalid("price", format!("{} is not a non-negative amount", item.price)));
    }
    Ok(())
}

pub fn check_order(order: &NewOrder) -> Result<()> {
    if NaiveDateTime::parse_from_str(&order.ordered_at, TIMESTAMP_FORMAT).is_err() {
        return Err(invalid(
            "order date",
            format!("{:?} is not YYYY-MM-DD HH:MM:SS", order.ordered_at),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_formats() {
        assert!(check_customer(&NewCustomer::new("Ada", "ada@example.com", "2024-05-01")).is_ok());
        assert!(check_customer(&NewCustomer::new("Ada", "not-an-email", "2024-05-01")).is_err());
        assert!(check_customer(&NewCustomer::new("Ada", "ada@example.com", "01/05/2024")).is_err());
        assert!(check_customer(&NewCustomer::new("  ", "ada@example.com", "2024-05-01")).is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = check_menu_item(&NewMenuItem::new("Burger", "Food", -1.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "price", .. }));
        assert!(check_menu_item(&NewMenuItem::new("Burger", "Food", f64::NAN)).is_err());
        assert!(check_menu_item(&NewMenuItem::new("Water", "Drink", 0.0)).is_ok());
    }

    #[test]
    fn test_order_timestamp() {
        assert!(check_order(&NewOrder::new(1, 1, "2024-05-01 13:45:00")).is_ok());
        assert!(check_order(&NewOrder::new(1, 1, "2024-05-01 24:00:00")).is_err());
        assert!(check_order(&NewOrder::new(1, 1, "2024-05-01")).is_err());
    }

    #[test]
    fn test_impossible_calendar_days_rejected() {
        let err = check_customer(&NewCustomer::new("Ada", "ada@example.com", "2024-02-31")).unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "registration date", .. }));
        assert!(check_customer(&NewCustomer::new("Ada", "ada@example.com", "2024-02-29")).is_ok());

        let err = check_order(&NewOrder::new(1, 1, "2023-02-30 13:00:00")).unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "order date", .. }));
        assert!(check_order(&NewOrder::new(1, 1, "2023-02-29 13:00:00")).is_err());
    }
}
