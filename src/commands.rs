use crate::{OutputMode, Settings, emit_failure, emit_success};
use menustat::config::{self, MenustatConfig};
use menustat::dispatch::{Action, Outcome, dispatch};
use menustat::ui::{self, Icons, OrderLine, section, status, success};
use menustat::{SqliteStore, WritePolicy};
use owo_colors::OwoColorize;
use std::path::Path;

/// Dispatch one action and render its outcome.
///
/// Returns `Ok(false)` when the action was rejected for a reason the user
/// can fix (duplicate email, unknown id, bad field); the failure has already
/// been reported.
pub fn run_action(
    store: &SqliteStore,
    policy: WritePolicy,
    action: Action,
    output_mode: OutputMode,
) -> anyhow::Result<bool> {
    let command = action.name();

    match dispatch(store, policy, action) {
        Ok(outcome) => {
            if output_mode.is_human() {
                render_outcome(&outcome);
            } else {
                emit_success(output_mode, command, serde_json::to_value(&outcome)?)?;
            }
            Ok(true)
        }
        Err(e) if e.is_recoverable() => {
            if output_mode.is_human() {
                ui::error(&format!("Error: {}", e));
            } else {
                emit_failure(output_mode, command, &e.to_string())?;
            }
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Human rendering of a dispatched outcome
pub fn render_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::CustomerAdded(id) => success(&format!("Customer added successfully (ID {}).", id)),
        Outcome::MenuItemAdded(id) => success(&format!("Menu item added successfully (ID {}).", id)),
        Outcome::OrderAdded(id) => success(&format!("Order added successfully (ID {}).", id)),
        Outcome::TopMenuItems(rows) => {
            section(&format!("Top {} Menu Items", rows.len()));
            let rows: Vec<_> = rows.iter().map(|r| (r.name.clone(), r.orders)).collect();
            print_counts("Item", &rows);
        }
        Outcome::AverageOrders(avg) => status(Icons::STATS, "Average orders per customer", &average_text(*avg)),
        Outcome::OrdersByCategory(rows) => {
            section("Orders by Category");
            let rows: Vec<_> = rows.iter().map(|r| (r.category.clone(), r.orders)).collect();
            print_counts("Category", &rows);
        }
        Outcome::PeakOrderingTimes(rows) => {
            section("Peak Ordering Times");
            let rows: Vec<_> = rows.iter().map(|r| (r.label(), r.orders)).collect();
            print_counts("Hour", &rows);
        }
        Outcome::Exit => println!("Exiting..."),
    }
}

fn average_text(avg: Option<f64>) -> String {
    match avg {
        Some(avg) => format!("{:.2}", avg),
        None => ui::muted("n/a (no orders yet)"),
    }
}

fn print_counts(key_header: &str, rows: &[(String, u64)]) {
    if rows.is_empty() {
        println!("{} No orders recorded yet.", Icons::EMPTY);
    } else {
        println!("{}", ui::count_table(key_header, rows));
    }
}

pub fn run_stats(store: &SqliteStore, settings: &Settings, output_mode: OutputMode) -> anyhow::Result<()> {
    let stats = store.stats()?;

    if output_mode.is_human() {
        ui::header(&format!("menustat statistics ({})", settings.database.display()));
        let customers = stats.customers.to_string();
        let items = stats.menu_items.to_string();
        let orders = stats.orders.to_string();
        println!(
            "{}",
            ui::stats_table(&[
                ("Customers", customers.as_str()),
                ("Menu items", items.as_str()),
                ("Orders", orders.as_str()),
            ])
        );
    } else {
        let data = serde_json::json!({
            "database": settings.database.display().to_string(),
            "stats": stats,
        });
        emit_success(output_mode, "stats", data)?;
    }
    Ok(())
}

pub fn run_customers(store: &SqliteStore, output_mode: OutputMode) -> anyhow::Result<()> {
    let customers = store.list_customers()?;

    if output_mode.is_human() {
        section("Customers");
        if customers.is_empty() {
            println!("{} No customers registered yet.", Icons::EMPTY);
        } else {
            println!("{}", ui::customers_table(&customers));
        }
    } else {
        emit_success(output_mode, "customers", serde_json::to_value(&customers)?)?;
    }
    Ok(())
}

pub fn run_items(store: &SqliteStore, output_mode: OutputMode) -> anyhow::Result<()> {
    let items = store.list_menu_items()?;

    if output_mode.is_human() {
        section("Menu Items");
        if items.is_empty() {
            println!("{} The menu is empty.", Icons::EMPTY);
        } else {
            println!("{}", ui::menu_items_table(&items));
        }
    } else {
        emit_success(output_mode, "items", serde_json::to_value(&items)?)?;
    }
    Ok(())
}

pub fn run_orders(store: &SqliteStore, output_mode: OutputMode) -> anyhow::Result<()> {
    let orders = store.list_orders()?;

    if output_mode.is_human() {
        section("Orders");
        if orders.is_empty() {
            println!("{} No orders recorded yet.", Icons::EMPTY);
            return Ok(());
        }

        let mut lines = Vec::with_capacity(orders.len());
        for order in orders {
            // Dangling ids only exist when the policy allowed them
            let customer = match store.get_customer(order.customer_id)? {
                Some(customer) => customer.name,
                None => format!("#{} (missing)", order.customer_id),
            };
            let item = match store.get_menu_item(order.item_id)? {
                Some(item) => item.name,
                None => format!("#{} (missing)", order.item_id),
            };
            lines.push(OrderLine {
                id: order.id,
                customer,
                item,
                ordered_at: order.ordered_at,
            });
        }
        println!("{}", ui::orders_table(&lines));
    } else {
        emit_success(output_mode, "orders", serde_json::to_value(&orders)?)?;
    }
    Ok(())
}

pub fn run_init(path: &Path, force: bool, output_mode: OutputMode) -> anyhow::Result<()> {
    let defaults = MenustatConfig::with_defaults();
    config::write_config(path, &defaults, force)?;

    if output_mode.is_human() {
        success(&format!("Wrote {}", path.display()));
        let database = defaults
            .database
            .clone()
            .unwrap_or_else(|| config::default_database_path().display().to_string());
        ui::summary_row(&format!("{} database", Icons::DATABASE), &database.bold().to_string());
    } else {
        let data = serde_json::json!({
            "path": path.display().to_string(),
            "config": defaults,
        });
        emit_success(output_mode, "init", data)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{failure_envelope, success_envelope};
    use menustat::NewCustomer;

    #[test]
    fn test_success_envelope_shape() {
        let outcome = Outcome::CustomerAdded(7);
        let envelope = success_envelope("add-customer", serde_json::to_value(&outcome).unwrap());

        assert_eq!(envelope["ok"], true);
        assert_eq!(envelope["command"], "add-customer");
        assert_eq!(envelope["data"]["kind"], "customer_added");
        assert_eq!(envelope["data"]["value"], 7);
        assert!(envelope.get("error").is_none());
    }

    #[test]
    fn test_failure_envelope_shape() {
        let err = menustat::Error::DuplicateKey { email: "ada@example.com".into() };
        let envelope = failure_envelope("add-customer", &err.to_string());

        assert_eq!(envelope["ok"], false);
        assert_eq!(envelope["command"], "add-customer");
        assert!(envelope["error"].as_str().unwrap().contains("ada@example.com"));
        assert!(envelope.get("data").is_none());
    }

    #[test]
    fn test_average_without_orders_reads_na() {
        assert!(average_text(None).contains("n/a"));
        assert_eq!(average_text(Some(1.5)), "1.50");
        assert_eq!(average_text(Some(2.0 / 3.0)), "0.67");
    }

    #[test]
    fn test_rejected_action_reports_failure() {
        let store = SqliteStore::open_in_memory().unwrap();
        let policy = WritePolicy::default();
        let add = || Action::AddCustomer(NewCustomer::new("Ada", "ada@example.com", "2024-05-01"));

        assert!(run_action(&store, policy, add(), OutputMode::Json).unwrap());
        assert!(!run_action(&store, policy, add(), OutputMode::Json).unwrap());
        assert_eq!(store.count_customers().unwrap(), 1);
    }
}
