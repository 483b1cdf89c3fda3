use menustat::dispatch::{Action, Outcome, dispatch};
use menustat::{Error, NewCustomer, NewMenuItem, NewOrder, RecordWriter, ReportEngine, SqliteStore, WritePolicy};

fn seed_orders(writer: &RecordWriter, customer: i64, item: i64, count: usize, hour: u32) {
    for n in 0..count {
        writer
            .add_order(customer, item, &format!("2024-05-01 {:02}:{:02}:00", hour, n))
            .unwrap();
    }
}

#[test]
fn duplicate_email_fails_and_leaves_count_unchanged() {
    let store = SqliteStore::open_in_memory().unwrap();
    let writer = RecordWriter::new(&store);

    writer.add_customer("X", "same@example.com", "2024-01-01").unwrap();
    let before = store.count_customers().unwrap();
    let err = writer.add_customer("Y", "same@example.com", "2024-02-02").unwrap_err();

    assert!(matches!(err, Error::DuplicateKey { .. }));
    assert_eq!(store.count_customers().unwrap(), before);
}

#[test]
fn row_counts_track_successful_calls_only() {
    let store = SqliteStore::open_in_memory().unwrap();
    let policy = WritePolicy::default();

    let actions = vec![
        (Action::AddCustomer(NewCustomer::new("X", "x@example.com", "2024-01-01")), true),
        (Action::AddCustomer(NewCustomer::new("X2", "x@example.com", "2024-01-01")), false),
        (Action::AddMenuItem(NewMenuItem::new("Burger", "Food", 4.5)), true),
        (Action::AddOrder(NewOrder::new(1, 1, "2024-05-01 13:45:00")), true),
        (Action::AddOrder(NewOrder::new(1, 9, "2024-05-01 13:45:00")), false),
    ];

    let mut expected = store.stats().unwrap();
    for (action, succeeds) in actions {
        let kind = action.name();
        let result = dispatch(&store, policy, action);
        assert_eq!(result.is_ok(), succeeds, "{kind}");
        if succeeds {
            match kind {
                "add-customer" => expected.customers += 1,
                "add-item" => expected.menu_items += 1,
                "add-order" => expected.orders += 1,
                _ => unreachable!(),
            }
        }
        assert_eq!(store.stats().unwrap(), expected);
    }
}

#[test]
fn top_items_returns_busiest_first() {
    let store = SqliteStore::open_in_memory().unwrap();
    let writer = RecordWriter::new(&store);
    let c = writer.add_customer("X", "x@example.com", "2024-01-01").unwrap();
    let a = writer.add_menu_item("A", "Food", 1.0).unwrap();
    let b = writer.add_menu_item("B", "Food", 1.0).unwrap();
    let cc = writer.add_menu_item("C", "Food", 1.0).unwrap();
    seed_orders(&writer, c, a, 3, 12);
    seed_orders(&writer, c, b, 5, 12);
    seed_orders(&writer, c, cc, 1, 12);

    let top: Vec<_> = ReportEngine::new(&store)
        .top_menu_items(2)
        .unwrap()
        .into_iter()
        .map(|row| (row.name, row.orders))
        .collect();
    assert_eq!(top, vec![("B".to_string(), 5), ("A".to_string(), 3)]);
}

#[test]
fn average_ignores_customers_without_orders() {
    let store = SqliteStore::open_in_memory().unwrap();
    let writer = RecordWriter::new(&store);
    let x = writer.add_customer("X", "x@example.com", "2024-01-01").unwrap();
    let y = writer.add_customer("Y", "y@example.com", "2024-01-01").unwrap();
    writer.add_customer("Z", "z@example.com", "2024-01-01").unwrap();
    let item = writer.add_menu_item("Burger", "Food", 4.5).unwrap();
    seed_orders(&writer, x, item, 2, 9);
    seed_orders(&writer, y, item, 4, 10);

    let avg = ReportEngine::new(&store).average_orders_per_customer().unwrap().unwrap();
    assert_eq!(format!("{:.2}", avg), "3.00");
}

#[test]
fn categories_with_equal_counts() {
    let store = SqliteStore::open_in_memory().unwrap();
    let writer = RecordWriter::new(&store);
    let c = writer.add_customer("X", "x@example.com", "2024-01-01").unwrap();
    let burger = writer.add_menu_item("Burger", "Food", 4.5).unwrap();
    let fries = writer.add_menu_item("Fries", "Food", 2.0).unwrap();
    let coke = writer.add_menu_item("Coke", "Drink", 1.5).unwrap();
    seed_orders(&writer, c, burger, 2, 12);
    seed_orders(&writer, c, fries, 1, 12);
    seed_orders(&writer, c, coke, 3, 12);

    let rows = ReportEngine::new(&store).orders_by_category().unwrap();
    let mut categories: Vec<_> = rows.iter().map(|r| (r.category.as_str(), r.orders)).collect();
    categories.sort();
    assert_eq!(categories, vec![("Drink", 3), ("Food", 3)]);
}

#[test]
fn orders_in_the_same_hour_share_a_bucket() {
    let store = SqliteStore::open_in_memory().unwrap();
    let writer = RecordWriter::new(&store);
    let c = writer.add_customer("X", "x@example.com", "2024-01-01").unwrap();
    let item = writer.add_menu_item("Burger", "Food", 4.5).unwrap();
    writer.add_order(c, item, "2024-05-01 13:45:00").unwrap();
    writer.add_order(c, item, "2024-05-01 13:02:11").unwrap();

    let peaks = ReportEngine::new(&store).peak_ordering_times().unwrap();
    assert!(peaks.iter().any(|p| p.hour.as_deref() == Some("13") && p.orders == 2));
    assert!(peaks.iter().all(|p| p.orders > 0));
}

#[test]
fn empty_store_reports_no_data() {
    let store = SqliteStore::open_in_memory().unwrap();
    let policy = WritePolicy::default();

    assert_eq!(dispatch(&store, policy, Action::AverageOrders).unwrap(), Outcome::AverageOrders(None));
    assert_eq!(
        dispatch(&store, policy, Action::TopMenuItems { limit: 5 }).unwrap(),
        Outcome::TopMenuItems(Vec::new())
    );
    assert_eq!(
        dispatch(&store, policy, Action::OrdersByCategory).unwrap(),
        Outcome::OrdersByCategory(Vec::new())
    );
    assert_eq!(
        dispatch(&store, policy, Action::PeakOrderingTimes).unwrap(),
        Outcome::PeakOrderingTimes(Vec::new())
    );
}
