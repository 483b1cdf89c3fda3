use menustat::storage::schema::TABLES;
use menustat::{Error, RecordWriter, ReportEngine, SqliteStore};
use rusqlite::Connection;

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("menustat.db");

    let first = SqliteStore::open(&path).unwrap();
    RecordWriter::new(&first)
        .add_customer("Ada", "ada@example.com", "2024-05-01")
        .unwrap();
    drop(first);

    let second = SqliteStore::open(&path).unwrap();
    assert_eq!(second.count_customers().unwrap(), 1);

    let conn = Connection::open(&path).unwrap();
    for table in TABLES {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn writes_are_visible_to_another_connection_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("menustat.db");

    let store = SqliteStore::open(&path).unwrap();
    let writer = RecordWriter::new(&store);
    let customer = writer.add_customer("Ada", "ada@example.com", "2024-05-01").unwrap();
    let item = writer.add_menu_item("Burger", "Food", 4.5).unwrap();
    writer.add_order(customer, item, "2024-05-01 13:45:00").unwrap();

    let observer = Connection::open(&path).unwrap();
    let orders: i64 = observer
        .query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))
        .unwrap();
    assert_eq!(orders, 1);
}

#[test]
fn identities_are_never_reused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("menustat.db");

    let store = SqliteStore::open(&path).unwrap();
    let writer = RecordWriter::new(&store);
    let first = writer.add_customer("Ada", "ada@example.com", "2024-05-01").unwrap();
    assert!(matches!(
        writer.add_customer("Ada", "ada@example.com", "2024-05-01"),
        Err(Error::DuplicateKey { .. })
    ));
    drop(store);

    let store = SqliteStore::open(&path).unwrap();
    let second = RecordWriter::new(&store)
        .add_customer("Bob", "bob@example.com", "2024-05-02")
        .unwrap();
    assert!(second > first);
    assert!(store.customer_exists(first).unwrap());
    assert!(!store.menu_item_exists(first).unwrap());
}

#[test]
fn reports_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("menustat.db");

    {
        let store = SqliteStore::open(&path).unwrap();
        let writer = RecordWriter::new(&store);
        let customer = writer.add_customer("Ada", "ada@example.com", "2024-05-01").unwrap();
        let item = writer.add_menu_item("Coke", "Drink", 1.5).unwrap();
        writer.add_order(customer, item, "2024-05-01 19:10:00").unwrap();
        writer.add_order(customer, item, "2024-05-01 19:40:00").unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    let engine = ReportEngine::new(&store);
    assert_eq!(engine.average_orders_per_customer().unwrap(), Some(2.0));
    let peaks = engine.peak_ordering_times().unwrap();
    assert_eq!(peaks[0].hour.as_deref(), Some("19"));
    assert_eq!(peaks[0].orders, 2);
    assert_eq!(store.list_orders().unwrap().len(), 2);
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
