use tabled::{builder::Builder, settings::Style, Table, Tabled};
use crate::model::{Customer, MenuItem};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

/// Two-column report table: a grouping key and its order count
pub fn count_table(key_header: &str, rows: &[(String, u64)]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut builder = Builder::default();
    builder.push_record([key_header.to_string(), "Orders".to_string()]);
    for (key, orders) in rows {
        builder.push_record([key.clone(), orders.to_string()]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Registered")]
    registered: String,
}

pub fn customers_table(customers: &[Customer]) -> String {
    if customers.is_empty() {
        return String::new();
    }

    let rows = customers.iter().map(|c| CustomerRow {
        id: c.id,
        name: c.name.clone(),
        email: c.email.clone(),
        registered: c.registration_date.clone(),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct MenuItemRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
}

pub fn menu_items_table(items: &[MenuItem]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let rows = items.iter().map(|i| MenuItemRow {
        id: i.id,
        name: i.name.clone(),
        category: i.category.clone(),
        price: format!("{:.2}", i.price),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// One order with its customer and item names resolved for display
pub struct OrderLine {
    pub id: i64,
    pub customer: String,
    pub item: String,
    pub ordered_at: String,
}

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Ordered at")]
    ordered_at: String,
}

pub fn orders_table(orders: &[OrderLine]) -> String {
    if orders.is_empty() {
        return String::new();
    }

    let rows = orders.iter().map(|o| OrderRow {
        id: o.id,
        customer: o.customer.clone(),
        item: o.item.clone(),
        ordered_at: o.ordered_at.clone(),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}
