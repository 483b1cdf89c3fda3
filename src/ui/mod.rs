pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, header, muted, section, status, success, summary_row, warn};
pub use table::{OrderLine, TableBuilder, count_table, customers_table, menu_items_table, orders_table, stats_table};
pub use theme::{theme, Theme};
