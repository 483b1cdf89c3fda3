//! Numbered interactive menu
//!
//! Prompts for a choice and its fields, then hands the collected values to
//! the dispatch table. Numeric fields are re-prompted until they parse.

use crate::{OutputMode, Settings, commands};
use menustat::dispatch::{Action, MenuChoice, parse_id, parse_price};
use menustat::ui;
use menustat::SqliteStore;
use std::io::{self, BufRead, Write};

type FieldCheck = fn(&str) -> menustat::Result<()>;

pub fn run(store: &SqliteStore, settings: &Settings) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    run_with(&mut input, store, settings)
}

fn run_with<R: BufRead>(input: &mut R, store: &SqliteStore, settings: &Settings) -> anyhow::Result<()> {
    tracing::debug!("Interactive session on {}", settings.database.display());

    loop {
        print_menu();
        let Some(line) = prompt(input, "Enter your choice")? else {
            break;
        };

        let choice = match line.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(_) => {
                ui::warn("Invalid choice. Please try again.");
                continue;
            }
        };

        if choice == MenuChoice::Exit {
            println!("Exiting...");
            break;
        }

        let mut answers = Vec::with_capacity(choice.fields().len());
        for (idx, field) in choice.fields().iter().enumerate() {
            match prompt_field(input, field, field_check(choice, idx))? {
                Some(answer) => answers.push(answer),
                None => return Ok(()),
            }
        }

        let action = Action::from_answers(choice, &answers, settings.top_items_limit)?;
        commands::run_action(store, settings.policy, action, OutputMode::Human)?;
    }

    Ok(())
}

fn print_menu() {
    ui::section("menustat");
    for choice in MenuChoice::all() {
        println!("  {}", choice);
    }
}

fn field_check(choice: MenuChoice, idx: usize) -> Option<FieldCheck> {
    match (choice, idx) {
        (MenuChoice::AddMenuItem, 2) => Some(check_price as FieldCheck),
        (MenuChoice::AddOrder, 0) => Some(check_customer_id as FieldCheck),
        (MenuChoice::AddOrder, 1) => Some(check_item_id as FieldCheck),
        _ => None,
    }
}

fn check_price(text: &str) -> menustat::Result<()> {
    parse_price(text).map(|_| ())
}

fn check_customer_id(text: &str) -> menustat::Result<()> {
    parse_id("customer ID", text).map(|_| ())
}

fn check_item_id(text: &str) -> menustat::Result<()> {
    parse_id("menu item ID", text).map(|_| ())
}

/// Ask for one field, repeating while `check` rejects the answer.
/// `None` means input ended.
fn prompt_field<R: BufRead>(input: &mut R, field: &str, check: Option<FieldCheck>) -> anyhow::Result<Option<String>> {
    loop {
        let Some(answer) = prompt(input, &format!("Enter {}", field))? else {
            return Ok(None);
        };

        match check.map(|check| check(&answer)) {
            Some(Err(e)) => ui::error(&format!("{}, please try again", e)),
            _ => return Ok(Some(answer)),
        }
    }
}

fn prompt<R: BufRead>(input: &mut R, label: &str) -> anyhow::Result<Option<String>> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use menustat::report::ReportEngine;
    use menustat::WritePolicy;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn settings() -> Settings {
        Settings {
            database: PathBuf::from(":memory:"),
            policy: WritePolicy::default(),
            top_items_limit: 5,
        }
    }

    #[test]
    fn test_session_records_rows() {
        let store = SqliteStore::open_in_memory().unwrap();
        let script = "1\nAda\nada@example.com\n2024-05-01\n\
                      2\nBurger\nFood\nfour\n4.50\n\
                      3\nx\n1\n1\n2024-05-01 13:45:00\n\
                      4\n8\n";
        let mut input = Cursor::new(script.as_bytes());

        run_with(&mut input, &store, &settings()).unwrap();

        assert_eq!(store.count_customers().unwrap(), 1);
        assert_eq!(store.count_menu_items().unwrap(), 1);
        assert_eq!(store.count_orders().unwrap(), 1);
        assert_eq!(store.get_menu_item(1).unwrap().unwrap().price, 4.5);
        assert_eq!(ReportEngine::new(&store).top_menu_items(5).unwrap()[0].orders, 1);
    }

    #[test]
    fn test_duplicate_email_keeps_session_alive() {
        let store = SqliteStore::open_in_memory().unwrap();
        let script = "1\nAda\nada@example.com\n2024-05-01\n\
                      1\nAda\nada@example.com\n2024-05-02\n\
                      1\nBob\nbob@example.com\n2024-05-02\n";
        let mut input = Cursor::new(script.as_bytes());

        run_with(&mut input, &store, &settings()).unwrap();
        assert_eq!(store.count_customers().unwrap(), 2);
    }

    #[test]
    fn test_invalid_choice_and_eof() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut input = Cursor::new("9\nhello\n".as_bytes());

        run_with(&mut input, &store, &settings()).unwrap();
        assert_eq!(store.stats().unwrap().orders, 0);
    }
}
