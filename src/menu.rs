//! Interactive text menu
//!
//! A single-threaded prompt, validate, dispatch loop over stdin. Invalid
//! selections re-prompt; the loop carries no state beyond the current
//! selection.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::account;
use crate::backend::identity::IdentityClient;
use crate::backend::storage::StorageClient;
use crate::settings::Settings;

/// One pass through the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Delete,
    Exit,
}

/// Map raw operator input to a menu choice
pub fn parse_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::Add),
        "2" => Some(MenuChoice::Delete),
        "3" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// Whether a typed confirmation matches the requested account name
pub fn names_match(requested: &str, entered: &str) -> bool {
    requested == entered
}

/// Print a label and read one trimmed line from stdin
pub fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    Ok(line.trim().to_string())
}

/// Run the menu until the operator exits
pub async fn run_menu(
    storage: &StorageClient,
    identity: &IdentityClient,
    settings: &Settings,
) -> Result<()> {
    loop {
        println!();
        println!("Wasabi account maintenance");
        println!("  1) Add a new account");
        println!("  2) Delete an existing account");
        println!("  3) Exit");

        let input = prompt("Select an option: ")?;
        match parse_choice(&input) {
            Some(MenuChoice::Add) => {
                let customer = prompt("New customer name: ")?;
                account::add_account(storage, identity, settings, &customer).await?;
            }
            Some(MenuChoice::Delete) => {
                let customer = prompt("Customer name to delete: ")?;
                account::delete_account(storage, identity, settings, &customer).await?;
            }
            Some(MenuChoice::Exit) => break,
            None => println!("Invalid selection, enter 1, 2 or 3."),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice_valid_options() {
        assert_eq!(parse_choice("1"), Some(MenuChoice::Add));
        assert_eq!(parse_choice("2"), Some(MenuChoice::Delete));
        assert_eq!(parse_choice("3"), Some(MenuChoice::Exit));
    }

    #[test]
    fn test_parse_choice_trims_whitespace() {
        assert_eq!(parse_choice(" 1 \n"), Some(MenuChoice::Add));
        assert_eq!(parse_choice("\t3"), Some(MenuChoice::Exit));
    }

    #[test]
    fn test_parse_choice_rejects_everything_else() {
        assert_eq!(parse_choice(""), None);
        assert_eq!(parse_choice("4"), None);
        assert_eq!(parse_choice("add"), None);
        assert_eq!(parse_choice("12"), None);
    }

    #[test]
    fn test_names_match_is_exact() {
        assert!(names_match("acme", "acme"));
        assert!(!names_match("acme", "Acme"));
        assert!(!names_match("acme", "acme "));
        assert!(!names_match("acme", ""));
    }
}
