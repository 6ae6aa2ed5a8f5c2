//! Account workflows
//!
//! This module provides:
//! - [`types`] - snapshot, policy document and key export models
//! - [`inspect`] - existence probe and pre-deletion snapshot
//! - [`provision`] / [`deprovision`] - the two workflows
//!
//! [`add_account`] and [`delete_account`] wrap the workflows with the
//! precondition guards both entry surfaces share: existence checks and the
//! deletion confirmation prompt. Precondition failures print a one-line
//! diagnostic and return without touching the backend; backend faults
//! propagate as errors.

pub mod deprovision;
pub mod inspect;
pub mod provision;
pub mod types;

// Re-export commonly used types
pub use types::{AccountSnapshot, PolicyDocument};

use anyhow::{Context, Result};

use crate::backend::identity::IdentityClient;
use crate::backend::storage::StorageClient;
use crate::menu::{names_match, prompt};
use crate::settings::Settings;

/// Provision a new account after checking the name is free
pub async fn add_account(
    storage: &StorageClient,
    identity: &IdentityClient,
    settings: &Settings,
    customer: &str,
) -> Result<()> {
    if customer.is_empty() {
        println!("ERROR: Customer name must not be empty.");
        return Ok(());
    }

    if inspect::account_exists(identity, customer).await? {
        println!("Account already exists, please check the name.");
        return Ok(());
    }

    let export_dir = dirs::home_dir().context("Could not determine the home directory")?;
    provision::provision_account(storage, identity, settings, customer, &export_dir).await
}

/// Deprovision an account after an existence check and a typed name
/// confirmation; a mismatch aborts before any backend mutation
pub async fn delete_account(
    storage: &StorageClient,
    identity: &IdentityClient,
    settings: &Settings,
    customer: &str,
) -> Result<()> {
    if customer.is_empty() {
        println!("ERROR: Customer name must not be empty.");
        return Ok(());
    }

    if !inspect::account_exists(identity, customer).await? {
        println!("User doesn't exist, please check the spelling.");
        return Ok(());
    }

    println!("Are you sure you want to remove user: {}?", customer);
    let entered = prompt("To confirm enter the user name again: ")?;
    if !names_match(customer, &entered) {
        println!("ERROR: Names do not match.");
        return Ok(());
    }

    let snapshot = inspect::inspect_account(identity, customer).await?;
    print!("{}", snapshot.describe());

    deprovision::deprovision_account(storage, identity, settings, &snapshot).await
}
