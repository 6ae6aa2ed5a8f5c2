//! Provisioning workflow
//!
//! Creates the bucket, scoped policy, user, group membership and access key
//! for a new customer, in that order. Each step must succeed before the
//! next runs; a failure terminates the workflow and leaves the earlier
//! resources in place (there is no rollback).

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};

use crate::account::types::{key_export_text, key_file_name, policy_name, PolicyDocument};
use crate::backend::identity::IdentityClient;
use crate::backend::storage::StorageClient;
use crate::settings::Settings;

/// Provision a new customer account.
///
/// The caller has already verified the account does not exist. The key
/// export file lands in `export_dir` (the operator's home folder in
/// production), overwriting any previous export for the same customer.
pub async fn provision_account(
    storage: &StorageClient,
    identity: &IdentityClient,
    settings: &Settings,
    customer: &str,
    export_dir: &Path,
) -> Result<()> {
    ensure!(!customer.is_empty(), "Customer name must not be empty");

    storage.create_bucket(customer).await?;
    println!("Creating bucket: {}.....Done", customer);

    let policy_name = policy_name(customer);
    let document = PolicyDocument::for_customer(customer).to_json()?;
    let policy_arn = identity.create_policy(&policy_name, &document).await?;
    println!("Creating IAM policy: {}.....Done", policy_name);

    identity.create_user(customer).await?;
    println!("Creating IAM user: {}.....Done", customer);

    identity.attach_user_policy(customer, &policy_arn).await?;
    println!(
        "Attaching policy: {} to user: {}.....Done",
        policy_name, customer
    );

    identity.add_user_to_group(&settings.group, customer).await?;
    println!(
        "Adding user: {} to group: {}.....Done",
        customer, settings.group
    );

    let key = identity.create_access_key(customer).await?;
    println!("Requesting key and secret for user: {}.....Done", customer);

    // The secret only exists in memory at this point; write it out before
    // anything else can go wrong.
    let out_text = key_export_text(customer, &key);
    let out_path = export_dir.join(key_file_name(customer));
    fs::write(&out_path, &out_text)
        .with_context(|| format!("Failed to write key file {}", out_path.display()))?;

    println!("{}", "-".repeat(80));
    println!("{}", out_text);
    println!("{}", "-".repeat(80));
    println!(
        "A copy of the key/secret pair for {} has been saved to {}",
        customer,
        out_path.display()
    );
    println!("Account for {} added successfully.", customer);

    Ok(())
}
