//! Deprovisioning workflow
//!
//! Tears an account down from a pre-captured snapshot: group memberships,
//! policy attachments, the policies themselves, access keys, the user, the
//! bucket contents and finally the bucket. Steps run in that order because
//! the backend refuses to delete a user with attachments and a bucket with
//! objects.

use anyhow::{Context, Result};

use crate::account::types::AccountSnapshot;
use crate::backend::identity::IdentityClient;
use crate::backend::storage::StorageClient;
use crate::settings::Settings;

/// Remove everything the snapshot recorded, then the user and its bucket.
///
/// No rollback: a mid-workflow failure terminates the run and leaves the
/// remaining resources for a later retry.
pub async fn deprovision_account(
    storage: &StorageClient,
    identity: &IdentityClient,
    settings: &Settings,
    snapshot: &AccountSnapshot,
) -> Result<()> {
    let username = &snapshot.username;

    for group in &snapshot.groups {
        identity.remove_user_from_group(group, username).await?;
        println!("Removing user: {} from group: {}.....Done", username, group);
    }

    for arn in &snapshot.policy_arns {
        identity.detach_user_policy(username, arn).await?;
        println!("Detaching policy: {} from user: {}.....Done", arn, username);
    }

    for arn in &snapshot.policy_arns {
        // A policy this tool did not create may not be deletable; surface
        // that instead of pressing on with a half-removed account.
        identity
            .delete_policy(arn)
            .await
            .with_context(|| format!("Failed to delete policy {}", arn))?;
        println!("Deleting IAM policy: {}.....Done", arn);
    }

    for key in &snapshot.access_keys {
        identity
            .delete_access_key(username, &key.access_key_id)
            .await?;
        println!(
            "Deleting key: {} for user: {}.....Done",
            key.access_key_id, username
        );
    }

    identity.delete_user(username).await?;
    println!("Removing IAM user: {}.....Done", username);

    purge_bucket(storage, username, settings.page_size).await?;

    storage.delete_bucket(username).await?;
    println!("Deleting bucket: {}.....Done", username);
    println!("Account for {} removed successfully.", username);

    Ok(())
}

/// Empty a bucket one listing page at a time until it reports no objects.
///
/// Terminates because every pass deletes everything the page returned; an
/// already-empty bucket makes zero passes.
pub async fn purge_bucket(storage: &StorageClient, bucket: &str, page_size: i32) -> Result<()> {
    loop {
        let keys = storage.list_object_page(bucket, page_size).await?;
        if keys.is_empty() {
            break;
        }

        println!("Deleting {} objects from bucket {}", keys.len(), bucket);
        storage.delete_objects(bucket, &keys).await?;
    }

    Ok(())
}
