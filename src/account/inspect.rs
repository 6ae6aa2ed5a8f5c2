//! Account existence probe and pre-deletion inspection

use anyhow::{bail, Result};

use crate::account::types::AccountSnapshot;
use crate::backend::identity::IdentityClient;

/// Whether an account with this name exists on the identity backend
pub async fn account_exists(identity: &IdentityClient, customer: &str) -> Result<bool> {
    identity.user_exists(customer).await
}

/// Gather the user's groups, attached policies and access keys into a
/// snapshot.
///
/// Read-only. The deletion workflow consumes the snapshot so it removes
/// what is actually attached rather than what the naming convention
/// predicts.
pub async fn inspect_account(identity: &IdentityClient, customer: &str) -> Result<AccountSnapshot> {
    if !identity.user_exists(customer).await? {
        bail!("User {} does not exist", customer);
    }

    let groups = identity.list_groups_for_user(customer).await?;
    let policy_arns = identity.list_attached_policies(customer).await?;
    let access_keys = identity.list_access_keys(customer).await?;

    tracing::debug!(
        user = customer,
        groups = groups.len(),
        policies = policy_arns.len(),
        keys = access_keys.len(),
        "Captured account snapshot"
    );

    Ok(AccountSnapshot {
        username: customer.to_string(),
        groups,
        policy_arns,
        access_keys,
    })
}
