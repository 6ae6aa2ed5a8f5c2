//! Identity service client wrapper
//!
//! Wraps the IAM-compatible endpoint of the provider: user, managed policy,
//! group membership and access key operations. Wasabi exposes this as a
//! separate endpoint from object storage, with the same credentials.

use anyhow::{Context, Result};
use aws_sdk_iam::Client;
use chrono::{DateTime, Utc};

/// A freshly issued key pair.
///
/// The secret is only obtainable at issuance time; the backend never
/// returns it again.
#[derive(Debug, Clone)]
pub struct IssuedKey {
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Metadata for an access key that already exists
#[derive(Debug, Clone)]
pub struct AccessKeyInfo {
    pub access_key_id: String,
    pub created: Option<DateTime<Utc>>,
}

/// Identity client wrapper with the user, policy, group and key operations
/// the workflows need
pub struct IdentityClient {
    client: Client,
}

impl IdentityClient {
    /// Create a client against the given service endpoint
    pub async fn new(endpoint_url: &str) -> Result<Self> {
        let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;

        let config = aws_sdk_iam::config::Builder::from(&shared)
            .endpoint_url(endpoint_url)
            .build();

        Ok(Self {
            client: Client::from_conf(config),
        })
    }

    /// Probe whether a user exists.
    ///
    /// Only the backend's NoSuchEntity answer maps to `false`; any other
    /// fault propagates as an error instead of being read as "absent".
    pub async fn user_exists(&self, username: &str) -> Result<bool> {
        match self.client.get_user().user_name(username).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                let err = err.into_service_error();
                if err.is_no_such_entity_exception() {
                    Ok(false)
                } else {
                    Err(err.into())
                }
            }
        }
    }

    /// Create a user
    pub async fn create_user(&self, username: &str) -> Result<()> {
        self.client.create_user().user_name(username).send().await?;

        Ok(())
    }

    /// Delete a user; the backend rejects this while keys, policies or
    /// group memberships remain attached
    pub async fn delete_user(&self, username: &str) -> Result<()> {
        self.client.delete_user().user_name(username).send().await?;

        Ok(())
    }

    /// Create a managed policy from a JSON document, returning its ARN
    pub async fn create_policy(&self, policy_name: &str, document: &str) -> Result<String> {
        let response = self
            .client
            .create_policy()
            .policy_name(policy_name)
            .policy_document(document)
            .send()
            .await?;

        let arn = response
            .policy()
            .and_then(|p| p.arn())
            .context("Backend returned no ARN for the created policy")?;

        Ok(arn.to_string())
    }

    /// Delete a managed policy by ARN
    pub async fn delete_policy(&self, policy_arn: &str) -> Result<()> {
        self.client
            .delete_policy()
            .policy_arn(policy_arn)
            .send()
            .await?;

        Ok(())
    }

    /// Attach a managed policy to a user
    pub async fn attach_user_policy(&self, username: &str, policy_arn: &str) -> Result<()> {
        self.client
            .attach_user_policy()
            .user_name(username)
            .policy_arn(policy_arn)
            .send()
            .await?;

        Ok(())
    }

    /// Detach a managed policy from a user
    pub async fn detach_user_policy(&self, username: &str, policy_arn: &str) -> Result<()> {
        self.client
            .detach_user_policy()
            .user_name(username)
            .policy_arn(policy_arn)
            .send()
            .await?;

        Ok(())
    }

    /// Add a user to an existing group
    pub async fn add_user_to_group(&self, group: &str, username: &str) -> Result<()> {
        self.client
            .add_user_to_group()
            .group_name(group)
            .user_name(username)
            .send()
            .await?;

        Ok(())
    }

    /// Remove a user from a group
    pub async fn remove_user_from_group(&self, group: &str, username: &str) -> Result<()> {
        self.client
            .remove_user_from_group()
            .group_name(group)
            .user_name(username)
            .send()
            .await?;

        Ok(())
    }

    /// Issue a new access key for a user
    pub async fn create_access_key(&self, username: &str) -> Result<IssuedKey> {
        let response = self
            .client
            .create_access_key()
            .user_name(username)
            .send()
            .await?;

        let key = response
            .access_key()
            .context("Backend returned no access key")?;

        Ok(IssuedKey {
            access_key_id: key.access_key_id().to_string(),
            secret_access_key: key.secret_access_key().to_string(),
        })
    }

    /// List the access keys of a user
    pub async fn list_access_keys(&self, username: &str) -> Result<Vec<AccessKeyInfo>> {
        let response = self
            .client
            .list_access_keys()
            .user_name(username)
            .send()
            .await?;

        let keys = response
            .access_key_metadata()
            .iter()
            .filter_map(|meta| {
                meta.access_key_id().map(|id| AccessKeyInfo {
                    access_key_id: id.to_string(),
                    created: meta.create_date().map(|d| {
                        chrono::DateTime::from_timestamp(d.secs(), d.subsec_nanos())
                            .unwrap_or_default()
                    }),
                })
            })
            .collect();

        Ok(keys)
    }

    /// Delete an access key of a user
    pub async fn delete_access_key(&self, username: &str, access_key_id: &str) -> Result<()> {
        self.client
            .delete_access_key()
            .user_name(username)
            .access_key_id(access_key_id)
            .send()
            .await?;

        Ok(())
    }

    /// List the names of the groups a user belongs to
    pub async fn list_groups_for_user(&self, username: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .list_groups_for_user()
            .user_name(username)
            .send()
            .await?;

        let groups = response
            .groups()
            .iter()
            .map(|g| g.group_name().to_string())
            .collect();

        Ok(groups)
    }

    /// List the ARNs of the managed policies attached to a user
    pub async fn list_attached_policies(&self, username: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .list_attached_user_policies()
            .user_name(username)
            .send()
            .await?;

        let arns = response
            .attached_policies()
            .iter()
            .filter_map(|p| p.policy_arn().map(|arn| arn.to_string()))
            .collect();

        Ok(arns)
    }
}
