//! Object storage client wrapper

use anyhow::{Context, Result};
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use aws_sdk_s3::Client;

/// Connection overrides for the storage endpoint.
///
/// Credentials default to whatever the AWS config files provide; the
/// explicit key fields exist for tests that run against a local MinIO
/// container.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    pub endpoint_url: Option<String>,
    pub region: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub force_path_style: bool,
}

/// Storage client wrapper with the bucket and object operations the
/// workflows need
pub struct StorageClient {
    client: Client,
}

impl StorageClient {
    /// Create a client against the given service endpoint
    pub async fn new(endpoint_url: &str, region: &str) -> Result<Self> {
        Self::with_config(StorageConfig {
            endpoint_url: Some(endpoint_url.to_string()),
            region: Some(region.to_string()),
            // Path-style addressing works for Wasabi and is required by MinIO
            force_path_style: true,
            ..Default::default()
        })
        .await
    }

    /// Create a client with explicit connection overrides
    pub async fn with_config(config: StorageConfig) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = config.region {
            loader = loader.region(aws_sdk_s3::config::Region::new(region));
        }
        if let (Some(key), Some(secret)) = (config.access_key_id, config.secret_access_key) {
            loader = loader.credentials_provider(aws_sdk_s3::config::Credentials::new(
                key, secret, None, None, "static",
            ));
        }

        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.force_path_style);
        if let Some(endpoint) = config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
        })
    }

    /// Create a bucket
    pub async fn create_bucket(&self, bucket: &str) -> Result<()> {
        self.client.create_bucket().bucket(bucket).send().await?;

        Ok(())
    }

    /// Delete a bucket; the backend rejects this while objects remain
    pub async fn delete_bucket(&self, bucket: &str) -> Result<()> {
        self.client.delete_bucket().bucket(bucket).send().await?;

        Ok(())
    }

    /// List up to one page of object keys in a bucket
    pub async fn list_object_page(&self, bucket: &str, max_keys: i32) -> Result<Vec<String>> {
        let response = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .max_keys(max_keys)
            .send()
            .await?;

        let keys = response
            .contents()
            .iter()
            .filter_map(|obj| obj.key().map(|k| k.to_string()))
            .collect();

        Ok(keys)
    }

    /// Batch-delete the given object keys
    pub async fn delete_objects(&self, bucket: &str, keys: &[String]) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let objects = keys
            .iter()
            .map(|key| ObjectIdentifier::builder().key(key).build())
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid object key in delete batch")?;

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .build()
            .context("Failed to build delete batch")?;

        self.client
            .delete_objects()
            .bucket(bucket)
            .delete(delete)
            .send()
            .await?;

        Ok(())
    }

    /// Upload bytes as an object
    pub async fn put_object(&self, bucket: &str, key: &str, data: Vec<u8>) -> Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(data.into())
            .send()
            .await?;

        Ok(())
    }
}
