//! Integration tests for the storage client using MinIO via testcontainers
//!
//! These tests require Docker to be running and use the testcontainers crate
//! to spin up a MinIO instance for realistic S3 testing. The identity
//! endpoint has no equivalent container, so the IAM side of the workflows is
//! exercised by unit tests only.
//!
//! Run with: cargo test --test storage_integration
//!
//! Note: Tests are conditionally skipped if Docker is not available.

use std::time::Duration;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::minio::MinIO;
use wasabi_admin::account::deprovision::purge_bucket;
use wasabi_admin::backend::storage::{StorageClient, StorageConfig};

/// MinIO default credentials
const MINIO_ACCESS_KEY: &str = "minioadmin";
const MINIO_SECRET_KEY: &str = "minioadmin";

/// Helper to get MinIO endpoint URL from container
async fn get_minio_endpoint(container: &ContainerAsync<MinIO>) -> String {
    let host = container
        .get_host()
        .await
        .expect("Failed to get container host");
    let port = container
        .get_host_port_ipv4(9000)
        .await
        .expect("Failed to get MinIO port");
    format!("http://{}:{}", host, port)
}

/// Test helper to check if Docker is available
fn docker_available() -> bool {
    std::process::Command::new("docker")
        .arg("info")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Helper to create a storage client configured for MinIO
async fn create_minio_client(endpoint: &str) -> StorageClient {
    let config = StorageConfig {
        endpoint_url: Some(endpoint.to_string()),
        force_path_style: true,
        region: Some("us-east-1".to_string()),
        access_key_id: Some(MINIO_ACCESS_KEY.to_string()),
        secret_access_key: Some(MINIO_SECRET_KEY.to_string()),
    };
    StorageClient::with_config(config)
        .await
        .expect("Failed to create MinIO client")
}

async fn start_minio() -> ContainerAsync<MinIO> {
    let container = MinIO::default()
        .with_env_var("MINIO_ROOT_USER", MINIO_ACCESS_KEY)
        .with_env_var("MINIO_ROOT_PASSWORD", MINIO_SECRET_KEY)
        .start()
        .await
        .expect("Failed to start MinIO container");

    // Wait for MinIO to be ready
    tokio::time::sleep(Duration::from_secs(2)).await;

    container
}

/// Bucket lifecycle: create, then delete while empty
#[tokio::test]
async fn test_create_and_delete_bucket() {
    if !docker_available() {
        eprintln!("Skipping test: Docker not available");
        return;
    }

    let container = start_minio().await;
    let endpoint = get_minio_endpoint(&container).await;
    let client = create_minio_client(&endpoint).await;

    client
        .create_bucket("acme")
        .await
        .expect("Failed to create bucket");

    let keys = client
        .list_object_page("acme", 1000)
        .await
        .expect("Failed to list new bucket");
    assert!(keys.is_empty());

    client
        .delete_bucket("acme")
        .await
        .expect("Failed to delete empty bucket");
}

/// Creating the same bucket twice is rejected by the backend
#[tokio::test]
async fn test_duplicate_bucket_is_a_conflict() {
    if !docker_available() {
        eprintln!("Skipping test: Docker not available");
        return;
    }

    let container = start_minio().await;
    let endpoint = get_minio_endpoint(&container).await;
    let client = create_minio_client(&endpoint).await;

    client
        .create_bucket("acme")
        .await
        .expect("Failed to create bucket");

    assert!(client.create_bucket("acme").await.is_err());
}

/// Purging an empty bucket is a zero-iteration no-op and the bucket can
/// still be deleted afterwards
#[tokio::test]
async fn test_purge_empty_bucket_then_delete() {
    if !docker_available() {
        eprintln!("Skipping test: Docker not available");
        return;
    }

    let container = start_minio().await;
    let endpoint = get_minio_endpoint(&container).await;
    let client = create_minio_client(&endpoint).await;

    client
        .create_bucket("acme")
        .await
        .expect("Failed to create bucket");

    purge_bucket(&client, "acme", 1000)
        .await
        .expect("Purge of empty bucket failed");

    client
        .delete_bucket("acme")
        .await
        .expect("Failed to delete bucket after no-op purge");
}

/// Purging loops across listing pages until the bucket is empty
#[tokio::test]
async fn test_purge_bucket_across_pages() {
    if !docker_available() {
        eprintln!("Skipping test: Docker not available");
        return;
    }

    let container = start_minio().await;
    let endpoint = get_minio_endpoint(&container).await;
    let client = create_minio_client(&endpoint).await;

    client
        .create_bucket("acme")
        .await
        .expect("Failed to create bucket");

    // Seed more objects than one listing page holds
    for i in 0..5 {
        let key = format!("backup/archive-{}.dat", i);
        client
            .put_object("acme", &key, format!("payload {}", i).into_bytes())
            .await
            .expect("Failed to seed object");
    }

    // Page size of 2 forces the purge loop through several passes
    purge_bucket(&client, "acme", 2)
        .await
        .expect("Purge across pages failed");

    let remaining = client
        .list_object_page("acme", 1000)
        .await
        .expect("Failed to list purged bucket");
    assert!(remaining.is_empty());

    client
        .delete_bucket("acme")
        .await
        .expect("Failed to delete purged bucket");
}

/// Batch delete with an empty key list is a no-op rather than an error
#[tokio::test]
async fn test_delete_objects_empty_batch() {
    if !docker_available() {
        eprintln!("Skipping test: Docker not available");
        return;
    }

    let container = start_minio().await;
    let endpoint = get_minio_endpoint(&container).await;
    let client = create_minio_client(&endpoint).await;

    client
        .create_bucket("acme")
        .await
        .expect("Failed to create bucket");

    client
        .delete_objects("acme", &[])
        .await
        .expect("Empty batch delete should be a no-op");
}
