//! Backend client wrappers
//!
//! The tool talks to two endpoints of the same provider:
//! - [`storage::StorageClient`] - bucket and object operations
//! - [`identity::IdentityClient`] - user, policy, group and key operations
//!
//! Both read their credentials from the standard AWS config files;
//! [`credentials`] verifies those files are present before any remote call.

pub mod credentials;
pub mod identity;
pub mod storage;

// Re-export commonly used types
pub use identity::{AccessKeyInfo, IdentityClient, IssuedKey};
pub use storage::{StorageClient, StorageConfig};
