//! Local credential discovery
//!
//! The backend clients authenticate with the standard AWS config files under
//! `~/.aws`. This module only checks the folder is present before any remote
//! call is attempted; the file contents are consumed by the SDK, not parsed
//! here.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// The credential folder was not found.
#[derive(Debug, Error)]
#[error(
    "Could not find the Wasabi credentials folder {}.\n\
     Please make sure it is present and contains config and credentials files.",
    .path.display()
)]
pub struct MissingCredentials {
    pub path: PathBuf,
}

/// Path to the AWS config directory under the operator's home folder
pub fn aws_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".aws"))
        .unwrap_or_else(|| PathBuf::from(".aws"))
}

/// Verify the credential folder exists, naming the expected path on failure
pub fn ensure_credentials_present() -> Result<(), MissingCredentials> {
    ensure_credentials_present_at(&aws_config_dir())
}

/// Check an explicit path instead of the operator's home folder
pub fn ensure_credentials_present_at(dir: &Path) -> Result<(), MissingCredentials> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(MissingCredentials {
            path: dir.to_path_buf(),
        })
    }
}
