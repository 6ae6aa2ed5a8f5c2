//! Tool settings persistence
//!
//! Stores backend endpoints and workflow defaults in the platform-specific
//! app data folder:
//! - Linux: ~/.config/wasabi-admin/settings.json
//! - Windows: %APPDATA%/wasabi-admin/settings.json
//! - macOS: ~/Library/Application Support/wasabi-admin/settings.json
//!
//! A missing file yields the Wasabi service defaults, so a fresh install
//! works without any local configuration beyond ~/.aws.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_s3_endpoint() -> String {
    "https://s3.wasabisys.com".to_string()
}

fn default_iam_endpoint() -> String {
    "https://iam.wasabisys.com".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_group() -> String {
    "backupclients".to_string()
}

fn default_page_size() -> i32 {
    1000
}

/// Settings that persist between runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Object storage service endpoint
    #[serde(default = "default_s3_endpoint")]
    pub s3_endpoint: String,

    /// Identity service endpoint
    #[serde(default = "default_iam_endpoint")]
    pub iam_endpoint: String,

    /// Region passed to both backend clients
    #[serde(default = "default_region")]
    pub region: String,

    /// Group every provisioned user is added to; must already exist
    #[serde(default = "default_group")]
    pub group: String,

    /// Objects requested per listing page when emptying a bucket
    #[serde(default = "default_page_size")]
    pub page_size: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            s3_endpoint: default_s3_endpoint(),
            iam_endpoint: default_iam_endpoint(),
            region: default_region(),
            group: default_group(),
            page_size: default_page_size(),
        }
    }
}

impl Settings {
    /// Load settings from disk, returning defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::settings_path()?;
        Self::load_from(&path)
    }

    /// Load settings from an explicit path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Settings file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;

        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings from {:?}", path))?;

        tracing::info!(
            "Loaded settings: s3={}, iam={}, group={}",
            settings.s3_endpoint,
            settings.iam_endpoint,
            settings.group
        );

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path()?;
        self.save_to(&path)
    }

    /// Save settings to an explicit path
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;

        tracing::debug!("Saved settings to {:?}", path);

        Ok(())
    }

    /// Get the path to the settings file
    fn settings_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "wasabi", "wasabi-admin")
            .context("Failed to determine settings directory")?;

        Ok(proj_dirs.config_dir().join("settings.json"))
    }
}
