//! Wasabi Account Maintenance Tool Library
//!
//! This crate provides the core functionality for the wasabi-admin command
//! line tool: the backend client wrappers, the provisioning and
//! deprovisioning workflows, and the interactive menu. The public modules
//! can be used for testing and extension.

pub mod account;
pub mod backend;
pub mod menu;
pub mod settings;
