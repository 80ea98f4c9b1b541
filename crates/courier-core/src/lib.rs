//! Courier Core: shared types, errors, and the configuration data model.
//!
//! This crate provides the foundational types used across all Courier crates.
//! It has no internal Courier dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error kinds, status classes, and Result alias
//! - [`ids`]: Configuration document identifiers
//! - [`access`]: Access tags stamped on stored documents
//! - [`model`]: Notification configs, metadata, stored documents, search results
//! - [`action`]: Request/response types for config operations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod access;
pub mod action;
pub mod error;
pub mod ids;
pub mod model;

// Re-export key types at crate root for convenience
pub use access::{AccessList, AccessTag};
pub use error::{Error, RestStatus, Result};
pub use ids::ConfigId;
pub use model::{
    Chime, ConfigData, ConfigDocument, ConfigDocumentInfo, ConfigInfo, ConfigMetadata,
    ConfigSearchResult, ConfigType, Email, EmailGroup, Feature, HttpMethod, NotificationConfig,
    Slack, SmtpAccount, SmtpMethod, Tenant, Webhook,
};
