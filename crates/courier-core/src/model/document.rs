//! Stored config documents and their metadata.

use super::config::NotificationConfig;
use crate::access::AccessList;
use crate::ids::ConfigId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tenant identifier. The empty string is the default, shared tenant.
pub type Tenant = String;

/// Ownership and timestamps of a stored config.
///
/// `tenant`, `access` and `created_time` are fixed at creation; only
/// `last_update_time` moves afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Tenant the config belongs to.
    pub tenant: Tenant,
    /// Access tags of the creator.
    pub access: AccessList,
    /// Creation time.
    pub created_time: DateTime<Utc>,
    /// Time of the most recent update.
    pub last_update_time: DateTime<Utc>,
}

impl ConfigMetadata {
    /// Metadata for a freshly created document; both timestamps are `now`.
    pub fn new(tenant: Tenant, access: AccessList, now: DateTime<Utc>) -> Self {
        Self {
            tenant,
            access,
            created_time: now,
            last_update_time: now,
        }
    }

    /// Copy of this metadata with `last_update_time` moved to `now`.
    pub fn touched(&self, now: DateTime<Utc>) -> Self {
        Self {
            last_update_time: now,
            ..self.clone()
        }
    }
}

/// Unit of storage: metadata plus the caller's config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Ownership and timestamps.
    pub metadata: ConfigMetadata,
    /// The config as supplied by the caller.
    pub config: NotificationConfig,
}

/// A stored document together with its ID, as returned by lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocumentInfo {
    /// Document ID.
    pub id: ConfigId,
    /// Stored document.
    pub document: ConfigDocument,
}

/// Caller-facing view of a stored config.
///
/// Omits the access list; callers see the tenant and timestamps only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigInfo {
    /// Document ID.
    pub config_id: ConfigId,
    /// Time of the most recent update.
    pub last_updated_time: DateTime<Utc>,
    /// Creation time.
    pub created_time: DateTime<Utc>,
    /// Owning tenant.
    pub tenant: Tenant,
    /// The config.
    pub config: NotificationConfig,
}

impl From<ConfigDocumentInfo> for ConfigInfo {
    fn from(info: ConfigDocumentInfo) -> Self {
        let ConfigDocument { metadata, config } = info.document;
        Self {
            config_id: info.id,
            last_updated_time: metadata.last_update_time,
            created_time: metadata.created_time,
            tenant: metadata.tenant,
            config,
        }
    }
}
