//! The storage collaborator contract.

use async_trait::async_trait;
use courier_core::action::GetConfigRequest;
use courier_core::{
    AccessList, ConfigDocument, ConfigDocumentInfo, ConfigId, ConfigSearchResult, RestStatus,
};
use std::collections::{BTreeMap, BTreeSet};

/// Persistence and search for config documents.
///
/// Failures are reported in-band (`None`, `false`, per-ID statuses); the
/// lifecycle manager maps them to error kinds. Implementations provide their
/// own consistency guarantees; callers add no locking or retries.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Fetch one document.
    async fn get_notification_config(&self, id: &ConfigId) -> Option<ConfigDocumentInfo>;

    /// Fetch the subset of `ids` that exist. Callers diff against `ids`.
    async fn get_notification_configs(&self, ids: &BTreeSet<ConfigId>) -> Vec<ConfigDocumentInfo>;

    /// Store a new document under `id`, or under a generated ID when `None`.
    ///
    /// Returns the stored ID, or `None` on failure.
    async fn create_notification_config(
        &self,
        document: ConfigDocument,
        id: Option<ConfigId>,
    ) -> Option<ConfigId>;

    /// Replace the document stored under `id`. Returns `false` on failure.
    async fn update_notification_config(&self, id: &ConfigId, document: ConfigDocument) -> bool;

    /// Delete one document. Returns `false` on failure.
    async fn delete_notification_config(&self, id: &ConfigId) -> bool;

    /// Delete several documents, reporting a status per ID.
    async fn delete_notification_configs(
        &self,
        ids: &BTreeSet<ConfigId>,
    ) -> BTreeMap<ConfigId, RestStatus>;

    /// Search documents in `tenant` visible through `access`.
    ///
    /// An empty `access` list means "do not filter by access". Paging,
    /// sorting and field filters come from `request`.
    async fn get_all_notification_configs(
        &self,
        tenant: &str,
        access: &AccessList,
        request: &GetConfigRequest,
    ) -> ConfigSearchResult;
}
