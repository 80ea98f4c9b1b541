//! In-memory config store.
//!
//! Documents live in a `BTreeMap` behind a `tokio::sync::RwLock`, so reads
//! run concurrently and every write is atomic with respect to other calls.
//! Search applies tenant, access and field filters, then sorts and pages.

use crate::traits::ConfigStore;
use async_trait::async_trait;
use courier_core::action::{GetConfigRequest, SortOrder};
use courier_core::{
    AccessList, ConfigDocument, ConfigDocumentInfo, ConfigId, ConfigInfo, ConfigSearchResult,
    ConfigType, Feature, RestStatus,
};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

/// Filter key matching `config_type` against a comma-separated list.
pub const FILTER_CONFIG_TYPE: &str = "config_type";
/// Filter key matching any of a comma-separated list of features.
pub const FILTER_FEATURE_LIST: &str = "feature_list";
/// Filter key matching the enabled flag (`true`/`false`).
pub const FILTER_IS_ENABLED: &str = "is_enabled";
/// Filter key matching a case-insensitive substring of the name.
pub const FILTER_NAME: &str = "name";

/// Config store backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    documents: RwLock<BTreeMap<ConfigId, ConfigDocument>>,
}

impl MemoryConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a document under `id`, replacing any existing one.
    ///
    /// Bypasses all checks; used to seed fixtures.
    pub async fn insert(&self, id: impl Into<ConfigId>, document: ConfigDocument) {
        self.documents.write().await.insert(id.into(), document);
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Returns `true` if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn get_notification_config(&self, id: &ConfigId) -> Option<ConfigDocumentInfo> {
        let documents = self.documents.read().await;
        documents.get(id).map(|document| ConfigDocumentInfo {
            id: id.clone(),
            document: document.clone(),
        })
    }

    async fn get_notification_configs(&self, ids: &BTreeSet<ConfigId>) -> Vec<ConfigDocumentInfo> {
        let documents = self.documents.read().await;
        ids.iter()
            .filter_map(|id| {
                documents.get(id).map(|document| ConfigDocumentInfo {
                    id: id.clone(),
                    document: document.clone(),
                })
            })
            .collect()
    }

    async fn create_notification_config(
        &self,
        document: ConfigDocument,
        id: Option<ConfigId>,
    ) -> Option<ConfigId> {
        let id = id.filter(|id| !id.is_empty()).unwrap_or_else(ConfigId::generate);
        let mut documents = self.documents.write().await;
        if documents.contains_key(&id) {
            log::warn!("Config {id} already exists");
            return None;
        }
        documents.insert(id.clone(), document);
        Some(id)
    }

    async fn update_notification_config(&self, id: &ConfigId, document: ConfigDocument) -> bool {
        let mut documents = self.documents.write().await;
        match documents.get_mut(id) {
            Some(existing) => {
                *existing = document;
                true
            }
            None => false,
        }
    }

    async fn delete_notification_config(&self, id: &ConfigId) -> bool {
        self.documents.write().await.remove(id).is_some()
    }

    async fn delete_notification_configs(
        &self,
        ids: &BTreeSet<ConfigId>,
    ) -> BTreeMap<ConfigId, RestStatus> {
        let mut documents = self.documents.write().await;
        ids.iter()
            .map(|id| {
                let status = match documents.remove(id) {
                    Some(_) => RestStatus::Ok,
                    None => RestStatus::NotFound,
                };
                (id.clone(), status)
            })
            .collect()
    }

    async fn get_all_notification_configs(
        &self,
        tenant: &str,
        access: &AccessList,
        request: &GetConfigRequest,
    ) -> ConfigSearchResult {
        let documents = self.documents.read().await;
        let mut hits: Vec<ConfigDocumentInfo> = documents
            .iter()
            .filter(|(_, document)| document.metadata.tenant == tenant)
            .filter(|(_, document)| {
                access.is_unrestricted() || document.metadata.access.intersects(access)
            })
            .filter(|(_, document)| matches_filters(document, &request.filter_params))
            .map(|(id, document)| ConfigDocumentInfo {
                id: id.clone(),
                document: document.clone(),
            })
            .collect();
        drop(documents);

        let field = request.sort_field.as_deref();
        hits.sort_by(|a, b| compare_by(field, a, b));
        if request.sort_order == Some(SortOrder::Desc) {
            hits.reverse();
        }

        let total_hits = hits.len();
        let config_list = hits
            .into_iter()
            .skip(request.from_index)
            .take(request.max_items)
            .map(ConfigInfo::from)
            .collect();

        ConfigSearchResult {
            start_index: request.from_index,
            total_hits,
            config_list,
        }
    }
}

// ---------------------------------------------------------------------------
// Search helpers
// ---------------------------------------------------------------------------

fn matches_filters(document: &ConfigDocument, filters: &BTreeMap<String, String>) -> bool {
    let config = &document.config;
    filters.iter().all(|(key, value)| match key.as_str() {
        FILTER_CONFIG_TYPE => split_list(value)
            .filter_map(|label| label.parse::<ConfigType>().ok())
            .any(|config_type| config_type == config.config_type()),
        FILTER_FEATURE_LIST => split_list(value)
            .filter_map(|label| label.parse::<Feature>().ok())
            .any(|feature| config.features.contains(&feature)),
        FILTER_IS_ENABLED => value
            .parse::<bool>()
            .is_ok_and(|enabled| enabled == config.is_enabled),
        FILTER_NAME => config
            .name
            .to_lowercase()
            .contains(&value.to_lowercase()),
        other => {
            log::debug!("Ignoring unsupported filter '{other}'");
            true
        }
    })
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn compare_by(field: Option<&str>, a: &ConfigDocumentInfo, b: &ConfigDocumentInfo) -> Ordering {
    let (left, right) = (&a.document, &b.document);
    let primary = match field {
        Some("name") => left.config.name.cmp(&right.config.name),
        Some("config_type") => left
            .config
            .config_type()
            .as_str()
            .cmp(right.config.config_type().as_str()),
        Some("created_time") => left.metadata.created_time.cmp(&right.metadata.created_time),
        Some("last_updated_time") => left
            .metadata
            .last_update_time
            .cmp(&right.metadata.last_update_time),
        _ => Ordering::Equal,
    };
    primary.then_with(|| a.id.cmp(&b.id))
}
