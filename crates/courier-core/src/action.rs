//! Request and response types for config operations.
//!
//! These are shared by the lifecycle manager and the storage collaborator:
//! a [`GetConfigRequest`] without an ID is handed to the store verbatim,
//! which owns paging, sorting and filtering.

use crate::error::RestStatus;
use crate::ids::ConfigId;
use crate::model::{ConfigSearchResult, NotificationConfig};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Page size used when a request does not specify one.
pub const DEFAULT_MAX_ITEMS: usize = 100;

/// Create a config, optionally under a caller-chosen ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateConfigRequest {
    /// Caller-chosen ID; the store assigns one when absent.
    #[serde(default)]
    pub config_id: Option<ConfigId>,
    /// The config to store.
    pub config: NotificationConfig,
}

impl CreateConfigRequest {
    /// Request with a store-assigned ID.
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            config_id: None,
            config,
        }
    }

    /// Request with a caller-chosen ID.
    pub fn with_id(config_id: impl Into<ConfigId>, config: NotificationConfig) -> Self {
        Self {
            config_id: Some(config_id.into()),
            config,
        }
    }
}

/// ID of the created config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateConfigResponse {
    /// Created ID.
    pub config_id: ConfigId,
}

/// Replace the config stored under an ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateConfigRequest {
    /// Config to replace.
    pub config_id: ConfigId,
    /// Replacement config.
    pub config: NotificationConfig,
}

impl UpdateConfigRequest {
    /// Create an update request.
    pub fn new(config_id: impl Into<ConfigId>, config: NotificationConfig) -> Self {
        Self {
            config_id: config_id.into(),
            config,
        }
    }
}

/// ID of the updated config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateConfigResponse {
    /// Updated ID.
    pub config_id: ConfigId,
}

/// Sort direction for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending (default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

/// Fetch one config by ID, or list configs when no ID is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetConfigRequest {
    /// Config to fetch. Absent or empty means "list".
    #[serde(default)]
    pub config_id: Option<ConfigId>,
    /// Offset of the first listed item.
    #[serde(default)]
    pub from_index: usize,
    /// Page size.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    /// Field to sort listings by.
    #[serde(default)]
    pub sort_field: Option<String>,
    /// Sort direction.
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
    /// Field filters, interpreted by the store.
    #[serde(default)]
    pub filter_params: BTreeMap<String, String>,
}

impl Default for GetConfigRequest {
    fn default() -> Self {
        Self {
            config_id: None,
            from_index: 0,
            max_items: DEFAULT_MAX_ITEMS,
            sort_field: None,
            sort_order: None,
            filter_params: BTreeMap::new(),
        }
    }
}

impl GetConfigRequest {
    /// Request for a single config.
    pub fn by_id(config_id: impl Into<ConfigId>) -> Self {
        Self {
            config_id: Some(config_id.into()),
            ..Self::default()
        }
    }

    /// Request listing every visible config.
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds a field filter.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter_params.insert(key.into(), value.into());
        self
    }

    /// Sets sorting.
    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    /// Sets paging.
    pub fn page(mut self, from_index: usize, max_items: usize) -> Self {
        self.from_index = from_index;
        self.max_items = max_items;
        self
    }

    /// The requested ID, unless absent or empty.
    pub fn target_id(&self) -> Option<&ConfigId> {
        self.config_id.as_ref().filter(|id| !id.is_empty())
    }
}

/// Result of a get: one config or one page of configs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetConfigResponse {
    /// Matching configs.
    pub search_result: ConfigSearchResult,
}

/// Delete one or more configs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfigRequest {
    /// IDs to delete.
    pub config_ids: BTreeSet<ConfigId>,
}

impl DeleteConfigRequest {
    /// Delete a single config.
    pub fn single(config_id: impl Into<ConfigId>) -> Self {
        Self {
            config_ids: BTreeSet::from([config_id.into()]),
        }
    }

    /// Delete several configs.
    pub fn many<I, S>(config_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ConfigId>,
    {
        Self {
            config_ids: config_ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Per-ID outcome of a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfigResponse {
    /// Status for each requested ID.
    #[serde(rename = "delete_response_list")]
    pub config_id_to_status: BTreeMap<ConfigId, RestStatus>,
}
