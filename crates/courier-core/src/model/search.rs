//! Search results returned by config lookups.

use super::document::ConfigInfo;
use serde::{Deserialize, Serialize};

/// One page of configs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSearchResult {
    /// Offset of the first item in `config_list`.
    pub start_index: usize,
    /// Number of matches before paging.
    pub total_hits: usize,
    /// The page.
    pub config_list: Vec<ConfigInfo>,
}

impl ConfigSearchResult {
    /// Result holding exactly one config.
    pub fn single(info: ConfigInfo) -> Self {
        Self {
            start_index: 0,
            total_hits: 1,
            config_list: vec![info],
        }
    }

    /// Number of configs on this page.
    pub fn len(&self) -> usize {
        self.config_list.len()
    }

    /// Returns `true` if this page is empty.
    pub fn is_empty(&self) -> bool {
        self.config_list.is_empty()
    }
}
