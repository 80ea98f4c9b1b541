//! Create, update, get and delete of notification configs.
//!
//! Every operation takes one policy snapshot when it starts and decides with
//! it throughout, so a concurrent reload never splits a request between two
//! policies. Store calls are awaited one after another; nothing is cached
//! between requests.

use crate::validator::{bracketed, ConfigValidator};
use chrono::Utc;
use courier_acl::{AccessPolicyEngine, Identity, PolicyHandle};
use courier_core::action::{
    CreateConfigRequest, CreateConfigResponse, DeleteConfigRequest, DeleteConfigResponse,
    GetConfigRequest, GetConfigResponse, UpdateConfigRequest, UpdateConfigResponse,
};
use courier_core::{
    ConfigDocument, ConfigDocumentInfo, ConfigId, ConfigInfo, ConfigMetadata, ConfigSearchResult,
    Error, RestStatus, Result,
};
use courier_storage::ConfigStore;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Prefix of every lifecycle log line.
pub const LOG_PREFIX: &str = "courier";

/// Orchestrates config operations against a store under the current policy.
#[derive(Clone)]
pub struct ConfigLifecycleManager {
    store: Arc<dyn ConfigStore>,
    policy: PolicyHandle,
}

impl ConfigLifecycleManager {
    /// Create a manager over `store`, deciding access with `policy`.
    pub fn new(store: Arc<dyn ConfigStore>, policy: PolicyHandle) -> Self {
        Self { store, policy }
    }

    /// The policy handle; reloads through it apply to later requests.
    pub fn policy(&self) -> &PolicyHandle {
        &self.policy
    }

    /// Create a config owned by `user`'s tenant and access tags.
    pub async fn create(
        &self,
        request: CreateConfigRequest,
        user: Option<&Identity>,
    ) -> Result<CreateConfigResponse> {
        log::info!("{LOG_PREFIX}:NotificationConfig-create");
        let engine = self.policy.engine();
        engine.validate_user(user)?;
        self.validator(&engine).validate(&request.config, user).await?;

        let metadata = ConfigMetadata::new(
            engine.user_tenant(user),
            engine.all_access_info(user),
            Utc::now(),
        );
        let document = ConfigDocument {
            metadata,
            config: request.config,
        };
        let config_id = self
            .store
            .create_notification_config(document, request.config_id)
            .await
            .ok_or_else(|| Error::internal("NotificationConfig Creation failed"))?;
        Ok(CreateConfigResponse { config_id })
    }

    /// Replace a config, keeping its tenant, access and creation time.
    pub async fn update(
        &self,
        request: UpdateConfigRequest,
        user: Option<&Identity>,
    ) -> Result<UpdateConfigResponse> {
        let config_id = request.config_id;
        log::info!("{LOG_PREFIX}:NotificationConfig-update {config_id}");
        let engine = self.policy.engine();
        engine.validate_user(user)?;
        self.validator(&engine).validate(&request.config, user).await?;

        let current = self.fetch_accessible(&engine, &config_id, user).await?;
        let document = ConfigDocument {
            metadata: current.document.metadata.touched(Utc::now()),
            config: request.config,
        };
        if !self
            .store
            .update_notification_config(&config_id, document)
            .await
        {
            return Err(Error::internal("NotificationConfig Update failed"));
        }
        Ok(UpdateConfigResponse { config_id })
    }

    /// Fetch one config by ID, or list the configs `user` may see.
    pub async fn get(
        &self,
        request: &GetConfigRequest,
        user: Option<&Identity>,
    ) -> Result<GetConfigResponse> {
        log::info!("{LOG_PREFIX}:NotificationConfig-get {request:?}");
        let engine = self.policy.engine();
        engine.validate_user(user)?;
        let search_result = match request.target_id() {
            Some(config_id) => self.info(&engine, config_id, user).await?,
            None => self.get_all(&engine, request, user).await,
        };
        Ok(GetConfigResponse { search_result })
    }

    /// Delete one or more configs.
    ///
    /// The caller is validated first. An empty set is then a bad request.
    /// A single ID is deleted on its own and a store failure is reported as
    /// `RequestTimeout`. Several IDs are checked as a whole first: a missing
    /// or inaccessible ID fails the request with nothing deleted. After that
    /// the store's per-ID statuses are returned as they are.
    pub async fn delete(
        &self,
        request: &DeleteConfigRequest,
        user: Option<&Identity>,
    ) -> Result<DeleteConfigResponse> {
        let ids = &request.config_ids;
        log::info!(
            "{LOG_PREFIX}:NotificationConfig-delete {}",
            bracketed(ids.iter())
        );
        let engine = self.policy.engine();
        engine.validate_user(user)?;
        let mut single = ids.iter();
        match (single.next(), single.next()) {
            (None, _) => Err(Error::bad_request("No config IDs given to delete")),
            (Some(config_id), None) => self.delete_one(&engine, config_id, user).await,
            _ => self.delete_many(&engine, ids, user).await,
        }
    }

    // -----------------------------------------------------------------------
    // Operation steps
    // -----------------------------------------------------------------------

    fn validator<'a>(&'a self, engine: &'a AccessPolicyEngine) -> ConfigValidator<'a> {
        ConfigValidator::new(self.store.as_ref(), engine)
    }

    async fn fetch_accessible(
        &self,
        engine: &AccessPolicyEngine,
        config_id: &ConfigId,
        user: Option<&Identity>,
    ) -> Result<ConfigDocumentInfo> {
        let info = self
            .store
            .get_notification_config(config_id)
            .await
            .ok_or_else(|| Error::not_found(format!("NotificationConfig {config_id} not found")))?;
        let metadata = &info.document.metadata;
        if !engine.does_user_have_access(user, &metadata.tenant, &metadata.access) {
            return Err(permission_denied(config_id));
        }
        Ok(info)
    }

    async fn info(
        &self,
        engine: &AccessPolicyEngine,
        config_id: &ConfigId,
        user: Option<&Identity>,
    ) -> Result<ConfigSearchResult> {
        log::info!("{LOG_PREFIX}:NotificationConfig-info {config_id}");
        let info = self.fetch_accessible(engine, config_id, user).await?;
        Ok(ConfigSearchResult::single(ConfigInfo::from(info)))
    }

    async fn get_all(
        &self,
        engine: &AccessPolicyEngine,
        request: &GetConfigRequest,
        user: Option<&Identity>,
    ) -> ConfigSearchResult {
        log::info!("{LOG_PREFIX}:NotificationConfig-getAll");
        let tenant = engine.user_tenant(user);
        let access = engine.search_access_info(user);
        self.store
            .get_all_notification_configs(&tenant, &access, request)
            .await
    }

    async fn delete_one(
        &self,
        engine: &AccessPolicyEngine,
        config_id: &ConfigId,
        user: Option<&Identity>,
    ) -> Result<DeleteConfigResponse> {
        self.fetch_accessible(engine, config_id, user).await?;
        if !self.store.delete_notification_config(config_id).await {
            log::warn!("Store failed to delete NotificationConfig {config_id}");
            return Err(Error::request_timeout(format!(
                "NotificationConfig {config_id} delete failed"
            )));
        }
        Ok(DeleteConfigResponse {
            config_id_to_status: BTreeMap::from([(config_id.clone(), RestStatus::Ok)]),
        })
    }

    async fn delete_many(
        &self,
        engine: &AccessPolicyEngine,
        config_ids: &BTreeSet<ConfigId>,
        user: Option<&Identity>,
    ) -> Result<DeleteConfigResponse> {
        let documents = self.store.get_notification_configs(config_ids).await;
        if documents.len() != config_ids.len() {
            let found: BTreeSet<&ConfigId> = documents.iter().map(|info| &info.id).collect();
            let missing = config_ids.iter().filter(|id| !found.contains(id));
            return Err(Error::not_found(format!(
                "NotificationConfig {} not found",
                bracketed(missing)
            )));
        }
        for info in &documents {
            let metadata = &info.document.metadata;
            if !engine.does_user_have_access(user, &metadata.tenant, &metadata.access) {
                return Err(permission_denied(&info.id));
            }
        }
        let config_id_to_status = self.store.delete_notification_configs(config_ids).await;
        let failed = config_id_to_status
            .values()
            .filter(|status| !status.is_success())
            .count();
        if failed > 0 {
            log::warn!("Store failed to delete {failed} of {} configs", config_ids.len());
        }
        Ok(DeleteConfigResponse {
            config_id_to_status,
        })
    }
}

impl std::fmt::Debug for ConfigLifecycleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLifecycleManager")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn permission_denied(config_id: &ConfigId) -> Error {
    Error::forbidden(format!("Permission denied for NotificationConfig {config_id}"))
}
