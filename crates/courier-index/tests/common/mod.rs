//! Common test utilities and harness for courier-index integration tests.

use async_trait::async_trait;
use courier_acl::{FilterBy, Identity, PolicyHandle, PolicySettings, ALL_ACCESS_ROLE};
use courier_core::action::{CreateConfigRequest, GetConfigRequest};
use courier_core::{
    AccessList, ConfigData, ConfigDocument, ConfigDocumentInfo, ConfigId, ConfigSearchResult,
    Email, EmailGroup, Feature, NotificationConfig, RestStatus, Slack, SmtpAccount, SmtpMethod,
};
use courier_index::ConfigLifecycleManager;
use courier_storage::{ConfigStore, MemoryConfigStore};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// RecordingStore
// ---------------------------------------------------------------------------

/// Memory store that counts lookups and can be told to fail writes.
#[derive(Default)]
pub struct RecordingStore {
    /// Backing documents.
    pub inner: MemoryConfigStore,
    lookups: AtomicUsize,
    fail_writes: AtomicBool,
    fail_deletes: AtomicBool,
}

impl RecordingStore {
    /// Number of get calls (single or batch) seen so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Make create and update report failure.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Make deletes report failure without removing anything.
    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    fn writes_fail(&self) -> bool {
        self.fail_writes.load(Ordering::SeqCst)
    }

    fn deletes_fail(&self) -> bool {
        self.fail_deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigStore for RecordingStore {
    async fn get_notification_config(&self, id: &ConfigId) -> Option<ConfigDocumentInfo> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.get_notification_config(id).await
    }

    async fn get_notification_configs(&self, ids: &BTreeSet<ConfigId>) -> Vec<ConfigDocumentInfo> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.get_notification_configs(ids).await
    }

    async fn create_notification_config(
        &self,
        document: ConfigDocument,
        id: Option<ConfigId>,
    ) -> Option<ConfigId> {
        if self.writes_fail() {
            return None;
        }
        self.inner.create_notification_config(document, id).await
    }

    async fn update_notification_config(&self, id: &ConfigId, document: ConfigDocument) -> bool {
        if self.writes_fail() {
            return false;
        }
        self.inner.update_notification_config(id, document).await
    }

    async fn delete_notification_config(&self, id: &ConfigId) -> bool {
        if self.deletes_fail() {
            return false;
        }
        self.inner.delete_notification_config(id).await
    }

    async fn delete_notification_configs(
        &self,
        ids: &BTreeSet<ConfigId>,
    ) -> BTreeMap<ConfigId, RestStatus> {
        if self.deletes_fail() {
            return ids
                .iter()
                .map(|id| (id.clone(), RestStatus::RequestTimeout))
                .collect();
        }
        self.inner.delete_notification_configs(ids).await
    }

    async fn get_all_notification_configs(
        &self,
        tenant: &str,
        access: &AccessList,
        request: &GetConfigRequest,
    ) -> ConfigSearchResult {
        self.inner
            .get_all_notification_configs(tenant, access, request)
            .await
    }
}

// ---------------------------------------------------------------------------
// TestHarness
// ---------------------------------------------------------------------------

/// A lifecycle manager over a [`RecordingStore`].
pub struct TestHarness {
    /// The store, for seeding and inspection.
    pub store: Arc<RecordingStore>,
    /// The manager under test.
    pub manager: ConfigLifecycleManager,
}

impl TestHarness {
    /// Harness with the default policy (no filtering, admin sees all).
    pub fn new() -> Self {
        Self::with_policy(PolicySettings::default())
    }

    /// Harness filtering by the given mode.
    pub fn with_filter(filter_by: FilterBy) -> Self {
        Self::with_policy(PolicySettings::with_filter(filter_by))
    }

    /// Harness with explicit settings.
    pub fn with_policy(settings: PolicySettings) -> Self {
        let store = Arc::new(RecordingStore::default());
        let manager = ConfigLifecycleManager::new(store.clone(), PolicyHandle::new(settings));
        Self { store, manager }
    }

    /// Create `config` under `id` as `user`, panicking on failure.
    pub async fn seed(&self, id: &str, config: NotificationConfig, user: Option<&Identity>) {
        self.manager
            .create(CreateConfigRequest::with_id(id, config), user)
            .await
            .expect("seed config should be created");
    }

    /// Whether a document is stored under `id`.
    pub async fn exists(&self, id: &str) -> bool {
        self.store
            .inner
            .get_notification_config(&ConfigId::new(id))
            .await
            .is_some()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Identities
// ---------------------------------------------------------------------------

/// A regular user with one distinguishing role and one backend role.
pub fn user(name: &str, role: &str, backend_role: &str) -> Identity {
    Identity::named(name)
        .with_roles([role, "own_index"])
        .with_backend_roles([backend_role])
}

/// Alice: role `ops`, backend role `team_a`.
pub fn alice() -> Identity {
    user("alice", "ops", "team_a")
}

/// Bob: role `dev`, backend role `team_b`.
pub fn bob() -> Identity {
    user("bob", "dev", "team_b")
}

/// An administrator holding the all-access role.
pub fn admin() -> Identity {
    Identity::named("root").with_roles([ALL_ACCESS_ROLE])
}

// ---------------------------------------------------------------------------
// Configs
// ---------------------------------------------------------------------------

/// A Slack channel.
pub fn slack(name: &str) -> NotificationConfig {
    NotificationConfig::new(
        name,
        ConfigData::Slack(Slack {
            url: format!("https://hooks.slack.com/services/{name}"),
        }),
    )
    .with_description(format!("#{name} alerts"))
}

/// An SMTP account allowing alerting and reports.
pub fn smtp_account() -> NotificationConfig {
    NotificationConfig::new(
        "smtp",
        ConfigData::SmtpAccount(SmtpAccount {
            host: "smtp.example.com".to_string(),
            port: 465,
            method: SmtpMethod::Ssl,
            from_address: "noreply@example.com".to_string(),
        }),
    )
    .with_features([Feature::Alerting, Feature::Reports])
}

/// An email group allowing alerting only.
pub fn email_group() -> NotificationConfig {
    NotificationConfig::new(
        "oncall",
        ConfigData::EmailGroup(EmailGroup {
            recipients: vec!["oncall@example.com".to_string()],
        }),
    )
    .with_features([Feature::Alerting])
}

/// An alerting email channel using `account` and `groups`.
pub fn email(account: &str, groups: &[&str]) -> NotificationConfig {
    NotificationConfig::new(
        "email",
        ConfigData::Email(Email {
            email_account_id: ConfigId::new(account),
            recipients: vec!["team@example.com".to_string()],
            email_group_ids: groups.iter().copied().map(ConfigId::from).collect(),
        }),
    )
    .with_features([Feature::Alerting])
}
