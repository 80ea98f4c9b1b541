//! Validation of proposed notification configs.
//!
//! Most variants carry no rules beyond their shape. An email channel refers to
//! one SMTP account and any number of email groups; those references must
//! resolve to documents of the right type that the caller may use and that
//! allow every feature the channel asks for.

use courier_acl::{AccessPolicyEngine, Identity};
use courier_core::{
    ConfigData, ConfigDocumentInfo, ConfigId, ConfigType, Email, Error, Feature,
    NotificationConfig, Result,
};
use courier_storage::ConfigStore;
use std::collections::BTreeSet;

/// Validates configs against the store and one policy snapshot.
pub struct ConfigValidator<'a> {
    store: &'a dyn ConfigStore,
    engine: &'a AccessPolicyEngine,
}

impl<'a> ConfigValidator<'a> {
    /// Create a validator for a single request.
    pub fn new(store: &'a dyn ConfigStore, engine: &'a AccessPolicyEngine) -> Self {
        Self { store, engine }
    }

    /// Validate `config` on behalf of `user`.
    ///
    /// # Errors
    ///
    /// - `NotAcceptable` for the `None` type or a reference of the wrong type
    /// - `BadRequest` when the account ID is also listed as a group
    /// - `NotFound` when a reference does not exist
    /// - `Forbidden` when a reference is not accessible or lacks a feature
    pub async fn validate(&self, config: &NotificationConfig, user: Option<&Identity>) -> Result<()> {
        match &config.data {
            ConfigData::None => Err(Error::not_acceptable(
                "NotificationConfig with type NONE is not acceptable",
            )),
            // URL and host rules are not enforced yet
            ConfigData::Slack(_)
            | ConfigData::Chime(_)
            | ConfigData::Webhook(_)
            | ConfigData::SmtpAccount(_)
            | ConfigData::EmailGroup(_) => Ok(()),
            ConfigData::Email(email) => self.validate_email(email, &config.features, user).await,
        }
    }

    async fn validate_email(
        &self,
        email: &Email,
        features: &BTreeSet<Feature>,
        user: Option<&Identity>,
    ) -> Result<()> {
        let account_id = &email.email_account_id;
        if email.email_group_ids.contains(account_id) {
            return Err(Error::bad_request(format!(
                "Config IDs {account_id} is in both emailAccountID and emailGroupIds"
            )));
        }

        let mut config_ids = BTreeSet::from([account_id.clone()]);
        config_ids.extend(email.email_group_ids.iter().cloned());

        let documents = self.store.get_notification_configs(&config_ids).await;
        if documents.len() != config_ids.len() {
            let available: BTreeSet<&ConfigId> = documents.iter().map(|info| &info.id).collect();
            let missing = config_ids.iter().filter(|id| !available.contains(id));
            return Err(Error::not_found(format!(
                "Config IDs not found:{}",
                bracketed(missing)
            )));
        }

        for info in &documents {
            self.check_reference(info, account_id, features, user)?;
        }
        Ok(())
    }

    fn check_reference(
        &self,
        info: &ConfigDocumentInfo,
        account_id: &ConfigId,
        features: &BTreeSet<Feature>,
        user: Option<&Identity>,
    ) -> Result<()> {
        let id = &info.id;
        let document = &info.document;

        match document.config.config_type() {
            ConfigType::EmailGroup if id == account_id => {
                return Err(Error::not_acceptable(format!(
                    "configId {id} is not a valid email account ID"
                )));
            }
            ConfigType::SmtpAccount if id != account_id => {
                return Err(Error::not_acceptable(format!(
                    "configId {id} is not a valid email group ID"
                )));
            }
            ConfigType::EmailGroup | ConfigType::SmtpAccount => {}
            _ => {
                return Err(Error::not_acceptable(format!(
                    "configId {id} is not a valid email group ID or email account ID"
                )));
            }
        }

        let metadata = &document.metadata;
        if !self
            .engine
            .does_user_have_access(user, &metadata.tenant, &metadata.access)
        {
            return Err(Error::forbidden(format!(
                "Permission denied for NotificationConfig {id}"
            )));
        }

        let available = &document.config.features;
        if !features.is_subset(available) {
            let missing = features.difference(available);
            return Err(Error::forbidden(format!(
                "Some Features not available in NotificationConfig {id}:{}",
                bracketed(missing)
            )));
        }
        Ok(())
    }
}

/// Renders items as `[a, b, c]`.
pub(crate) fn bracketed<T: std::fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    let items: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    format!("[{}]", items.join(", "))
}
