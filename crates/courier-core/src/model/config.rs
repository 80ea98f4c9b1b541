//! Channel config variants and the [`NotificationConfig`] wrapper.
//!
//! The variant discriminant is carried by [`ConfigData`] itself, so a config's
//! [`ConfigType`] can never disagree with its payload. Serialized form:
//!
//! ```json
//! {
//!   "name": "ops-alerts",
//!   "description": "",
//!   "feature_list": ["alerting"],
//!   "is_enabled": true,
//!   "config_type": "slack",
//!   "url": "https://hooks.slack.com/services/..."
//! }
//! ```

use crate::ids::ConfigId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Discriminant of a [`ConfigData`] payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigType {
    /// Sentinel; always rejected by validation.
    None,
    /// Slack incoming webhook.
    Slack,
    /// Amazon Chime webhook.
    Chime,
    /// Generic HTTP webhook.
    Webhook,
    /// Email channel referencing an SMTP account and email groups.
    Email,
    /// SMTP account used by email channels.
    SmtpAccount,
    /// Named group of email recipients.
    EmailGroup,
}

impl ConfigType {
    /// Stable snake_case label, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Slack => "slack",
            Self::Chime => "chime",
            Self::Webhook => "webhook",
            Self::Email => "email",
            Self::SmtpAccount => "smtp_account",
            Self::EmailGroup => "email_group",
        }
    }
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConfigType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "slack" => Ok(Self::Slack),
            "chime" => Ok(Self::Chime),
            "webhook" => Ok(Self::Webhook),
            "email" => Ok(Self::Email),
            "smtp_account" => Ok(Self::SmtpAccount),
            "email_group" => Ok(Self::EmailGroup),
            other => Err(format!("unknown config type '{other}'")),
        }
    }
}

/// Product feature a config may be used by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Alerting monitors.
    Alerting,
    /// Index state management.
    IndexManagement,
    /// Scheduled reports.
    Reports,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Alerting => "alerting",
            Self::IndexManagement => "index_management",
            Self::Reports => "reports",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "alerting" => Ok(Self::Alerting),
            "index_management" => Ok(Self::IndexManagement),
            "reports" => Ok(Self::Reports),
            other => Err(format!("unknown feature '{other}'")),
        }
    }
}

/// Slack channel payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slack {
    /// Incoming webhook URL.
    pub url: String,
}

/// Chime channel payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chime {
    /// Chime webhook URL.
    pub url: String,
}

/// HTTP method used by a webhook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// POST (default)
    #[default]
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
}

/// Generic webhook payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    /// Target URL.
    pub url: String,
    /// Extra headers sent with each request.
    #[serde(default)]
    pub header_params: BTreeMap<String, String>,
    /// HTTP method.
    #[serde(default)]
    pub method: HttpMethod,
}

/// Email channel payload.
///
/// `email_account_id` and `email_group_ids` are references to other stored
/// configs; they are resolved at validation time, never embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    /// ID of the [`SmtpAccount`] config to send through.
    pub email_account_id: ConfigId,
    /// Direct recipients.
    #[serde(default)]
    pub recipients: Vec<String>,
    /// IDs of [`EmailGroup`] configs to expand into recipients.
    #[serde(default)]
    pub email_group_ids: Vec<ConfigId>,
}

/// Transport security for an SMTP account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmtpMethod {
    /// Plain connection.
    #[default]
    None,
    /// Implicit TLS.
    Ssl,
    /// STARTTLS upgrade.
    StartTls,
}

/// SMTP account payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpAccount {
    /// Server host name.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Transport security.
    #[serde(default)]
    pub method: SmtpMethod,
    /// Envelope sender address.
    pub from_address: String,
}

/// Email group payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailGroup {
    /// Member addresses.
    pub recipients: Vec<String>,
}

/// Variant payload of a notification config.
///
/// Matching on this enum is exhaustive everywhere it is dispatched on, so a
/// new variant cannot be added without a validator arm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "config_type", rename_all = "snake_case")]
pub enum ConfigData {
    /// Sentinel with no payload.
    None,
    /// Slack channel.
    Slack(Slack),
    /// Chime channel.
    Chime(Chime),
    /// Generic webhook.
    Webhook(Webhook),
    /// Email channel.
    Email(Email),
    /// SMTP account.
    SmtpAccount(SmtpAccount),
    /// Email group.
    EmailGroup(EmailGroup),
}

impl ConfigData {
    /// Discriminant of this payload.
    pub fn config_type(&self) -> ConfigType {
        match self {
            Self::None => ConfigType::None,
            Self::Slack(_) => ConfigType::Slack,
            Self::Chime(_) => ConfigType::Chime,
            Self::Webhook(_) => ConfigType::Webhook,
            Self::Email(_) => ConfigType::Email,
            Self::SmtpAccount(_) => ConfigType::SmtpAccount,
            Self::EmailGroup(_) => ConfigType::EmailGroup,
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// A notification channel configuration as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Features allowed to use this config.
    #[serde(rename = "feature_list", default)]
    pub features: BTreeSet<Feature>,
    /// Whether the channel is active.
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
    /// Variant payload; also carries the `config_type` discriminant.
    #[serde(flatten)]
    pub data: ConfigData,
}

impl NotificationConfig {
    /// Creates an enabled config with no features and an empty description.
    pub fn new<S: Into<String>>(name: S, data: ConfigData) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            features: BTreeSet::new(),
            is_enabled: true,
            data,
        }
    }

    /// Sets the description.
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the feature set.
    pub fn with_features<I: IntoIterator<Item = Feature>>(mut self, features: I) -> Self {
        self.features = features.into_iter().collect();
        self
    }

    /// Sets the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.is_enabled = enabled;
        self
    }

    /// Discriminant of the payload.
    pub fn config_type(&self) -> ConfigType {
        self.data.config_type()
    }
}
