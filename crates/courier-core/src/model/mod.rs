//! Notification config data model.

mod config;
mod document;
mod proptests;
mod search;

pub use config::{
    Chime, ConfigData, ConfigType, Email, EmailGroup, Feature, HttpMethod, NotificationConfig,
    Slack, SmtpAccount, SmtpMethod, Webhook,
};
pub use document::{ConfigDocument, ConfigDocumentInfo, ConfigInfo, ConfigMetadata, Tenant};
pub use search::ConfigSearchResult;
