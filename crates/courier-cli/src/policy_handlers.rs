//! Handler for `policy explain`.
//!
//! Runs an identity through the loaded policy and reports every decision the
//! lifecycle manager would make about it before touching a document.

use crate::cli::PolicyAction;
use crate::config::CourierConfig;
use crate::error::{Error, Result};
use courier_acl::{AccessPolicyEngine, Identity, PolicySettings};
use serde::Serialize;

/// What the policy decides for one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyExplanation {
    /// Active filter mode.
    pub filter_by: String,
    /// Active admin override.
    pub admin_access: String,
    /// Tenant the identity acts in.
    pub tenant: String,
    /// `None` when the identity passes validation, else the rejection.
    pub rejection: Option<String>,
    /// Tags stamped on configs this identity creates.
    pub owner_tags: Vec<String>,
    /// Tags a listing is filtered by; empty means unfiltered.
    pub search_tags: Vec<String>,
    /// Whether the identity sees information across all configs.
    pub all_info_access: bool,
}

impl PolicyExplanation {
    /// Explain `user` under `settings`.
    pub fn new(settings: PolicySettings, user: Option<&Identity>) -> Self {
        let engine = AccessPolicyEngine::new(settings);
        let tags = |list: courier_core::AccessList| -> Vec<String> {
            list.iter().map(ToString::to_string).collect()
        };
        Self {
            filter_by: engine.settings().filter_by.to_string(),
            admin_access: engine.settings().admin_access.to_string(),
            tenant: engine.user_tenant(user),
            rejection: engine
                .validate_user(user)
                .err()
                .map(|e| e.message().to_string()),
            owner_tags: tags(engine.all_access_info(user)),
            search_tags: tags(engine.search_access_info(user)),
            all_info_access: engine.has_all_info_access(user),
        }
    }

    /// Human-readable report.
    pub fn render(&self) -> String {
        let list = |tags: &[String]| {
            if tags.is_empty() {
                "(none)".to_string()
            } else {
                tags.join(", ")
            }
        };
        let tenant = if self.tenant.is_empty() {
            "(default)"
        } else {
            self.tenant.as_str()
        };
        let validation = match &self.rejection {
            None => "ok".to_string(),
            Some(reason) => format!("rejected: {reason}"),
        };
        let search = if self.search_tags.is_empty() {
            "(unfiltered)".to_string()
        } else {
            list(&self.search_tags)
        };
        [
            format!(
                "policy:          filter_by={} admin_access={}",
                self.filter_by, self.admin_access
            ),
            format!("tenant:          {tenant}"),
            format!("validation:      {validation}"),
            format!("owner tags:      {}", list(&self.owner_tags)),
            format!("search tags:     {search}"),
            format!("all-info access: {}", self.all_info_access),
        ]
        .join("\n")
    }
}

/// Handle a policy subcommand.
pub fn handle_policy_command(config_path: Option<&str>, action: PolicyAction) -> Result<()> {
    match action {
        PolicyAction::Explain {
            user,
            roles,
            backend_roles,
            tenant,
            no_identity,
            json,
        } => {
            let config = CourierConfig::load(config_path)?;
            let identity = (!no_identity).then(|| Identity {
                name: user,
                roles,
                backend_roles,
                requested_tenant: tenant,
            });
            let explanation = PolicyExplanation::new(config.policy, identity.as_ref());
            if json {
                let out = serde_json::to_string_pretty(&explanation)
                    .map_err(|e| Error::config(e.to_string()))?;
                println!("{out}");
            } else {
                println!("{}", explanation.render());
            }
            Ok(())
        }
    }
}
