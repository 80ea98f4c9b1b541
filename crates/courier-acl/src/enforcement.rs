//! Per-request access decisions.
//!
//! [`AccessPolicyEngine`] answers "may this identity act on this
//! tenant/access list?" for one fixed [`PolicySettings`] snapshot. It performs
//! no I/O and holds no mutable state.
//!
//! Every method takes `Option<&Identity>`; `None` means security is disabled.

use crate::identity::Identity;
use crate::policy::{
    AdminAccess, FilterBy, PolicySettings, ALL_ACCESS_ROLE, DEFAULT_TENANT, PRIVATE_TENANT,
};
use courier_core::{AccessList, AccessTag, Error, Result, Tenant};
use std::sync::Arc;

/// Access decision engine bound to one policy snapshot.
#[derive(Debug, Clone)]
pub struct AccessPolicyEngine {
    settings: Arc<PolicySettings>,
}

impl AccessPolicyEngine {
    /// Create an engine for the given settings.
    pub fn new(settings: impl Into<Arc<PolicySettings>>) -> Self {
        Self {
            settings: settings.into(),
        }
    }

    /// The settings this engine decides with.
    pub fn settings(&self) -> &PolicySettings {
        &self.settings
    }

    /// Check that the identity carries what the filter mode needs.
    ///
    /// - Private tenant: a user name must be present.
    /// - `NoFilter`: nothing required.
    /// - `User`: a user name must be present.
    /// - `Roles`: at least one role that is not ignored.
    /// - `BackendRoles`: at least one backend role.
    pub fn validate_user(&self, user: Option<&Identity>) -> Result<()> {
        let name = user.and_then(|u| u.name.as_deref());
        if self.is_private_tenant(user) && name.is_none() {
            return Err(Error::forbidden(
                "User name not provided for private tenant access",
            ));
        }
        match self.settings.filter_by {
            FilterBy::NoFilter => Ok(()),
            FilterBy::User => match name {
                Some(_) => Ok(()),
                None => Err(Error::forbidden("Filter-by enabled with security disabled")),
            },
            FilterBy::Roles => {
                let roles = user.map(|u| u.roles.as_slice()).unwrap_or_default();
                if roles.is_empty() {
                    Err(Error::forbidden(
                        "User doesn't have roles configured. Contact administrator.",
                    ))
                } else if !roles.iter().any(|r| !self.settings.is_ignored_role(r)) {
                    Err(Error::forbidden(
                        "No distinguishing roles configured. Contact administrator.",
                    ))
                } else {
                    Ok(())
                }
            }
            FilterBy::BackendRoles => {
                let has_backend_roles = user.is_some_and(|u| !u.backend_roles.is_empty());
                if has_backend_roles {
                    Ok(())
                } else {
                    Err(Error::forbidden(
                        "User doesn't have backend roles configured. Contact administrator.",
                    ))
                }
            }
        }
    }

    /// Tenant the identity is acting in.
    pub fn user_tenant(&self, user: Option<&Identity>) -> Tenant {
        user.and_then(|u| u.requested_tenant.clone())
            .unwrap_or_else(|| DEFAULT_TENANT.to_string())
    }

    /// Every access tag of the identity: user, then roles, then backend roles.
    ///
    /// This is what gets stamped on a newly created config.
    pub fn all_access_info(&self, user: Option<&Identity>) -> AccessList {
        let Some(user) = user else {
            return AccessList::new();
        };
        let mut access = AccessList::new();
        if let Some(name) = &user.name {
            access.push(AccessTag::user(name.as_str()));
        }
        for role in &user.roles {
            access.push(AccessTag::role(role.as_str()));
        }
        for role in &user.backend_roles {
            access.push(AccessTag::backend_role(role.as_str()));
        }
        access
    }

    /// Access tags to filter a search by.
    ///
    /// An empty list means "do not filter": security disabled, `NoFilter`,
    /// or an administrator under [`AdminAccess::All`].
    pub fn search_access_info(&self, user: Option<&Identity>) -> AccessList {
        let Some(identity) = user else {
            return AccessList::new();
        };
        if self.is_private_tenant(user) {
            // No sharing in the private tenant
            return AccessList::from(vec![user_tag(identity)]);
        }
        if self.can_admin_view_all_items(identity) {
            return AccessList::new();
        }
        match self.settings.filter_by {
            FilterBy::NoFilter => AccessList::new(),
            FilterBy::User => AccessList::from(vec![user_tag(identity)]),
            FilterBy::Roles => self.distinguishing_role_tags(identity).collect(),
            FilterBy::BackendRoles => backend_role_tags(identity).collect(),
        }
    }

    /// Whether the identity may act on a config stored under `tenant` with
    /// the given access list.
    pub fn does_user_have_access(
        &self,
        user: Option<&Identity>,
        tenant: &str,
        access: &AccessList,
    ) -> bool {
        let Some(identity) = user else {
            return true;
        };
        if self.user_tenant(user) != tenant {
            log::debug!(
                "Access denied: tenant mismatch (requested '{}', stored '{tenant}')",
                self.user_tenant(user)
            );
            return false;
        }
        if self.can_admin_view_all_items(identity) {
            return true;
        }
        let allowed = match self.settings.filter_by {
            FilterBy::NoFilter => true,
            FilterBy::User => identity
                .name
                .as_deref()
                .is_some_and(|name| access.contains(&AccessTag::user(name))),
            FilterBy::Roles => self
                .distinguishing_role_tags(identity)
                .any(|tag| access.contains(&tag)),
            FilterBy::BackendRoles => backend_role_tags(identity).any(|tag| access.contains(&tag)),
        };
        if !allowed {
            log::debug!("Access denied: no matching {} tag", self.settings.filter_by);
        }
        allowed
    }

    /// Whether the identity may see information across all configs.
    pub fn has_all_info_access(&self, user: Option<&Identity>) -> bool {
        user.is_none_or(is_admin)
    }

    fn can_admin_view_all_items(&self, user: &Identity) -> bool {
        self.settings.admin_access == AdminAccess::All && is_admin(user)
    }

    fn is_private_tenant(&self, user: Option<&Identity>) -> bool {
        self.user_tenant(user) == PRIVATE_TENANT
    }

    fn distinguishing_role_tags<'a>(
        &'a self,
        user: &'a Identity,
    ) -> impl Iterator<Item = AccessTag> + 'a {
        user.roles
            .iter()
            .filter(|role| !self.settings.is_ignored_role(role))
            .map(|role| AccessTag::role(role.as_str()))
    }
}

fn is_admin(user: &Identity) -> bool {
    user.has_role(ALL_ACCESS_ROLE)
}

fn user_tag(user: &Identity) -> AccessTag {
    AccessTag::user(user.name.clone().unwrap_or_default())
}

fn backend_role_tags(user: &Identity) -> impl Iterator<Item = AccessTag> + '_ {
    user.backend_roles
        .iter()
        .map(|role| AccessTag::backend_role(role.as_str()))
}
