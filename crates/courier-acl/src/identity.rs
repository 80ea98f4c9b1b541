//! Caller identity as supplied by the authentication layer.

use serde::{Deserialize, Serialize};

/// A resolved caller identity.
///
/// Courier never authenticates; the boundary layer hands over an already
/// resolved identity, or `None` when security is disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User name, if known.
    #[serde(default)]
    pub name: Option<String>,
    /// Security roles, in the order the authentication layer reported them.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Backend roles, in the order the authentication layer reported them.
    #[serde(default)]
    pub backend_roles: Vec<String>,
    /// Tenant the caller is acting in. `None` means the default tenant.
    #[serde(default)]
    pub requested_tenant: Option<String>,
}

impl Identity {
    /// Identity for a named user with no roles.
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Identity with no user name.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Sets the roles.
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the backend roles.
    pub fn with_backend_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.backend_roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the requested tenant.
    pub fn with_tenant<S: Into<String>>(mut self, tenant: S) -> Self {
        self.requested_tenant = Some(tenant.into());
        self
    }

    /// Returns `true` if the identity carries `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
