//! Process-wide access policy settings.
//!
//! Provides [`PolicySettings`] and the reloadable [`PolicyHandle`] that hands
//! out per-request [`AccessPolicyEngine`] snapshots.
//!
//! # Usage
//!
//! ```rust
//! use courier_acl::{FilterBy, PolicyHandle, PolicySettings};
//!
//! let handle = PolicyHandle::new(PolicySettings::default());
//! assert_eq!(handle.snapshot().filter_by, FilterBy::NoFilter);
//!
//! handle.reload(PolicySettings {
//!     filter_by: FilterBy::User,
//!     ..PolicySettings::default()
//! });
//! assert_eq!(handle.engine().settings().filter_by, FilterBy::User);
//! ```

use crate::enforcement::AccessPolicyEngine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Role that marks an administrator.
pub const ALL_ACCESS_ROLE: &str = "all_access";

/// Tenant value that scopes a config to exactly one user.
pub const PRIVATE_TENANT: &str = "__user__";

/// The default, shared tenant.
pub const DEFAULT_TENANT: &str = "";

/// Roles ignored for filtering unless configured otherwise.
pub const DEFAULT_IGNORED_ROLES: [&str; 4] = [
    "own_index",
    "kibana_user",
    "notifications_full_access",
    "notifications_read_access",
];

// ============================================================================
// FilterBy / AdminAccess
// ============================================================================

/// Which identity attribute restricts visibility of configs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterBy {
    /// Everyone in a tenant sees everything in it.
    #[default]
    NoFilter,
    /// Only the creating user.
    User,
    /// Anyone sharing a non-ignored role with the creator.
    Roles,
    /// Anyone sharing a backend role with the creator.
    BackendRoles,
}

impl fmt::Display for FilterBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NoFilter => "NoFilter",
            Self::User => "User",
            Self::Roles => "Roles",
            Self::BackendRoles => "BackendRoles",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for FilterBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "").as_str() {
            "nofilter" => Ok(Self::NoFilter),
            "user" => Ok(Self::User),
            "roles" => Ok(Self::Roles),
            "backendroles" => Ok(Self::BackendRoles),
            _ => Err(format!(
                "invalid filter_by '{s}' (expected NoFilter, User, Roles or BackendRoles)"
            )),
        }
    }
}

/// Whether administrators bypass filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdminAccess {
    /// Administrators are filtered like everyone else.
    None,
    /// Administrators see every config in their tenant.
    #[default]
    All,
}

impl fmt::Display for AdminAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::All => f.write_str("All"),
        }
    }
}

impl std::str::FromStr for AdminAccess {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "all" => Ok(Self::All),
            _ => Err(format!("invalid admin_access '{s}' (expected None or All)")),
        }
    }
}

// ============================================================================
// PolicySettings
// ============================================================================

/// Access policy settings shared by every request in the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySettings {
    /// Filtering mode.
    pub filter_by: FilterBy,
    /// Administrator override.
    pub admin_access: AdminAccess,
    /// Roles that never grant access under [`FilterBy::Roles`].
    pub ignored_roles: BTreeSet<String>,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            filter_by: FilterBy::default(),
            admin_access: AdminAccess::default(),
            ignored_roles: DEFAULT_IGNORED_ROLES.iter().map(|r| r.to_string()).collect(),
        }
    }
}

impl PolicySettings {
    /// Settings with the given filter mode and defaults otherwise.
    pub fn with_filter(filter_by: FilterBy) -> Self {
        Self {
            filter_by,
            ..Self::default()
        }
    }

    /// Returns `true` if `role` is ignored for filtering.
    pub fn is_ignored_role(&self, role: &str) -> bool {
        self.ignored_roles.contains(role)
    }
}

// ============================================================================
// PolicyHandle
// ============================================================================

/// Thread-safe, reloadable holder of the current [`PolicySettings`].
///
/// Cheap to clone (Arc internals). Each request takes one snapshot up front,
/// so a concurrent [`reload`](Self::reload) is seen either entirely or not at
/// all by that request.
#[derive(Clone)]
pub struct PolicyHandle {
    inner: Arc<watch::Sender<Arc<PolicySettings>>>,
}

impl PolicyHandle {
    /// Create a handle holding `settings`.
    pub fn new(settings: PolicySettings) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(settings));
        Self {
            inner: Arc::new(tx),
        }
    }

    /// The settings currently in force.
    pub fn snapshot(&self) -> Arc<PolicySettings> {
        self.inner.borrow().clone()
    }

    /// An engine bound to the current settings.
    pub fn engine(&self) -> AccessPolicyEngine {
        AccessPolicyEngine::new(self.snapshot())
    }

    /// Replace the settings. In-flight requests keep their snapshot.
    pub fn reload(&self, settings: PolicySettings) {
        log::info!(
            "Access policy reloaded: filter_by={}, admin_access={}, ignored_roles={}",
            settings.filter_by,
            settings.admin_access,
            settings.ignored_roles.len()
        );
        self.inner.send_replace(Arc::new(settings));
    }

    /// Subscribe to settings changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<PolicySettings>> {
        self.inner.subscribe()
    }
}

impl Default for PolicyHandle {
    fn default() -> Self {
        Self::new(PolicySettings::default())
    }
}

impl fmt::Debug for PolicyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyHandle")
            .field("settings", &self.snapshot())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
