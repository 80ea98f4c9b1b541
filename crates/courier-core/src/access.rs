//! Access tags recorded on stored configs.
//!
//! A stored document carries the [`AccessList`] of its creator: one tag for the
//! user name, one per role, one per backend role. Tags serialize in their
//! string form (`User:alice`, `Role:ops`, `BERole:eng`) so that stored
//! documents stay readable by other tooling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const USER_TAG: &str = "User:";
const ROLE_TAG: &str = "Role:";
const BACKEND_ROLE_TAG: &str = "BERole:";

/// A single access tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AccessTag {
    /// `User:<name>`
    User(String),
    /// `Role:<role>`
    Role(String),
    /// `BERole:<backend role>`
    BackendRole(String),
}

impl AccessTag {
    /// Tag for a user name.
    pub fn user<S: Into<String>>(name: S) -> Self {
        Self::User(name.into())
    }

    /// Tag for a role.
    pub fn role<S: Into<String>>(role: S) -> Self {
        Self::Role(role.into())
    }

    /// Tag for a backend role.
    pub fn backend_role<S: Into<String>>(role: S) -> Self {
        Self::BackendRole(role.into())
    }
}

impl fmt::Display for AccessTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(name) => write!(f, "{USER_TAG}{name}"),
            Self::Role(role) => write!(f, "{ROLE_TAG}{role}"),
            Self::BackendRole(role) => write!(f, "{BACKEND_ROLE_TAG}{role}"),
        }
    }
}

impl FromStr for AccessTag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Some(name) = s.strip_prefix(USER_TAG) {
            Ok(Self::User(name.to_string()))
        } else if let Some(role) = s.strip_prefix(ROLE_TAG) {
            Ok(Self::Role(role.to_string()))
        } else if let Some(role) = s.strip_prefix(BACKEND_ROLE_TAG) {
            Ok(Self::BackendRole(role.to_string()))
        } else {
            Err(format!("unrecognized access tag '{s}'"))
        }
    }
}

impl TryFrom<String> for AccessTag {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccessTag> for String {
    fn from(tag: AccessTag) -> Self {
        tag.to_string()
    }
}

/// Ordered list of access tags.
///
/// When used as a search filter, an empty list means "do not filter", not
/// "match nothing". See [`AccessList::is_unrestricted`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessList(Vec<AccessTag>);

impl AccessList {
    /// Creates an empty access list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a tag.
    pub fn push(&mut self, tag: AccessTag) {
        self.0.push(tag);
    }

    /// Returns `true` if the list contains the tag.
    pub fn contains(&self, tag: &AccessTag) -> bool {
        self.0.contains(tag)
    }

    /// Returns `true` if any tag is shared with `other`.
    pub fn intersects(&self, other: &AccessList) -> bool {
        self.0.iter().any(|tag| other.contains(tag))
    }

    /// Returns `true` if the list has no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if a search filtered by this list should see everything.
    pub fn is_unrestricted(&self) -> bool {
        self.is_empty()
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the tags in order.
    pub fn iter(&self) -> std::slice::Iter<'_, AccessTag> {
        self.0.iter()
    }

    /// Returns the tags as a slice.
    pub fn as_slice(&self) -> &[AccessTag] {
        &self.0
    }
}

impl FromIterator<AccessTag> for AccessList {
    fn from_iter<I: IntoIterator<Item = AccessTag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<AccessTag>> for AccessList {
    fn from(tags: Vec<AccessTag>) -> Self {
        Self(tags)
    }
}

impl<'a> IntoIterator for &'a AccessList {
    type Item = &'a AccessTag;
    type IntoIter = std::slice::Iter<'a, AccessTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
