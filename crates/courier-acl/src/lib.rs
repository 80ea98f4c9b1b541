//! # courier-acl
//!
//! Access control for Courier notification configs.
//!
//! This crate implements the access policy:
//! - Caller identity as resolved by the authentication layer ([`Identity`])
//! - Process-wide policy settings and live reloads ([`PolicySettings`], [`PolicyHandle`])
//! - Per-request access decisions ([`AccessPolicyEngine`])
//!
//! An absent identity (`None`) means security is disabled and every check
//! passes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod enforcement;
pub mod identity;
pub mod policy;
mod proptests;

pub use enforcement::AccessPolicyEngine;
pub use identity::Identity;
pub use policy::{
    AdminAccess, FilterBy, PolicyHandle, PolicySettings, ALL_ACCESS_ROLE, DEFAULT_TENANT,
    PRIVATE_TENANT,
};
