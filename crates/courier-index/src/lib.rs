//! # courier-index
//!
//! Validation and lifecycle orchestration for notification configs.
//!
//! - [`ConfigValidator`] checks a proposed config, resolving the SMTP account
//!   and email groups an email channel refers to.
//! - [`ConfigLifecycleManager`] runs create, update, get and delete against a
//!   [`ConfigStore`](courier_storage::ConfigStore), applying the access policy
//!   at every step.

#![warn(clippy::all)]

pub mod lifecycle;
pub mod validator;

pub use lifecycle::{ConfigLifecycleManager, LOG_PREFIX};
pub use validator::ConfigValidator;
