//! # courier-cli
//!
//! Admin CLI for Courier.
//!
//! This crate provides the `courier` binary and the pieces behind it:
//! - Config file management (`config path|get|set|init|export`)
//! - Policy inspection (`policy explain`) for a given identity
//!
//! The config file carries the log filter and the access policy settings
//! that a Courier process loads at startup.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod policy_handlers;

pub use config::CourierConfig;
pub use error::{Error, Result};
