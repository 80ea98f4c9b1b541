//! # courier-storage
//!
//! Storage collaborator for Courier notification configs.
//!
//! This crate provides:
//! - The [`ConfigStore`] trait the lifecycle manager consumes
//! - [`MemoryConfigStore`], an in-memory backend for tests and local use
//!
//! Backends own physical storage, search execution, paging and sorting.
//! The lifecycle manager never caches documents across requests.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod memory;
pub mod traits;

pub use memory::MemoryConfigStore;
pub use traits::ConfigStore;
