//! Threat intelligence for netwarden.
//!
//! This crate provides:
//! - Indicator value types (classification metadata owned by blacklist entries)
//! - A generic canonical-key blacklist store with domain and IP instantiations
//! - Line-oriented feed importers that populate the stores from local files
//!
//! The stores are not internally synchronized; they are owned by the single
//! detection-loop thread. A feed refresh that needs to happen concurrently
//! should build a fresh store and swap it in wholesale.

pub mod blacklist;
pub mod error;
pub mod feed;
pub mod ioc;

// Re-export key types at crate root for convenience.
pub use blacklist::{DomainBlacklist, IpBlacklist};
pub use error::FeedError;
pub use ioc::{IocValue, Severity};
