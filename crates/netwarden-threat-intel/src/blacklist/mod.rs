//! Blacklist stores for observed network indicators.
//!
//! # Overview
//!
//! - [`store`] provides [`BlacklistStore`], the generic canonical-key map
//!   implementing insert-or-replace, exact lookup, removal, and clear. Both
//!   concrete blacklists share this one implementation.
//! - [`domain`] instantiates it for domain names, keyed by the reversed
//!   label order (`"www.example.com"` -> `"com.example.www"`).
//! - [`ip`] instantiates it for fixed-width IP address keys.
//!
//! # Matching is exact
//!
//! Lookup is exact canonical-key matching only. A domain whose *parent* is
//! blacklisted does not match: with `evil.com` in the store,
//! `sub.evil.com` is reported as not blacklisted. This is a deliberate,
//! documented limitation of the detection core, not an oversight; callers
//! that need ancestor matching must insert each subdomain explicitly.

pub mod domain;
pub mod ip;
pub mod store;


// Re-exports for convenience.
pub use domain::{canonical_key, DomainBlacklist};
pub use ip::IpBlacklist;
pub use store::BlacklistStore;
