//! Configuration loading and management.
//!
//! netwarden configuration is stored in TOML format. The detection bounds
//! (`max_events`, `max_timestamps`) have no valid default, so a missing or
//! malformed config file refuses to load rather than starting the agent in
//! an undefined state.

pub mod settings;

pub use settings::NetwardenConfig;
