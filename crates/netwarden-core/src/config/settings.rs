//! Application settings and TOML configuration parsing.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level netwarden configuration, loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetwardenConfig {
    /// Event queue bounds. Required: there is no sensible default for how
    /// much alert history an administrator wants to retain.
    pub detection: DetectionConfig,

    /// Blacklist feed file locations.
    #[serde(default)]
    pub feeds: FeedConfig,

    /// Unprivileged account to switch to after startup. When absent the
    /// agent keeps whatever privileges it was launched with.
    #[serde(default)]
    pub run_as: Option<RunAsConfig>,

    /// Service-discovery parameters handed to the announcement collaborator
    /// at startup. The agent does not manage the broadcast itself.
    #[serde(default)]
    pub announce: Option<AnnounceConfig>,
}

/// Bounds for the event-tracking queue.
///
/// Both bounds are `NonZeroUsize`: a zero bound is a configuration error and
/// fails at parse time instead of constructing a queue that can hold nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Maximum number of distinct events retained in the queue.
    pub max_events: NonZeroUsize,
    /// Maximum number of observation timestamps retained per event.
    pub max_timestamps: NonZeroUsize,
}

/// Locations of the threat-intelligence feed files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Hostfile-style domain blacklist (urlhaus format).
    #[serde(default)]
    pub domain_blacklist: Option<PathBuf>,
    /// One-address-per-line IP blacklist.
    #[serde(default)]
    pub ip_blacklist: Option<PathBuf>,
}

/// Account to drop privileges to once privileged resources are bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunAsConfig {
    pub user: String,
    pub group: String,
}

/// Parameters for the mDNS/service-discovery collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnounceConfig {
    /// Advertised service name.
    pub service_name: String,
    /// Port the alert-export endpoint listens on.
    pub port: u16,
}

impl NetwardenConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Unlike optional settings, the `[detection]` section is required;
    /// a missing file or missing bounds is an error, not a default.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: NetwardenConfig = toml::from_str(&contents)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}
