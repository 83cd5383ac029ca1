//! netwarden agent binary entry point.
//!
//! Thin glue around the detection core: parse the CLI, set up tracing,
//! load configuration and blacklist feeds, construct the event queue, and
//! drop privileges. The packet-capture pipeline and the alert transport are
//! separate components that attach to an initialised core.

mod privileges;

use std::net::IpAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use netwarden_core::config::NetwardenConfig;
use netwarden_core::event::EventQueue;
use netwarden_threat_intel::{feed, DomainBlacklist, IpBlacklist};

/// netwarden - network intrusion-detection agent.
#[derive(Parser, Debug)]
#[command(name = "netwarden", version, about)]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, default_value = "/etc/netwarden/config.toml")]
    config: PathBuf,

    /// Override the domain blacklist feed path.
    #[arg(long)]
    domain_feed: Option<PathBuf>,

    /// Override the IP blacklist feed path.
    #[arg(long)]
    ip_feed: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<AgentCommand>,
}

#[derive(Subcommand, Debug)]
enum AgentCommand {
    /// Initialise the detection core and report readiness.
    Run,
    /// Load the configured feeds and check one indicator against them.
    Lookup {
        /// Domain name or IP address to check.
        indicator: String,
    },
}

fn main() -> Result<ExitCode> {
    let env_filter =
        EnvFilter::try_from_env("NETWARDEN_LOG").unwrap_or_else(|_| EnvFilter::from_default_env());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = Args::parse();

    let mut config = NetwardenConfig::load(&args.config).context("loading configuration")?;
    if let Some(path) = args.domain_feed.take() {
        config.feeds.domain_blacklist = Some(path);
    }
    if let Some(path) = args.ip_feed.take() {
        config.feeds.ip_blacklist = Some(path);
    }

    match args.command {
        Some(AgentCommand::Run) | None => run(config),
        Some(AgentCommand::Lookup { indicator }) => lookup(&config, &indicator),
    }
}

/// Build both blacklists from the configured feed files.
///
/// A feed that fails to load is fatal at startup: an agent silently running
/// without its blacklist would detect nothing.
fn load_blacklists(config: &NetwardenConfig) -> Result<(DomainBlacklist, IpBlacklist)> {
    let mut domains = DomainBlacklist::new();
    let mut ips = IpBlacklist::new();

    if let Some(ref path) = config.feeds.domain_blacklist {
        feed::import_domain_feed(path, &mut domains)
            .with_context(|| format!("importing domain feed {}", path.display()))?;
    }
    if let Some(ref path) = config.feeds.ip_blacklist {
        feed::import_ip_feed(path, &mut ips)
            .with_context(|| format!("importing IP feed {}", path.display()))?;
    }

    Ok((domains, ips))
}

fn run(config: NetwardenConfig) -> Result<ExitCode> {
    let (domains, ips) = load_blacklists(&config)?;
    let queue = EventQueue::new(config.detection.max_events, config.detection.max_timestamps);

    tracing::info!(
        blacklisted_domains = domains.len(),
        blacklisted_ips = ips.len(),
        max_events = queue.max_events(),
        max_timestamps = queue.max_timestamps(),
        "detection core initialised"
    );

    if let Some(ref announce) = config.announce {
        // Hand-off to the service-discovery collaborator, which manages the
        // broadcast and name-collision retry on its own.
        tracing::info!(
            service = %announce.service_name,
            port = announce.port,
            "registering alert endpoint for announcement"
        );
    }

    if let Some(ref run_as) = config.run_as {
        privileges::drop_privileges(&run_as.user, &run_as.group)?;
    }

    tracing::info!("startup complete");
    Ok(ExitCode::SUCCESS)
}

/// Check one indicator against the configured feeds. A miss is reported
/// through the exit code (after normal unwinding), not as an error.
fn lookup(config: &NetwardenConfig, indicator: &str) -> Result<ExitCode> {
    let (domains, ips) = load_blacklists(config)?;

    match check_indicator(&domains, &ips, indicator) {
        Some(value) => {
            println!("{indicator}: blacklisted, {value}");
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("{indicator}: not blacklisted");
            Ok(ExitCode::from(1))
        }
    }
}

/// Dispatch an indicator to the matching blacklist: anything that parses as
/// an address goes to the IP store, everything else is treated as a domain.
fn check_indicator(
    domains: &DomainBlacklist,
    ips: &IpBlacklist,
    indicator: &str,
) -> Option<netwarden_threat_intel::IocValue> {
    match indicator.parse::<IpAddr>() {
        Ok(addr) => ips.lookup(addr).cloned(),
        Err(_) => domains.lookup(indicator).cloned(),
    }
}

#[cfg(test)]
mod tests {
    use netwarden_threat_intel::{IocValue, Severity};

    use super::*;

    #[test]
    fn check_indicator_dispatches_by_indicator_kind() {
        let mut domains = DomainBlacklist::new();
        domains.add("evil.com", IocValue::new(7, Severity::High));

        let mut ips = IpBlacklist::new();
        ips.add("203.0.113.9".parse().unwrap(), IocValue::unattributed());

        assert_eq!(
            check_indicator(&domains, &ips, "evil.com").map(|v| v.group_id),
            Some(7)
        );
        assert!(check_indicator(&domains, &ips, "203.0.113.9").is_some());
        assert!(check_indicator(&domains, &ips, "good.com").is_none());
        assert!(check_indicator(&domains, &ips, "203.0.113.10").is_none());
    }
}
