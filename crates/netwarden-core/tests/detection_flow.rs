//! End-to-end shape of the detection loop: query the blacklists for each
//! observed flow, record a queue event on every hit, export by recency.
//!
//! The blacklists and the queue never call each other; this test plays the
//! role of the detection loop composing them.

use std::net::IpAddr;
use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::{TimeZone, Utc};

use netwarden_core::event::EventQueue;
use netwarden_threat_intel::{DomainBlacklist, IocValue, IpBlacklist, Severity};

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

#[test]
fn hits_flow_into_the_queue_and_export_in_recency_order() {
    let mut domains = DomainBlacklist::new();
    domains.add("c2.evil.com", IocValue::new(12, Severity::Critical));
    domains.add("tracker.bad.example", IocValue::new(3, Severity::Low));

    let mut ips = IpBlacklist::new();
    ips.add(ip("203.0.113.9"), IocValue::unattributed());

    let mut queue = EventQueue::new(
        NonZeroUsize::new(16).unwrap(),
        NonZeroUsize::new(4).unwrap(),
    );
    let iface: Arc<str> = Arc::from("eth0");

    // Observed DNS lookups and flows, in arrival order.
    let observations: &[(&str, IpAddr)] = &[
        ("c2.evil.com", ip("10.1.1.1")),
        ("harmless.example", ip("10.1.1.1")),
        ("tracker.bad.example", ip("10.1.1.2")),
        ("c2.evil.com", ip("10.1.1.1")), // repeat of the first hit
    ];

    for (i, (domain, src)) in observations.iter().enumerate() {
        if domains.lookup(domain).is_some() {
            let seen_at = Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap();
            queue.record_at(&iface, *src, domain, seen_at);
        }
    }

    // One direct IP flow against the IP blacklist.
    let dst = ip("203.0.113.9");
    if ips.lookup(dst).is_some() {
        let seen_at = Utc.timestamp_opt(1_700_000_010, 0).unwrap();
        queue.record_at(&iface, ip("10.1.1.3"), &dst.to_string(), seen_at);
    }

    // The miss never reached the queue; the repeat deduplicated.
    assert_eq!(queue.len(), 3);

    let export: Vec<(&str, usize)> = queue
        .iter()
        .map(|e| (e.indicator(), e.times_seen()))
        .collect();
    assert_eq!(
        export,
        [
            ("203.0.113.9", 1),
            ("c2.evil.com", 2),
            ("tracker.bad.example", 1),
        ]
    );
}
