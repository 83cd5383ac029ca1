//! The bounded event-tracking queue.
//!
//! Events live in an arena of slots and are chained into a doubly-linked
//! recency list through `prev`/`next` slot indices. Index links keep the
//! move-to-front and eviction rewiring in safe code while preserving the
//! O(1) relink cost of a pointer-based list. The linear dedup scan is
//! deliberate: `max_events` is a small administrator-configured bound, so
//! a lookup index would cost more than it saves.

use std::net::IpAddr;
use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// One tracked observation: a blacklisted indicator seen from a source
/// address on a capture interface.
///
/// Identity is structural: two events are the same iff interface, source IP,
/// and indicator string all compare equal.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// Capturing interface. Shared with the capture layer's interface table,
    /// so queue entries do not duplicate the name.
    iface: Arc<str>,
    /// Source address the indicator was observed from.
    src_ip: IpAddr,
    /// The matched indicator (domain name or printable IP address).
    indicator: String,
    /// Observation times, most recent first. Never empty; length is capped
    /// by the owning queue's `max_timestamps`.
    timestamps: Vec<DateTime<Utc>>,
}

impl Event {
    fn new(iface: Arc<str>, src_ip: IpAddr, indicator: String, seen_at: DateTime<Utc>) -> Self {
        Self {
            iface,
            src_ip,
            indicator,
            timestamps: vec![seen_at],
        }
    }

    /// Name of the interface the observation came from.
    pub fn iface(&self) -> &str {
        &self.iface
    }

    /// Source address of the observed flow.
    pub fn src_ip(&self) -> IpAddr {
        self.src_ip
    }

    /// The blacklisted indicator that matched.
    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    /// Observation times, most recent first.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// The most recent observation time.
    pub fn last_seen(&self) -> DateTime<Utc> {
        self.timestamps[0]
    }

    /// How many observations are currently retained for this event.
    pub fn times_seen(&self) -> usize {
        self.timestamps.len()
    }

    fn matches(&self, iface: &str, src_ip: IpAddr, indicator: &str) -> bool {
        self.iface.as_ref() == iface && self.src_ip == src_ip && self.indicator == indicator
    }

    /// Absorb a fresh observation: prepend the timestamp and discard the
    /// oldest entries beyond `max_timestamps`.
    fn touch(&mut self, seen_at: DateTime<Utc>, max_timestamps: usize) {
        self.timestamps.insert(0, seen_at);
        self.timestamps.truncate(max_timestamps);
    }
}

// ---------------------------------------------------------------------------
// EventQueue
// ---------------------------------------------------------------------------

/// Outcome of recording one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// No structurally equal event existed; a new one was linked at the head.
    /// Carries the number of events evicted from the tail to make room.
    New { evicted: usize },
    /// An existing event absorbed the observation and moved to the front.
    Refreshed,
}

struct Slot {
    event: Event,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Bounded, deduplicating, recency-ordered collection of [`Event`]s.
///
/// After every call: `len() <= max_events`, every event holds at most
/// `max_timestamps` observation times, no two retained events are
/// structurally equal, and iteration order is recency of last observation.
pub struct EventQueue {
    slots: Vec<Option<Slot>>,
    /// Indices of vacated slots, reused before the arena grows.
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    max_events: usize,
    max_timestamps: usize,
}

impl EventQueue {
    /// Create a queue retaining at most `max_events` events with at most
    /// `max_timestamps` observation times each.
    ///
    /// Zero bounds are unrepresentable: both are [`NonZeroUsize`], so the
    /// misconfiguration is rejected before a queue exists.
    pub fn new(max_events: NonZeroUsize, max_timestamps: NonZeroUsize) -> Self {
        Self {
            slots: Vec::with_capacity(max_events.get()),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            max_events: max_events.get(),
            max_timestamps: max_timestamps.get(),
        }
    }

    /// Record that `indicator` was observed from `src_ip` on `iface` now.
    ///
    /// See [`record_at`](Self::record_at) for the exact semantics.
    pub fn record(&mut self, iface: &Arc<str>, src_ip: IpAddr, indicator: &str) -> RecordOutcome {
        self.record_at(iface, src_ip, indicator, Utc::now())
    }

    /// Record an observation with an explicit timestamp (feed replay, tests).
    ///
    /// If a structurally equal event already exists, it absorbs the
    /// timestamp (trimmed to `max_timestamps`, oldest discarded) and moves
    /// to the front of the queue. Otherwise a new event is linked at the
    /// head and the least-recently-touched events beyond `max_events` are
    /// evicted.
    pub fn record_at(
        &mut self,
        iface: &Arc<str>,
        src_ip: IpAddr,
        indicator: &str,
        seen_at: DateTime<Utc>,
    ) -> RecordOutcome {
        if let Some(idx) = self.find(iface, src_ip, indicator) {
            let max_timestamps = self.max_timestamps;
            if let Some(slot) = self.slots[idx].as_mut() {
                slot.event.touch(seen_at, max_timestamps);
            }
            self.unlink(idx);
            self.link_front(idx);
            debug!(iface = %iface, %src_ip, indicator, "refreshed tracked event");
            return RecordOutcome::Refreshed;
        }

        let event = Event::new(Arc::clone(iface), src_ip, indicator.to_owned(), seen_at);
        let idx = self.alloc(event);
        self.link_front(idx);

        let mut evicted = 0;
        while self.len > self.max_events {
            if let Some(old) = self.evict_tail() {
                debug!(
                    iface = %old.iface(),
                    src_ip = %old.src_ip(),
                    indicator = old.indicator(),
                    "evicted least-recently-seen event"
                );
                evicted += 1;
            }
        }

        debug!(iface = %iface, %src_ip, indicator, evicted, "tracked new event");
        RecordOutcome::New { evicted }
    }

    /// Number of events currently retained.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the queue holds no events.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Configured event bound.
    pub fn max_events(&self) -> usize {
        self.max_events
    }

    /// Configured per-event timestamp bound.
    pub fn max_timestamps(&self) -> usize {
        self.max_timestamps
    }

    /// Iterate over retained events, most-recently-touched first.
    ///
    /// This is the read surface for the alert exporter; it never mutates
    /// the queue.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            queue: self,
            next: self.head,
        }
    }

    // -- arena and link management --

    fn find(&self, iface: &str, src_ip: IpAddr, indicator: &str) -> Option<usize> {
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let slot = self.slots[idx].as_ref()?;
            if slot.event.matches(iface, src_ip, indicator) {
                return Some(idx);
            }
            cursor = slot.next;
        }
        None
    }

    /// Place an event into a vacant slot, reusing freed indices.
    fn alloc(&mut self, event: Event) -> usize {
        let slot = Slot {
            event,
            prev: None,
            next: None,
        };
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(slot);
                idx
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        }
    }

    /// Detach a slot from the recency list without releasing it.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.slots[idx].as_ref() {
            Some(slot) => (slot.prev, slot.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(slot) = self.slots[p].as_mut() {
                    slot.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(slot) = self.slots[n].as_mut() {
                    slot.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(slot) = self.slots[idx].as_mut() {
            slot.prev = None;
            slot.next = None;
        }
        self.len -= 1;
    }

    /// Link a detached slot at the head of the recency list.
    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(slot) = self.slots[idx].as_mut() {
            slot.prev = None;
            slot.next = old_head;
        }
        if let Some(h) = old_head {
            if let Some(slot) = self.slots[h].as_mut() {
                slot.prev = Some(idx);
            }
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
        self.len += 1;
    }

    /// Remove and return the least-recently-touched event.
    fn evict_tail(&mut self) -> Option<Event> {
        let idx = self.tail?;
        self.unlink(idx);
        let slot = self.slots[idx].take()?;
        self.free.push(idx);
        Some(slot.event)
    }

    /// Verify the arena and link structure agree. Test-only.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut seen = 0;
        let mut cursor = self.head;
        let mut prev: Option<usize> = None;
        while let Some(idx) = cursor {
            let slot = self.slots[idx].as_ref().expect("linked slot is occupied");
            assert_eq!(slot.prev, prev, "prev link mismatch at slot {idx}");
            prev = cursor;
            cursor = slot.next;
            seen += 1;
            assert!(seen <= self.len, "cycle in recency list");
        }
        assert_eq!(seen, self.len, "len does not match linked slots");
        assert_eq!(self.tail, prev, "tail does not match last linked slot");
        let occupied = self.slots.iter().filter(|s| s.is_some()).count();
        assert_eq!(occupied, self.len, "occupied slots do not match len");
        assert_eq!(
            self.free.len() + occupied,
            self.slots.len(),
            "free list does not cover vacant slots"
        );
    }
}

impl<'a> IntoIterator for &'a EventQueue {
    type Item = &'a Event;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over queue events in recency order.
pub struct Iter<'a> {
    queue: &'a EventQueue,
    next: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Event;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let slot = self.queue.slots[idx].as_ref()?;
        self.next = slot.next;
        Some(&slot.event)
    }
}
