//! Event tracking for netwarden.
//!
//! An [`Event`] records that a blacklisted indicator was observed from a
//! given source address on a given interface, together with the times it was
//! seen. The [`EventQueue`] holds a bounded, deduplicated, recency-ordered
//! collection of them: re-observing a known event moves it to the front and
//! prepends a timestamp, and both the queue length and the per-event
//! timestamp history are capped by administrator-configured bounds.
//!
//! The queue is intentionally not synchronized; it is owned by the single
//! detection-loop thread that feeds it. The alert exporter reads it through
//! [`EventQueue::iter`], which yields events most-recently-touched first.

pub mod queue;


pub use queue::{Event, EventQueue, RecordOutcome};
