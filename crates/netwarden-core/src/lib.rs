//! # netwarden-core
//!
//! Core types for netwarden -- a network intrusion-detection agent.
//!
//! This crate defines the agent configuration and the bounded event-tracking
//! queue that the detection loop feeds on every blacklist hit. Blacklist
//! matching itself lives in `netwarden-threat-intel`; the two are composed by
//! the surrounding detection loop and never call each other.

pub mod config;
pub mod event;
