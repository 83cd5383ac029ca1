//! IoC (Indicator of Compromise) value types.
//!
//! An [`IocValue`] is the classification metadata attached to one blacklist
//! entry. It is owned exclusively by the store entry holding it: ownership
//! moves into the store on `add`, the previous value is dropped when an
//! entry is replaced, and `clear` drops everything. The type system rules
//! out the value being shared between two keys or released twice.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity classification for a blacklisted indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Classification metadata for one blacklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IocValue {
    /// Identifier of the threat group/campaign the indicator belongs to.
    /// Group 0 is the feed's default bucket for unattributed entries.
    pub group_id: u32,
    /// Severity classification.
    pub severity: Severity,
}

impl IocValue {
    /// Value for a feed entry with no campaign attribution.
    pub fn unattributed() -> Self {
        Self {
            group_id: 0,
            severity: Severity::Medium,
        }
    }

    pub fn new(group_id: u32, severity: Severity) -> Self {
        Self { group_id, severity }
    }
}

impl fmt::Display for IocValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group {} ({})", self.group_id, self.severity)
    }
}
