//! Per-object placement salt.

use std::fmt;

use chrono::Utc;

/// Time-derived per-object salt.
///
/// The wall-clock nanoseconds at encode time, written as 16 lowercase hex
/// digits and reversed so the fastest-changing digits come first. The first
/// two characters form the top-level subdirectory ([`Salt::prefix`]), the
/// rest the second level ([`Salt::suffix`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Salt(String);

impl Salt {
    /// Salt for the given nanosecond timestamp.
    pub fn from_nanos(nanos: u128) -> Self {
        let hex = format!("{nanos:016x}");
        Self(hex.chars().rev().collect())
    }

    /// Salt for the current wall-clock time.
    pub fn now() -> Self {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        Self::from_nanos(u128::try_from(nanos).unwrap_or_default())
    }

    /// First-level subdirectory: the first two hex characters.
    pub fn prefix(&self) -> &str {
        &self.0[..2]
    }

    /// Second-level subdirectory: everything after the prefix.
    pub fn suffix(&self) -> &str {
        &self.0[2..]
    }

    /// The full salt string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
