//! Shared primitive types used across the entire engine.

/// A rendered frame. One tick = one call to `ReelBank::advance`.
pub type Tick = u64;

/// Virtual time in milliseconds since the bank was created.
pub type Millis = u64;

/// Payout amount in credits.
pub type Credits = u64;

/// Sequence number of an accepted spin, starting at 1.
pub type SpinId = u64;
