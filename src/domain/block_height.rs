//! Block height supplied by the execution environment.

use core::fmt;

/// Height of the block in which an operation executes.
///
/// The reward accumulator integrates the per-block rate over elapsed
/// heights, so heights are expected to be non-decreasing across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BlockHeight(u64);

impl BlockHeight {
    /// Genesis height.
    pub const GENESIS: Self = Self(0);

    /// Creates a new `BlockHeight`.
    #[must_use]
    pub const fn new(height: u64) -> Self {
        Self(height)
    }

    /// Returns the raw height.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Blocks elapsed since `earlier`, or zero if `earlier` is not in the past.
    #[must_use]
    pub const fn blocks_since(&self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Returns the height `blocks` later, saturating at `u64::MAX`.
    #[must_use]
    pub const fn advance(&self, blocks: u64) -> Self {
        Self(self.0.saturating_add(blocks))
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
