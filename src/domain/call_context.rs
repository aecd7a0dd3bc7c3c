//! Per-call facts supplied by the execution environment.

use super::{AccountId, BlockHeight};

/// Who is calling and at which block.
///
/// The exchange never derives these itself; the surrounding environment
/// hands one `CallContext` to every mutating entry point.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{AccountId, BlockHeight, CallContext};
///
/// let ctx = CallContext::new(AccountId::from_bytes([9u8; 32]), BlockHeight::new(42));
/// assert_eq!(ctx.block_height().get(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallContext {
    caller: AccountId,
    block_height: BlockHeight,
}

impl CallContext {
    /// Creates a new context.
    #[must_use]
    pub const fn new(caller: AccountId, block_height: BlockHeight) -> Self {
        Self {
            caller,
            block_height,
        }
    }

    /// Returns the calling account.
    #[must_use]
    pub const fn caller(&self) -> AccountId {
        self.caller
    }

    /// Returns the current block height.
    #[must_use]
    pub const fn block_height(&self) -> BlockHeight {
        self.block_height
    }
}
