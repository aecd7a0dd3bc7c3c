//! Unified error types for the exchange core.
//!
//! Every fallible operation in the crate returns [`ExchangeError`].  Each
//! variant maps to a stable numeric code (see [`ExchangeError::code`]) so
//! callers on the other side of an execution environment can match on
//! numbers instead of strings.
//!
//! Failures reported by the external token ledger travel as
//! [`TransferError`] inside [`ExchangeError::TransferFailed`] and keep the
//! ledger's own code.

use thiserror::Error;

/// Error reported by a [`TokenLedger`](crate::traits::TokenLedger) when a
/// transfer is refused.
///
/// The exchange never interprets `code`; it is propagated unchanged to
/// the caller.
///
/// # Examples
///
/// ```
/// use pairswap::error::TransferError;
///
/// let err = TransferError::new(1, "insufficient balance");
/// assert_eq!(err.code(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("token transfer failed with code {code}: {reason}")]
pub struct TransferError {
    code: u32,
    reason: &'static str,
}

impl TransferError {
    /// Creates a new `TransferError` with the ledger's code and a short reason.
    #[must_use]
    pub const fn new(code: u32, reason: &'static str) -> Self {
        Self { code, reason }
    }

    /// Returns the ledger-defined error code.
    #[must_use]
    pub const fn code(&self) -> u32 {
        self.code
    }

    /// Returns the short human-readable reason.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        self.reason
    }
}

/// Errors returned by exchange operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ExchangeError {
    /// The caller is not the configured owner.
    #[error("caller is not the exchange owner")]
    OwnerOnly,

    /// A pool already exists for this exact ordered pair.
    #[error("pool already exists for this token pair")]
    PoolExists,

    /// No pool exists for the referenced pair.
    #[error("pool not found")]
    PoolNotFound,

    /// The pool holds no usable reserves for the requested trade.
    #[error("insufficient pool liquidity")]
    InsufficientLiquidity,

    /// Burn amount exceeds the holder's LP balance.
    #[error("insufficient LP balance")]
    InsufficientBalance,

    /// A computed amount fell below the caller-supplied minimum.
    #[error("slippage limit exceeded")]
    SlippageExceeded,

    /// Zero amount, minimum above desired, or out-of-bound setting.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// Both sides of the pair are the same token.
    #[error("token pair requires two distinct tokens")]
    SameToken,

    /// A mutating call started while another one was still running.
    #[error("reentrant call rejected")]
    Reentrancy,

    /// Checked arithmetic left the `u128` range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// The token ledger refused a transfer.
    #[error(transparent)]
    TransferFailed(#[from] TransferError),
}

impl ExchangeError {
    /// Returns the stable numeric code surfaced to callers.
    ///
    /// Transfer failures report the ledger's own code.
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::OwnerOnly => 100,
            Self::PoolExists => 101,
            Self::PoolNotFound => 102,
            Self::InsufficientLiquidity => 103,
            Self::InsufficientBalance => 104,
            Self::SlippageExceeded => 105,
            Self::InvalidAmount(_) => 106,
            Self::SameToken => 107,
            Self::Reentrancy => 108,
            Self::Overflow(_) => 109,
            Self::TransferFailed(err) => err.code(),
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = core::result::Result<T, ExchangeError>;
