//! Opaque token and account identities.

use core::fmt;

/// Identity of a fungible token handled by an external ledger.
///
/// Wraps a 32-byte identifier (contract hash, mint address, or any other
/// chain-specific handle).  The exchange compares identities by value only.
///
/// # Examples
///
/// ```
/// use pairswap::domain::TokenId;
///
/// let usdc = TokenId::from_bytes([1u8; 32]);
/// assert_eq!(usdc.as_bytes(), [1u8; 32]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId([u8; 32]);

impl TokenId {
    /// Creates a `TokenId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_short_hex(f, &self.0)
    }
}

/// Identity of a caller: a liquidity provider, a trader, the owner, or the
/// custody account holding pool reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_short_hex(f, &self.0)
    }
}

// First four bytes are enough to tell identities apart in logs.
fn write_short_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8; 32]) -> fmt::Result {
    f.write_str("0x")?;
    for b in &bytes[..4] {
        write!(f, "{b:02x}")?;
    }
    f.write_str("…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        let id = TokenId::from_bytes([42u8; 32]);
        assert_eq!(id.as_bytes(), [42u8; 32]);
    }

    #[test]
    fn account_equality_is_by_value() {
        assert_eq!(AccountId::from_bytes([7u8; 32]), AccountId::from_bytes([7u8; 32]));
        assert_ne!(AccountId::from_bytes([7u8; 32]), AccountId::from_bytes([8u8; 32]));
    }

    #[test]
    fn display_is_short_hex() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        bytes[3] = 0x01;
        assert_eq!(TokenId::from_bytes(bytes).to_string(), "0xab000001…");
        assert_eq!(AccountId::from_bytes([0xffu8; 32]).to_string(), "0xffffffff…");
    }
}
