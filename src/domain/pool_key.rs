//! Ordered pair of distinct tokens identifying a pool.

use core::fmt;

use super::TokenId;
use crate::error::ExchangeError;

/// Which side of a [`PoolKey`] a token sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The first token of the pair.
    A,
    /// The second token of the pair.
    B,
}

impl Side {
    /// Returns the other side.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// An ordered pair of distinct tokens, kept exactly as supplied.
///
/// Unlike a canonically sorted pair, `(X, Y)` and `(Y, X)` are different
/// keys and identify different pools.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{PoolKey, TokenId};
///
/// let x = TokenId::from_bytes([1u8; 32]);
/// let y = TokenId::from_bytes([2u8; 32]);
///
/// let xy = PoolKey::new(x, y).expect("distinct tokens");
/// let yx = PoolKey::new(y, x).expect("distinct tokens");
/// assert_ne!(xy, yx);
/// assert_eq!(xy.reversed(), yx);
/// assert!(PoolKey::new(x, x).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoolKey {
    token_a: TokenId,
    token_b: TokenId,
}

impl PoolKey {
    /// Creates a new `PoolKey` preserving argument order.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::SameToken`] if both tokens are equal.
    pub fn new(token_a: TokenId, token_b: TokenId) -> Result<Self, ExchangeError> {
        if token_a == token_b {
            return Err(ExchangeError::SameToken);
        }
        Ok(Self { token_a, token_b })
    }

    /// Returns the first token.
    #[must_use]
    pub const fn token_a(&self) -> TokenId {
        self.token_a
    }

    /// Returns the second token.
    #[must_use]
    pub const fn token_b(&self) -> TokenId {
        self.token_b
    }

    /// Returns the token on `side`.
    #[must_use]
    pub const fn token(&self, side: Side) -> TokenId {
        match side {
            Side::A => self.token_a,
            Side::B => self.token_b,
        }
    }

    /// Returns the key with both tokens swapped.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self {
            token_a: self.token_b,
            token_b: self.token_a,
        }
    }

    /// Returns the side holding `token`, or `None` if it is not in the pair.
    #[must_use]
    pub fn side_of(&self, token: &TokenId) -> Option<Side> {
        if *token == self.token_a {
            Some(Side::A)
        } else if *token == self.token_b {
            Some(Side::B)
        } else {
            None
        }
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token_a, self.token_b)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn tok(byte: u8) -> TokenId {
        TokenId::from_bytes([byte; 32])
    }

    #[test]
    fn preserves_argument_order() {
        let Ok(key) = PoolKey::new(tok(2), tok(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(key.token_a(), tok(2));
        assert_eq!(key.token_b(), tok(1));
    }

    #[test]
    fn rejects_same_token() {
        let Err(e) = PoolKey::new(tok(1), tok(1)) else {
            panic!("expected Err");
        };
        assert_eq!(e, ExchangeError::SameToken);
    }

    #[test]
    fn reversed_is_a_different_key() {
        let Ok(key) = PoolKey::new(tok(1), tok(2)) else {
            panic!("expected Ok");
        };
        assert_ne!(key, key.reversed());
        assert_eq!(key.reversed().reversed(), key);
    }

    #[test]
    fn side_of_and_token() {
        let Ok(key) = PoolKey::new(tok(1), tok(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(key.side_of(&tok(1)), Some(Side::A));
        assert_eq!(key.side_of(&tok(2)), Some(Side::B));
        assert_eq!(key.side_of(&tok(3)), None);
        assert_eq!(key.token(Side::B), tok(2));
        assert_eq!(Side::A.opposite(), Side::B);
    }
}
