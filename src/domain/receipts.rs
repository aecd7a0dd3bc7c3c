//! Outcomes returned by successful exchange operations.

use core::fmt;

use super::{Amount, Liquidity};

/// Result of a successful add-liquidity call.
///
/// `amount_a`/`amount_b` are the amounts actually taken from the provider
/// after ratio adjustment; `liquidity` is the LP minted for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddLiquidityReceipt {
    amount_a: Amount,
    amount_b: Amount,
    liquidity: Liquidity,
}

impl AddLiquidityReceipt {
    /// Creates a new receipt.
    pub const fn new(amount_a: Amount, amount_b: Amount, liquidity: Liquidity) -> Self {
        Self {
            amount_a,
            amount_b,
            liquidity,
        }
    }

    /// Token A deposited.
    pub const fn amount_a(&self) -> Amount {
        self.amount_a
    }

    /// Token B deposited.
    pub const fn amount_b(&self) -> Amount {
        self.amount_b
    }

    /// LP shares minted for the deposit (settled rewards excluded).
    #[must_use]
    pub const fn liquidity(&self) -> Liquidity {
        self.liquidity
    }
}

impl fmt::Display for AddLiquidityReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "deposited {} A + {} B for {} LP",
            self.amount_a, self.amount_b, self.liquidity
        )
    }
}

/// Result of a successful remove-liquidity call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RemoveLiquidityReceipt {
    amount_a: Amount,
    amount_b: Amount,
}

impl RemoveLiquidityReceipt {
    /// Creates a new receipt.
    pub const fn new(amount_a: Amount, amount_b: Amount) -> Self {
        Self { amount_a, amount_b }
    }

    /// Token A paid out.
    pub const fn amount_a(&self) -> Amount {
        self.amount_a
    }

    /// Token B paid out.
    pub const fn amount_b(&self) -> Amount {
        self.amount_b
    }
}

impl fmt::Display for RemoveLiquidityReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "withdrew {} A + {} B", self.amount_a, self.amount_b)
    }
}

/// Result of a successful swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapReceipt {
    amount_in: Amount,
    amount_out: Amount,
}

impl SwapReceipt {
    /// Creates a new receipt.
    pub const fn new(amount_in: Amount, amount_out: Amount) -> Self {
        Self {
            amount_in,
            amount_out,
        }
    }

    /// Input paid by the trader (fee included).
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Output received by the trader.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }
}

impl fmt::Display for SwapReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "swapped {} in for {} out", self.amount_in, self.amount_out)
    }
}

/// Ratio-adjusted deposit amounts for a prospective add-liquidity call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LiquidityQuote {
    amount_a: Amount,
    amount_b: Amount,
}

impl LiquidityQuote {
    /// Creates a new quote.
    pub const fn new(amount_a: Amount, amount_b: Amount) -> Self {
        Self { amount_a, amount_b }
    }

    /// Token A that would be taken.
    pub const fn amount_a(&self) -> Amount {
        self.amount_a
    }

    /// Token B that would be taken.
    pub const fn amount_b(&self) -> Amount {
        self.amount_b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_receipt_accessors_and_display() {
        let r = AddLiquidityReceipt::new(
            Amount::new(1_000_000),
            Amount::new(1_000_000),
            Liquidity::new(999_999_999_000),
        );
        assert_eq!(r.amount_a(), Amount::new(1_000_000));
        assert_eq!(r.liquidity(), Liquidity::new(999_999_999_000));
        assert_eq!(
            r.to_string(),
            "deposited 1000000 A + 1000000 B for 999999999000 LP"
        );
    }

    #[test]
    fn swap_receipt_display() {
        let r = SwapReceipt::new(Amount::new(1_000), Amount::new(1_993));
        assert_eq!(r.to_string(), "swapped 1000 in for 1993 out");
    }

    #[test]
    fn quote_accessors() {
        let q = LiquidityQuote::new(Amount::new(1), Amount::new(2));
        assert_eq!((q.amount_a(), q.amount_b()), (Amount::new(1), Amount::new(2)));
    }
}
