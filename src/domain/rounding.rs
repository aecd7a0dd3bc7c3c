//! Explicit rounding direction for integer division.

/// Rounding direction for every division performed by the exchange.
///
/// Amounts paid out to users round [`Down`](Rounding::Down); amounts a
/// user must pay in round [`Up`](Rounding::Up).
///
/// # Examples
///
/// ```
/// use pairswap::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(Rounding::Down.is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_are_exclusive() {
        assert!(Rounding::Up.is_up() && !Rounding::Up.is_down());
        assert!(Rounding::Down.is_down() && !Rounding::Down.is_up());
    }
}
