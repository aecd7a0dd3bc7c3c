//! Access control: the owner check and the reentrancy lock.
//!
//! Every mutating entry point of the exchange holds a [`ReentrancyGuard`]
//! for its whole duration.  The guard is obtained from
//! [`ReentrancyLock::acquire`], which fails fast instead of waiting, and
//! releases the lock when dropped, so early returns through `?` and
//! unwinding both leave the lock free.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::domain::AccountId;
use crate::error::ExchangeError;

/// Process-wide "a mutating call is running" flag.
///
/// # Examples
///
/// ```
/// use pairswap::error::ExchangeError;
/// use pairswap::guard::ReentrancyLock;
///
/// let lock = ReentrancyLock::new();
/// {
///     let _outer = lock.acquire().expect("free");
///     assert_eq!(lock.acquire().err(), Some(ExchangeError::Reentrancy));
/// }
/// assert!(!lock.is_held());
/// ```
#[derive(Debug, Default)]
pub struct ReentrancyLock {
    held: AtomicBool,
}

impl ReentrancyLock {
    /// Creates a released lock.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            held: AtomicBool::new(false),
        }
    }

    /// Takes the lock for the lifetime of the returned guard.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Reentrancy`] if the lock is already held.
    pub fn acquire(&self) -> Result<ReentrancyGuard<'_>, ExchangeError> {
        self.held
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| ExchangeError::Reentrancy)?;
        Ok(ReentrancyGuard { lock: self })
    }

    /// Returns `true` while a guard is alive.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

/// Proof that the current call holds the [`ReentrancyLock`].
///
/// Dropping the guard releases the lock.
#[derive(Debug)]
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct ReentrancyGuard<'a> {
    lock: &'a ReentrancyLock,
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        self.lock.held.store(false, Ordering::Release);
    }
}

/// Checks that `caller` is the configured `owner`.
///
/// # Errors
///
/// Returns [`ExchangeError::OwnerOnly`] otherwise.
pub fn ensure_owner(owner: &AccountId, caller: &AccountId) -> Result<(), ExchangeError> {
    if owner != caller {
        return Err(ExchangeError::OwnerOnly);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_while_held() {
        let lock = ReentrancyLock::new();
        let Ok(guard) = lock.acquire() else {
            panic!("expected Ok");
        };
        assert!(lock.is_held());
        assert!(matches!(lock.acquire(), Err(ExchangeError::Reentrancy)));
        drop(guard);
        assert!(!lock.is_held());
        assert!(lock.acquire().is_ok());
    }

    #[test]
    fn released_on_error_path() {
        fn failing(lock: &ReentrancyLock) -> Result<(), ExchangeError> {
            let _guard = lock.acquire()?;
            Err(ExchangeError::SlippageExceeded)
        }
        let lock = ReentrancyLock::new();
        assert_eq!(failing(&lock), Err(ExchangeError::SlippageExceeded));
        assert!(!lock.is_held());
    }

    #[test]
    fn owner_check_is_by_value() {
        let owner = AccountId::from_bytes([1u8; 32]);
        assert!(ensure_owner(&owner, &AccountId::from_bytes([1u8; 32])).is_ok());
        assert_eq!(
            ensure_owner(&owner, &AccountId::from_bytes([2u8; 32])),
            Err(ExchangeError::OwnerOnly)
        );
    }
}
