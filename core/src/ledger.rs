//! Inventory ledger: per-tier availability counters.
//!
//! The ledger is the single writer of ticket availability. Each tier gets its
//! own mutex-guarded counter so that check-and-decrement is atomic with
//! respect to concurrent purchase attempts on the same tier, while unrelated
//! tiers never contend with each other.

use crate::types::TierId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use thiserror::Error;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The tier holds fewer tickets than requested. Nothing was decremented.
    #[error("insufficient stock for tier {tier_id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Tier that could not satisfy the request
        tier_id: TierId,
        /// Requested quantity
        requested: u32,
        /// Availability at the time of the attempt
        available: u32,
    },

    /// No counter has been opened for this tier.
    #[error("unknown tier {tier_id}")]
    UnknownTier {
        /// The unregistered tier id
        tier_id: TierId,
    },

    /// `open_tier` was called twice for the same tier.
    #[error("tier {tier_id} is already open")]
    TierAlreadyOpen {
        /// The already-registered tier id
        tier_id: TierId,
    },
}

/// Availability counter for one tier.
///
/// Invariant: `0 <= available <= initial`.
#[derive(Debug, Clone, Copy)]
struct TierCounter {
    initial: u32,
    available: u32,
}

/// Per-tier availability ledger.
///
/// The outer `RwLock` guards the registry of tiers (rarely written); each
/// counter sits behind its own `Mutex` so reserve/release on one tier is a
/// single atomic unit and distinct tiers proceed in parallel.
#[derive(Debug, Default)]
pub struct InventoryLedger {
    tiers: RwLock<HashMap<TierId, Arc<Mutex<TierCounter>>>>,
}

impl InventoryLedger {
    /// Creates an empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tier with its initial stock.
    ///
    /// # Errors
    ///
    /// Returns `TierAlreadyOpen` if a counter already exists for `tier_id`.
    pub fn open_tier(&self, tier_id: TierId, initial_stock: u32) -> Result<(), LedgerError> {
        let mut tiers = self.tiers.write().unwrap_or_else(PoisonError::into_inner);
        if tiers.contains_key(&tier_id) {
            return Err(LedgerError::TierAlreadyOpen { tier_id });
        }
        tiers.insert(
            tier_id,
            Arc::new(Mutex::new(TierCounter {
                initial: initial_stock,
                available: initial_stock,
            })),
        );
        tracing::debug!(%tier_id, initial_stock, "tier opened");
        Ok(())
    }

    /// Current availability for a tier.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTier` if no counter exists for `tier_id`.
    pub fn available(&self, tier_id: TierId) -> Result<u32, LedgerError> {
        let counter = self.counter(tier_id)?;
        let guard = counter.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.available)
    }

    /// Atomically checks and decrements a tier's availability.
    ///
    /// The per-tier mutex is held across the whole check-and-decrement, so two
    /// concurrent reserves can never both succeed against the same tickets.
    /// On failure the counter is untouched.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTier` for an unregistered tier and `InsufficientStock`
    /// when fewer than `quantity` tickets remain.
    pub fn reserve(&self, tier_id: TierId, quantity: u32) -> Result<(), LedgerError> {
        let counter = self.counter(tier_id)?;
        let mut guard = counter.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.available < quantity {
            return Err(LedgerError::InsufficientStock {
                tier_id,
                requested: quantity,
                available: guard.available,
            });
        }
        guard.available -= quantity;
        tracing::debug!(%tier_id, quantity, remaining = guard.available, "reserved");
        Ok(())
    }

    /// Atomically returns previously-reserved tickets to a tier.
    ///
    /// Idempotency is the caller's responsibility: the ledger cannot tell a
    /// legitimate release from a duplicate one, so the lifecycle service only
    /// releases after a successful cancel transition.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTier` if no counter exists for `tier_id`.
    ///
    /// # Panics
    ///
    /// Panics if the release would drive availability above the tier's initial
    /// stock. That can only happen through a caller bug (releasing tickets
    /// that were never reserved), and silently clamping would hide it.
    pub fn release(&self, tier_id: TierId, quantity: u32) -> Result<(), LedgerError> {
        let counter = self.counter(tier_id)?;
        let mut guard = counter.lock().unwrap_or_else(PoisonError::into_inner);
        assert!(
            quantity <= guard.initial - guard.available,
            "release of {quantity} on tier {tier_id} exceeds initial stock ({} available of {})",
            guard.available,
            guard.initial,
        );
        guard.available += quantity;
        tracing::debug!(%tier_id, quantity, remaining = guard.available, "released");
        Ok(())
    }

    fn counter(&self, tier_id: TierId) -> Result<Arc<Mutex<TierCounter>>, LedgerError> {
        let tiers = self.tiers.read().unwrap_or_else(PoisonError::into_inner);
        tiers
            .get(&tier_id)
            .cloned()
            .ok_or(LedgerError::UnknownTier { tier_id })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reserve_decrements_and_checks() {
        let ledger = InventoryLedger::new();
        let tier = TierId::new();
        ledger.open_tier(tier, 5).unwrap();

        ledger.reserve(tier, 3).unwrap();
        assert_eq!(ledger.available(tier).unwrap(), 2);

        let err = ledger.reserve(tier, 3).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientStock {
                tier_id: tier,
                requested: 3,
                available: 2,
            }
        );
        // Failed reserve left the counter untouched
        assert_eq!(ledger.available(tier).unwrap(), 2);
    }

    #[test]
    fn release_restores_availability() {
        let ledger = InventoryLedger::new();
        let tier = TierId::new();
        ledger.open_tier(tier, 10).unwrap();

        ledger.reserve(tier, 6).unwrap();
        ledger.release(tier, 6).unwrap();
        assert_eq!(ledger.available(tier).unwrap(), 10);
    }

    #[test]
    fn unknown_tier_is_rejected() {
        let ledger = InventoryLedger::new();
        let tier = TierId::new();
        assert_eq!(
            ledger.reserve(tier, 1).unwrap_err(),
            LedgerError::UnknownTier { tier_id: tier }
        );
        assert_eq!(
            ledger.available(tier).unwrap_err(),
            LedgerError::UnknownTier { tier_id: tier }
        );
    }

    #[test]
    fn reopening_a_tier_is_rejected() {
        let ledger = InventoryLedger::new();
        let tier = TierId::new();
        ledger.open_tier(tier, 5).unwrap();
        assert_eq!(
            ledger.open_tier(tier, 99).unwrap_err(),
            LedgerError::TierAlreadyOpen { tier_id: tier }
        );
        assert_eq!(ledger.available(tier).unwrap(), 5);
    }

    #[test]
    #[should_panic(expected = "exceeds initial stock")]
    fn over_release_aborts() {
        let ledger = InventoryLedger::new();
        let tier = TierId::new();
        ledger.open_tier(tier, 2).unwrap();
        let _ = ledger.release(tier, 1);
    }

    #[test]
    fn concurrent_reserves_never_oversell() {
        let ledger = Arc::new(InventoryLedger::new());
        let tier = TierId::new();
        ledger.open_tier(tier, 50).unwrap();

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || ledger.reserve(tier, 1).is_ok())
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&won| won)
            .count();

        assert_eq!(wins, 50);
        assert_eq!(ledger.available(tier).unwrap(), 0);
    }

    proptest! {
        /// Any interleaving of reserves and releases keeps availability in
        /// [0, initial]: failed reserves change nothing and successful
        /// operations move the counter by exactly the requested quantity.
        #[test]
        fn availability_stays_within_bounds(
            initial in 0u32..500,
            ops in proptest::collection::vec((any::<bool>(), 0u32..50), 0..64),
        ) {
            let ledger = InventoryLedger::new();
            let tier = TierId::new();
            ledger.open_tier(tier, initial).unwrap();
            let mut reserved = 0u32;

            for (is_reserve, qty) in ops {
                if is_reserve {
                    match ledger.reserve(tier, qty) {
                        Ok(()) => reserved += qty,
                        Err(LedgerError::InsufficientStock { available, .. }) => {
                            prop_assert_eq!(available, initial - reserved);
                        }
                        Err(other) => prop_assert!(false, "unexpected ledger error: {}", other),
                    }
                } else {
                    // Only release what is actually outstanding
                    let qty = qty.min(reserved);
                    ledger.release(tier, qty).unwrap();
                    reserved -= qty;
                }

                let available = ledger.available(tier).unwrap();
                prop_assert!(available <= initial);
                prop_assert_eq!(available, initial - reserved);
            }
        }
    }
}
