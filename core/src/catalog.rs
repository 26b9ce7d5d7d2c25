//! Catalog seam: the read interface the core uses to resolve tiers.
//!
//! Event and tier management (creation, pricing, publishing) lives outside
//! the consistency core. The core only needs to look tiers up at order time,
//! so it consumes this trait; [`StaticCatalog`] is the in-memory
//! implementation used by the demo binary and the test suites.

use crate::types::{EventId, Money, TierId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Catalog view of one ticket tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRecord {
    /// Tier identifier
    pub tier_id: TierId,
    /// Event the tier belongs to
    pub event_id: EventId,
    /// Display name ("General Admission", "VIP")
    pub name: String,
    /// Current per-ticket price
    pub unit_price: Money,
}

/// Read-only tier lookups the lifecycle service depends on.
pub trait TierCatalog: Send + Sync {
    /// Resolves a tier, or `None` if it does not exist
    fn tier(&self, tier_id: TierId) -> Option<TierRecord>;

    /// Whether an event is currently on sale
    fn event_is_active(&self, event_id: EventId) -> bool;

    /// All tiers belonging to an event
    fn tiers_for_event(&self, event_id: EventId) -> Vec<TierRecord>;
}

/// In-memory catalog for the demo binary and tests.
///
/// Prices are mutable so tests can exercise the snapshot behavior: changing
/// a tier's price here must never change an existing order's total.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    events: RwLock<HashMap<EventId, bool>>,
    tiers: RwLock<HashMap<TierId, TierRecord>>,
}

impl StaticCatalog {
    /// Creates an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an event and whether it is on sale
    pub fn add_event(&self, event_id: EventId, active: bool) {
        let mut events = self.events.write().unwrap_or_else(PoisonError::into_inner);
        events.insert(event_id, active);
    }

    /// Flips an event's on-sale flag
    pub fn set_event_active(&self, event_id: EventId, active: bool) {
        let mut events = self.events.write().unwrap_or_else(PoisonError::into_inner);
        events.insert(event_id, active);
    }

    /// Registers a tier
    pub fn add_tier(&self, record: TierRecord) {
        let mut tiers = self.tiers.write().unwrap_or_else(PoisonError::into_inner);
        tiers.insert(record.tier_id, record);
    }

    /// Updates a tier's current price. Existing orders keep their snapshots.
    pub fn set_price(&self, tier_id: TierId, unit_price: Money) {
        let mut tiers = self.tiers.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(record) = tiers.get_mut(&tier_id) {
            record.unit_price = unit_price;
        }
    }
}

impl TierCatalog for StaticCatalog {
    fn tier(&self, tier_id: TierId) -> Option<TierRecord> {
        let tiers = self.tiers.read().unwrap_or_else(PoisonError::into_inner);
        tiers.get(&tier_id).cloned()
    }

    fn event_is_active(&self, event_id: EventId) -> bool {
        let events = self.events.read().unwrap_or_else(PoisonError::into_inner);
        events.get(&event_id).copied().unwrap_or(false)
    }

    fn tiers_for_event(&self, event_id: EventId) -> Vec<TierRecord> {
        let tiers = self.tiers.read().unwrap_or_else(PoisonError::into_inner);
        let mut records: Vec<TierRecord> = tiers
            .values()
            .filter(|record| record.event_id == event_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }
}
