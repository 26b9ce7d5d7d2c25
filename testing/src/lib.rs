//! # Boxoffice Testing
//!
//! Testing utilities and fixtures for the Boxoffice ticketing core.
//!
//! This crate provides:
//! - A deterministic [`FixedClock`] implementation of the core `Clock` trait
//! - Fixture builders that wire a catalog, ledger and order service together
//!
//! ## Example
//!
//! ```ignore
//! use boxoffice_testing::{box_office, test_clock};
//!
//! #[tokio::test]
//! async fn test_purchase_flow() {
//!     let fixture = box_office();
//!     let tier = fixture.open_tier("General Admission", 100, Money::from_dollars(50));
//!
//!     let order = fixture
//!         .service
//!         .create_order(BuyerId::new(), vec![OrderItemRequest::new(tier, 2)])
//!         .await
//!         .unwrap();
//!     assert_eq!(order.total(), Money::from_dollars(100));
//! }
//! ```

use chrono::{DateTime, Utc};
use boxoffice_core::clock::Clock;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Fixture builders wiring the core components together.
pub mod fixtures {
    use super::mocks::test_clock;
    use boxoffice_core::{
        BuyerId, EventId, InventoryLedger, Money, OrderItemRequest, OrderLimits, OrderService,
        StaticCatalog, TierCatalog, TierId, TierRecord,
    };
    use std::sync::Arc;

    /// A fully wired catalog + ledger + service fixture with one active event.
    pub struct BoxOfficeFixture {
        /// The active event tiers are attached to by default
        pub event_id: EventId,
        /// Catalog backing the service; mutate it to change prices
        pub catalog: Arc<StaticCatalog>,
        /// Ledger backing the service; query it to assert availability
        pub ledger: Arc<InventoryLedger>,
        /// The service under test
        pub service: OrderService,
    }

    impl BoxOfficeFixture {
        /// Registers a tier on the fixture's event and opens its ledger
        /// counter, returning the new tier id.
        ///
        /// # Panics
        ///
        /// Panics if the tier id collides with an existing ledger entry,
        /// which cannot happen with random ids.
        #[allow(clippy::expect_used)]
        pub fn open_tier(&self, name: &str, stock: u32, unit_price: Money) -> TierId {
            let tier_id = TierId::new();
            self.catalog.add_tier(TierRecord {
                tier_id,
                event_id: self.event_id,
                name: name.to_string(),
                unit_price,
            });
            self.ledger
                .open_tier(tier_id, stock)
                .expect("fresh tier id should not collide");
            tier_id
        }

        /// Current ledger availability for a tier.
        ///
        /// # Panics
        ///
        /// Panics if the tier was never opened on this fixture.
        #[must_use]
        #[allow(clippy::expect_used)]
        pub fn available(&self, tier_id: TierId) -> u32 {
            self.ledger
                .available(tier_id)
                .expect("tier should be open on the fixture ledger")
        }
    }

    /// Builds a [`BoxOfficeFixture`] with a fixed clock, default limits and
    /// one active event.
    #[must_use]
    pub fn box_office() -> BoxOfficeFixture {
        box_office_with_limits(OrderLimits::default())
    }

    /// Builds a [`BoxOfficeFixture`] with explicit order limits.
    #[must_use]
    pub fn box_office_with_limits(limits: OrderLimits) -> BoxOfficeFixture {
        let event_id = EventId::new();
        let catalog = Arc::new(StaticCatalog::new());
        catalog.add_event(event_id, true);
        let ledger = Arc::new(InventoryLedger::new());
        let service = OrderService::new(
            Arc::clone(&ledger),
            Arc::clone(&catalog) as Arc<dyn TierCatalog>,
            Arc::new(test_clock()),
            limits,
        );
        BoxOfficeFixture {
            event_id,
            catalog,
            ledger,
            service,
        }
    }

    /// Shorthand for a single-line order request.
    #[must_use]
    pub fn one_item(tier_id: TierId, quantity: u32) -> Vec<OrderItemRequest> {
        vec![OrderItemRequest::new(tier_id, quantity)]
    }

    /// A fresh buyer id, purely for readability at call sites.
    #[must_use]
    pub fn buyer() -> BuyerId {
        BuyerId::new()
    }
}

// Re-export commonly used items
pub use fixtures::{BoxOfficeFixture, box_office, box_office_with_limits, buyer, one_item};
pub use mocks::{FixedClock, test_clock};
