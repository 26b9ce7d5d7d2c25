//! # Boxoffice Core
//!
//! Order and inventory consistency core for an event-ticketing backend.
//!
//! Organizers publish events with ticket tiers; buyers purchase tickets via
//! orders made of line items. This crate owns the part of that system where
//! money meets inventory:
//!
//! - **Inventory ledger** ([`ledger`]) — per-tier availability counters with
//!   atomic check-and-decrement, so tickets are never oversold.
//! - **Order aggregate** ([`order`]) — line items with snapshot prices, a
//!   derived total and the Pending → Completed/Canceled status machine.
//! - **Lifecycle service** ([`lifecycle`]) — the only entry points that touch
//!   both: create (all-or-nothing reservation), confirm (no ledger effect)
//!   and cancel (release after a successful transition).
//! - **Catalog seam** ([`catalog`]) — the read interface used to resolve tier
//!   prices and event state at order time.
//!
//! ```text
//!   request layer (out of scope)
//!            │
//!            ▼
//!   ┌─────────────────┐     reads      ┌──────────────┐
//!   │  OrderService    │ ─────────────▶ │  TierCatalog │
//!   │  (lifecycle)     │                └──────────────┘
//!   └───────┬─────────┘
//!      reserves/releases
//!           ▼
//!   ┌─────────────────┐
//!   │ InventoryLedger │   per-tier mutexes, fixed lock order
//!   └─────────────────┘
//! ```
//!
//! HTTP routing, persistence, payment processing and authentication live
//! outside this crate and call in through [`lifecycle::OrderService`].

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod order;
pub mod types;

pub use catalog::{StaticCatalog, TierCatalog, TierRecord};
pub use clock::{Clock, SystemClock};
pub use config::{Config, OrderLimits};
pub use error::TicketingError;
pub use ledger::{InventoryLedger, LedgerError};
pub use lifecycle::OrderService;
pub use order::Order;
pub use types::{
    BuyerId, EventId, LineItem, Money, OrderId, OrderItemRequest, OrderStatus, TierId,
};
