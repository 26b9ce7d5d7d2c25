//! Error taxonomy for the ticketing core.
//!
//! All fallible operations on the service surface return [`TicketingError`].
//! The inventory ledger has its own narrower [`LedgerError`](crate::ledger::LedgerError)
//! which converts into this type at the service boundary.

use crate::ledger::LedgerError;
use crate::types::{EventId, OrderId, OrderStatus, TierId};
use thiserror::Error;

/// Errors surfaced by the order lifecycle service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketingError {
    /// A tier did not have enough availability for the requested quantity.
    /// Recoverable: the buyer can retry with a smaller quantity.
    #[error("insufficient stock for tier {tier_id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Tier that could not satisfy the request
        tier_id: TierId,
        /// Quantity the buyer asked for
        requested: u32,
        /// Quantity actually available at the time of the attempt
        available: u32,
    },

    /// The order is not in a status that permits the requested transition.
    #[error("order {order_id} cannot transition from status {status}")]
    InvalidTransition {
        /// Order the transition was attempted on
        order_id: OrderId,
        /// Status the order was in when the transition was rejected
        status: OrderStatus,
    },

    /// The requester is not the buyer who placed the order.
    #[error("order {order_id} does not belong to the requester")]
    NotOwner {
        /// Order the requester tried to act on
        order_id: OrderId,
    },

    /// No order exists with the given id.
    #[error("order {order_id} not found")]
    OrderNotFound {
        /// The missing order id
        order_id: OrderId,
    },

    /// No tier exists with the given id.
    #[error("tier {tier_id} not found")]
    TierNotFound {
        /// The missing tier id
        tier_id: TierId,
    },

    /// The tier's event is not currently on sale.
    #[error("event {event_id} is not active")]
    EventInactive {
        /// Event whose tiers cannot be purchased
        event_id: EventId,
    },

    /// The request itself is malformed: empty item list, zero quantity,
    /// configured limit exceeded.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<LedgerError> for TicketingError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientStock {
                tier_id,
                requested,
                available,
            } => Self::InsufficientStock {
                tier_id,
                requested,
                available,
            },
            LedgerError::UnknownTier { tier_id } => Self::TierNotFound { tier_id },
            LedgerError::TierAlreadyOpen { tier_id } => {
                Self::InvalidInput(format!("tier {tier_id} is already open"))
            }
        }
    }
}
