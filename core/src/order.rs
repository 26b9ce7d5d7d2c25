//! Order aggregate: line items, derived total and the status machine.
//!
//! An order owns its line items and total from construction onward. Status
//! changes go through [`Order::confirm`] and [`Order::cancel`] only, and a
//! rejected transition leaves the order untouched. The aggregate never talks
//! to the inventory ledger; pairing transitions with reservation effects is
//! the lifecycle service's job.

use crate::error::TicketingError;
use crate::types::{BuyerId, LineItem, Money, OrderId, OrderStatus, Timestamp};
use serde::{Deserialize, Serialize};

/// A buyer's order: line items with snapshot prices and a derived total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    buyer: BuyerId,
    items: Vec<LineItem>,
    total: Money,
    status: OrderStatus,
    created_at: Timestamp,
}

impl Order {
    /// Creates a Pending order from resolved line items.
    ///
    /// The total is computed here, once, from the snapshot unit prices; it is
    /// never recomputed from live catalog prices.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty item list, a zero quantity, or a
    /// total that overflows.
    pub fn new(
        id: OrderId,
        buyer: BuyerId,
        items: Vec<LineItem>,
        created_at: Timestamp,
    ) -> Result<Self, TicketingError> {
        if items.is_empty() {
            return Err(TicketingError::InvalidInput(
                "an order must contain at least one line item".to_string(),
            ));
        }

        let mut total = Money::from_cents(0);
        for item in &items {
            if item.quantity == 0 {
                return Err(TicketingError::InvalidInput(format!(
                    "line item for tier {} has zero quantity",
                    item.tier_id
                )));
            }
            let subtotal = item.checked_subtotal().ok_or_else(|| {
                TicketingError::InvalidInput(format!(
                    "line item for tier {} overflows the order total",
                    item.tier_id
                ))
            })?;
            total = total.checked_add(subtotal).ok_or_else(|| {
                TicketingError::InvalidInput("order total overflows".to_string())
            })?;
        }

        Ok(Self {
            id,
            buyer,
            items,
            total,
            status: OrderStatus::Pending,
            created_at,
        })
    }

    /// Transitions the order from Pending to Completed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the order is not Pending. The order is
    /// unchanged in that case.
    pub fn confirm(&mut self) -> Result<(), TicketingError> {
        if !self.status.can_confirm() {
            return Err(TicketingError::InvalidTransition {
                order_id: self.id,
                status: self.status,
            });
        }
        self.status = OrderStatus::Completed;
        Ok(())
    }

    /// Transitions the order from Pending to Canceled.
    ///
    /// Releasing the reserved inventory is the caller's follow-up step, taken
    /// only after this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the order is not Pending. The order is
    /// unchanged in that case.
    pub fn cancel(&mut self) -> Result<(), TicketingError> {
        if !self.status.can_cancel() {
            return Err(TicketingError::InvalidTransition {
                order_id: self.id,
                status: self.status,
            });
        }
        self.status = OrderStatus::Canceled;
        Ok(())
    }

    /// Order identifier
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    /// The buyer who placed the order
    #[must_use]
    pub const fn buyer(&self) -> BuyerId {
        self.buyer
    }

    /// The order's line items, in the order the buyer submitted them
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The order total, fixed at creation time
    #[must_use]
    pub const fn total(&self) -> Money {
        self.total
    }

    /// Current lifecycle status
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Creation timestamp
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
