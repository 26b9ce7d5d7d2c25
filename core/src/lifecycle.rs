//! Order lifecycle service: create, confirm and cancel orders.
//!
//! This is the only component that touches both the inventory ledger and the
//! order book, and it owns the pairing rules between them:
//!
//! - **create** reserves inventory all-or-nothing before the order exists;
//! - **confirm** finalizes an order without touching the ledger (tickets were
//!   already committed at creation);
//! - **cancel** releases inventory only after the status transition succeeds,
//!   so a rejected cancel can never double-restore tickets.
//!
//! Multi-tier reservation plans are sorted by ascending tier id before any
//! per-tier lock is taken, which gives every create the same global lock
//! order and rules out deadlock between overlapping orders.

use crate::catalog::{TierCatalog, TierRecord};
use crate::clock::Clock;
use crate::config::OrderLimits;
use crate::error::TicketingError;
use crate::ledger::InventoryLedger;
use crate::order::Order;
use crate::types::{BuyerId, EventId, LineItem, OrderId, OrderItemRequest, TierId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Orchestrates order creation and transitions across the ledger and the
/// order book.
pub struct OrderService {
    ledger: Arc<InventoryLedger>,
    catalog: Arc<dyn TierCatalog>,
    clock: Arc<dyn Clock>,
    orders: RwLock<HashMap<OrderId, Order>>,
    limits: OrderLimits,
}

impl OrderService {
    /// Creates a service over the given ledger, catalog and clock.
    #[must_use]
    pub fn new(
        ledger: Arc<InventoryLedger>,
        catalog: Arc<dyn TierCatalog>,
        clock: Arc<dyn Clock>,
        limits: OrderLimits,
    ) -> Self {
        Self {
            ledger,
            catalog,
            clock,
            orders: RwLock::new(HashMap::new()),
            limits,
        }
    }

    /// Creates a Pending order, reserving inventory for every line item.
    ///
    /// Reservation is all-or-nothing: if any tier comes up short, every
    /// quantity reserved so far is released (in reverse order) and the call
    /// fails with `InsufficientStock` naming the offending tier. A failed
    /// create leaves no trace in the ledger or the order book.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty item list, zero quantities or configured
    /// limit violations; `TierNotFound` / `EventInactive` when resolution
    /// fails; `InsufficientStock` when a tier cannot cover its quantity.
    #[tracing::instrument(skip(self, items), fields(%buyer, item_count = items.len()))]
    pub async fn create_order(
        &self,
        buyer: BuyerId,
        items: Vec<OrderItemRequest>,
    ) -> Result<Order, TicketingError> {
        self.validate_request(&items)?;
        let line_items = self.resolve_items(&items)?;

        // Totals and input are fully validated before the ledger is touched.
        let order = Order::new(OrderId::new(), buyer, line_items, self.clock.now())?;

        self.reserve_plan(order.items())?;

        let mut orders = self.orders.write().await;
        orders.insert(order.id(), order.clone());
        drop(orders);

        tracing::info!(
            order_id = %order.id(),
            total = %order.total(),
            "order created"
        );
        Ok(order)
    }

    /// Confirms a Pending order. No inventory effect: the tickets were
    /// committed when the order was created.
    ///
    /// # Errors
    ///
    /// `OrderNotFound` for an unknown id, `NotOwner` when the requester is
    /// not the buyer, `InvalidTransition` when the order is not Pending.
    #[tracing::instrument(skip(self), fields(%order_id, %requester))]
    pub async fn confirm_order(
        &self,
        order_id: OrderId,
        requester: BuyerId,
    ) -> Result<Order, TicketingError> {
        let mut orders = self.orders.write().await;
        let order = Self::owned_order_mut(&mut orders, order_id, requester)?;
        order.confirm()?;
        let confirmed = order.clone();
        drop(orders);

        tracing::info!(%order_id, "order confirmed");
        Ok(confirmed)
    }

    /// Cancels a Pending order and returns its tickets to the ledger.
    ///
    /// The release happens only after the transition to Canceled succeeds,
    /// and while the order-book write lock is still held, so a concurrent
    /// second cancel observes the Canceled status and cannot double-restore.
    ///
    /// # Errors
    ///
    /// `OrderNotFound`, `NotOwner` and `InvalidTransition` as for
    /// [`confirm_order`](Self::confirm_order).
    #[tracing::instrument(skip(self), fields(%order_id, %requester))]
    pub async fn cancel_order(
        &self,
        order_id: OrderId,
        requester: BuyerId,
    ) -> Result<Order, TicketingError> {
        let mut orders = self.orders.write().await;
        let order = Self::owned_order_mut(&mut orders, order_id, requester)?;
        order.cancel()?;
        let canceled = order.clone();

        for item in canceled.items() {
            self.ledger.release(item.tier_id, item.quantity)?;
        }
        drop(orders);

        tracing::info!(%order_id, "order canceled, inventory released");
        Ok(canceled)
    }

    /// Fetches one of the requester's orders.
    ///
    /// # Errors
    ///
    /// `OrderNotFound` for an unknown id, `NotOwner` when the order belongs
    /// to a different buyer.
    pub async fn order(
        &self,
        order_id: OrderId,
        requester: BuyerId,
    ) -> Result<Order, TicketingError> {
        let orders = self.orders.read().await;
        let order = orders
            .get(&order_id)
            .ok_or(TicketingError::OrderNotFound { order_id })?;
        if order.buyer() != requester {
            return Err(TicketingError::NotOwner { order_id });
        }
        Ok(order.clone())
    }

    /// All of a buyer's orders, newest first.
    pub async fn orders_for(&self, buyer: BuyerId) -> Vec<Order> {
        let orders = self.orders.read().await;
        let mut result: Vec<Order> = orders
            .values()
            .filter(|order| order.buyer() == buyer)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        result
    }

    /// Tiers of an event that still have availability.
    pub fn tiers_on_sale(&self, event_id: EventId) -> Vec<TierRecord> {
        self.catalog
            .tiers_for_event(event_id)
            .into_iter()
            .filter(|record| {
                self.ledger
                    .available(record.tier_id)
                    .is_ok_and(|available| available > 0)
            })
            .collect()
    }

    fn validate_request(&self, items: &[OrderItemRequest]) -> Result<(), TicketingError> {
        if items.is_empty() {
            return Err(TicketingError::InvalidInput(
                "an order must contain at least one line item".to_string(),
            ));
        }
        if items.len() > self.limits.max_items_per_order {
            return Err(TicketingError::InvalidInput(format!(
                "orders are limited to {} line items",
                self.limits.max_items_per_order
            )));
        }
        for item in items {
            if item.quantity == 0 {
                return Err(TicketingError::InvalidInput(format!(
                    "requested zero tickets for tier {}",
                    item.tier_id
                )));
            }
            if let Some(cap) = self.limits.max_quantity_per_item {
                if item.quantity > cap {
                    return Err(TicketingError::InvalidInput(format!(
                        "tier {} quantity {} exceeds the per-item limit of {cap}",
                        item.tier_id, item.quantity
                    )));
                }
            }
        }
        Ok(())
    }

    /// Resolves every requested tier through the catalog, snapshotting the
    /// current price into the line item. Line items keep the buyer's
    /// submission order.
    fn resolve_items(
        &self,
        items: &[OrderItemRequest],
    ) -> Result<Vec<LineItem>, TicketingError> {
        items
            .iter()
            .map(|item| {
                let record = self
                    .catalog
                    .tier(item.tier_id)
                    .ok_or(TicketingError::TierNotFound {
                        tier_id: item.tier_id,
                    })?;
                if !self.catalog.event_is_active(record.event_id) {
                    return Err(TicketingError::EventInactive {
                        event_id: record.event_id,
                    });
                }
                Ok(LineItem {
                    tier_id: item.tier_id,
                    quantity: item.quantity,
                    unit_price: record.unit_price,
                })
            })
            .collect()
    }

    /// Reserves every line item against the ledger, all-or-nothing.
    ///
    /// The plan is sorted by ascending tier id first so that all creates take
    /// per-tier locks in the same global order.
    fn reserve_plan(&self, items: &[LineItem]) -> Result<(), TicketingError> {
        let mut plan: Vec<(TierId, u32)> = items
            .iter()
            .map(|item| (item.tier_id, item.quantity))
            .collect();
        plan.sort_by_key(|(tier_id, _)| *tier_id);

        let mut reserved: Vec<(TierId, u32)> = Vec::with_capacity(plan.len());
        for (tier_id, quantity) in plan {
            if let Err(err) = self.ledger.reserve(tier_id, quantity) {
                tracing::warn!(
                    %tier_id,
                    quantity,
                    error = %err,
                    "reservation failed, rolling back"
                );
                for (rollback_tier, rollback_qty) in reserved.into_iter().rev() {
                    if let Err(release_err) = self.ledger.release(rollback_tier, rollback_qty) {
                        tracing::error!(
                            tier_id = %rollback_tier,
                            quantity = rollback_qty,
                            error = %release_err,
                            "rollback release failed"
                        );
                    }
                }
                return Err(err.into());
            }
            reserved.push((tier_id, quantity));
        }
        Ok(())
    }

    fn owned_order_mut<'a>(
        orders: &'a mut HashMap<OrderId, Order>,
        order_id: OrderId,
        requester: BuyerId,
    ) -> Result<&'a mut Order, TicketingError> {
        let order = orders
            .get_mut(&order_id)
            .ok_or(TicketingError::OrderNotFound { order_id })?;
        if order.buyer() != requester {
            return Err(TicketingError::NotOwner { order_id });
        }
        Ok(order)
    }
}
