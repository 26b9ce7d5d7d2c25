//! Boxoffice Demo
//!
//! Walks through the order lifecycle end to end:
//! - Catalog and ledger setup for an event with two tiers
//! - A multi-tier purchase with price snapshots
//! - Cancellation releasing inventory
//! - A contended last-tickets race where only some buyers win
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin demo
//! ```

use boxoffice_core::{
    BuyerId, Config, EventId, InventoryLedger, Money, OrderItemRequest, OrderService,
    StaticCatalog, SystemClock, TicketingError, TierCatalog, TierId, TierRecord,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("\n🎫 ============================================");
    println!("   Boxoffice - Order Lifecycle Demo");
    println!("============================================\n");

    // ========== Setup ==========

    println!("⚙️  Setting up catalog and inventory...");

    let event_id = EventId::new();
    let catalog = Arc::new(StaticCatalog::new());
    catalog.add_event(event_id, true);

    let general = TierId::new();
    let vip = TierId::new();
    catalog.add_tier(TierRecord {
        tier_id: general,
        event_id,
        name: "General Admission".to_string(),
        unit_price: Money::from_dollars(50),
    });
    catalog.add_tier(TierRecord {
        tier_id: vip,
        event_id,
        name: "VIP".to_string(),
        unit_price: Money::from_dollars(150),
    });

    let ledger = Arc::new(InventoryLedger::new());
    ledger.open_tier(general, 100)?;
    ledger.open_tier(vip, 5)?;

    let service = Arc::new(OrderService::new(
        Arc::clone(&ledger),
        Arc::clone(&catalog) as Arc<dyn TierCatalog>,
        Arc::new(SystemClock),
        config.limits,
    ));

    println!("   ✓ Event created: {event_id}");
    println!("   ✓ General Admission: 100 tickets at $50.00");
    println!("   ✓ VIP: 5 tickets at $150.00\n");

    // ========== Multi-tier purchase ==========

    println!("1️⃣  Buyer places a multi-tier order (2 GA + 1 VIP)...");

    let alice = BuyerId::new();
    let order = service
        .create_order(
            alice,
            vec![
                OrderItemRequest::new(general, 2),
                OrderItemRequest::new(vip, 1),
            ],
        )
        .await?;

    println!("   ✓ Order {} created ({})", order.id(), order.status());
    println!("   ✓ Total: {} (snapshot prices)", order.total());
    println!("   ✓ GA remaining: {}", ledger.available(general)?);
    println!("   ✓ VIP remaining: {}\n", ledger.available(vip)?);

    // A later price change does not affect the existing order
    catalog.set_price(general, Money::from_dollars(80));
    let unchanged = service.order(order.id(), alice).await?;
    println!("   📌 GA price raised to $80.00; order total still {}\n", unchanged.total());

    service.confirm_order(order.id(), alice).await?;
    println!("   ✓ Order confirmed\n");

    // ========== Cancellation ==========

    println!("2️⃣  Another buyer orders then cancels...");

    let bob = BuyerId::new();
    let to_cancel = service
        .create_order(bob, vec![OrderItemRequest::new(vip, 2)])
        .await?;
    println!("   ✓ Order {} created, VIP remaining: {}", to_cancel.id(), ledger.available(vip)?);

    service.cancel_order(to_cancel.id(), bob).await?;
    println!("   ✓ Order canceled, VIP remaining: {}\n", ledger.available(vip)?);

    // ========== Contended last tickets ==========

    println!("3️⃣  10 buyers race for the remaining {} VIP tickets...", ledger.available(vip)?);

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .create_order(BuyerId::new(), vec![OrderItemRequest::new(vip, 1)])
                    .await
            })
        })
        .collect();

    let mut winners = 0;
    let mut sold_out = 0;
    for task in tasks {
        match task.await? {
            Ok(_) => winners += 1,
            Err(TicketingError::InsufficientStock { .. }) => sold_out += 1,
            Err(other) => return Err(other.into()),
        }
    }

    println!("   ✓ {winners} buyers won a ticket, {sold_out} saw 'insufficient stock'");
    println!("   ✓ VIP remaining: {}\n", ledger.available(vip)?);

    let on_sale = service.tiers_on_sale(event_id);
    println!("📊 Tiers still on sale:");
    for tier in &on_sale {
        println!("   - {} at {}", tier.name, tier.unit_price);
    }

    println!("\n✨ Demo completed successfully!");
    Ok(())
}
