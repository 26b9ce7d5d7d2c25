//! Reservation rollback tests.
//!
//! Tests that order creation is all-or-nothing: when any tier in a
//! multi-tier request comes up short, every reservation taken so far is
//! released and no order is recorded.
//!
//! Run with: `cargo test --test rollback_test`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use boxoffice_core::{Money, OrderItemRequest, TicketingError};
use boxoffice_testing::{box_office, buyer, one_item};

/// Test 1: Multi-Tier Shortfall Rolls Back Everything
///
/// Three tiers, the middle one short on stock: the create fails naming the
/// short tier and no tier loses availability.
#[tokio::test]
async fn test_multi_tier_shortfall_rolls_back() {
    println!("🧪 Test 1: Multi-Tier Shortfall Rolls Back Everything");

    let fixture = box_office();
    let balcony = fixture.open_tier("Balcony", 50, Money::from_dollars(40));
    let vip = fixture.open_tier("VIP", 2, Money::from_dollars(150));
    let general = fixture.open_tier("General Admission", 100, Money::from_dollars(50));

    let err = fixture
        .service
        .create_order(
            buyer(),
            vec![
                OrderItemRequest::new(general, 10),
                OrderItemRequest::new(vip, 5),
                OrderItemRequest::new(balcony, 10),
            ],
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        TicketingError::InsufficientStock {
            tier_id: vip,
            requested: 5,
            available: 2,
        }
    );

    // Every tier is exactly where it started
    assert_eq!(fixture.available(general), 100);
    assert_eq!(fixture.available(vip), 2);
    assert_eq!(fixture.available(balcony), 50);
}

/// Test 2: Oversized Requests Fail On Availability, Not Validation
///
/// Requesting 1000 tickets from a tier holding 5 is a well-formed request
/// that the ledger rejects.
#[tokio::test]
async fn test_oversized_request_is_insufficient_stock() {
    println!("🧪 Test 2: Oversized Requests Fail On Availability");

    let fixture = box_office();
    let tier = fixture.open_tier("VIP", 5, Money::from_dollars(150));

    let err = fixture
        .service
        .create_order(buyer(), one_item(tier, 1000))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        TicketingError::InsufficientStock {
            tier_id: tier,
            requested: 1000,
            available: 5,
        }
    );
    assert_eq!(fixture.available(tier), 5);
}

/// Test 3: Duplicate Tiers In One Request
///
/// The same tier may appear on multiple lines; each line reserves
/// independently and rollback covers the lines already taken.
#[tokio::test]
async fn test_duplicate_tiers_reserve_and_roll_back() {
    println!("🧪 Test 3: Duplicate Tiers In One Request");

    let fixture = box_office();
    let tier = fixture.open_tier("General Admission", 10, Money::from_dollars(10));
    let alice = buyer();

    // Two lines of the same tier succeed together
    let order = fixture
        .service
        .create_order(
            alice,
            vec![
                OrderItemRequest::new(tier, 3),
                OrderItemRequest::new(tier, 4),
            ],
        )
        .await
        .unwrap();
    assert_eq!(order.total(), Money::from_dollars(70));
    assert_eq!(fixture.available(tier), 3);

    // A request whose combined lines exceed stock fails atomically
    let err = fixture
        .service
        .create_order(
            alice,
            vec![
                OrderItemRequest::new(tier, 2),
                OrderItemRequest::new(tier, 2),
            ],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TicketingError::InsufficientStock { .. }));
    assert_eq!(fixture.available(tier), 3);

    // Cancel gives back both lines
    fixture.service.cancel_order(order.id(), alice).await.unwrap();
    assert_eq!(fixture.available(tier), 10);
}

/// Test 4: Failed Creates Leave No Order Behind
#[tokio::test]
async fn test_failed_create_records_nothing() {
    println!("🧪 Test 4: Failed Creates Leave No Order Behind");

    let fixture = box_office();
    let tier = fixture.open_tier("VIP", 1, Money::from_dollars(150));
    let alice = buyer();

    fixture
        .service
        .create_order(alice, one_item(tier, 2))
        .await
        .unwrap_err();

    assert!(fixture.service.orders_for(alice).await.is_empty());
}
