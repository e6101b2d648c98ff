//! Order confirmation and cancellation against the seat ledger.

mod common;

use common::{addon_item, individual_item, ledger_with, plain_session, role_session};
use signup_core::booking::{
    CancelRejectReason, CancelResult, ConfirmRejectReason, ConfirmResult, Order, OrderStatus,
    SeatRequest, cancel_order, confirm_order,
};
use signup_core::capacity::SeatRejectReason;
use signup_core::pricing::cart_fingerprint;

#[test]
fn test_confirm_reprices_and_reserves() {
    let ledger = ledger_with(&[plain_session(10, 5, 0), plain_session(11, 5, 0)]);
    let items = vec![
        individual_item(1, 10, 100, 3200),
        individual_item(2, 11, 101, 3200),
    ];
    let previewed = cart_fingerprint(&items);
    let mut order = Order::new(1, 900, items);
    let seats = [
        SeatRequest {
            item_id: 1,
            session_id: 10,
            role_id: None,
        },
        SeatRequest {
            item_id: 2,
            session_id: 11,
            role_id: None,
        },
    ];

    match confirm_order(&mut order, &seats, &ledger, Some(previewed)) {
        ConfirmResult::Confirmed {
            final_total,
            fingerprint,
        } => {
            // Two distinct children -> tier 300.
            assert_eq!(final_total, 5800);
            assert_eq!(fingerprint, previewed);
        }
        other => panic!("expected confirmation, got {other:?}"),
    }

    assert_eq!(order.status, OrderStatus::Confirmed);
    let pricing = order.pricing.as_ref().expect("pricing captured");
    assert_eq!(pricing.discount_amount, 600);

    for session_id in [10, 11] {
        let snapshot = ledger.availability(session_id).expect("session exists");
        assert_eq!(snapshot.session_available, 4);
    }
}

#[test]
fn test_confirm_rejects_stale_cart() {
    let ledger = ledger_with(&[plain_session(10, 5, 0)]);
    let previewed_items = vec![individual_item(1, 10, 100, 3200)];
    let previewed = cart_fingerprint(&previewed_items);

    // The cart was repriced after the preview.
    let mut changed = previewed_items.clone();
    changed[0].price = 2000;
    let mut order = Order::new(1, 900, changed);
    let seats = [SeatRequest {
        item_id: 1,
        session_id: 10,
        role_id: None,
    }];

    match confirm_order(&mut order, &seats, &ledger, Some(previewed)) {
        ConfirmResult::Rejected {
            reason: ConfirmRejectReason::CartChanged { expected, actual },
        } => {
            assert_eq!(expected, previewed);
            assert_ne!(actual, previewed);
        }
        other => panic!("expected CartChanged, got {other:?}"),
    }
    assert_eq!(order.status, OrderStatus::Pending);

    // Nothing was reserved.
    let snapshot = ledger.availability(10).expect("session exists");
    assert_eq!(snapshot.session_available, 5);
}

#[test]
fn test_confirm_rolls_back_partial_reservations() {
    // Second session is already full: the first item's seat must be
    // released again.
    let full = plain_session(11, 1, 0);
    let ledger = ledger_with(&[plain_session(10, 5, 0), full]);
    ledger.reserve(11, None, 1);

    let items = vec![
        individual_item(1, 10, 100, 3200),
        individual_item(2, 11, 101, 3200),
    ];
    let mut order = Order::new(1, 900, items);
    let seats = [
        SeatRequest {
            item_id: 1,
            session_id: 10,
            role_id: None,
        },
        SeatRequest {
            item_id: 2,
            session_id: 11,
            role_id: None,
        },
    ];

    match confirm_order(&mut order, &seats, &ledger, None) {
        ConfirmResult::Rejected {
            reason:
                ConfirmRejectReason::SeatRejected {
                    item_id: 2,
                    reason: SeatRejectReason::SessionCapacityExceeded,
                },
        } => {}
        other => panic!("expected seat rejection on item 2, got {other:?}"),
    }

    assert_eq!(order.status, OrderStatus::Pending);
    let snapshot = ledger.availability(10).expect("session exists");
    assert_eq!(snapshot.session_available, 5, "rollback must free session 10");
}

#[test]
fn test_confirm_rejects_seat_for_foreign_item() {
    let ledger = ledger_with(&[plain_session(10, 5, 0)]);
    let items = vec![individual_item(1, 10, 100, 3200)];
    let mut order = Order::new(1, 900, items);
    let seats = [SeatRequest {
        item_id: 99,
        session_id: 10,
        role_id: None,
    }];

    match confirm_order(&mut order, &seats, &ledger, None) {
        ConfirmResult::Rejected {
            reason: ConfirmRejectReason::SeatItemMismatch { item_id: 99 },
        } => {}
        other => panic!("expected SeatItemMismatch, got {other:?}"),
    }
}

#[test]
fn test_confirm_rejects_seat_for_addon() {
    let ledger = ledger_with(&[plain_session(10, 5, 0)]);
    let items = vec![
        individual_item(1, 10, 100, 3200),
        addon_item(2, 10, 150),
    ];
    let mut order = Order::new(1, 900, items);
    let seats = [
        SeatRequest {
            item_id: 1,
            session_id: 10,
            role_id: None,
        },
        SeatRequest {
            item_id: 2,
            session_id: 10,
            role_id: None,
        },
    ];

    match confirm_order(&mut order, &seats, &ledger, None) {
        ConfirmResult::Rejected {
            reason: ConfirmRejectReason::SeatItemMismatch { item_id: 2 },
        } => {}
        other => panic!("expected SeatItemMismatch for addon seat, got {other:?}"),
    }
}

#[test]
fn test_confirm_twice_rejected() {
    let ledger = ledger_with(&[plain_session(10, 5, 0)]);
    let items = vec![individual_item(1, 10, 100, 3200)];
    let mut order = Order::new(1, 900, items);
    let seats = [SeatRequest {
        item_id: 1,
        session_id: 10,
        role_id: None,
    }];

    match confirm_order(&mut order, &seats, &ledger, None) {
        ConfirmResult::Confirmed { .. } => {}
        other => panic!("expected confirmation, got {other:?}"),
    }
    match confirm_order(&mut order, &seats, &ledger, None) {
        ConfirmResult::Rejected {
            reason:
                ConfirmRejectReason::InvalidStatus {
                    status: OrderStatus::Confirmed,
                },
        } => {}
        other => panic!("expected InvalidStatus, got {other:?}"),
    }
    // The failed re-confirmation must not double-book.
    let snapshot = ledger.availability(10).expect("session exists");
    assert_eq!(snapshot.session_available, 4);
}

#[test]
fn test_cancel_releases_role_seats() {
    let ledger = ledger_with(&[role_session(10, 5, 0, &[(1, 2)])]);
    let items = vec![individual_item(1, 10, 100, 2800)];
    let mut order = Order::new(1, 900, items);
    let seats = [SeatRequest {
        item_id: 1,
        session_id: 10,
        role_id: Some(1),
    }];

    match confirm_order(&mut order, &seats, &ledger, None) {
        ConfirmResult::Confirmed { .. } => {}
        other => panic!("expected confirmation, got {other:?}"),
    }

    match cancel_order(&mut order, &seats, &ledger) {
        CancelResult::Cancelled { seats_released: 1 } => {}
        other => panic!("expected cancellation, got {other:?}"),
    }
    assert_eq!(order.status, OrderStatus::Cancelled);

    let snapshot = ledger.availability(10).expect("session exists");
    assert_eq!(snapshot.session_available, 5);
    assert_eq!(snapshot.per_role[0].available, 2);
}

#[test]
fn test_cancel_pending_order_rejected() {
    let ledger = ledger_with(&[plain_session(10, 5, 0)]);
    let mut order = Order::new(1, 900, vec![individual_item(1, 10, 100, 3200)]);

    match cancel_order(&mut order, &[], &ledger) {
        CancelResult::Rejected {
            reason:
                CancelRejectReason::InvalidStatus {
                    status: OrderStatus::Pending,
                },
        } => {}
        other => panic!("expected InvalidStatus, got {other:?}"),
    }
}
