//! No-overbook property under concurrent reservation attempts.

mod common;

use std::sync::Arc;
use std::thread;

use common::{ledger_with, plain_session, role_session};
use signup_core::capacity::{ReserveResult, SeatRejectReason};

#[test]
fn test_last_role_seat_single_winner() {
    // Role capacity 4, assigned 3: eight racers, one seat.
    let ledger = Arc::new(ledger_with(&[role_session(1, 10, 0, &[(1, 4)])]));
    for _ in 0..3 {
        match ledger.reserve(1, Some(1), 1) {
            ReserveResult::Reserved { .. } => {}
            other => panic!("expected setup reservation, got {other:?}"),
        }
    }

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || ledger.reserve(1, Some(1), 1))
        })
        .collect();

    let mut wins = 0;
    let mut role_full = 0;
    for handle in handles {
        match handle.join().expect("racer thread panicked") {
            ReserveResult::Reserved { .. } => wins += 1,
            ReserveResult::Rejected {
                reason: SeatRejectReason::RoleCapacityExceeded,
            } => role_full += 1,
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
    assert_eq!(wins, 1, "exactly one racer may take the last seat");
    assert_eq!(role_full, 7);

    let snapshot = ledger.availability(1).expect("session exists");
    assert_eq!(snapshot.per_role[0].assigned, 4);
    assert_eq!(snapshot.per_role[0].available, 0);
}

#[test]
fn test_hammered_session_never_overbooks() {
    let capacity = 16;
    let buffer = 4;
    let ledger = Arc::new(ledger_with(&[plain_session(1, capacity, buffer)]));

    // Far more attempts than seats, across many threads.
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || {
                let mut won = 0u32;
                for _ in 0..10 {
                    if let ReserveResult::Reserved { .. } = ledger.reserve(1, None, 1) {
                        won += 1;
                    }
                }
                won
            })
        })
        .collect();

    let total_won: u32 = handles
        .into_iter()
        .map(|h| h.join().expect("worker thread panicked"))
        .sum();

    assert_eq!(total_won, capacity + buffer);
    let occupancy = ledger.occupancy(1).expect("session exists");
    assert_eq!(occupancy.assigned, capacity + buffer);
    assert!(occupancy.assigned <= occupancy.bookable_capacity);
}

#[test]
fn test_concurrent_reserve_and_release_stays_in_bounds() {
    let ledger = Arc::new(ledger_with(&[plain_session(1, 8, 0)]));

    let reservers: Vec<_> = (0..4)
        .map(|_| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || {
                for _ in 0..50 {
                    if let ReserveResult::Reserved { .. } = ledger.reserve(1, None, 1) {
                        ledger.release(1, None, 1);
                    }
                }
            })
        })
        .collect();
    for handle in reservers {
        handle.join().expect("churn thread panicked");
    }

    let occupancy = ledger.occupancy(1).expect("session exists");
    assert_eq!(occupancy.assigned, 0);
    let snapshot = ledger.availability(1).expect("session exists");
    assert_eq!(snapshot.session_available, 8);
}
