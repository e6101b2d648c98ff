//! Waitlist book tests: FIFO ordering, terminal transitions, and the
//! promotion protocol against the seat ledger.

mod common;

use common::{ledger_with, plain_session, role_session};
use signup_core::capacity::SeatRejectReason;
use signup_core::waitlist::{
    AddResult, PromoteResult, RemoveResult, WaitlistBook, WaitlistMetrics, WaitlistStatus,
};

fn added(result: AddResult) -> u64 {
    match result {
        AddResult::Added { entry_id, .. } => entry_id,
        AddResult::Rejected => panic!("expected add to succeed"),
    }
}

#[test]
fn test_add_assigns_monotonic_sequence() {
    let mut book = WaitlistBook::new();
    let mut metrics = WaitlistMetrics::new();

    let first = book.add(1, None, 900, Some(100), 1_000, &mut metrics);
    let second = book.add(1, None, 901, Some(101), 1_000, &mut metrics);

    let (AddResult::Added { seq: seq_a, .. }, AddResult::Added { seq: seq_b, .. }) =
        (first, second)
    else {
        panic!("expected both adds to succeed");
    };
    assert!(seq_b > seq_a, "sequence must be strictly increasing");
    assert_eq!(metrics.add_total(), 2);
}

#[test]
fn test_list_for_session_is_fifo() {
    let mut book = WaitlistBook::new();
    let mut metrics = WaitlistMetrics::new();

    let a = added(book.add(1, None, 900, Some(100), 3_000, &mut metrics));
    let b = added(book.add(2, None, 901, Some(101), 1_000, &mut metrics));
    let c = added(book.add(1, None, 902, Some(102), 2_000, &mut metrics));

    let listed: Vec<u64> = book
        .list_for_session(1)
        .iter()
        .map(|e| e.entry_id)
        .collect();
    // Insertion order, not timestamp order: seq is authoritative.
    assert_eq!(listed, vec![a, c]);

    let for_parent: Vec<u64> = book
        .list_for_parent(901)
        .iter()
        .map(|e| e.entry_id)
        .collect();
    assert_eq!(for_parent, vec![b]);
}

#[test]
fn test_remove_is_terminal() {
    let mut book = WaitlistBook::new();
    let mut metrics = WaitlistMetrics::new();
    let entry_id = added(book.add(1, None, 900, None, 1_000, &mut metrics));

    match book.remove(entry_id, &mut metrics) {
        RemoveResult::Removed { .. } => {}
        other => panic!("expected removal, got {other:?}"),
    }
    assert_eq!(
        book.get(entry_id).map(|e| e.status),
        Some(WaitlistStatus::Removed)
    );

    match book.remove(entry_id, &mut metrics) {
        RemoveResult::InvalidState {
            status: WaitlistStatus::Removed,
        } => {}
        other => panic!("expected InvalidState, got {other:?}"),
    }
}

#[test]
fn test_remove_unknown_entry() {
    let mut book = WaitlistBook::new();
    let mut metrics = WaitlistMetrics::new();
    match book.remove(42, &mut metrics) {
        RemoveResult::NotFound => {}
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_readding_after_removal_goes_to_the_back() {
    let mut book = WaitlistBook::new();
    let mut metrics = WaitlistMetrics::new();

    let first = added(book.add(1, None, 900, Some(100), 1_000, &mut metrics));
    let other = added(book.add(1, None, 901, Some(101), 1_000, &mut metrics));
    book.remove(first, &mut metrics);

    let readded = added(book.add(1, None, 900, Some(100), 2_000, &mut metrics));
    assert_ne!(readded, first, "re-adding creates a new entry");

    let waiting: Vec<u64> = book
        .waiting_for_seat(1, None)
        .iter()
        .map(|e| e.entry_id)
        .collect();
    assert_eq!(waiting, vec![other, readded]);
}

#[test]
fn test_promote_consumes_exactly_one_seat() {
    let ledger = ledger_with(&[plain_session(1, 2, 0)]);
    let mut book = WaitlistBook::new();
    let mut metrics = WaitlistMetrics::new();
    let entry_id = added(book.add(1, None, 900, Some(100), 1_000, &mut metrics));

    match book.promote(entry_id, &ledger, &mut metrics) {
        PromoteResult::Promoted {
            entry_id: promoted,
            session_assigned,
            role_assigned,
        } => {
            assert_eq!(promoted, entry_id);
            assert_eq!(session_assigned, 1);
            assert_eq!(role_assigned, None);
        }
        other => panic!("expected promotion, got {other:?}"),
    }
    assert_eq!(
        book.get(entry_id).map(|e| e.status),
        Some(WaitlistStatus::Promoted)
    );
    assert_eq!(metrics.promote_success_total(), 1);

    let snapshot = ledger.availability(1).expect("session exists");
    assert_eq!(snapshot.session_available, 1);
}

#[test]
fn test_promote_full_session_leaves_entry_waiting() {
    let ledger = ledger_with(&[plain_session(1, 1, 0)]);
    ledger.reserve(1, None, 1);

    let mut book = WaitlistBook::new();
    let mut metrics = WaitlistMetrics::new();
    let entry_id = added(book.add(1, None, 900, Some(100), 1_000, &mut metrics));

    match book.promote(entry_id, &ledger, &mut metrics) {
        PromoteResult::SeatUnavailable {
            reason: SeatRejectReason::SessionCapacityExceeded,
        } => {}
        other => panic!("expected SeatUnavailable, got {other:?}"),
    }
    assert_eq!(
        book.get(entry_id).map(|e| e.status),
        Some(WaitlistStatus::Waiting),
        "failed promotion must leave the entry Waiting"
    );
    assert_eq!(metrics.promote_reject_total(), 1);
}

#[test]
fn test_promote_role_entry_takes_role_seat() {
    let ledger = ledger_with(&[role_session(1, 5, 0, &[(7, 1)])]);
    let mut book = WaitlistBook::new();
    let mut metrics = WaitlistMetrics::new();
    let entry_id = added(book.add(1, Some(7), 900, Some(100), 1_000, &mut metrics));

    match book.promote(entry_id, &ledger, &mut metrics) {
        PromoteResult::Promoted {
            role_assigned: Some(1),
            ..
        } => {}
        other => panic!("expected role promotion, got {other:?}"),
    }

    // Role is now full; a second role entry cannot be promoted.
    let second = added(book.add(1, Some(7), 901, Some(101), 2_000, &mut metrics));
    match book.promote(second, &ledger, &mut metrics) {
        PromoteResult::SeatUnavailable {
            reason: SeatRejectReason::RoleCapacityExceeded,
        } => {}
        other => panic!("expected RoleCapacityExceeded, got {other:?}"),
    }
}

#[test]
fn test_promote_terminal_entry_rejected() {
    let ledger = ledger_with(&[plain_session(1, 5, 0)]);
    let mut book = WaitlistBook::new();
    let mut metrics = WaitlistMetrics::new();
    let entry_id = added(book.add(1, None, 900, None, 1_000, &mut metrics));
    book.promote(entry_id, &ledger, &mut metrics);

    match book.promote(entry_id, &ledger, &mut metrics) {
        PromoteResult::InvalidState {
            status: WaitlistStatus::Promoted,
        } => {}
        other => panic!("expected InvalidState, got {other:?}"),
    }

    // Exactly one seat was consumed.
    let snapshot = ledger.availability(1).expect("session exists");
    assert_eq!(snapshot.session_available, 4);
}

#[test]
fn test_promote_unknown_entry() {
    let ledger = ledger_with(&[plain_session(1, 5, 0)]);
    let mut book = WaitlistBook::new();
    let mut metrics = WaitlistMetrics::new();
    match book.promote(42, &ledger, &mut metrics) {
        PromoteResult::NotFound => {}
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_waiting_for_seat_matches_role_axis() {
    let mut book = WaitlistBook::new();
    let mut metrics = WaitlistMetrics::new();

    let roleless = added(book.add(1, None, 900, None, 1_000, &mut metrics));
    let role_a = added(book.add(1, Some(7), 901, None, 1_000, &mut metrics));
    let role_b = added(book.add(1, Some(8), 902, None, 1_000, &mut metrics));

    let for_roleless: Vec<u64> = book
        .waiting_for_seat(1, None)
        .iter()
        .map(|e| e.entry_id)
        .collect();
    assert_eq!(for_roleless, vec![roleless]);

    let for_role_a: Vec<u64> = book
        .waiting_for_seat(1, Some(7))
        .iter()
        .map(|e| e.entry_id)
        .collect();
    assert_eq!(for_role_a, vec![role_a]);

    assert_eq!(book.waiting_for_seat(2, Some(8)).len(), 0);
    let _ = role_b;
}
