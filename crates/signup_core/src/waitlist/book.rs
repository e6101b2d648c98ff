//! Waitlist book: ordered store of entries and the promotion protocol.
//!
//! The book never mutates seat counts itself: promotion routes the one
//! seat it consumes through [`SeatLedger::reserve`], and a rejected
//! reservation leaves the entry `Waiting` with the ledger's reject reason
//! returned untouched.
//!
//! Promotion is explicit by entry id. Selecting which Waiting entry to
//! promote for a freed seat (lowest seq first) is the caller's contract;
//! the book only supplies the ordered view via [`WaitlistBook::waiting_for_seat`].

use std::collections::BTreeMap;

use crate::capacity::{ReserveResult, SeatLedger, SeatRejectReason};

use super::entry::{WaitlistEntry, WaitlistStatus};

// ─── Results ────────────────────────────────────────────────────────────

/// Outcome of adding an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddResult {
    Added { entry_id: u64, seq: u64 },
    /// Sequence counter exhausted; fail closed rather than reuse order.
    Rejected,
}

/// Outcome of removing an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveResult {
    Removed { entry_id: u64 },
    NotFound,
    /// Entry is already terminal; promotion is irreversible through this
    /// path.
    InvalidState { status: WaitlistStatus },
}

/// Outcome of promoting an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromoteResult {
    Promoted {
        entry_id: u64,
        session_assigned: u32,
        role_assigned: Option<u32>,
    },
    /// The ledger rejected the seat; the entry stays `Waiting`.
    SeatUnavailable { reason: SeatRejectReason },
    NotFound,
    InvalidState { status: WaitlistStatus },
}

// ─── Metrics ────────────────────────────────────────────────────────────

/// Observability counters for the waitlist book.
#[derive(Debug, Default)]
pub struct WaitlistMetrics {
    add_total: u64,
    remove_total: u64,
    promote_attempt_total: u64,
    promote_success_total: u64,
    promote_reject_total: u64,
}

impl WaitlistMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_total(&self) -> u64 {
        self.add_total
    }

    pub fn remove_total(&self) -> u64 {
        self.remove_total
    }

    pub fn promote_attempt_total(&self) -> u64 {
        self.promote_attempt_total
    }

    pub fn promote_success_total(&self) -> u64 {
        self.promote_success_total
    }

    pub fn promote_reject_total(&self) -> u64 {
        self.promote_reject_total
    }

    fn record_add(&mut self) {
        self.add_total += 1;
    }

    fn record_remove(&mut self) {
        self.remove_total += 1;
    }

    fn record_promote_success(&mut self) {
        self.promote_attempt_total += 1;
        self.promote_success_total += 1;
    }

    fn record_promote_reject(&mut self) {
        self.promote_attempt_total += 1;
        self.promote_reject_total += 1;
    }
}

// ─── Book ───────────────────────────────────────────────────────────────

/// Ordered waitlist store keyed by entry id.
#[derive(Debug)]
pub struct WaitlistBook {
    next_entry_id: u64,
    next_seq: u64,
    entries: BTreeMap<u64, WaitlistEntry>,
}

impl WaitlistBook {
    pub fn new() -> Self {
        Self {
            next_entry_id: 1,
            next_seq: 1,
            entries: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, entry_id: u64) -> Option<&WaitlistEntry> {
        self.entries.get(&entry_id)
    }

    /// Append a new Waiting entry. Never touches the seat ledger.
    pub fn add(
        &mut self,
        session_id: u64,
        role_id: Option<u32>,
        parent_id: u64,
        child_id: Option<u64>,
        added_ts_ms: u64,
        metrics: &mut WaitlistMetrics,
    ) -> AddResult {
        let (Some(next_entry_id), Some(next_seq)) = (
            self.next_entry_id.checked_add(1),
            self.next_seq.checked_add(1),
        ) else {
            return AddResult::Rejected;
        };

        let entry_id = self.next_entry_id;
        let seq = self.next_seq;
        self.next_entry_id = next_entry_id;
        self.next_seq = next_seq;

        self.entries.insert(
            entry_id,
            WaitlistEntry {
                entry_id,
                session_id,
                role_id,
                parent_id,
                child_id,
                seq,
                added_ts_ms,
                status: WaitlistStatus::Waiting,
            },
        );
        metrics.record_add();
        AddResult::Added { entry_id, seq }
    }

    /// Cancel a Waiting entry. Terminal states are never revived or
    /// overwritten.
    pub fn remove(&mut self, entry_id: u64, metrics: &mut WaitlistMetrics) -> RemoveResult {
        let Some(entry) = self.entries.get_mut(&entry_id) else {
            return RemoveResult::NotFound;
        };
        if entry.status.is_terminal() {
            return RemoveResult::InvalidState {
                status: entry.status,
            };
        }
        entry.status = WaitlistStatus::Removed;
        metrics.record_remove();
        RemoveResult::Removed { entry_id }
    }

    /// Promote one specific entry, consuming a seat through the ledger.
    ///
    /// On `SeatUnavailable` the entry is left `Waiting` and the caller may
    /// try the next eligible entry.
    pub fn promote(
        &mut self,
        entry_id: u64,
        ledger: &SeatLedger,
        metrics: &mut WaitlistMetrics,
    ) -> PromoteResult {
        let Some(entry) = self.entries.get_mut(&entry_id) else {
            return PromoteResult::NotFound;
        };
        if entry.status.is_terminal() {
            return PromoteResult::InvalidState {
                status: entry.status,
            };
        }

        match ledger.reserve(entry.session_id, entry.role_id, 1) {
            ReserveResult::Reserved {
                session_assigned,
                role_assigned,
            } => {
                entry.status = WaitlistStatus::Promoted;
                metrics.record_promote_success();
                PromoteResult::Promoted {
                    entry_id,
                    session_assigned,
                    role_assigned,
                }
            }
            ReserveResult::Rejected { reason } => {
                metrics.record_promote_reject();
                tracing::debug!(
                    "WaitlistPromoteReject entry_id={} session_id={} reason={:?}",
                    entry_id,
                    entry.session_id,
                    reason
                );
                PromoteResult::SeatUnavailable { reason }
            }
        }
    }

    /// All entries for a session, FIFO (seq ascending).
    pub fn list_for_session(&self, session_id: u64) -> Vec<&WaitlistEntry> {
        let mut entries: Vec<&WaitlistEntry> = self
            .entries
            .values()
            .filter(|e| e.session_id == session_id)
            .collect();
        entries.sort_by_key(|e| e.seq);
        entries
    }

    /// All entries created by a parent, seq ascending.
    pub fn list_for_parent(&self, parent_id: u64) -> Vec<&WaitlistEntry> {
        let mut entries: Vec<&WaitlistEntry> = self
            .entries
            .values()
            .filter(|e| e.parent_id == parent_id)
            .collect();
        entries.sort_by_key(|e| e.seq);
        entries
    }

    /// Waiting entries eligible for a freed seat, seq ascending. The first
    /// element is the one the FIFO contract says to promote first.
    pub fn waiting_for_seat(&self, session_id: u64, role_id: Option<u32>) -> Vec<&WaitlistEntry> {
        let mut entries: Vec<&WaitlistEntry> = self
            .entries
            .values()
            .filter(|e| e.status == WaitlistStatus::Waiting && e.matches_seat(session_id, role_id))
            .collect();
        entries.sort_by_key(|e| e.seq);
        entries
    }
}

impl Default for WaitlistBook {
    fn default() -> Self {
        Self::new()
    }
}
