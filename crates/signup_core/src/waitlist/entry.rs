//! Waitlist entry lifecycle.
//!
//! **States:** `Waiting -> Promoted | Removed`
//!
//! Both outcomes are terminal. A removed entry is never revived; re-adding
//! the same requester creates a new entry with a new sequence number, at
//! the back of the queue.

/// Lifecycle state of a waitlist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitlistStatus {
    /// In the queue, eligible for promotion.
    Waiting,
    /// Promotion consumed a seat. Terminal.
    Promoted,
    /// Cancelled by user or admin. Terminal.
    Removed,
}

impl WaitlistStatus {
    /// Whether this state is terminal (no further transitions permitted).
    pub fn is_terminal(self) -> bool {
        matches!(self, WaitlistStatus::Promoted | WaitlistStatus::Removed)
    }
}

/// One queue position for one requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEntry {
    pub entry_id: u64,
    pub session_id: u64,
    /// Role the requester is waiting for, when the session has roles.
    pub role_id: Option<u32>,
    pub parent_id: u64,
    pub child_id: Option<u64>,
    /// Book-assigned monotonic sequence; defines FIFO promotion order.
    pub seq: u64,
    /// Caller-supplied insertion timestamp (ms), for display only.
    pub added_ts_ms: u64,
    pub status: WaitlistStatus,
}

impl WaitlistEntry {
    /// Whether this entry competes for the given freed seat. Entries
    /// without a role only match a roleless seat, and vice versa.
    pub fn matches_seat(&self, session_id: u64, role_id: Option<u32>) -> bool {
        self.session_id == session_id && self.role_id == role_id
    }
}
