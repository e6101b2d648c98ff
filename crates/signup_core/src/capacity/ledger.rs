//! Seat ledger: the authoritative owner of assigned-seat counters.
//!
//! Every seat consumption in the system routes through [`SeatLedger::reserve`];
//! no other component mutates assigned counts. Role and session counters for
//! one session commit together under a single short-held lock, so a
//! reservation either lands on both axes or on neither.
//!
//! The session-level binding constraint is the true bookable capacity
//! (public capacity + hidden buffer). The availability read model clamps to
//! the public capacity, so the buffer is never observable from outside.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use super::session::SessionConfig;

// ─── Reject reasons ─────────────────────────────────────────────────────

/// Typed rejection causes for seat access.
///
/// The capacity variants only occur on reserve; release never rejects for
/// capacity, it clamps at zero instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeatRejectReason {
    /// Referenced session is not registered.
    SessionNotFound,
    /// Session defines roles but no role was supplied.
    MissingRoleSelection,
    /// A role was supplied for a session that defines none.
    NoRolesRequired,
    /// Role id is not part of the session's role set.
    InvalidRoleId,
    /// Role counter would exceed the role capacity.
    RoleCapacityExceeded,
    /// Session counter would exceed the true bookable capacity.
    SessionCapacityExceeded,
}

// ─── Results ────────────────────────────────────────────────────────────

/// Outcome of a reservation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReserveResult {
    Reserved {
        /// Session-level assigned count after the reservation.
        session_assigned: u32,
        /// Role-level assigned count after the reservation, when a role
        /// was targeted.
        role_assigned: Option<u32>,
    },
    Rejected {
        reason: SeatRejectReason,
    },
}

/// Outcome of a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseResult {
    Released {
        session_assigned: u32,
        role_assigned: Option<u32>,
        /// True when part of the release was clamped at zero
        /// (double-release, or count larger than what was assigned).
        clamped: bool,
    },
    Rejected {
        reason: SeatRejectReason,
    },
}

/// Per-role availability row for the public read model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAvailability {
    pub role_id: u32,
    pub capacity: u32,
    pub assigned: u32,
    /// `capacity - assigned`, floored at 0.
    pub available: u32,
}

/// Public availability snapshot for one session.
///
/// `session_available` is computed against the public capacity only; once
/// reservations spill into the hidden buffer it reads 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilitySnapshot {
    pub session_id: u64,
    pub per_role: Vec<RoleAvailability>,
    pub session_available: u32,
}

/// Admin-side occupancy view. Unlike [`AvailabilitySnapshot`] this exposes
/// the raw assigned count and the true bookable capacity, so it must not be
/// forwarded to end users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancySnapshot {
    pub session_id: u64,
    pub assigned: u32,
    pub bookable_capacity: u32,
}

// ─── Registration ───────────────────────────────────────────────────────

/// Configuration-time fault raised while registering a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// Session id already registered.
    DuplicateSession { session_id: u64 },
    /// Role-to-session configuration inconsistency (duplicate role id).
    RoleAssignmentMismatch { session_id: u64, role_id: u32 },
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSession { session_id } => {
                write!(f, "session {session_id} is already registered")
            }
            Self::RoleAssignmentMismatch {
                session_id,
                role_id,
            } => write!(
                f,
                "session {session_id} declares role {role_id} more than once"
            ),
        }
    }
}

impl std::error::Error for RegisterError {}

// ─── Internal counters ──────────────────────────────────────────────────

#[derive(Debug)]
struct RoleSeats {
    capacity: u32,
    assigned: u32,
}

#[derive(Debug)]
struct SessionSeats {
    capacity: u32,
    hidden_buffer: u32,
    session_assigned: u32,
    /// Keyed by role id; empty when the session takes no role selection.
    roles: BTreeMap<u32, RoleSeats>,
}

impl SessionSeats {
    fn bookable_capacity(&self) -> u32 {
        self.capacity.saturating_add(self.hidden_buffer)
    }

    /// Validate a role target against this session's role set.
    fn check_role_target(&self, role_id: Option<u32>) -> Result<(), SeatRejectReason> {
        match role_id {
            None if !self.roles.is_empty() => Err(SeatRejectReason::MissingRoleSelection),
            Some(_) if self.roles.is_empty() => Err(SeatRejectReason::NoRolesRequired),
            Some(rid) if !self.roles.contains_key(&rid) => Err(SeatRejectReason::InvalidRoleId),
            _ => Ok(()),
        }
    }
}

// ─── Ledger ─────────────────────────────────────────────────────────────

/// The one mutable shared resource of the engine.
///
/// The session map sits behind an `RwLock` so reservations on different
/// sessions do not contend; each session's counters sit behind their own
/// `Mutex`, held only for the validate-check-increment step.
#[derive(Debug, Default)]
pub struct SeatLedger {
    sessions: RwLock<HashMap<u64, Arc<Mutex<SessionSeats>>>>,
    reserve_attempt_total: AtomicU64,
    reserve_reject_total: AtomicU64,
    release_total: AtomicU64,
    release_clamped_total: AtomicU64,
}

impl SeatLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session's seat configuration.
    pub fn register_session(&self, config: &SessionConfig) -> Result<(), RegisterError> {
        let mut roles = BTreeMap::new();
        for role in &config.roles {
            let duplicate = roles
                .insert(
                    role.role_id,
                    RoleSeats {
                        capacity: role.capacity,
                        assigned: 0,
                    },
                )
                .is_some();
            if duplicate {
                return Err(RegisterError::RoleAssignmentMismatch {
                    session_id: config.session_id,
                    role_id: role.role_id,
                });
            }
        }

        let seats = SessionSeats {
            capacity: config.capacity,
            hidden_buffer: config.hidden_buffer,
            session_assigned: 0,
            roles,
        };

        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        if sessions.contains_key(&config.session_id) {
            return Err(RegisterError::DuplicateSession {
                session_id: config.session_id,
            });
        }
        sessions.insert(config.session_id, Arc::new(Mutex::new(seats)));
        Ok(())
    }

    /// Public availability for one session. Never exposes the hidden buffer.
    pub fn availability(&self, session_id: u64) -> Result<AvailabilitySnapshot, SeatRejectReason> {
        let seats = self
            .session_seats(session_id)
            .ok_or(SeatRejectReason::SessionNotFound)?;
        let seats = seats.lock().unwrap_or_else(|e| e.into_inner());

        let per_role = seats
            .roles
            .iter()
            .map(|(&role_id, role)| RoleAvailability {
                role_id,
                capacity: role.capacity,
                assigned: role.assigned,
                available: role.capacity.saturating_sub(role.assigned),
            })
            .collect();

        Ok(AvailabilitySnapshot {
            session_id,
            per_role,
            session_available: seats.capacity.saturating_sub(seats.session_assigned),
        })
    }

    /// Admin occupancy view (raw assigned count vs. true bookable capacity).
    pub fn occupancy(&self, session_id: u64) -> Result<OccupancySnapshot, SeatRejectReason> {
        let seats = self
            .session_seats(session_id)
            .ok_or(SeatRejectReason::SessionNotFound)?;
        let seats = seats.lock().unwrap_or_else(|e| e.into_inner());
        Ok(OccupancySnapshot {
            session_id,
            assigned: seats.session_assigned,
            bookable_capacity: seats.bookable_capacity(),
        })
    }

    /// Atomically reserve `count` seats on a session, and on a role within
    /// it when `role_id` is given.
    ///
    /// Both counters are checked before either is incremented; concurrent
    /// callers racing for the last seat observe a consistent assigned value
    /// and exactly one of them wins.
    pub fn reserve(&self, session_id: u64, role_id: Option<u32>, count: u32) -> ReserveResult {
        self.reserve_attempt_total.fetch_add(1, Ordering::Relaxed);

        let Some(seats) = self.session_seats(session_id) else {
            return self.reject_reserve(session_id, role_id, SeatRejectReason::SessionNotFound);
        };
        let mut seats = seats.lock().unwrap_or_else(|e| e.into_inner());

        if let Err(reason) = seats.check_role_target(role_id) {
            return self.reject_reserve(session_id, role_id, reason);
        }

        // Check both axes before touching either counter.
        let role_next = match role_id.and_then(|rid| seats.roles.get(&rid).map(|r| (rid, r))) {
            Some((rid, role)) => match role.assigned.checked_add(count) {
                Some(next) if next <= role.capacity => Some((rid, next)),
                _ => {
                    return self.reject_reserve(
                        session_id,
                        role_id,
                        SeatRejectReason::RoleCapacityExceeded,
                    );
                }
            },
            None => None,
        };
        let session_next = match seats.session_assigned.checked_add(count) {
            Some(next) if next <= seats.bookable_capacity() => next,
            _ => {
                return self.reject_reserve(
                    session_id,
                    role_id,
                    SeatRejectReason::SessionCapacityExceeded,
                );
            }
        };

        let mut role_assigned = None;
        if let Some((rid, next)) = role_next {
            if let Some(role) = seats.roles.get_mut(&rid) {
                role.assigned = next;
                role_assigned = Some(next);
            }
        }
        seats.session_assigned = session_next;

        ReserveResult::Reserved {
            session_assigned: seats.session_assigned,
            role_assigned,
        }
    }

    /// Release `count` seats, floored at zero on both axes.
    ///
    /// Double-release must not drive counters negative; a clamped release
    /// is reported and counted but is not an error.
    pub fn release(&self, session_id: u64, role_id: Option<u32>, count: u32) -> ReleaseResult {
        let Some(seats) = self.session_seats(session_id) else {
            return self.reject_release(session_id, role_id, SeatRejectReason::SessionNotFound);
        };
        let mut seats = seats.lock().unwrap_or_else(|e| e.into_inner());

        if let Err(reason) = seats.check_role_target(role_id) {
            return self.reject_release(session_id, role_id, reason);
        }

        let mut clamped = false;
        let mut role_assigned = None;
        if let Some(rid) = role_id {
            if let Some(role) = seats.roles.get_mut(&rid) {
                if role.assigned < count {
                    clamped = true;
                }
                role.assigned = role.assigned.saturating_sub(count);
                role_assigned = Some(role.assigned);
            }
        }
        if seats.session_assigned < count {
            clamped = true;
        }
        seats.session_assigned = seats.session_assigned.saturating_sub(count);

        self.release_total.fetch_add(1, Ordering::Relaxed);
        if clamped {
            self.release_clamped_total.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                "SeatReleaseClamped session_id={} role_id={:?} count={}",
                session_id,
                role_id,
                count
            );
        }

        ReleaseResult::Released {
            session_assigned: seats.session_assigned,
            role_assigned,
            clamped,
        }
    }

    // ─── Observability counters ─────────────────────────────────────

    pub fn reserve_attempt_total(&self) -> u64 {
        self.reserve_attempt_total.load(Ordering::Relaxed)
    }

    pub fn reserve_reject_total(&self) -> u64 {
        self.reserve_reject_total.load(Ordering::Relaxed)
    }

    pub fn release_total(&self) -> u64 {
        self.release_total.load(Ordering::Relaxed)
    }

    pub fn release_clamped_total(&self) -> u64 {
        self.release_clamped_total.load(Ordering::Relaxed)
    }

    // ─── Internal ───────────────────────────────────────────────────

    fn session_seats(&self, session_id: u64) -> Option<Arc<Mutex<SessionSeats>>> {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions.get(&session_id).cloned()
    }

    fn reject_reserve(
        &self,
        session_id: u64,
        role_id: Option<u32>,
        reason: SeatRejectReason,
    ) -> ReserveResult {
        self.reserve_reject_total.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            "SeatReserveReject session_id={} role_id={:?} reason={:?}",
            session_id,
            role_id,
            reason
        );
        ReserveResult::Rejected { reason }
    }

    fn reject_release(
        &self,
        session_id: u64,
        role_id: Option<u32>,
        reason: SeatRejectReason,
    ) -> ReleaseResult {
        tracing::debug!(
            "SeatReleaseReject session_id={} role_id={:?} reason={:?}",
            session_id,
            role_id,
            reason
        );
        ReleaseResult::Rejected { reason }
    }
}
