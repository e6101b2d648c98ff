//! Role-selection gate.
//!
//! Validates a booking's role selection against the session configuration
//! before any seat is reserved. The ledger re-checks the same rules under
//! its lock; this gate exists so a booking request can be rejected with a
//! precise code before the request ever contends for a seat.

use crate::capacity::SessionConfig;

// ─── Gate input ─────────────────────────────────────────────────────────

/// A role selection as submitted with a booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSelection {
    /// Session the selection claims to belong to.
    pub session_id: u64,
    pub role_id: u32,
}

// ─── Gate result ────────────────────────────────────────────────────────

/// Reject reason from the role-selection gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleGateRejectReason {
    /// Session defines roles but no selection was supplied.
    MissingRoleSelection,
    /// A selection was supplied for a session that defines no roles.
    NoRolesRequired,
    /// Selected role is not part of the session's role set.
    InvalidRoleId,
    /// Selection references a different session than the one being booked.
    RoleAssignmentMismatch,
}

/// Result of the role-selection gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleGateResult {
    /// Selection is consistent; `role_id` is the validated target
    /// (`None` for sessions without roles).
    Allowed { role_id: Option<u32> },
    Rejected { reason: RoleGateRejectReason },
}

// ─── Metrics ────────────────────────────────────────────────────────────

/// Observability metrics for the role-selection gate.
#[derive(Debug, Default)]
pub struct RoleGateMetrics {
    allowed_total: u64,
    reject_total: u64,
}

impl RoleGateMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allowed_total(&self) -> u64 {
        self.allowed_total
    }

    pub fn reject_total(&self) -> u64 {
        self.reject_total
    }

    fn record_allowed(&mut self) {
        self.allowed_total += 1;
    }

    fn record_reject(&mut self) {
        self.reject_total += 1;
    }
}

// ─── Gate evaluator ─────────────────────────────────────────────────────

/// Validate a role selection against a session configuration.
pub fn validate_role_selection(
    config: &SessionConfig,
    selection: Option<&RoleSelection>,
    metrics: &mut RoleGateMetrics,
) -> RoleGateResult {
    let rejected = |metrics: &mut RoleGateMetrics, reason| {
        metrics.record_reject();
        tracing::debug!(
            "RoleGateReject session_id={} reason={:?}",
            config.session_id,
            reason
        );
        RoleGateResult::Rejected { reason }
    };

    match selection {
        None => {
            if config.requires_role() {
                return rejected(metrics, RoleGateRejectReason::MissingRoleSelection);
            }
            metrics.record_allowed();
            RoleGateResult::Allowed { role_id: None }
        }
        Some(sel) => {
            if sel.session_id != config.session_id {
                return rejected(metrics, RoleGateRejectReason::RoleAssignmentMismatch);
            }
            if !config.requires_role() {
                return rejected(metrics, RoleGateRejectReason::NoRolesRequired);
            }
            if config.role(sel.role_id).is_none() {
                return rejected(metrics, RoleGateRejectReason::InvalidRoleId);
            }
            metrics.record_allowed();
            RoleGateResult::Allowed {
                role_id: Some(sel.role_id),
            }
        }
    }
}
