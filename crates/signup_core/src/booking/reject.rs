//! Reject code registry for booking and waitlist rejections.
//!
//! The engine reports failures as stable code tokens plus structured
//! parameters; rendering them as user-facing text (in any language) is the
//! presentation layer's job.

use crate::capacity::SeatRejectReason;
use crate::waitlist::{PromoteResult, RemoveResult};

use super::role_gate::RoleGateRejectReason;

/// Stable token for an expected rejection cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectCode {
    InvalidRoleId,
    RoleCapacityExceeded,
    SessionCapacityExceeded,
    MissingRoleSelection,
    RoleAssignmentMismatch,
    SessionNotFound,
    NoRolesRequired,
    WaitlistEntryNotFound,
    WaitlistInvalidState,
}

impl RejectCode {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectCode::InvalidRoleId => "InvalidRoleId",
            RejectCode::RoleCapacityExceeded => "RoleCapacityExceeded",
            RejectCode::SessionCapacityExceeded => "SessionCapacityExceeded",
            RejectCode::MissingRoleSelection => "MissingRoleSelection",
            RejectCode::RoleAssignmentMismatch => "RoleAssignmentMismatch",
            RejectCode::SessionNotFound => "SessionNotFound",
            RejectCode::NoRolesRequired => "NoRolesRequired",
            RejectCode::WaitlistEntryNotFound => "WaitlistEntryNotFound",
            RejectCode::WaitlistInvalidState => "WaitlistInvalidState",
        }
    }
}

const REGISTRY: &[RejectCode] = &[
    RejectCode::InvalidRoleId,
    RejectCode::RoleCapacityExceeded,
    RejectCode::SessionCapacityExceeded,
    RejectCode::MissingRoleSelection,
    RejectCode::RoleAssignmentMismatch,
    RejectCode::SessionNotFound,
    RejectCode::NoRolesRequired,
    RejectCode::WaitlistEntryNotFound,
    RejectCode::WaitlistInvalidState,
];

pub fn reject_code_registry() -> &'static [RejectCode] {
    REGISTRY
}

pub fn reject_code_registry_contains(code: RejectCode) -> bool {
    REGISTRY.contains(&code)
}

/// Map a seat-ledger rejection to its registry token.
pub fn reject_code_from_seat(reason: SeatRejectReason) -> RejectCode {
    match reason {
        SeatRejectReason::SessionNotFound => RejectCode::SessionNotFound,
        SeatRejectReason::MissingRoleSelection => RejectCode::MissingRoleSelection,
        SeatRejectReason::NoRolesRequired => RejectCode::NoRolesRequired,
        SeatRejectReason::InvalidRoleId => RejectCode::InvalidRoleId,
        SeatRejectReason::RoleCapacityExceeded => RejectCode::RoleCapacityExceeded,
        SeatRejectReason::SessionCapacityExceeded => RejectCode::SessionCapacityExceeded,
    }
}

/// Map a role-gate rejection to its registry token.
pub fn reject_code_from_gate(reason: RoleGateRejectReason) -> RejectCode {
    match reason {
        RoleGateRejectReason::MissingRoleSelection => RejectCode::MissingRoleSelection,
        RoleGateRejectReason::NoRolesRequired => RejectCode::NoRolesRequired,
        RoleGateRejectReason::InvalidRoleId => RejectCode::InvalidRoleId,
        RoleGateRejectReason::RoleAssignmentMismatch => RejectCode::RoleAssignmentMismatch,
    }
}

/// Map a failed waitlist removal to its registry token, `None` on success.
pub fn reject_code_from_remove(result: &RemoveResult) -> Option<RejectCode> {
    match result {
        RemoveResult::Removed { .. } => None,
        RemoveResult::NotFound => Some(RejectCode::WaitlistEntryNotFound),
        RemoveResult::InvalidState { .. } => Some(RejectCode::WaitlistInvalidState),
    }
}

/// Map a failed waitlist promotion to its registry token, `None` on success.
pub fn reject_code_from_promote(result: &PromoteResult) -> Option<RejectCode> {
    match result {
        PromoteResult::Promoted { .. } => None,
        PromoteResult::SeatUnavailable { reason } => Some(reject_code_from_seat(*reason)),
        PromoteResult::NotFound => Some(RejectCode::WaitlistEntryNotFound),
        PromoteResult::InvalidState { .. } => Some(RejectCode::WaitlistInvalidState),
    }
}
