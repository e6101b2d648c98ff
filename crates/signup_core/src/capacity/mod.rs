//! Seat capacity: session/role configuration and the assigned-seat ledger.

pub mod ledger;
pub mod session;

pub use ledger::{
    AvailabilitySnapshot, OccupancySnapshot, RegisterError, ReleaseResult, ReserveResult,
    RoleAvailability, SeatLedger, SeatRejectReason,
};
pub use session::{RoleConfig, SessionConfig};
