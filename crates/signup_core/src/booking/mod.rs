//! Booking surface: reject-code registry, role-selection gate, and the
//! order aggregate.

pub mod order;
pub mod reject;
pub mod role_gate;

pub use order::{
    CancelRejectReason, CancelResult, ConfirmRejectReason, ConfirmResult, Order, OrderStatus,
    SeatRequest, cancel_order, confirm_order,
};
pub use reject::{
    RejectCode, reject_code_from_gate, reject_code_from_promote, reject_code_from_remove,
    reject_code_from_seat, reject_code_registry, reject_code_registry_contains,
};
pub use role_gate::{
    RoleGateMetrics, RoleGateRejectReason, RoleGateResult, RoleSelection, validate_role_selection,
};
