//! Order aggregate: pricing at confirmation time and seat ownership.
//!
//! An order is priced from its cart alone; a client-supplied total is never
//! trusted. Confirmation reserves one seat per non-addon item through the
//! ledger and rolls back every seat it already took if any reservation is
//! rejected, so a partially reserved order can never escape.

use crate::capacity::{ReserveResult, SeatLedger, SeatRejectReason};
use crate::pricing::{CartItem, DiscountBreakdown, calculate_discount, cart_fingerprint};

// ─── Order model ────────────────────────────────────────────────────────

/// Order lifecycle. `Cancelled` is terminal; `Confirmed` orders own their
/// seat reservations until cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// A pending or confirmed aggregate of cart items.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: u64,
    pub parent_id: u64,
    pub items: Vec<CartItem>,
    pub status: OrderStatus,
    /// Pricing captured at confirmation. Absent while pending.
    pub pricing: Option<DiscountBreakdown>,
    /// Cart fingerprint captured at confirmation.
    pub fingerprint: Option<u64>,
}

impl Order {
    pub fn new(order_id: u64, parent_id: u64, items: Vec<CartItem>) -> Self {
        Self {
            order_id,
            parent_id,
            items,
            status: OrderStatus::Pending,
            pricing: None,
            fingerprint: None,
        }
    }
}

/// One seat to consume for an order item. Addon items carry no seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatRequest {
    pub item_id: u64,
    pub session_id: u64,
    pub role_id: Option<u32>,
}

// ─── Confirmation ───────────────────────────────────────────────────────

/// Reject reason from order confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmRejectReason {
    /// Order is not pending.
    InvalidStatus { status: OrderStatus },
    /// The cart changed since the client previewed it.
    CartChanged { expected: u64, actual: u64 },
    /// A seat request does not match a seat-consuming item of this order.
    SeatItemMismatch { item_id: u64 },
    /// The ledger rejected one of the order's seats. Every seat reserved
    /// before the rejection has been released again.
    SeatRejected {
        item_id: u64,
        reason: SeatRejectReason,
    },
}

/// Result of order confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmResult {
    Confirmed {
        /// Repriced final total in minor currency units.
        final_total: i64,
        fingerprint: u64,
    },
    Rejected {
        reason: ConfirmRejectReason,
    },
}

/// Confirm a pending order: reprice, verify the previewed cart is
/// unchanged, and reserve every seat or none.
///
/// `previewed_fingerprint` is the digest captured when the client last saw
/// the cart; pass `None` to skip the staleness check (admin path).
pub fn confirm_order(
    order: &mut Order,
    seats: &[SeatRequest],
    ledger: &SeatLedger,
    previewed_fingerprint: Option<u64>,
) -> ConfirmResult {
    if order.status != OrderStatus::Pending {
        return ConfirmResult::Rejected {
            reason: ConfirmRejectReason::InvalidStatus {
                status: order.status,
            },
        };
    }

    for seat in seats {
        let matches_item = order
            .items
            .iter()
            .any(|i| i.item_id == seat.item_id && i.session_id == seat.session_id && !i.is_addon());
        if !matches_item {
            return ConfirmResult::Rejected {
                reason: ConfirmRejectReason::SeatItemMismatch {
                    item_id: seat.item_id,
                },
            };
        }
    }

    // Reprice from the cart itself, never from a client-supplied total.
    let breakdown = calculate_discount(&order.items);
    let fingerprint = cart_fingerprint(&order.items);
    if let Some(expected) = previewed_fingerprint {
        if expected != fingerprint {
            return ConfirmResult::Rejected {
                reason: ConfirmRejectReason::CartChanged {
                    expected,
                    actual: fingerprint,
                },
            };
        }
    }

    let mut reserved: Vec<&SeatRequest> = Vec::with_capacity(seats.len());
    for seat in seats {
        match ledger.reserve(seat.session_id, seat.role_id, 1) {
            ReserveResult::Reserved { .. } => reserved.push(seat),
            ReserveResult::Rejected { reason } => {
                // Roll back: no partial reservation may escape.
                for taken in &reserved {
                    ledger.release(taken.session_id, taken.role_id, 1);
                }
                return ConfirmResult::Rejected {
                    reason: ConfirmRejectReason::SeatRejected {
                        item_id: seat.item_id,
                        reason,
                    },
                };
            }
        }
    }

    let final_total = breakdown.final_total;
    order.pricing = Some(breakdown);
    order.fingerprint = Some(fingerprint);
    order.status = OrderStatus::Confirmed;
    ConfirmResult::Confirmed {
        final_total,
        fingerprint,
    }
}

// ─── Cancellation ───────────────────────────────────────────────────────

/// Reject reason from order cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelRejectReason {
    /// Only confirmed orders hold seats to release.
    InvalidStatus { status: OrderStatus },
}

/// Result of order cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelResult {
    Cancelled {
        seats_released: usize,
    },
    Rejected {
        reason: CancelRejectReason,
    },
}

/// Cancel a confirmed order and release every seat it held.
pub fn cancel_order(order: &mut Order, seats: &[SeatRequest], ledger: &SeatLedger) -> CancelResult {
    if order.status != OrderStatus::Confirmed {
        return CancelResult::Rejected {
            reason: CancelRejectReason::InvalidStatus {
                status: order.status,
            },
        };
    }

    for seat in seats {
        ledger.release(seat.session_id, seat.role_id, 1);
    }
    order.status = OrderStatus::Cancelled;
    CancelResult::Cancelled {
        seats_released: seats.len(),
    }
}
