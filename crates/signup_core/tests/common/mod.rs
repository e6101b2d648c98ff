//! Shared helpers for signup_core integration tests.
#![allow(dead_code)]

use signup_core::capacity::{RoleConfig, SeatLedger, SessionConfig};
use signup_core::pricing::{CartItem, CartItemKind};

/// Session without roles.
pub fn plain_session(session_id: u64, capacity: u32, hidden_buffer: u32) -> SessionConfig {
    SessionConfig {
        session_id,
        capacity,
        hidden_buffer,
        price: 3600,
        age_min: Some(8),
        age_max: Some(13),
        roles: Vec::new(),
    }
}

/// Session with roles given as `(role_id, capacity)` pairs.
pub fn role_session(
    session_id: u64,
    capacity: u32,
    hidden_buffer: u32,
    roles: &[(u32, u32)],
) -> SessionConfig {
    SessionConfig {
        session_id,
        capacity,
        hidden_buffer,
        price: 2800,
        age_min: Some(5),
        age_max: Some(7),
        roles: roles
            .iter()
            .map(|&(role_id, capacity)| RoleConfig { role_id, capacity })
            .collect(),
    }
}

/// Ledger preloaded with the given sessions.
pub fn ledger_with(configs: &[SessionConfig]) -> SeatLedger {
    let ledger = SeatLedger::new();
    for config in configs {
        ledger
            .register_session(config)
            .expect("test session registers cleanly");
    }
    ledger
}

pub fn individual_item(item_id: u64, session_id: u64, child_id: u64, price: i64) -> CartItem {
    CartItem {
        item_id,
        session_id,
        kind: CartItemKind::Individual,
        child_id: Some(child_id),
        family_id: None,
        price,
    }
}

pub fn family_item(item_id: u64, session_id: u64, family_id: u64, price: i64) -> CartItem {
    CartItem {
        item_id,
        session_id,
        kind: CartItemKind::Family,
        child_id: None,
        family_id: Some(family_id),
        price,
    }
}

pub fn addon_item(item_id: u64, session_id: u64, price: i64) -> CartItem {
    CartItem {
        item_id,
        session_id,
        kind: CartItemKind::Addon,
        child_id: None,
        family_id: None,
        price,
    }
}
