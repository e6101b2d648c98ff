//! Cart fingerprint.
//!
//! A cart is digested over its priced fields in a canonical (id-sorted)
//! order, so the digest is stable under item reordering and changes when
//! any priced field changes. Wall-clock values never enter the digest.
//!
//! The confirmation path recomputes this digest and compares it with the
//! one captured at preview time; a mismatch means the cart changed and the
//! client's total cannot be trusted.

use xxhash_rust::xxh64::xxh64;

use super::cart::CartItem;

/// Field separator that cannot appear in UTF-8 payloads, so field
/// boundaries stay unambiguous.
const SEP: u8 = 0xFF;

fn push_opt_id(buf: &mut Vec<u8>, id: Option<u64>) {
    match id {
        Some(v) => {
            buf.push(1);
            buf.extend_from_slice(&v.to_le_bytes());
        }
        None => buf.push(0),
    }
    buf.push(SEP);
}

/// Compute the canonical fingerprint of a cart.
pub fn cart_fingerprint(items: &[CartItem]) -> u64 {
    let mut sorted: Vec<&CartItem> = items.iter().collect();
    sorted.sort_by_key(|i| i.item_id);

    let mut buf = Vec::with_capacity(sorted.len() * 48);
    for item in sorted {
        buf.extend_from_slice(&item.item_id.to_le_bytes());
        buf.push(SEP);
        buf.extend_from_slice(&item.session_id.to_le_bytes());
        buf.push(SEP);
        buf.extend_from_slice(item.kind.as_str().as_bytes());
        buf.push(SEP);
        push_opt_id(&mut buf, item.child_id);
        push_opt_id(&mut buf, item.family_id);
        buf.extend_from_slice(&item.price.to_le_bytes());
        buf.push(SEP);
    }

    xxh64(&buf, 0)
}

/// Format a fingerprint as a fixed-width hex string.
pub fn format_cart_fingerprint(hash: u64) -> String {
    format!("{hash:016x}")
}
