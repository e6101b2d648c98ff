//! Tiered multi-item discount computation.
//!
//! Tier selection is first-match-wins, most generous first, over three
//! counting axes: total item count, distinct children among individual
//! items, and distinct families among family items. The tier amount is
//! applied uniformly to every item, clamped per item so a discount can
//! never exceed the item's own price.
//!
//! The function is pure: deterministic, order-of-items independent, and
//! recomputed from scratch on every call.

use std::collections::BTreeSet;

use super::cart::{CartItem, CartItemKind};

// ─── Tiers ──────────────────────────────────────────────────────────────

/// Discount bracket, named by its per-item amount in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountTier {
    Tier0,
    Tier300,
    Tier400,
}

impl DiscountTier {
    pub fn as_str(self) -> &'static str {
        match self {
            DiscountTier::Tier0 => "0",
            DiscountTier::Tier300 => "300",
            DiscountTier::Tier400 => "400",
        }
    }

    /// Per-item discount amount before the per-item price clamp.
    pub fn per_item_amount(self) -> i64 {
        match self {
            DiscountTier::Tier0 => 0,
            DiscountTier::Tier300 => 300,
            DiscountTier::Tier400 => 400,
        }
    }
}

// ─── Counting axes ──────────────────────────────────────────────────────

/// The three axes a cart is measured on for tier selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartAxes {
    pub total_items: usize,
    /// Distinct child ids among individual items.
    pub distinct_children: usize,
    /// Distinct family ids among family items.
    pub distinct_families: usize,
}

/// Measure a cart on its tier-selection axes.
pub fn cart_axes(items: &[CartItem]) -> CartAxes {
    let mut children = BTreeSet::new();
    let mut families = BTreeSet::new();
    for item in items {
        match item.kind {
            CartItemKind::Individual => {
                if let Some(child_id) = item.child_id {
                    children.insert(child_id);
                }
            }
            CartItemKind::Family => {
                if let Some(family_id) = item.family_id {
                    families.insert(family_id);
                }
            }
            CartItemKind::Addon => {}
        }
    }
    CartAxes {
        total_items: items.len(),
        distinct_children: children.len(),
        distinct_families: families.len(),
    }
}

fn select_tier(axes: CartAxes) -> DiscountTier {
    if axes.total_items >= 3 || axes.distinct_children >= 3 || axes.distinct_families >= 2 {
        return DiscountTier::Tier400;
    }
    if axes.total_items >= 2 || axes.distinct_children >= 2 || axes.distinct_families >= 1 {
        return DiscountTier::Tier300;
    }
    DiscountTier::Tier0
}

// ─── Breakdown ──────────────────────────────────────────────────────────

/// Discount granted to one cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemDiscount {
    pub item_id: u64,
    /// `min(tier amount, item price)`.
    pub discount: i64,
}

/// Full pricing result for one cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountBreakdown {
    pub original_total: i64,
    pub discount_amount: i64,
    pub final_total: i64,
    pub per_item: Vec<ItemDiscount>,
    pub tier: DiscountTier,
}

/// Compute the tiered discount allocation for one cart.
pub fn calculate_discount(items: &[CartItem]) -> DiscountBreakdown {
    let original_total: i64 = items.iter().map(|i| i.price).sum();
    let tier = select_tier(cart_axes(items));
    let tier_amount = tier.per_item_amount();

    let per_item: Vec<ItemDiscount> = items
        .iter()
        .map(|item| ItemDiscount {
            item_id: item.item_id,
            // Never discount below zero for the line itself.
            discount: tier_amount.min(item.price.max(0)),
        })
        .collect();
    let discount_amount: i64 = per_item.iter().map(|d| d.discount).sum();

    DiscountBreakdown {
        original_total,
        discount_amount,
        final_total: original_total - discount_amount,
        per_item,
        tier,
    }
}
