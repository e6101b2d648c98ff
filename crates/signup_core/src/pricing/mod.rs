//! Cart model, tiered multi-item discounts, and the cart fingerprint.

pub mod cart;
pub mod discount;
pub mod fingerprint;

pub use cart::{CartItem, CartItemKind};
pub use discount::{
    CartAxes, DiscountBreakdown, DiscountTier, ItemDiscount, calculate_discount, cart_axes,
};
pub use fingerprint::{cart_fingerprint, format_cart_fingerprint};
