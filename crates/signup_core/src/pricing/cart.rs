//! Cart items as priced into one order snapshot.

/// What a cart line sells. Addons ride along with a registration and never
/// consume a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartItemKind {
    /// One ticket for one child.
    Individual,
    /// One family session booking.
    Family,
    /// Merchandise or other extras.
    Addon,
}

impl CartItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CartItemKind::Individual => "individual",
            CartItemKind::Family => "family",
            CartItemKind::Addon => "addon",
        }
    }
}

/// One priced cart line. Immutable once priced; a cart belongs to exactly
/// one in-flight order snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub item_id: u64,
    pub session_id: u64,
    pub kind: CartItemKind,
    /// Set on individual tickets.
    pub child_id: Option<u64>,
    /// Set on family session bookings.
    pub family_id: Option<u64>,
    /// Price in integer minor currency units.
    pub price: i64,
}

impl CartItem {
    pub fn is_addon(&self) -> bool {
        self.kind == CartItemKind::Addon
    }
}
