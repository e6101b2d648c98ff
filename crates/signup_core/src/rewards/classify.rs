//! Session-kind classification from price and age range.
//!
//! The rules are exact literal matches against the three known catalog
//! entries, and anything else falls back to the family bucket. The
//! literals and the fallback are load-bearing for the current catalog;
//! changing either needs product sign-off, so they are tested as-is
//! rather than generalized.

/// Session kind used to pick a reward threshold list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    LittleKids,
    BigKids,
    Family,
}

impl SessionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::LittleKids => "little-kids",
            SessionKind::BigKids => "big-kids",
            SessionKind::Family => "family",
        }
    }
}

/// Catalog price of a family session, in minor currency units.
pub const FAMILY_SESSION_PRICE: i64 = 5500;
/// Catalog price of a little-kids session.
pub const LITTLE_KIDS_SESSION_PRICE: i64 = 2800;
/// Catalog age range of a little-kids session.
pub const LITTLE_KIDS_AGE_RANGE: (u8, u8) = (5, 7);
/// Catalog price of a big-kids session.
pub const BIG_KIDS_SESSION_PRICE: i64 = 3600;
/// Catalog age range of a big-kids session.
pub const BIG_KIDS_AGE_RANGE: (u8, u8) = (8, 13);

/// Classify a session from its catalog price and age range.
pub fn classify_session_kind(
    price: i64,
    age_min: Option<u8>,
    age_max: Option<u8>,
) -> SessionKind {
    if price == FAMILY_SESSION_PRICE {
        return SessionKind::Family;
    }
    if price == LITTLE_KIDS_SESSION_PRICE
        && age_min == Some(LITTLE_KIDS_AGE_RANGE.0)
        && age_max == Some(LITTLE_KIDS_AGE_RANGE.1)
    {
        return SessionKind::LittleKids;
    }
    if price == BIG_KIDS_SESSION_PRICE
        && age_min == Some(BIG_KIDS_AGE_RANGE.0)
        && age_max == Some(BIG_KIDS_AGE_RANGE.1)
    {
        return SessionKind::BigKids;
    }
    // Unknown price/age combinations land in the family bucket.
    SessionKind::Family
}
