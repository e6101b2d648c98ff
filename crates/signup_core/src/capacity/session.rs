//! Session and role seat configuration.
//!
//! A session advertises a public `capacity`; `hidden_buffer` adds
//! administrative overbooking headroom on top of it. The buffer is part of
//! the true bookable capacity but must never surface through the
//! availability read model.

/// Per-role seat configuration. Role ids are unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleConfig {
    pub role_id: u32,
    /// Maximum seats for this character role.
    pub capacity: u32,
}

/// Seat and pricing configuration for one bookable session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub session_id: u64,
    /// Publicly displayed capacity.
    pub capacity: u32,
    /// Extra seats held back from public display.
    pub hidden_buffer: u32,
    /// Ticket price in integer minor currency units.
    pub price: i64,
    pub age_min: Option<u8>,
    pub age_max: Option<u8>,
    /// Character roles in display order. Empty means the session takes no
    /// role selection; non-empty means a role is required on every booking.
    pub roles: Vec<RoleConfig>,
}

impl SessionConfig {
    /// Whether booking this session requires a role selection.
    pub fn requires_role(&self) -> bool {
        !self.roles.is_empty()
    }

    /// Look up a role by id.
    pub fn role(&self, role_id: u32) -> Option<&RoleConfig> {
        self.roles.iter().find(|r| r.role_id == role_id)
    }

    /// True bookable capacity: public capacity plus the hidden buffer.
    pub fn bookable_capacity(&self) -> u32 {
        self.capacity.saturating_add(self.hidden_buffer)
    }
}
