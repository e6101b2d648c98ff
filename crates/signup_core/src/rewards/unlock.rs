//! Reward threshold progress from live registration counts.
//!
//! Thresholds are ordered ascending; a reward is unlocked exactly when the
//! registration count reaches its threshold. Progress toward the next
//! locked reward is reported as a percentage of the span from the previous
//! threshold (or zero), so the display can fill a bar without ever
//! revealing exact remaining seat counts.

use super::classify::SessionKind;

/// One registration-count milestone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardThreshold {
    pub reward_id: String,
    pub threshold: u32,
    /// Config-supplied display label; carried through as data.
    pub label: String,
}

/// Result of a reward unlock computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockedRewards {
    /// Rewards whose threshold is reached, ascending by threshold.
    pub unlocked: Vec<RewardThreshold>,
    /// First not-yet-unlocked reward, if any remain.
    pub next_reward: Option<RewardThreshold>,
    /// Percentage of the way from the previous threshold (or 0) to
    /// `next_reward`, clamped to 0..=100; 100 when everything is unlocked.
    pub progress: u8,
}

/// Compute unlocked rewards and progress for one threshold list.
pub fn calculate_unlocked_rewards(
    current_registrations: u32,
    thresholds: &[RewardThreshold],
) -> UnlockedRewards {
    let mut ordered: Vec<RewardThreshold> = thresholds.to_vec();
    ordered.sort_by_key(|r| r.threshold);

    let split = ordered
        .iter()
        .position(|r| current_registrations < r.threshold)
        .unwrap_or(ordered.len());
    let next_reward = ordered.get(split).cloned();
    let unlocked: Vec<RewardThreshold> = ordered.into_iter().take(split).collect();

    let progress = match &next_reward {
        None => 100,
        Some(next) => {
            let prev = unlocked.last().map(|r| r.threshold).unwrap_or(0);
            let span = next.threshold.saturating_sub(prev);
            if span == 0 {
                100
            } else {
                let gained = current_registrations.saturating_sub(prev);
                ((u64::from(gained) * 100) / u64::from(span)).min(100) as u8
            }
        }
    };

    UnlockedRewards {
        unlocked,
        next_reward,
        progress,
    }
}

// ─── Catalog ────────────────────────────────────────────────────────────

/// Per-kind reward threshold lists. Loaded once at startup, read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardCatalog {
    little_kids: Vec<RewardThreshold>,
    big_kids: Vec<RewardThreshold>,
    family: Vec<RewardThreshold>,
}

impl RewardCatalog {
    /// Build a catalog; each list is sorted ascending by threshold.
    pub fn new(
        little_kids: Vec<RewardThreshold>,
        big_kids: Vec<RewardThreshold>,
        family: Vec<RewardThreshold>,
    ) -> Self {
        let sorted = |mut list: Vec<RewardThreshold>| {
            list.sort_by_key(|r| r.threshold);
            list
        };
        Self {
            little_kids: sorted(little_kids),
            big_kids: sorted(big_kids),
            family: sorted(family),
        }
    }

    /// Threshold list for one session kind, ascending.
    pub fn thresholds(&self, kind: SessionKind) -> &[RewardThreshold] {
        match kind {
            SessionKind::LittleKids => &self.little_kids,
            SessionKind::BigKids => &self.big_kids,
            SessionKind::Family => &self.family,
        }
    }

    /// Unlock computation against the catalog's list for `kind`.
    pub fn unlocked_for(&self, kind: SessionKind, current_registrations: u32) -> UnlockedRewards {
        calculate_unlocked_rewards(current_registrations, self.thresholds(kind))
    }
}
