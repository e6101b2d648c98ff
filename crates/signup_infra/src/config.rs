//! Operational configuration defaults with fail-closed resolution.
//!
//! Every tunable the engine's surrounding services read has a named
//! parameter here. A missing value falls back to the built-in default; a
//! parameter that has neither, or whose explicit value is non-finite or
//! negative, resolves to an error instead of a guess.

use std::fmt;

/// Operational parameters for the registration engine's host services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigParam {
    /// Maximum events the booking journal accepts before failing closed.
    JournalCapacity,
    /// Maximum promotion attempts in one freed-seat sweep.
    PromotionBatchMax,
    /// Soft time budget for one sweep, in milliseconds.
    PromotionSweepBudgetMs,
    /// Maximum waitlist entries returned per listing page.
    WaitlistPageMax,
    /// Maximum items accepted in one cart at the validation boundary.
    CartItemsMax,
    /// Maximum accepted item price (minor units) at the validation boundary.
    PriceMinorUnitsMax,
}

/// Error when a required parameter cannot be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingConfigError {
    pub param_name: &'static str,
    pub reason: &'static str,
}

impl fmt::Display for MissingConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "config fail-closed: '{}' could not be resolved ({})",
            self.param_name, self.reason
        )
    }
}

impl std::error::Error for MissingConfigError {}

/// Built-in default for a parameter, or `None` if it must be provided.
pub fn builtin_default(param: ConfigParam) -> Option<f64> {
    match param {
        ConfigParam::JournalCapacity => Some(10_000.0),
        ConfigParam::PromotionBatchMax => Some(50.0),
        ConfigParam::PromotionSweepBudgetMs => Some(200.0),
        ConfigParam::WaitlistPageMax => Some(100.0),
        ConfigParam::CartItemsMax => Some(20.0),
        ConfigParam::PriceMinorUnitsMax => Some(1_000_000.0),
    }
}

/// Snake_case name for a parameter (matches the deployment config keys).
pub fn param_name(param: ConfigParam) -> &'static str {
    match param {
        ConfigParam::JournalCapacity => "journal_capacity",
        ConfigParam::PromotionBatchMax => "promotion_batch_max",
        ConfigParam::PromotionSweepBudgetMs => "promotion_sweep_budget_ms",
        ConfigParam::WaitlistPageMax => "waitlist_page_max",
        ConfigParam::CartItemsMax => "cart_items_max",
        ConfigParam::PriceMinorUnitsMax => "price_minor_units_max",
    }
}

/// Expected number of ConfigParam variants. Update when adding variants.
pub const EXPECTED_PARAM_COUNT: usize = 6;

/// All known `ConfigParam` variants, for exhaustive iteration in tests.
pub const ALL_PARAMS: &[ConfigParam] = &[
    ConfigParam::JournalCapacity,
    ConfigParam::PromotionBatchMax,
    ConfigParam::PromotionSweepBudgetMs,
    ConfigParam::WaitlistPageMax,
    ConfigParam::CartItemsMax,
    ConfigParam::PriceMinorUnitsMax,
];

/// Resolve a configuration value.
///
/// - An explicit value wins, but non-finite or negative values fail.
/// - A missing value falls back to the built-in default.
/// - No value and no default is an error.
pub fn resolve_config_value(
    param: ConfigParam,
    value: Option<f64>,
) -> Result<f64, MissingConfigError> {
    if let Some(v) = value {
        if !v.is_finite() {
            return Err(MissingConfigError {
                param_name: param_name(param),
                reason: "value is non-finite (NaN or Infinity)",
            });
        }
        if v < 0.0 {
            return Err(MissingConfigError {
                param_name: param_name(param),
                reason: "value is negative; all params are non-negative",
            });
        }
        return Ok(v);
    }
    builtin_default(param).ok_or_else(|| MissingConfigError {
        param_name: param_name(param),
        reason: "no built-in default; value must be provided",
    })
}
