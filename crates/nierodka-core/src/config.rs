//! Economy tuning constants.
//!
//! [`EconomyConfig::default`] reproduces the live game exactly. Every field
//! is overridable from JSON; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, EconomyResult};

/// Configuration for an [`Economy`](crate::Economy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Geometric cost ratio per upgrade level.
    pub cost_growth: f64,
    /// Minimum points to prestige.
    pub prestige_threshold: u64,
    /// Global multiplier added per prestige level.
    pub prestige_bonus_per_level: f64,
    /// Crash probability when an overclock expires, before RAM reduction.
    pub crash_base_risk: f64,
    /// Seconds a crash lasts.
    pub crash_duration_secs: u32,
    /// Overclock length before cooling bonuses.
    pub overclock_base_secs: u32,
    /// Overclock multiplier when no power supply is installed.
    pub default_overclock_multiplier: f64,
    /// Full coffee mug.
    pub coffee_max: f64,
    /// Coffee lost per running tick once caffeine research is unlocked.
    pub coffee_decay_per_tick: f64,
    /// Buff window after drinking.
    pub coffee_buff_ms: u64,
    /// Buff window with the bigger mug.
    pub coffee_buff_ms_bigger_mug: u64,
    /// Buff multiplier.
    pub coffee_buff_multiplier: f64,
    /// Buff multiplier with the stronger brew.
    pub coffee_buff_multiplier_stronger: f64,
    /// Penalty with an empty mug.
    pub coffee_debuff_multiplier: f64,
    /// Critical click multiplier before CPU bonuses.
    pub crit_base_multiplier: f64,
    /// Surprise inspection tuning.
    pub inspection: InspectionConfig,
    /// Enforce research gates on hardware, coffee and overclock.
    pub enforce_unlock_gates: bool,
    /// Events kept before the oldest are dropped.
    pub event_log_capacity: usize,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            cost_growth: 1.5,
            prestige_threshold: 1_000_000_000,
            prestige_bonus_per_level: 0.1,
            crash_base_risk: 0.30,
            crash_duration_secs: 10,
            overclock_base_secs: 30,
            default_overclock_multiplier: 2.0,
            coffee_max: 100.0,
            coffee_decay_per_tick: 1.6,
            coffee_buff_ms: 5_000,
            coffee_buff_ms_bigger_mug: 7_500,
            coffee_buff_multiplier: 1.5,
            coffee_buff_multiplier_stronger: 2.0,
            coffee_debuff_multiplier: 0.5,
            crit_base_multiplier: 2.0,
            inspection: InspectionConfig::default(),
            enforce_unlock_gates: true,
            event_log_capacity: 256,
        }
    }
}

impl EconomyConfig {
    /// Default constants with research gates switched off.
    #[must_use]
    pub fn ungated() -> Self {
        Self {
            enforce_unlock_gates: false,
            ..Default::default()
        }
    }

    /// Check that the constants describe a playable economy.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::Config`] naming the first bad field.
    pub fn validate(&self) -> EconomyResult<()> {
        let probabilities = [
            ("crash_base_risk", self.crash_base_risk),
            ("inspection.chance", self.inspection.chance),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(EconomyError::Config(format!("{name} must be in [0, 1], got {p}")));
            }
        }
        if self.cost_growth.is_nan() || self.cost_growth < 1.0 {
            return Err(EconomyError::Config(format!(
                "cost_growth must be at least 1, got {}",
                self.cost_growth
            )));
        }
        if self.coffee_max.is_nan() || self.coffee_max <= 0.0 || self.coffee_decay_per_tick < 0.0 {
            return Err(EconomyError::Config("coffee levels must be positive".into()));
        }
        if self.event_log_capacity == 0 {
            return Err(EconomyError::Config("event_log_capacity must be non-zero".into()));
        }
        Ok(())
    }
}

/// Surprise inspection tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectionConfig {
    /// Running ticks between rolls.
    pub interval_ticks: u32,
    /// Chance per roll.
    pub chance: f64,
    /// Ticks an inspection stays claimable.
    pub lifetime_ticks: u32,
    /// Minimum payout.
    pub min_bonus: u64,
    /// Payout in ticks of current passive income.
    pub income_ticks: u64,
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            interval_ticks: 10,
            chance: 0.05,
            lifetime_ticks: 10,
            min_bonus: 1_000,
            income_ticks: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        EconomyConfig::default().validate().unwrap();
        EconomyConfig::ungated().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EconomyConfig =
            serde_json::from_str(r#"{"crash_base_risk": 1.0, "inspection": {"chance": 0.5}}"#)
                .unwrap();
        assert!((config.crash_base_risk - 1.0).abs() < f64::EPSILON);
        assert!((config.inspection.chance - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.inspection.interval_ticks, 10);
        assert_eq!(config.prestige_threshold, 1_000_000_000);
    }

    #[test]
    fn bad_probability_is_rejected() {
        let config = EconomyConfig {
            crash_base_risk: 1.5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("crash_base_risk"));
    }

    #[test]
    fn nan_growth_is_rejected() {
        let config = EconomyConfig {
            cost_growth: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
