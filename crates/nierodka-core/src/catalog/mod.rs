//! Static catalog: upgrades, hardware tiers, evolutions, research, cosmetics
//! and ranks.
//!
//! The catalog is immutable and every lookup is total over the typed ids in
//! [`ids`]. Hardware and evolution lookups clamp out-of-range tiers to the
//! highest defined entry, so a save carrying a tier the catalog no longer
//! defines still resolves to something sensible.
//!
//! # Example
//!
//! ```
//! use nierodka_core::catalog::{self, HardwareSlot, UpgradeId};
//!
//! let chalk = catalog::upgrade(UpgradeId::Chalk);
//! assert_eq!(chalk.base_cost, 15);
//!
//! // Tier 0 is "nothing installed".
//! assert!(catalog::hardware_tier(HardwareSlot::Mouse, 0).is_none());
//! // Tier 7 does not exist; it clamps to the top mouse.
//! let top = catalog::hardware_tier(HardwareSlot::Mouse, 7).unwrap();
//! assert_eq!(top.id, "mouse_3");
//! ```

pub mod ids;
mod tables;

pub use ids::{HardwareSlot, MusicId, ResearchId, ThemeId, UpgradeId};

use serde::{Deserialize, Serialize};

/// Which derived output an upgrade feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductionKind {
    /// Adds to click power.
    Click,
    /// Adds to passive income per tick.
    Auto,
}

/// Immutable shop upgrade definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeDef {
    /// Identifier.
    pub id: UpgradeId,
    /// Shop tier (1-3), gated by the keyboard slot.
    pub tier: u8,
    /// Display name.
    pub name: &'static str,
    /// Cost of the first level.
    pub base_cost: u64,
    /// Output per level before evolution.
    pub base_effect: u64,
    /// Output this upgrade contributes to.
    pub kind: ProductionKind,
}

/// The single effect a hardware tier carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HardwareEffect {
    /// Flat addition to base click (mouse).
    ClickBonus(u64),
    /// Factor on the global multiplier (monitor).
    GlobalMultiplier(f64),
    /// Highest shop tier unlocked (keyboard).
    UnlockTier(u8),
    /// Probability of a critical click (gpu).
    CritChance(f64),
    /// Addition to the critical multiplier (cpu).
    CritMultiplier(f64),
    /// Subtracted from the overclock crash risk (ram).
    RiskReduction(f64),
    /// Extra overclock seconds (cooling).
    OverclockDuration(u32),
    /// Replaces the default overclock multiplier (power).
    OverclockMultiplier(f64),
}

/// One purchasable tier of a hardware slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HardwareTierDef {
    /// Stable item key.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Purchase cost.
    pub cost: u64,
    /// What installing it does.
    pub effect: HardwareEffect,
}

/// One evolution stage of an upgrade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionDef {
    /// Stage number; stage 0 is the base item.
    pub tier: u32,
    /// Display name.
    pub name: &'static str,
    /// Replaces the multiplier on `level * base_effect`.
    pub multiplier: f64,
    /// Cost to reach this stage. `None` for the base stage.
    pub cost: Option<u64>,
}

/// One-shot research definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResearchDef {
    /// Identifier.
    pub id: ResearchId,
    /// Display name.
    pub name: &'static str,
    /// Unlock cost.
    pub cost: u64,
    /// Research that must already be unlocked.
    pub requires: Option<ResearchId>,
}

/// Purchasable colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeDef {
    /// Identifier.
    pub id: ThemeId,
    /// Display name.
    pub name: &'static str,
    /// Purchase cost.
    pub cost: u64,
}

/// Purchasable music track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MusicDef {
    /// Identifier.
    pub id: MusicId,
    /// Display name.
    pub name: &'static str,
    /// Purchase cost.
    pub cost: u64,
}

/// Title earned once lifetime earnings reach `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    /// Minimum lifetime earnings.
    pub threshold: u64,
    /// Display title.
    pub title: &'static str,
}

pub use tables::RANKS;

/// Looks up an upgrade definition.
#[must_use]
pub fn upgrade(id: UpgradeId) -> &'static UpgradeDef {
    &tables::UPGRADES[id.index()]
}

/// All upgrade definitions in shop order.
#[must_use]
pub fn upgrades() -> &'static [UpgradeDef] {
    &tables::UPGRADES
}

/// The tier list of a hardware slot. Empty for [`HardwareSlot::Case`].
#[must_use]
pub fn hardware_tiers(slot: HardwareSlot) -> &'static [HardwareTierDef] {
    match slot {
        HardwareSlot::Mouse => &tables::MOUSE,
        HardwareSlot::Monitor => &tables::MONITOR,
        HardwareSlot::Keyboard => &tables::KEYBOARD,
        HardwareSlot::Gpu => &tables::GPU,
        HardwareSlot::Cpu => &tables::CPU,
        HardwareSlot::Ram => &tables::RAM,
        HardwareSlot::Cooling => &tables::COOLING,
        HardwareSlot::Power => &tables::POWER,
        HardwareSlot::Case => &[],
    }
}

/// The installed tier definition for `tier` in `slot`.
///
/// Tier 0 means nothing installed and returns `None`, as does any tier of
/// a slot with an empty list. Tiers past the end clamp to the last entry.
#[must_use]
pub fn hardware_tier(slot: HardwareSlot, tier: u32) -> Option<&'static HardwareTierDef> {
    if tier == 0 {
        return None;
    }
    let tiers = hardware_tiers(slot);
    let index = (tier as usize).min(tiers.len()).checked_sub(1)?;
    tiers.get(index)
}

/// The exact definition for purchasing `tier` in `slot`, without clamping.
#[must_use]
pub fn purchasable_tier(slot: HardwareSlot, tier: u32) -> Option<&'static HardwareTierDef> {
    let index = (tier as usize).checked_sub(1)?;
    hardware_tiers(slot).get(index)
}

/// Evolution stages of an upgrade, base stage first. Empty if the upgrade
/// cannot evolve.
#[must_use]
pub fn evolutions(id: UpgradeId) -> &'static [EvolutionDef] {
    match id {
        UpgradeId::Chalk => &tables::CHALK_EVOLUTIONS,
        UpgradeId::Sponge => &tables::SPONGE_EVOLUTIONS,
        UpgradeId::Quiz => &tables::QUIZ_EVOLUTIONS,
        _ => &[],
    }
}

/// Whether an upgrade has evolution stages.
#[must_use]
pub fn is_evolvable(id: UpgradeId) -> bool {
    !evolutions(id).is_empty()
}

/// Multiplier applied to an upgrade's `level * base_effect` at evolution
/// stage `tier`. 1.0 for non-evolvable upgrades; clamps past the last stage.
#[must_use]
pub fn evolution_multiplier(id: UpgradeId, tier: u32) -> f64 {
    let stages = evolutions(id);
    match stages.len() {
        0 => 1.0,
        len => stages[(tier as usize).min(len - 1)].multiplier,
    }
}

/// Looks up a research definition.
#[must_use]
pub fn research(id: ResearchId) -> &'static ResearchDef {
    &tables::RESEARCH[id.index()]
}

/// Looks up a theme definition.
#[must_use]
pub fn theme(id: ThemeId) -> &'static ThemeDef {
    &tables::THEMES[id.index()]
}

/// Looks up a music track definition.
#[must_use]
pub fn music(id: MusicId) -> &'static MusicDef {
    &tables::MUSIC[id.index()]
}

/// The highest rank whose threshold does not exceed `earnings`.
#[must_use]
pub fn rank_for(earnings: u64) -> &'static Rank {
    RANKS
        .iter()
        .take_while(|rank| rank.threshold <= earnings)
        .last()
        .unwrap_or(&RANKS[0])
}
