//! Per-player ownership: upgrade levels, hardware tiers, evolutions,
//! research and prestige.
//!
//! Mutators are crate-private. Outside code changes an inventory only
//! through the actions on [`Economy`](crate::Economy), which validate first.

use serde::{Deserialize, Serialize};

use crate::catalog::{self, HardwareEffect, HardwareSlot, ResearchId, UpgradeId};

// =============================================================================
// Upgrades
// =============================================================================

/// Level and next price of one shop upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnedUpgrade {
    /// Levels bought.
    pub level: u32,
    /// Price of the next level.
    pub current_cost: u64,
}

impl OwnedUpgrade {
    /// Level 0 at the catalog base cost.
    #[must_use]
    pub fn fresh(id: UpgradeId) -> Self {
        Self {
            level: 0,
            current_cost: catalog::upgrade(id).base_cost,
        }
    }
}

/// `ceil(base * growth^level)`, saturating at `u64::MAX`.
///
/// ```
/// use nierodka_core::inventory::scaled_cost;
///
/// assert_eq!(scaled_cost(15, 1.5, 1), 23);
/// assert_eq!(scaled_cost(15, 1.5, 2), 34);
/// ```
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn scaled_cost(base: u64, growth: f64, level: u32) -> u64 {
    (base as f64 * growth.powf(f64::from(level))).ceil() as u64
}

// =============================================================================
// Research
// =============================================================================

bitflags::bitflags! {
    /// Set of unlocked research.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ResearchSet: u8 {
        /// See [`ResearchId::CaffeineResearch`].
        const CAFFEINE_RESEARCH = 1 << 0;
        /// See [`ResearchId::OverclockLicense`].
        const OVERCLOCK_LICENSE = 1 << 1;
        /// See [`ResearchId::ItCertificate`].
        const IT_CERTIFICATE = 1 << 2;
        /// See [`ResearchId::BiggerMug`].
        const BIGGER_MUG = 1 << 3;
        /// See [`ResearchId::StrongerBrew`].
        const STRONGER_BREW = 1 << 4;
    }
}

impl ResearchId {
    /// The flag for this research.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn flag(self) -> ResearchSet {
        ResearchSet::from_bits_retain(1 << self.index() as u8)
    }
}

impl ResearchSet {
    /// Whether `id` is unlocked.
    #[must_use]
    pub fn has(self, id: ResearchId) -> bool {
        self.contains(id.flag())
    }

    /// Unlocked research in catalog order.
    pub fn ids(self) -> impl Iterator<Item = ResearchId> {
        ResearchId::ALL.iter().copied().filter(move |id| self.has(*id))
    }
}

impl FromIterator<ResearchId> for ResearchSet {
    fn from_iter<I: IntoIterator<Item = ResearchId>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ResearchSet::empty(), |set, id| set | id.flag())
    }
}

// =============================================================================
// Hardware
// =============================================================================

/// Installed tier per hardware slot. Tier 0 means empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HardwareTiers([u32; HardwareSlot::COUNT]);

impl HardwareTiers {
    /// Installed tier of `slot`.
    #[must_use]
    pub fn get(&self, slot: HardwareSlot) -> u32 {
        self.0[slot.index()]
    }

    pub(crate) fn set(&mut self, slot: HardwareSlot, tier: u32) {
        self.0[slot.index()] = tier;
    }

    /// `(slot, tier)` for every slot in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (HardwareSlot, u32)> + '_ {
        HardwareSlot::ALL.iter().map(move |slot| (*slot, self.get(*slot)))
    }

    /// Effects of everything installed.
    #[must_use]
    pub fn modifiers(&self) -> HardwareModifiers {
        HardwareModifiers::from_tiers(self)
    }
}

/// Hardware effects folded into plain numbers. Empty slots contribute the
/// neutral value, so every field is defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HardwareModifiers {
    /// Added to base click (mouse).
    pub click_bonus: u64,
    /// Factor on the global multiplier (monitor).
    pub global_multiplier: f64,
    /// Highest shop tier on sale (keyboard). Tier 1 is always on sale.
    pub unlocked_shop_tier: u8,
    /// Probability of a critical click (gpu).
    pub crit_chance: f64,
    /// Added to the base critical multiplier (cpu).
    pub crit_bonus: f64,
    /// Subtracted from the crash risk (ram).
    pub risk_reduction: f64,
    /// Extra overclock seconds (cooling).
    pub overclock_bonus_secs: u32,
    /// Overclock multiplier (power); `None` uses the configured default.
    pub overclock_multiplier: Option<f64>,
}

impl Default for HardwareModifiers {
    fn default() -> Self {
        Self {
            click_bonus: 0,
            global_multiplier: 1.0,
            unlocked_shop_tier: 1,
            crit_chance: 0.0,
            crit_bonus: 0.0,
            risk_reduction: 0.0,
            overclock_bonus_secs: 0,
            overclock_multiplier: None,
        }
    }
}

impl HardwareModifiers {
    /// Fold installed tiers into modifiers. Tiers past the catalog clamp to
    /// the highest defined tier.
    #[must_use]
    pub fn from_tiers(tiers: &HardwareTiers) -> Self {
        let mut mods = Self::default();
        for (slot, tier) in tiers.iter() {
            let Some(def) = catalog::hardware_tier(slot, tier) else {
                continue;
            };
            match def.effect {
                HardwareEffect::ClickBonus(bonus) => mods.click_bonus = bonus,
                HardwareEffect::GlobalMultiplier(m) => mods.global_multiplier = m,
                HardwareEffect::UnlockTier(t) => {
                    mods.unlocked_shop_tier = mods.unlocked_shop_tier.max(t);
                }
                HardwareEffect::CritChance(p) => mods.crit_chance = p,
                HardwareEffect::CritMultiplier(m) => mods.crit_bonus = m,
                HardwareEffect::RiskReduction(r) => mods.risk_reduction = r,
                HardwareEffect::OverclockDuration(secs) => mods.overclock_bonus_secs = secs,
                HardwareEffect::OverclockMultiplier(m) => mods.overclock_multiplier = Some(m),
            }
        }
        mods
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// Everything a player owns that feeds the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Inventory {
    upgrades: [OwnedUpgrade; UpgradeId::COUNT],
    hardware: HardwareTiers,
    evolutions: [u32; UpgradeId::COUNT],
    research: ResearchSet,
    prestige_level: u32,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    /// New-game inventory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            upgrades: std::array::from_fn(|i| OwnedUpgrade::fresh(UpgradeId::ALL[i])),
            hardware: HardwareTiers::default(),
            evolutions: [0; UpgradeId::COUNT],
            research: ResearchSet::empty(),
            prestige_level: 0,
        }
    }

    /// Level and price of `id`.
    #[must_use]
    pub fn upgrade(&self, id: UpgradeId) -> OwnedUpgrade {
        self.upgrades[id.index()]
    }

    /// Every upgrade in shop order.
    pub fn upgrades(&self) -> impl Iterator<Item = (UpgradeId, OwnedUpgrade)> + '_ {
        UpgradeId::ALL.iter().map(move |id| (*id, self.upgrade(*id)))
    }

    /// Installed hardware.
    #[must_use]
    pub fn hardware(&self) -> &HardwareTiers {
        &self.hardware
    }

    /// Evolution stage of `id`; 0 for the base item.
    #[must_use]
    pub fn evolution(&self, id: UpgradeId) -> u32 {
        self.evolutions[id.index()]
    }

    /// Unlocked research.
    #[must_use]
    pub fn research(&self) -> ResearchSet {
        self.research
    }

    /// Whether `id` is unlocked.
    #[must_use]
    pub fn has_research(&self, id: ResearchId) -> bool {
        self.research.has(id)
    }

    /// Number of prestige resets performed.
    #[must_use]
    pub fn prestige_level(&self) -> u32 {
        self.prestige_level
    }

    // -------------------------------------------------------------------------
    // Crate-private mutation
    // -------------------------------------------------------------------------

    /// Add a level and reprice from the new level.
    pub(crate) fn level_up(&mut self, id: UpgradeId, growth: f64) -> OwnedUpgrade {
        let owned = &mut self.upgrades[id.index()];
        owned.level = owned.level.saturating_add(1);
        owned.current_cost = scaled_cost(catalog::upgrade(id).base_cost, growth, owned.level);
        *owned
    }

    pub(crate) fn set_upgrade(&mut self, id: UpgradeId, owned: OwnedUpgrade) {
        self.upgrades[id.index()] = owned;
    }

    pub(crate) fn install(&mut self, slot: HardwareSlot, tier: u32) {
        self.hardware.set(slot, tier);
    }

    pub(crate) fn set_evolution(&mut self, id: UpgradeId, tier: u32) {
        self.evolutions[id.index()] = tier;
    }

    pub(crate) fn unlock(&mut self, id: ResearchId) {
        self.research.insert(id.flag());
    }

    pub(crate) fn set_prestige_level(&mut self, level: u32) {
        self.prestige_level = level;
    }

    /// Clear upgrades, hardware and evolutions and bump the prestige level.
    /// Research survives.
    pub(crate) fn prestige(&mut self) {
        let research = self.research;
        let level = self.prestige_level.saturating_add(1);
        *self = Self::new();
        self.research = research;
        self.prestige_level = level;
    }
}
