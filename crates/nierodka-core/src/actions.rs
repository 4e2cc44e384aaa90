//! Player actions.
//!
//! Every action validates first and mutates second. A [`Rejection`] means
//! nothing changed: not the points, not the inventory, not the event log,
//! not the random stream. Callers that want "try-buy" semantics simply
//! ignore the `Err`.
//!
//! All actions funnel through [`Economy::apply`], which logs the outcome and
//! runs the resolver on success.
//!
//! # Gates
//!
//! Always enforced: shop tier vs. keyboard, one hardware tier at a time,
//! evolving needs the base upgrade, research prerequisites. With
//! [`EconomyConfig::enforce_unlock_gates`](crate::EconomyConfig) also:
//! hardware tiers above 1 (except the mouse) need `it_certificate`, coffee
//! needs `caffeine_research`, overclocking needs `overclock_license`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{self, HardwareSlot, MusicId, ResearchId, ThemeId, UpgradeId};
use crate::clock::Clock;
use crate::cosmetics::Cosmetic;
use crate::engine::Economy;
use crate::error::{Gate, Rejection};
use crate::events::EconomyEvent;
use crate::inspection::Inspection;
use crate::resolver::resolve;
use crate::rng::RandomSource;

/// Everything a player can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Manual click.
    Click,
    /// Buy one level of an upgrade.
    BuyUpgrade {
        /// Upgrade.
        id: UpgradeId,
    },
    /// Install the next hardware tier.
    BuyHardware {
        /// Slot.
        slot: HardwareSlot,
        /// Tier to install; must be the installed tier plus one.
        tier: u32,
    },
    /// Evolve an item to its next stage.
    EvolveItem {
        /// Upgrade.
        id: UpgradeId,
    },
    /// Unlock research.
    BuyResearch {
        /// Research.
        id: ResearchId,
    },
    /// Refill the mug and start the buff.
    DrinkCoffee,
    /// Start an overclock.
    ActivateOverclock,
    /// Trade everything for a permanent multiplier.
    PrestigeReset,
    /// Buy a theme.
    BuyTheme {
        /// Theme.
        id: ThemeId,
    },
    /// Switch to an owned theme.
    SelectTheme {
        /// Theme.
        id: ThemeId,
    },
    /// Buy a music track.
    BuyMusic {
        /// Track.
        id: MusicId,
    },
    /// Switch to an owned track.
    SelectMusic {
        /// Track.
        id: MusicId,
    },
    /// Collect the surprise inspection bonus.
    ClaimInspection,
}

/// The inventory-changing subset of [`Action`], which can be previewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Purchase {
    /// One upgrade level.
    Upgrade {
        /// Upgrade.
        id: UpgradeId,
    },
    /// Next hardware tier.
    Hardware {
        /// Slot.
        slot: HardwareSlot,
        /// Tier.
        tier: u32,
    },
    /// Next evolution stage.
    Evolution {
        /// Upgrade.
        id: UpgradeId,
    },
    /// Research unlock.
    Research {
        /// Research.
        id: ResearchId,
    },
}

impl From<Purchase> for Action {
    fn from(purchase: Purchase) -> Self {
        match purchase {
            Purchase::Upgrade { id } => Action::BuyUpgrade { id },
            Purchase::Hardware { slot, tier } => Action::BuyHardware { slot, tier },
            Purchase::Evolution { id } => Action::EvolveItem { id },
            Purchase::Research { id } => Action::BuyResearch { id },
        }
    }
}

/// What a successful action did to the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Applied {
    /// Points paid (or given up, for prestige).
    pub spent: u64,
    /// Points earned.
    pub earned: u64,
    /// Whether a click was critical.
    pub critical: bool,
}

impl Applied {
    fn spent(cost: u64) -> Self {
        Self {
            spent: cost,
            ..Self::default()
        }
    }

    fn earned(amount: u64) -> Self {
        Self {
            earned: amount,
            ..Self::default()
        }
    }
}

/// Result of a hypothetical purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preview {
    /// Price.
    pub cost: u64,
    /// Whether the balance covers it.
    pub affordable: bool,
    /// Click power afterwards.
    pub click_power: u64,
    /// Passive income afterwards.
    pub auto_points: u64,
}

impl<R: RandomSource, C: Clock> Economy<R, C> {
    /// Perform `action`.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] explaining why nothing happened.
    pub fn apply(&mut self, action: Action) -> Result<Applied, Rejection> {
        let result = match action {
            Action::Click => self.do_click(),
            Action::BuyUpgrade { id } => self.do_buy_upgrade(id),
            Action::BuyHardware { slot, tier } => self.do_buy_hardware(slot, tier),
            Action::EvolveItem { id } => self.do_evolve_item(id),
            Action::BuyResearch { id } => self.do_buy_research(id),
            Action::DrinkCoffee => self.do_drink_coffee(),
            Action::ActivateOverclock => self.do_activate_overclock(),
            Action::PrestigeReset => self.do_prestige_reset(),
            Action::BuyTheme { id } => self.do_buy_cosmetic(Cosmetic::Theme(id)),
            Action::BuyMusic { id } => self.do_buy_cosmetic(Cosmetic::Music(id)),
            Action::SelectTheme { id } => self.do_select_cosmetic(Cosmetic::Theme(id)),
            Action::SelectMusic { id } => self.do_select_cosmetic(Cosmetic::Music(id)),
            Action::ClaimInspection => self.do_claim_inspection(),
        };
        match &result {
            Ok(applied) => {
                self.recompute();
                if action != Action::Click {
                    debug!(
                        target: "economy.action",
                        ?action,
                        spent = applied.spent,
                        earned = applied.earned,
                        points = self.points,
                        "applied"
                    );
                }
            }
            Err(rejection) => {
                debug!(target: "economy.action", ?action, %rejection, "rejected");
            }
        }
        result
    }

    /// Click once.
    ///
    /// # Errors
    ///
    /// [`Rejection::Crashed`] while rebooting.
    pub fn click(&mut self) -> Result<Applied, Rejection> {
        self.apply(Action::Click)
    }

    /// Buy one level of `id`.
    ///
    /// # Errors
    ///
    /// See [`Economy::apply`].
    pub fn buy_upgrade(&mut self, id: UpgradeId) -> Result<Applied, Rejection> {
        self.apply(Action::BuyUpgrade { id })
    }

    /// Install `tier` in `slot`.
    ///
    /// # Errors
    ///
    /// See [`Economy::apply`].
    pub fn buy_hardware(&mut self, slot: HardwareSlot, tier: u32) -> Result<Applied, Rejection> {
        self.apply(Action::BuyHardware { slot, tier })
    }

    /// Evolve `id` to its next stage.
    ///
    /// # Errors
    ///
    /// See [`Economy::apply`].
    pub fn evolve_item(&mut self, id: UpgradeId) -> Result<Applied, Rejection> {
        self.apply(Action::EvolveItem { id })
    }

    /// Unlock research `id`.
    ///
    /// # Errors
    ///
    /// See [`Economy::apply`].
    pub fn buy_research(&mut self, id: ResearchId) -> Result<Applied, Rejection> {
        self.apply(Action::BuyResearch { id })
    }

    /// Refill the mug.
    ///
    /// # Errors
    ///
    /// See [`Economy::apply`].
    pub fn drink_coffee(&mut self) -> Result<Applied, Rejection> {
        self.apply(Action::DrinkCoffee)
    }

    /// Start an overclock. Rejected while one is running.
    ///
    /// # Errors
    ///
    /// See [`Economy::apply`].
    pub fn activate_overclock(&mut self) -> Result<Applied, Rejection> {
        self.apply(Action::ActivateOverclock)
    }

    /// Prestige.
    ///
    /// # Errors
    ///
    /// [`Rejection::PrestigeThreshold`] below the threshold.
    pub fn prestige_reset(&mut self) -> Result<Applied, Rejection> {
        self.apply(Action::PrestigeReset)
    }

    /// Collect the inspection bonus.
    ///
    /// # Errors
    ///
    /// [`Rejection::NoInspection`] if none is showing.
    pub fn claim_inspection(&mut self) -> Result<Applied, Rejection> {
        self.apply(Action::ClaimInspection)
    }

    /// Perform a purchase.
    ///
    /// # Errors
    ///
    /// See [`Economy::apply`].
    pub fn purchase(&mut self, purchase: Purchase) -> Result<Applied, Rejection> {
        self.apply(purchase.into())
    }

    /// Price and resulting output of `purchase`, without performing it.
    ///
    /// Gates are checked; funds are not, so unaffordable options can still be
    /// compared.
    ///
    /// # Errors
    ///
    /// The rejection a real purchase would get for anything but funds.
    pub fn preview_purchase(&self, purchase: Purchase) -> Result<Preview, Rejection> {
        let mut inventory = self.inventory.clone();
        let cost = match purchase {
            Purchase::Upgrade { id } => {
                let cost = self.check_upgrade(id)?;
                inventory.level_up(id, self.config.cost_growth);
                cost
            }
            Purchase::Hardware { slot, tier } => {
                let cost = self.check_hardware(slot, tier)?;
                inventory.install(slot, tier);
                cost
            }
            Purchase::Evolution { id } => {
                let (stage, cost) = self.check_evolution(id)?;
                inventory.set_evolution(id, stage);
                cost
            }
            Purchase::Research { id } => {
                let cost = self.check_research(id)?;
                inventory.unlock(id);
                cost
            }
        };
        let out = resolve(
            &inventory,
            &self.production,
            self.clock.now_ms(),
            &self.config,
        );
        Ok(Preview {
            cost,
            affordable: self.points >= cost,
            click_power: out.click_power,
            auto_points: out.auto_points,
        })
    }

    /// Every purchase whose gates are open right now, affordable or not.
    #[must_use]
    pub fn open_purchases(&self) -> Vec<Purchase> {
        let upgrades = UpgradeId::ALL
            .iter()
            .map(|id| Purchase::Upgrade { id: *id });
        let hardware = HardwareSlot::ALL.iter().map(|slot| Purchase::Hardware {
            slot: *slot,
            tier: self.inventory.hardware().get(*slot).saturating_add(1),
        });
        let evolutions = UpgradeId::ALL
            .iter()
            .map(|id| Purchase::Evolution { id: *id });
        let research = ResearchId::ALL
            .iter()
            .map(|id| Purchase::Research { id: *id });

        upgrades
            .chain(hardware)
            .chain(evolutions)
            .chain(research)
            .filter(|p| self.preview_purchase(*p).is_ok())
            .collect()
    }

    // =========================================================================
    // Validation (no mutation)
    // =========================================================================

    fn gates_enforced(&self) -> bool {
        self.config.enforce_unlock_gates
    }

    fn ensure_funds(&self, cost: u64) -> Result<(), Rejection> {
        if self.points < cost {
            return Err(Rejection::InsufficientFunds {
                cost,
                available: self.points,
            });
        }
        Ok(())
    }

    fn check_upgrade(&self, id: UpgradeId) -> Result<u64, Rejection> {
        let def = catalog::upgrade(id);
        let unlocked = self.inventory.hardware().modifiers().unlocked_shop_tier;
        if def.tier > unlocked {
            return Err(Rejection::Locked(Gate::ShopTier {
                required: def.tier,
                unlocked,
            }));
        }
        Ok(self.inventory.upgrade(id).current_cost)
    }

    fn check_hardware(&self, slot: HardwareSlot, tier: u32) -> Result<u64, Rejection> {
        let current = self.inventory.hardware().get(slot);
        if tier != current.saturating_add(1) {
            return Err(Rejection::TierOutOfSequence {
                slot,
                current,
                requested: tier,
            });
        }
        let def = catalog::purchasable_tier(slot, tier)
            .ok_or(Rejection::UnknownTier { slot, tier })?;
        if self.gates_enforced()
            && tier > 1
            && slot != HardwareSlot::Mouse
            && !self.inventory.has_research(ResearchId::ItCertificate)
        {
            return Err(Rejection::Locked(Gate::ItCertificate));
        }
        Ok(def.cost)
    }

    /// Next stage and its price.
    fn check_evolution(&self, id: UpgradeId) -> Result<(u32, u64), Rejection> {
        let stages = catalog::evolutions(id);
        if stages.is_empty() {
            return Err(Rejection::NotEvolvable(id));
        }
        if self.inventory.upgrade(id).level == 0 {
            return Err(Rejection::Locked(Gate::BaseUpgrade(id)));
        }
        let next = self.inventory.evolution(id).saturating_add(1);
        let stage = usize::try_from(next)
            .ok()
            .and_then(|i| stages.get(i))
            .ok_or(Rejection::FullyEvolved(id))?;
        Ok((next, stage.cost.unwrap_or(0)))
    }

    fn check_research(&self, id: ResearchId) -> Result<u64, Rejection> {
        if self.inventory.has_research(id) {
            return Err(Rejection::AlreadyUnlocked(id));
        }
        let def = catalog::research(id);
        if let Some(required) = def.requires {
            if !self.inventory.has_research(required) {
                return Err(Rejection::Locked(Gate::Prerequisite(required)));
            }
        }
        Ok(def.cost)
    }

    // =========================================================================
    // Handlers
    // =========================================================================

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn do_click(&mut self) -> Result<Applied, Rejection> {
        if self.production.crashed {
            return Err(Rejection::Crashed {
                remaining: self.production.crash_secs,
            });
        }
        let hardware = self.inventory.hardware().modifiers();
        let critical = self.rng.chance(hardware.crit_chance);
        let amount = if critical {
            let multiplier = self.config.crit_base_multiplier + hardware.crit_bonus;
            (self.derived.click_power as f64 * multiplier).floor() as u64
        } else {
            self.derived.click_power
        };
        self.credit(amount);
        self.lifetime.clicks = self.lifetime.clicks.saturating_add(1);
        self.emit(EconomyEvent::Clicked { amount, critical });
        Ok(Applied {
            earned: amount,
            critical,
            ..Applied::default()
        })
    }

    fn do_buy_upgrade(&mut self, id: UpgradeId) -> Result<Applied, Rejection> {
        let cost = self.check_upgrade(id)?;
        self.ensure_funds(cost)?;
        self.points -= cost;
        let owned = self.inventory.level_up(id, self.config.cost_growth);
        self.emit(EconomyEvent::UpgradePurchased {
            id,
            level: owned.level,
            cost,
        });
        if owned.level == 1 && catalog::is_evolvable(id) {
            self.emit(EconomyEvent::LabItemAvailable { id });
        }
        Ok(Applied::spent(cost))
    }

    fn do_buy_hardware(&mut self, slot: HardwareSlot, tier: u32) -> Result<Applied, Rejection> {
        let cost = self.check_hardware(slot, tier)?;
        self.ensure_funds(cost)?;
        self.points -= cost;
        self.inventory.install(slot, tier);
        self.emit(EconomyEvent::HardwareInstalled { slot, tier, cost });
        Ok(Applied::spent(cost))
    }

    fn do_evolve_item(&mut self, id: UpgradeId) -> Result<Applied, Rejection> {
        let (tier, cost) = self.check_evolution(id)?;
        self.ensure_funds(cost)?;
        self.points -= cost;
        self.inventory.set_evolution(id, tier);
        self.emit(EconomyEvent::ItemEvolved { id, tier, cost });
        Ok(Applied::spent(cost))
    }

    fn do_buy_research(&mut self, id: ResearchId) -> Result<Applied, Rejection> {
        let cost = self.check_research(id)?;
        self.ensure_funds(cost)?;
        self.points -= cost;
        self.inventory.unlock(id);
        self.emit(EconomyEvent::ResearchUnlocked { id, cost });
        Ok(Applied::spent(cost))
    }

    fn do_drink_coffee(&mut self) -> Result<Applied, Rejection> {
        if self.gates_enforced() && !self.inventory.has_research(ResearchId::CaffeineResearch) {
            return Err(Rejection::Locked(Gate::CaffeineResearch));
        }
        if self.production.coffee_level >= self.config.coffee_max {
            return Err(Rejection::CoffeeFull);
        }
        let window = if self.inventory.has_research(ResearchId::BiggerMug) {
            self.config.coffee_buff_ms_bigger_mug
        } else {
            self.config.coffee_buff_ms
        };
        let buff_until_ms = self.clock.now_ms().saturating_add(window);
        self.production.coffee_level = self.config.coffee_max;
        self.production.coffee_buff_end_ms = buff_until_ms;
        self.lifetime.coffees = self.lifetime.coffees.saturating_add(1);
        self.emit(EconomyEvent::CoffeeDrunk { buff_until_ms });
        Ok(Applied::default())
    }

    fn do_activate_overclock(&mut self) -> Result<Applied, Rejection> {
        if self.gates_enforced() && !self.inventory.has_research(ResearchId::OverclockLicense) {
            return Err(Rejection::Locked(Gate::OverclockLicense));
        }
        if self.production.overclocked() {
            return Err(Rejection::OverclockActive {
                remaining: self.production.overclock_secs,
            });
        }
        let secs = self
            .config
            .overclock_base_secs
            .saturating_add(self.inventory.hardware().modifiers().overclock_bonus_secs);
        self.production.overclock_secs = secs;
        self.lifetime.overclocks = self.lifetime.overclocks.saturating_add(1);
        self.emit(EconomyEvent::OverclockStarted { secs });
        info!(target: "economy.action", secs, tick = self.ticks, "overclock started");
        Ok(Applied::default())
    }

    fn do_prestige_reset(&mut self) -> Result<Applied, Rejection> {
        let required = self.config.prestige_threshold;
        if self.points < required {
            return Err(Rejection::PrestigeThreshold {
                required,
                available: self.points,
            });
        }
        let given_up = self.points;
        self.inventory.prestige();
        self.points = 0;
        self.lifetime.earnings = 0;
        self.lifetime.clicks = 0;
        self.production.coffee_level = self.config.coffee_max;
        let level = self.inventory.prestige_level();
        self.emit(EconomyEvent::Prestiged { level });
        info!(target: "economy.action", level, given_up, "prestige");
        Ok(Applied::spent(given_up))
    }

    fn do_buy_cosmetic(&mut self, item: Cosmetic) -> Result<Applied, Rejection> {
        let (owned, cost) = match item {
            Cosmetic::Theme(id) => (self.wardrobe.owns_theme(id), catalog::theme(id).cost),
            Cosmetic::Music(id) => (self.wardrobe.owns_music(id), catalog::music(id).cost),
        };
        if owned {
            return Err(Rejection::AlreadyOwned(item));
        }
        self.ensure_funds(cost)?;
        self.points -= cost;
        match item {
            Cosmetic::Theme(id) => {
                self.wardrobe.add_theme(id);
                self.emit(EconomyEvent::ThemePurchased { id });
            }
            Cosmetic::Music(id) => {
                self.wardrobe.add_music(id);
                self.emit(EconomyEvent::MusicPurchased { id });
            }
        }
        Ok(Applied::spent(cost))
    }

    fn do_select_cosmetic(&mut self, item: Cosmetic) -> Result<Applied, Rejection> {
        let (worn, event) = match item {
            Cosmetic::Theme(id) => (self.wardrobe.wear_theme(id), EconomyEvent::ThemeSelected { id }),
            Cosmetic::Music(id) => (self.wardrobe.play_music(id), EconomyEvent::MusicSelected { id }),
        };
        if !worn {
            return Err(Rejection::NotOwned(item));
        }
        self.emit(event);
        Ok(Applied::default())
    }

    fn do_claim_inspection(&mut self) -> Result<Applied, Rejection> {
        if !self.inspection.visible() {
            return Err(Rejection::NoInspection);
        }
        let bonus = Inspection::bonus(self.derived.auto_points, &self.config.inspection);
        self.inspection.claim();
        self.credit(bonus);
        self.emit(EconomyEvent::InspectionClaimed { bonus });
        info!(target: "economy.action", bonus, "inspection claimed");
        Ok(Applied::earned(bonus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::EconomyConfig;
    use crate::inventory::OwnedUpgrade;
    use crate::rng::ScriptedSource;

    type TestEconomy = Economy<ScriptedSource, ManualClock>;

    fn economy(points: u64) -> TestEconomy {
        let mut eco = Economy::new(
            EconomyConfig::default(),
            ScriptedSource::never(),
            ManualClock::new(0),
        );
        eco.points = points;
        eco
    }

    fn ungated(points: u64) -> TestEconomy {
        let mut eco = Economy::new(
            EconomyConfig::ungated(),
            ScriptedSource::never(),
            ManualClock::new(0),
        );
        eco.points = points;
        eco
    }

    mod click_tests {
        use super::*;

        #[test]
        fn fresh_click_pays_one_without_drawing() {
            let mut eco = economy(0);
            let applied = eco.click().unwrap();
            assert_eq!(applied.earned, 1);
            assert!(!applied.critical);
            assert_eq!(eco.points(), 1);
            assert_eq!(eco.lifetime().clicks, 1);
            assert_eq!(eco.lifetime().earnings, 1);
            assert_eq!(eco.rng().draws(), 0);
        }

        #[test]
        fn crit_is_double_without_cpu() {
            let mut eco = economy(0);
            eco.rng = ScriptedSource::always();
            eco.inventory.install(HardwareSlot::Gpu, 1);
            eco.inventory.set_upgrade(
                UpgradeId::Chalk,
                OwnedUpgrade {
                    level: 4,
                    current_cost: 77,
                },
            );
            eco.recompute();
            let applied = eco.click().unwrap();
            assert!(applied.critical);
            assert_eq!(applied.earned, 10);
        }

        #[test]
        fn cpu_adds_to_crit_multiplier() {
            let mut eco = economy(0);
            eco.rng = ScriptedSource::always();
            eco.inventory.install(HardwareSlot::Gpu, 4);
            eco.inventory.install(HardwareSlot::Cpu, 1);
            eco.recompute();
            // floor(1 * 3.5)
            assert_eq!(eco.click().unwrap().earned, 3);
        }

        #[test]
        fn crashed_click_is_rejected() {
            let mut eco = economy(0);
            eco.production.crashed = true;
            eco.production.crash_secs = 4;
            assert_eq!(eco.click(), Err(Rejection::Crashed { remaining: 4 }));
            assert_eq!(eco.points(), 0);
            assert!(eco.events().is_empty());
        }
    }

    mod upgrade_tests {
        use super::*;

        #[test]
        fn buying_chalk_matches_worked_example() {
            let mut eco = economy(15);
            eco.buy_upgrade(UpgradeId::Chalk).unwrap();
            assert_eq!(eco.points(), 0);
            let owned = eco.inventory().upgrade(UpgradeId::Chalk);
            assert_eq!(owned.level, 1);
            assert_eq!(owned.current_cost, 23);
            assert_eq!(eco.click_power(), 2);
        }

        #[test]
        fn unaffordable_is_rejected_without_change() {
            let mut eco = economy(14);
            let before = eco.inventory().clone();
            assert_eq!(
                eco.buy_upgrade(UpgradeId::Chalk),
                Err(Rejection::InsufficientFunds {
                    cost: 15,
                    available: 14
                })
            );
            assert_eq!(eco.points(), 14);
            assert_eq!(eco.inventory(), &before);
            assert!(eco.events().is_empty());
        }

        #[test]
        fn tier_two_needs_keyboard() {
            let mut eco = economy(1_000_000);
            assert_eq!(
                eco.buy_upgrade(UpgradeId::Zbyszko),
                Err(Rejection::Locked(Gate::ShopTier {
                    required: 2,
                    unlocked: 1
                }))
            );
            eco.inventory.install(HardwareSlot::Keyboard, 2);
            eco.buy_upgrade(UpgradeId::Zbyszko).unwrap();
        }

        #[test]
        fn first_evolvable_level_announces_lab_item() {
            let mut eco = economy(1_000);
            eco.buy_upgrade(UpgradeId::Sponge).unwrap();
            eco.buy_upgrade(UpgradeId::Sponge).unwrap();
            let events: Vec<_> = eco.take_events().into_iter().map(|s| s.event).collect();
            let lab = events
                .iter()
                .filter(|e| matches!(e, EconomyEvent::LabItemAvailable { .. }))
                .count();
            assert_eq!(lab, 1);
        }
    }

    mod hardware_tests {
        use super::*;

        #[test]
        fn skipping_a_tier_is_rejected() {
            let mut eco = ungated(10_000_000);
            eco.buy_hardware(HardwareSlot::Monitor, 1).unwrap();
            let points = eco.points();
            assert_eq!(
                eco.buy_hardware(HardwareSlot::Monitor, 3),
                Err(Rejection::TierOutOfSequence {
                    slot: HardwareSlot::Monitor,
                    current: 1,
                    requested: 3
                })
            );
            assert_eq!(eco.points(), points);
            assert_eq!(eco.inventory().hardware().get(HardwareSlot::Monitor), 1);
        }

        #[test]
        fn downgrade_is_rejected() {
            let mut eco = ungated(10_000_000);
            eco.buy_hardware(HardwareSlot::Ram, 1).unwrap();
            eco.buy_hardware(HardwareSlot::Ram, 2).unwrap();
            assert!(matches!(
                eco.buy_hardware(HardwareSlot::Ram, 1),
                Err(Rejection::TierOutOfSequence { .. })
            ));
        }

        #[test]
        fn past_last_tier_is_unknown() {
            let mut eco = ungated(100_000_000);
            for tier in 1..=3 {
                eco.buy_hardware(HardwareSlot::Mouse, tier).unwrap();
            }
            assert_eq!(
                eco.buy_hardware(HardwareSlot::Mouse, 4),
                Err(Rejection::UnknownTier {
                    slot: HardwareSlot::Mouse,
                    tier: 4
                })
            );
        }

        #[test]
        fn case_cannot_be_bought() {
            let mut eco = ungated(1_000);
            assert!(matches!(
                eco.buy_hardware(HardwareSlot::Case, 1),
                Err(Rejection::UnknownTier { .. })
            ));
        }

        #[test]
        fn certificate_gates_tier_two_except_mouse() {
            let mut eco = economy(1_000_000);
            eco.buy_hardware(HardwareSlot::Mouse, 1).unwrap();
            eco.buy_hardware(HardwareSlot::Mouse, 2).unwrap();
            eco.buy_hardware(HardwareSlot::Gpu, 1).unwrap();
            assert_eq!(
                eco.buy_hardware(HardwareSlot::Gpu, 2),
                Err(Rejection::Locked(Gate::ItCertificate))
            );
            eco.buy_research(ResearchId::ItCertificate).unwrap();
            eco.buy_hardware(HardwareSlot::Gpu, 2).unwrap();
        }
    }

    mod evolution_tests {
        use super::*;

        #[test]
        fn needs_base_upgrade() {
            let mut eco = economy(1_000_000);
            assert_eq!(
                eco.evolve_item(UpgradeId::Chalk),
                Err(Rejection::Locked(Gate::BaseUpgrade(UpgradeId::Chalk)))
            );
        }

        #[test]
        fn stages_are_sequential_and_finite() {
            let mut eco = economy(1_000_000);
            eco.buy_upgrade(UpgradeId::Chalk).unwrap();
            eco.evolve_item(UpgradeId::Chalk).unwrap();
            assert_eq!(eco.inventory().evolution(UpgradeId::Chalk), 1);
            // base click = 1 + 1 * 1 * 5
            assert_eq!(eco.click_power(), 6);
            eco.evolve_item(UpgradeId::Chalk).unwrap();
            assert_eq!(
                eco.evolve_item(UpgradeId::Chalk),
                Err(Rejection::FullyEvolved(UpgradeId::Chalk))
            );
            assert_eq!(eco.points(), 1_000_000 - 15 - 10_000 - 250_000);
        }

        #[test]
        fn non_evolvable_is_rejected() {
            let mut eco = economy(1_000_000);
            eco.buy_upgrade(UpgradeId::Keys).unwrap();
            assert_eq!(
                eco.evolve_item(UpgradeId::Keys),
                Err(Rejection::NotEvolvable(UpgradeId::Keys))
            );
        }
    }

    mod research_tests {
        use super::*;

        #[test]
        fn prerequisite_and_one_shot() {
            let mut eco = economy(100_000);
            assert_eq!(
                eco.buy_research(ResearchId::BiggerMug),
                Err(Rejection::Locked(Gate::Prerequisite(
                    ResearchId::CaffeineResearch
                )))
            );
            eco.buy_research(ResearchId::CaffeineResearch).unwrap();
            eco.buy_research(ResearchId::BiggerMug).unwrap();
            assert_eq!(
                eco.buy_research(ResearchId::BiggerMug),
                Err(Rejection::AlreadyUnlocked(ResearchId::BiggerMug))
            );
            assert_eq!(eco.points(), 100_000 - 500 - 5_000);
        }
    }

    mod coffee_tests {
        use super::*;

        #[test]
        fn needs_caffeine_research() {
            let mut eco = economy(0);
            eco.production.coffee_level = 10.0;
            assert_eq!(
                eco.drink_coffee(),
                Err(Rejection::Locked(Gate::CaffeineResearch))
            );
        }

        #[test]
        fn full_mug_is_rejected() {
            let mut eco = ungated(0);
            assert_eq!(eco.drink_coffee(), Err(Rejection::CoffeeFull));
        }

        #[test]
        fn drinking_refills_and_starts_buff() {
            let mut eco = ungated(0);
            eco.clock.set(10_000);
            eco.production.coffee_level = 0.0;
            eco.drink_coffee().unwrap();
            assert!((eco.coffee_level() - 100.0).abs() < f64::EPSILON);
            assert_eq!(eco.production().coffee_buff_end_ms, 15_000);
            assert_eq!(eco.lifetime().coffees, 1);

            eco.inventory.unlock(ResearchId::BiggerMug);
            eco.production.coffee_level = 50.0;
            eco.drink_coffee().unwrap();
            assert_eq!(eco.production().coffee_buff_end_ms, 17_500);
        }
    }

    mod overclock_tests {
        use super::*;

        #[test]
        fn needs_license() {
            let mut eco = economy(0);
            assert_eq!(
                eco.activate_overclock(),
                Err(Rejection::Locked(Gate::OverclockLicense))
            );
        }

        #[test]
        fn duration_includes_cooling_and_rejects_reentry() {
            let mut eco = ungated(0);
            eco.inventory.install(HardwareSlot::Cooling, 2);
            eco.activate_overclock().unwrap();
            assert_eq!(eco.overclock_secs(), 45);
            assert_eq!(
                eco.activate_overclock(),
                Err(Rejection::OverclockActive { remaining: 45 })
            );
            assert_eq!(eco.lifetime().overclocks, 1);
        }
    }

    mod prestige_tests {
        use super::*;

        #[test]
        fn below_threshold_is_rejected() {
            let mut eco = economy(999_999_999);
            assert!(matches!(
                eco.prestige_reset(),
                Err(Rejection::PrestigeThreshold { .. })
            ));
            assert_eq!(eco.prestige_level(), 0);
        }

        #[test]
        fn prestige_resets_economy_but_keeps_research_and_cosmetics() {
            let mut eco = economy(2_000_000_000);
            eco.buy_research(ResearchId::CaffeineResearch).unwrap();
            eco.apply(Action::BuyTheme { id: ThemeId::Gold }).unwrap();
            eco.apply(Action::SelectTheme { id: ThemeId::Gold }).unwrap();
            eco.buy_upgrade(UpgradeId::Sponge).unwrap();
            eco.buy_hardware(HardwareSlot::Mouse, 1).unwrap();
            eco.click().unwrap();
            eco.production.coffee_level = 3.0;
            eco.lifetime.overclocks = 2;

            eco.prestige_reset().unwrap();

            assert_eq!(eco.points(), 0);
            assert_eq!(eco.prestige_level(), 1);
            assert_eq!(eco.lifetime().clicks, 0);
            assert_eq!(eco.lifetime().earnings, 0);
            assert_eq!(eco.lifetime().overclocks, 2);
            assert_eq!(eco.inventory().upgrade(UpgradeId::Sponge).level, 0);
            assert_eq!(eco.inventory().hardware().get(HardwareSlot::Mouse), 0);
            assert!(eco.inventory().has_research(ResearchId::CaffeineResearch));
            assert_eq!(eco.wardrobe().active_theme(), ThemeId::Gold);
            assert!((eco.coffee_level() - 100.0).abs() < f64::EPSILON);
            assert_eq!(eco.click_power(), 1);
        }
    }

    mod cosmetic_tests {
        use super::*;

        #[test]
        fn buy_once_select_owned_only() {
            let mut eco = economy(60_000);
            assert_eq!(
                eco.apply(Action::SelectMusic { id: MusicId::Lofi }),
                Err(Rejection::NotOwned(Cosmetic::Music(MusicId::Lofi)))
            );
            eco.apply(Action::BuyMusic { id: MusicId::Lofi }).unwrap();
            assert_eq!(
                eco.apply(Action::BuyMusic { id: MusicId::Lofi }),
                Err(Rejection::AlreadyOwned(Cosmetic::Music(MusicId::Lofi)))
            );
            eco.apply(Action::SelectMusic { id: MusicId::Lofi }).unwrap();
            assert_eq!(eco.wardrobe().active_music(), MusicId::Lofi);
            assert_eq!(eco.points(), 55_000);
        }
    }

    mod preview_tests {
        use super::*;

        #[test]
        fn preview_does_not_mutate() {
            let eco = economy(0);
            let preview = eco
                .preview_purchase(Purchase::Upgrade {
                    id: UpgradeId::Sponge,
                })
                .unwrap();
            assert_eq!(preview.cost, 100);
            assert!(!preview.affordable);
            assert_eq!(preview.auto_points, 5);
            assert_eq!(eco.auto_points(), 0);
        }

        #[test]
        fn preview_reports_gates() {
            let eco = economy(0);
            assert!(eco
                .preview_purchase(Purchase::Upgrade { id: UpgradeId::Pen })
                .is_err());
        }

        #[test]
        fn open_purchases_on_a_new_game() {
            let eco = economy(0);
            let open = eco.open_purchases();
            // Five tier-1 upgrades, eight hardware slots (no case), three
            // research without prerequisites.
            assert_eq!(open.len(), 5 + 8 + 3);
            assert!(open.contains(&Purchase::Hardware {
                slot: HardwareSlot::Gpu,
                tier: 1
            }));
        }
    }

    #[test]
    fn inspection_claim() {
        let mut eco = economy(0);
        assert_eq!(eco.claim_inspection(), Err(Rejection::NoInspection));
        eco.rng = ScriptedSource::always();
        for _ in 0..10 {
            eco.inspection.advance(&mut eco.rng, &eco.config.inspection);
        }
        assert!(eco.inspection().visible());
        assert_eq!(eco.claim_inspection().unwrap().earned, 1_000);
        assert_eq!(eco.lifetime().earnings, 1_000);
        assert!(!eco.inspection().visible());
    }

    #[test]
    fn actions_round_trip_through_json() {
        let action = Action::BuyHardware {
            slot: HardwareSlot::Gpu,
            tier: 2,
        };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"action":"buy_hardware","slot":"gpu","tier":2}"#);
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }
}
