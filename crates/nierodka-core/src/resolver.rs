//! Modifier resolver: inventory + transient buffs -> click power and
//! passive income.
//!
//! [`resolve`] is pure. The economy calls it after every mutation and every
//! tick so derived output is never stale.
//!
//! # Order
//!
//! 1. Sum upgrade contributions (`level * base_effect * evolution`) into
//!    base click (starting at 1) or base auto (starting at 0).
//! 2. Add the mouse bonus to base click.
//! 3. Build the global multiplier: monitor, prestige, overclock, then coffee
//!    (buff takes priority over the empty-mug debuff).
//! 4. Zero base auto while crashed.
//! 5. Floor both products.
//!
//! Flooring happens only in step 5; intermediate sums stay in `f64`.
//!
//! # Example
//!
//! ```
//! use nierodka_core::config::EconomyConfig;
//! use nierodka_core::inventory::Inventory;
//! use nierodka_core::production::ProductionState;
//! use nierodka_core::resolver::resolve;
//!
//! let config = EconomyConfig::default();
//! let out = resolve(&Inventory::new(), &ProductionState::new(100.0), 0, &config);
//! assert_eq!(out.click_power, 1);
//! assert_eq!(out.auto_points, 0);
//! ```

use crate::catalog::{self, ProductionKind, ResearchId};
use crate::config::EconomyConfig;
use crate::inventory::Inventory;
use crate::production::ProductionState;

/// Derived output of one resolver pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    /// Points per click before crits.
    pub click_power: u64,
    /// Points per tick.
    pub auto_points: u64,
    /// Additive click component before the multiplier.
    pub base_click: f64,
    /// Additive passive component before the multiplier; 0 while crashed.
    pub base_auto: f64,
    /// Product of every multiplicative modifier.
    pub global_multiplier: f64,
}

impl Default for Resolved {
    fn default() -> Self {
        Self {
            click_power: 1,
            auto_points: 0,
            base_click: 1.0,
            base_auto: 0.0,
            global_multiplier: 1.0,
        }
    }
}

/// Compute click power and passive income.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn resolve(
    inventory: &Inventory,
    production: &ProductionState,
    now_ms: u64,
    config: &EconomyConfig,
) -> Resolved {
    let mut base_click = 1.0_f64;
    let mut base_auto = 0.0_f64;

    for (id, owned) in inventory.upgrades() {
        if owned.level == 0 {
            continue;
        }
        let def = catalog::upgrade(id);
        let evolution = catalog::evolution_multiplier(id, inventory.evolution(id));
        let contribution = f64::from(owned.level) * def.base_effect as f64 * evolution;
        match def.kind {
            ProductionKind::Click => base_click += contribution,
            ProductionKind::Auto => base_auto += contribution,
        }
    }

    let hardware = inventory.hardware().modifiers();
    base_click += hardware.click_bonus as f64;

    let mut global_multiplier = hardware.global_multiplier;
    global_multiplier *= 1.0 + f64::from(inventory.prestige_level()) * config.prestige_bonus_per_level;

    if production.overclocked() {
        global_multiplier *= hardware
            .overclock_multiplier
            .unwrap_or(config.default_overclock_multiplier);
    }

    global_multiplier *= coffee_multiplier(inventory, production, now_ms, config);

    if production.crashed {
        base_auto = 0.0;
    }

    Resolved {
        click_power: (base_click * global_multiplier).floor() as u64,
        auto_points: (base_auto * global_multiplier).floor() as u64,
        base_click,
        base_auto,
        global_multiplier,
    }
}

/// Coffee factor: buff, else debuff on an empty mug, else 1.
fn coffee_multiplier(
    inventory: &Inventory,
    production: &ProductionState,
    now_ms: u64,
    config: &EconomyConfig,
) -> f64 {
    if production.coffee_buff_active(now_ms) {
        if inventory.has_research(ResearchId::StrongerBrew) {
            config.coffee_buff_multiplier_stronger
        } else {
            config.coffee_buff_multiplier
        }
    } else if production.coffee_level <= 0.0 && inventory.has_research(ResearchId::CaffeineResearch)
    {
        config.coffee_debuff_multiplier
    } else {
        1.0
    }
}
