//! Factories and a scripted player for crate-level tests.

use crate::actions::{Action, Purchase};
use crate::catalog::UpgradeId;
use crate::clock::ManualClock;
use crate::config::EconomyConfig;
use crate::engine::Economy;
use crate::inventory::OwnedUpgrade;
use crate::rng::{ChaChaSource, RandomSource, ScriptedSource};

/// Economy with a scripted random source.
pub type ScriptedEconomy = Economy<ScriptedSource, ManualClock>;

/// Economy with a seeded random source and synthetic time.
pub type SeededEconomy = Economy<ChaChaSource, ManualClock>;

// =============================================================================
// Factories
// =============================================================================

/// New game under the default config; every roll misses.
pub fn fresh() -> ScriptedEconomy {
    Economy::new(
        EconomyConfig::default(),
        ScriptedSource::never(),
        ManualClock::new(0),
    )
}

/// New game with gates off and `points` in the bank.
pub fn ungated_with_points(points: u64, rng: ScriptedSource) -> ScriptedEconomy {
    let mut eco = Economy::new(EconomyConfig::ungated(), rng, ManualClock::new(0));
    eco.points = points;
    eco
}

/// Seeded game with gates off.
pub fn seeded(seed: u64) -> SeededEconomy {
    Economy::new(
        EconomyConfig::ungated(),
        ChaChaSource::from_seed(seed),
        ManualClock::new(1_700_000_000_000),
    )
}

/// Force an upgrade level without paying.
pub fn set_level<R: RandomSource>(eco: &mut Economy<R, ManualClock>, id: UpgradeId, level: u32) {
    eco.inventory.set_upgrade(
        id,
        OwnedUpgrade {
            level,
            current_cost: 0,
        },
    );
    eco.recompute();
}

// =============================================================================
// Scripted player
// =============================================================================

/// Play `ticks` seconds the way an attentive player would: a few clicks,
/// the cheapest open purchase, coffee and overclock when available, every
/// inspection claimed. Time advances one second per tick.
pub fn play<R: RandomSource>(eco: &mut Economy<R, ManualClock>, ticks: u64) {
    for _ in 0..ticks {
        for _ in 0..3 {
            let _ = eco.click();
        }
        if let Some(purchase) = cheapest_affordable(eco) {
            let _ = eco.purchase(purchase);
        }
        if eco.coffee_level() < 50.0 {
            let _ = eco.drink_coffee();
        }
        let _ = eco.activate_overclock();
        let _ = eco.apply(Action::ClaimInspection);

        eco.clock().advance(1_000);
        eco.tick();
    }
}

fn cheapest_affordable<R: RandomSource>(eco: &Economy<R, ManualClock>) -> Option<Purchase> {
    eco.open_purchases()
        .into_iter()
        .filter_map(|p| eco.preview_purchase(p).ok().map(|preview| (p, preview)))
        .filter(|(_, preview)| preview.affordable)
        .min_by_key(|(_, preview)| preview.cost)
        .map(|(p, _)| p)
}
