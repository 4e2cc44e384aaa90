//! Serializable save format.
//!
//! Field names are camelCase so saves written by the browser client load
//! unchanged. Loading is lenient: missing fields take new-game values,
//! unknown ids are skipped with a warning, upgrades merge by id against the
//! catalog. `restore(snapshot())` reproduces the same snapshot.
//!
//! # Example
//!
//! ```
//! use nierodka_core::Economy;
//! use nierodka_core::snapshot::Snapshot;
//!
//! let mut eco = Economy::with_seed(1);
//! eco.click().unwrap();
//! let json = eco.snapshot().to_json().unwrap();
//!
//! let mut other = Economy::with_seed(2);
//! other.restore(&Snapshot::from_json(&json).unwrap());
//! assert_eq!(other.points(), 1);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::{self, HardwareSlot, MusicId, ResearchId, ThemeId, UpgradeId};
use crate::clock::Clock;
use crate::config::EconomyConfig;
use crate::cosmetics::Wardrobe;
use crate::engine::Economy;
use crate::error::EconomyResult;
use crate::inspection::Inspection;
use crate::inventory::{scaled_cost, Inventory, OwnedUpgrade};
use crate::production::ProductionState;
use crate::progress::Lifetime;
use crate::rng::RandomSource;

/// Current save format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Earnings lead a local save needs to win over a remote one.
pub const CONFLICT_MARGIN: u64 = 1_000;

/// One upgrade entry in a save.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedUpgrade {
    /// Upgrade key.
    pub id: String,
    /// Levels bought.
    #[serde(default)]
    pub level: u32,
    /// Price of the next level; repriced from the level when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_cost: Option<u64>,
}

/// Everything that persists across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    /// Format version.
    pub version: u32,
    /// Currency.
    pub points: u64,
    /// Clicks since the last prestige.
    pub total_clicks: u64,
    /// Earnings since the last prestige.
    pub total_earnings: u64,
    /// Running seconds played.
    pub total_play_time: u64,
    /// Prestige level.
    pub prestige_level: u32,
    /// Tier per hardware slot key.
    pub hardware: BTreeMap<String, u32>,
    /// Evolution stage per evolvable upgrade key.
    pub item_evolutions: BTreeMap<String, u32>,
    /// Unlocked research keys.
    pub unlocked_research: Vec<String>,
    /// Upgrade levels and prices.
    pub upgrades: Vec<SavedUpgrade>,
    /// Highest passive income seen.
    pub max_cps: u64,
    /// Overclocks activated.
    pub total_overclocks: u64,
    /// Coffees drunk.
    pub total_coffees: u64,
    /// Owned theme keys.
    pub owned_themes: Vec<String>,
    /// Owned music keys.
    pub owned_music: Vec<String>,
    /// Active theme key.
    pub active_theme_id: String,
    /// Active music key.
    pub active_music_id: String,
    /// Mug level.
    pub coffee_level: f64,
    /// Epoch milliseconds at which the coffee buff ends.
    pub coffee_buff_end_time: u64,
    /// Overclock seconds remaining.
    pub overclock_time: u32,
    /// Whether the machine is rebooting.
    pub is_crashed: bool,
    /// Reboot seconds remaining.
    pub crash_time: u32,
}

impl Default for Snapshot {
    fn default() -> Self {
        let wardrobe = Wardrobe::default();
        Self {
            version: SNAPSHOT_VERSION,
            points: 0,
            total_clicks: 0,
            total_earnings: 0,
            total_play_time: 0,
            prestige_level: 0,
            hardware: BTreeMap::new(),
            item_evolutions: BTreeMap::new(),
            unlocked_research: Vec::new(),
            upgrades: Vec::new(),
            max_cps: 0,
            total_overclocks: 0,
            total_coffees: 0,
            owned_themes: wardrobe.themes().map(|t| t.to_string()).collect(),
            owned_music: wardrobe.music().map(|m| m.to_string()).collect(),
            active_theme_id: wardrobe.active_theme().to_string(),
            active_music_id: wardrobe.active_music().to_string(),
            coffee_level: 100.0,
            coffee_buff_end_time: 0,
            overclock_time: 0,
            is_crashed: false,
            crash_time: 0,
        }
    }
}

impl Snapshot {
    /// Compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::Codec`](crate::EconomyError::Codec) if encoding fails.
    pub fn to_json(&self) -> EconomyResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::Codec`](crate::EconomyError::Codec) if encoding fails.
    pub fn to_json_pretty(&self) -> EconomyResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode JSON; missing fields take new-game values.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::Codec`](crate::EconomyError::Codec) on malformed input.
    pub fn from_json(json: &str) -> EconomyResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Deterministic hash of every field. Floats hash by bit pattern.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();

        self.version.hash(&mut hasher);
        self.points.hash(&mut hasher);
        self.total_clicks.hash(&mut hasher);
        self.total_earnings.hash(&mut hasher);
        self.total_play_time.hash(&mut hasher);
        self.prestige_level.hash(&mut hasher);

        // BTreeMap iterates in key order
        self.hardware.hash(&mut hasher);
        self.item_evolutions.hash(&mut hasher);
        self.unlocked_research.hash(&mut hasher);
        self.upgrades.hash(&mut hasher);

        self.max_cps.hash(&mut hasher);
        self.total_overclocks.hash(&mut hasher);
        self.total_coffees.hash(&mut hasher);
        self.owned_themes.hash(&mut hasher);
        self.owned_music.hash(&mut hasher);
        self.active_theme_id.hash(&mut hasher);
        self.active_music_id.hash(&mut hasher);

        self.coffee_level.to_bits().hash(&mut hasher);
        self.coffee_buff_end_time.hash(&mut hasher);
        self.overclock_time.hash(&mut hasher);
        self.is_crashed.hash(&mut hasher);
        self.crash_time.hash(&mut hasher);

        hasher.finish()
    }
}

/// Pick between a local and a remote save: local wins only if its lifetime
/// earnings lead by more than [`CONFLICT_MARGIN`].
#[must_use]
pub fn prefer_snapshot(local: Snapshot, remote: Snapshot) -> Snapshot {
    if local.total_earnings > remote.total_earnings.saturating_add(CONFLICT_MARGIN) {
        info!(
            target: "economy.persist",
            local = local.total_earnings,
            remote = remote.total_earnings,
            "keeping local save"
        );
        local
    } else {
        remote
    }
}

/// Parse a key, warning and counting on failure.
fn parse_key<T: FromStr>(key: &str, skipped: &mut usize) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match key.parse() {
        Ok(id) => Some(id),
        Err(err) => {
            warn!(target: "economy.persist", %err, "skipping save entry");
            *skipped += 1;
            None
        }
    }
}

impl<R: RandomSource, C: Clock> Economy<R, C> {
    /// Capture everything that persists.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let inventory = &self.inventory;
        Snapshot {
            version: SNAPSHOT_VERSION,
            points: self.points,
            total_clicks: self.lifetime.clicks,
            total_earnings: self.lifetime.earnings,
            total_play_time: self.lifetime.play_time_secs,
            prestige_level: inventory.prestige_level(),
            hardware: inventory
                .hardware()
                .iter()
                .map(|(slot, tier)| (slot.to_string(), tier))
                .collect(),
            item_evolutions: UpgradeId::ALL
                .iter()
                .filter(|id| catalog::is_evolvable(**id))
                .map(|id| (id.to_string(), inventory.evolution(*id)))
                .collect(),
            unlocked_research: inventory.research().ids().map(|id| id.to_string()).collect(),
            upgrades: inventory
                .upgrades()
                .map(|(id, owned)| SavedUpgrade {
                    id: id.to_string(),
                    level: owned.level,
                    current_cost: Some(owned.current_cost),
                })
                .collect(),
            max_cps: self.lifetime.max_cps,
            total_overclocks: self.lifetime.overclocks,
            total_coffees: self.lifetime.coffees,
            owned_themes: self.wardrobe.themes().map(|t| t.to_string()).collect(),
            owned_music: self.wardrobe.music().map(|m| m.to_string()).collect(),
            active_theme_id: self.wardrobe.active_theme().to_string(),
            active_music_id: self.wardrobe.active_music().to_string(),
            coffee_level: self.production.coffee_level,
            coffee_buff_end_time: self.production.coffee_buff_end_ms,
            overclock_time: self.production.overclock_secs,
            is_crashed: self.production.crashed,
            crash_time: self.production.crash_secs,
        }
    }

    /// Replace all persisted state with `snapshot`. Returns the number of
    /// entries skipped because their ids are unknown.
    pub fn restore(&mut self, snapshot: &Snapshot) -> usize {
        if snapshot.version > SNAPSHOT_VERSION {
            warn!(
                target: "economy.persist",
                version = snapshot.version,
                supported = SNAPSHOT_VERSION,
                "snapshot is newer than this build"
            );
        }
        let mut skipped = 0;

        let mut inventory = Inventory::new();
        for saved in &snapshot.upgrades {
            if let Some(id) = parse_key::<UpgradeId>(&saved.id, &mut skipped) {
                inventory.set_upgrade(
                    id,
                    OwnedUpgrade {
                        level: saved.level,
                        current_cost: saved.current_cost.unwrap_or_else(|| {
                            scaled_cost(
                                catalog::upgrade(id).base_cost,
                                self.config.cost_growth,
                                saved.level,
                            )
                        }),
                    },
                );
            }
        }
        for (key, tier) in &snapshot.hardware {
            if let Some(slot) = parse_key::<HardwareSlot>(key, &mut skipped) {
                let defined = catalog::hardware_tiers(slot).len();
                if usize::try_from(*tier).map_or(true, |t| t > defined) {
                    warn!(target: "economy.persist", %slot, tier, defined, "tier past catalog, clamping");
                }
                inventory.install(slot, *tier);
            }
        }
        for (key, tier) in &snapshot.item_evolutions {
            if let Some(id) = parse_key::<UpgradeId>(key, &mut skipped) {
                if catalog::is_evolvable(id) {
                    inventory.set_evolution(id, *tier);
                } else {
                    warn!(target: "economy.persist", %id, "upgrade has no evolutions");
                    skipped += 1;
                }
            }
        }
        for key in &snapshot.unlocked_research {
            if let Some(id) = parse_key::<ResearchId>(key, &mut skipped) {
                inventory.unlock(id);
            }
        }
        inventory.set_prestige_level(snapshot.prestige_level);

        let mut wardrobe = Wardrobe::default();
        for key in &snapshot.owned_themes {
            if let Some(id) = parse_key::<ThemeId>(key, &mut skipped) {
                wardrobe.add_theme(id);
            }
        }
        for key in &snapshot.owned_music {
            if let Some(id) = parse_key::<MusicId>(key, &mut skipped) {
                wardrobe.add_music(id);
            }
        }
        let theme = parse_key::<ThemeId>(&snapshot.active_theme_id, &mut skipped);
        if !theme.is_some_and(|id| wardrobe.wear_theme(id)) {
            warn!(target: "economy.persist", theme = %snapshot.active_theme_id, "active theme not owned");
        }
        let track = parse_key::<MusicId>(&snapshot.active_music_id, &mut skipped);
        if !track.is_some_and(|id| wardrobe.play_music(id)) {
            warn!(target: "economy.persist", track = %snapshot.active_music_id, "active track not owned");
        }

        let coffee_max = self.config.coffee_max;
        let coffee_level = if snapshot.coffee_level.is_nan() {
            coffee_max
        } else {
            snapshot.coffee_level.clamp(0.0, coffee_max)
        };
        let production = ProductionState {
            coffee_level,
            coffee_buff_end_ms: snapshot.coffee_buff_end_time,
            overclock_secs: snapshot.overclock_time,
            crashed: snapshot.is_crashed,
            crash_secs: snapshot.crash_time,
        };

        self.points = snapshot.points;
        self.inventory = inventory;
        self.wardrobe = wardrobe;
        self.production = production;
        self.lifetime = Lifetime {
            clicks: snapshot.total_clicks,
            earnings: snapshot.total_earnings,
            play_time_secs: snapshot.total_play_time,
            overclocks: snapshot.total_overclocks,
            coffees: snapshot.total_coffees,
            max_cps: snapshot.max_cps,
        };
        self.inspection = Inspection::default();
        self.recompute();

        info!(
            target: "economy.persist",
            points = self.points,
            prestige = self.inventory.prestige_level(),
            skipped,
            "snapshot restored"
        );
        skipped
    }

    /// A fresh economy loaded from `snapshot`.
    #[must_use]
    pub fn from_snapshot(
        config: EconomyConfig,
        rng: R,
        clock: C,
        snapshot: &Snapshot,
    ) -> Self {
        let mut economy = Self::new(config, rng, clock);
        economy.restore(snapshot);
        economy
    }

    /// Hash of the persisted state.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        self.snapshot().state_hash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::rng::ScriptedSource;

    type TestEconomy = Economy<ScriptedSource, ManualClock>;

    fn economy() -> TestEconomy {
        Economy::new(
            EconomyConfig::ungated(),
            ScriptedSource::never(),
            ManualClock::new(0),
        )
    }

    fn played() -> TestEconomy {
        let mut eco = economy();
        eco.points = 5_000_000;
        eco.buy_upgrade(UpgradeId::Chalk).unwrap();
        eco.buy_upgrade(UpgradeId::Sponge).unwrap();
        eco.evolve_item(UpgradeId::Sponge).unwrap();
        eco.buy_hardware(HardwareSlot::Monitor, 1).unwrap();
        eco.buy_research(ResearchId::CaffeineResearch).unwrap();
        eco.apply(crate::Action::BuyTheme { id: ThemeId::Red }).unwrap();
        eco.apply(crate::Action::SelectTheme { id: ThemeId::Red }).unwrap();
        eco.activate_overclock().unwrap();
        eco.tick_n(3);
        eco.click().unwrap();
        eco
    }

    mod round_trip_tests {
        use super::*;

        #[test]
        fn restore_then_snapshot_is_identity() {
            let eco = played();
            let snap = eco.snapshot();
            let mut other = economy();
            assert_eq!(other.restore(&snap), 0);
            assert_eq!(other.snapshot(), snap);
            assert_eq!(other.click_power(), eco.click_power());
            assert_eq!(other.auto_points(), eco.auto_points());
            assert_eq!(other.inventory(), eco.inventory());
        }

        #[test]
        fn json_round_trip() {
            let snap = played().snapshot();
            let back = Snapshot::from_json(&snap.to_json().unwrap()).unwrap();
            assert_eq!(back, snap);
            assert_eq!(back.state_hash(), snap.state_hash());
        }

        #[test]
        fn field_names_are_camel_case() {
            let value = serde_json::to_value(played().snapshot()).unwrap();
            for key in [
                "totalClicks",
                "itemEvolutions",
                "unlockedResearch",
                "maxCps",
                "activeThemeId",
                "coffeeBuffEndTime",
                "isCrashed",
            ] {
                assert!(value.get(key).is_some(), "missing {key}");
            }
            assert!(value["upgrades"][0].get("currentCost").is_some());
        }
    }

    mod lenient_load_tests {
        use super::*;

        #[test]
        fn empty_object_is_a_new_game() {
            let snap = Snapshot::from_json("{}").unwrap();
            let mut eco = economy();
            eco.restore(&snap);
            assert_eq!(eco.snapshot(), economy().snapshot());
        }

        #[test]
        fn missing_upgrades_start_fresh_and_unknown_are_skipped() {
            let json = r#"{
                "points": 42,
                "upgrades": [
                    {"id": "sponge", "level": 3, "currentCost": 338},
                    {"id": "laser_pointer", "level": 9, "currentCost": 1}
                ],
                "hardware": {"mouse": 1, "toaster": 2},
                "unlockedResearch": ["it_certificate", "time_travel"]
            }"#;
            let mut eco = economy();
            let skipped = eco.restore(&Snapshot::from_json(json).unwrap());
            assert_eq!(skipped, 3);
            assert_eq!(eco.points(), 42);
            assert_eq!(eco.inventory().upgrade(UpgradeId::Sponge).level, 3);
            assert_eq!(
                eco.inventory().upgrade(UpgradeId::Chalk),
                OwnedUpgrade::fresh(UpgradeId::Chalk)
            );
            assert_eq!(eco.inventory().hardware().get(HardwareSlot::Mouse), 1);
            assert!(eco.inventory().has_research(ResearchId::ItCertificate));
            assert_eq!(eco.auto_points(), 15);
            assert_eq!(eco.click_power(), 2);
        }

        #[test]
        fn missing_cost_is_repriced_from_level() {
            let json = r#"{"points": 0, "upgrades": [{"id": "chalk", "level": 3}]}"#;
            let mut eco = economy();
            assert_eq!(eco.restore(&Snapshot::from_json(json).unwrap()), 0);
            let chalk = eco.inventory().upgrade(UpgradeId::Chalk);
            assert_eq!(chalk.level, 3);
            assert_eq!(chalk.current_cost, 51);
            assert_eq!(
                eco.buy_upgrade(UpgradeId::Chalk),
                Err(crate::Rejection::InsufficientFunds {
                    cost: 51,
                    available: 0
                })
            );
            assert_eq!(eco.inventory().upgrade(UpgradeId::Chalk).level, 3);
        }

        #[test]
        fn unowned_active_theme_falls_back() {
            let json = r#"{"activeThemeId": "gold", "activeMusicId": "track1"}"#;
            let mut eco = economy();
            eco.restore(&Snapshot::from_json(json).unwrap());
            assert_eq!(eco.wardrobe().active_theme(), ThemeId::Dark);
            assert_eq!(eco.wardrobe().active_music(), MusicId::Silence);
        }

        #[test]
        fn coffee_is_clamped() {
            let mut eco = economy();
            eco.restore(&Snapshot {
                coffee_level: 250.0,
                ..Snapshot::default()
            });
            assert!((eco.coffee_level() - 100.0).abs() < f64::EPSILON);
        }

        #[test]
        fn crash_state_survives_load() {
            let mut eco = economy();
            eco.restore(&Snapshot {
                is_crashed: true,
                crash_time: 7,
                ..Snapshot::default()
            });
            assert!(eco.is_crashed());
            assert_eq!(eco.crash_secs(), 7);
        }

        #[test]
        fn malformed_json_is_an_error() {
            assert!(Snapshot::from_json("{\"points\": \"lots\"}").is_err());
        }
    }

    mod conflict_tests {
        use super::*;

        fn with_earnings(total_earnings: u64) -> Snapshot {
            Snapshot {
                total_earnings,
                ..Snapshot::default()
            }
        }

        #[test]
        fn local_needs_a_clear_lead() {
            let chosen = prefer_snapshot(with_earnings(2_001), with_earnings(1_000));
            assert_eq!(chosen.total_earnings, 2_001);
            let chosen = prefer_snapshot(with_earnings(2_000), with_earnings(1_000));
            assert_eq!(chosen.total_earnings, 1_000);
            let chosen = prefer_snapshot(with_earnings(0), with_earnings(50));
            assert_eq!(chosen.total_earnings, 50);
        }
    }

    #[test]
    fn hash_changes_with_state() {
        let mut eco = economy();
        let before = eco.state_hash();
        eco.click().unwrap();
        assert_ne!(eco.state_hash(), before);
    }
}
