//! Scripted player behaviour.
//!
//! A [`Strategy`] looks at the economy once per tick and proposes actions.
//! It never mutates anything; the runner applies the proposals in order
//! and counts the rejections.

use serde::{Deserialize, Serialize};

use nierodka_core::{Action, Clock, Economy, Purchase, RandomSource, ResearchId};

/// Decides what to do each tick.
pub trait Strategy: Send {
    /// Short name for reports and logs.
    fn name(&self) -> &'static str;

    /// Actions to attempt this tick, in order.
    fn decide<R: RandomSource, C: Clock>(&mut self, economy: &Economy<R, C>) -> Vec<Action>;
}

/// Built-in strategies, selectable from a run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Never acts.
    Idle,
    /// Only clicks.
    Clicker,
    /// Clicks and buys by payback time.
    GreedyRoi,
}

impl StrategyKind {
    /// Instantiate with the given click rate.
    #[must_use]
    pub fn build(self, clicks_per_tick: u32) -> AnyStrategy {
        match self {
            StrategyKind::Idle => AnyStrategy::Idle(Idle),
            StrategyKind::Clicker => AnyStrategy::Clicker(Clicker { clicks_per_tick }),
            StrategyKind::GreedyRoi => AnyStrategy::GreedyRoi(GreedyRoi { clicks_per_tick }),
        }
    }
}

/// One of the built-in strategies.
#[derive(Debug, Clone)]
pub enum AnyStrategy {
    /// See [`Idle`].
    Idle(Idle),
    /// See [`Clicker`].
    Clicker(Clicker),
    /// See [`GreedyRoi`].
    GreedyRoi(GreedyRoi),
}

impl Strategy for AnyStrategy {
    fn name(&self) -> &'static str {
        match self {
            AnyStrategy::Idle(s) => s.name(),
            AnyStrategy::Clicker(s) => s.name(),
            AnyStrategy::GreedyRoi(s) => s.name(),
        }
    }

    fn decide<R: RandomSource, C: Clock>(&mut self, economy: &Economy<R, C>) -> Vec<Action> {
        match self {
            AnyStrategy::Idle(s) => s.decide(economy),
            AnyStrategy::Clicker(s) => s.decide(economy),
            AnyStrategy::GreedyRoi(s) => s.decide(economy),
        }
    }
}

// =============================================================================
// Idle
// =============================================================================

/// Leaves the game running and never touches it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl Strategy for Idle {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn decide<R: RandomSource, C: Clock>(&mut self, _economy: &Economy<R, C>) -> Vec<Action> {
        Vec::new()
    }
}

// =============================================================================
// Clicker
// =============================================================================

/// Clicks at a fixed rate and buys nothing.
#[derive(Debug, Clone, Copy)]
pub struct Clicker {
    /// Clicks per tick.
    pub clicks_per_tick: u32,
}

impl Strategy for Clicker {
    fn name(&self) -> &'static str {
        "clicker"
    }

    fn decide<R: RandomSource, C: Clock>(&mut self, economy: &Economy<R, C>) -> Vec<Action> {
        if economy.is_crashed() {
            return Vec::new();
        }
        clicks(self.clicks_per_tick)
    }
}

fn clicks(n: u32) -> Vec<Action> {
    (0..n).map(|_| Action::Click).collect()
}

// =============================================================================
// Greedy ROI
// =============================================================================

/// Research bought as soon as it is affordable, in this order.
const RESEARCH_ORDER: [ResearchId; 5] = [
    ResearchId::OverclockLicense,
    ResearchId::CaffeineResearch,
    ResearchId::ItCertificate,
    ResearchId::BiggerMug,
    ResearchId::StrongerBrew,
];

/// Buys whatever pays for itself fastest.
///
/// Payback is `cost / gain`, where gain is the extra passive income plus the
/// extra click income at `clicks_per_tick`. Research has no direct gain and
/// is bought in a fixed order instead. Also drinks coffee whenever the buff
/// is down, overclocks when idle, claims inspections and prestiges at the
/// threshold.
#[derive(Debug, Clone, Copy)]
pub struct GreedyRoi {
    /// Clicks per tick.
    pub clicks_per_tick: u32,
}

impl GreedyRoi {
    #[allow(clippy::cast_precision_loss)]
    fn best_purchase<R: RandomSource, C: Clock>(&self, economy: &Economy<R, C>) -> Option<Purchase> {
        let click_weight = u64::from(self.clicks_per_tick);
        let income = |click: u64, auto: u64| auto.saturating_add(click.saturating_mul(click_weight));
        let now = income(economy.click_power(), economy.auto_points());

        economy
            .open_purchases()
            .into_iter()
            .filter(|p| !matches!(p, Purchase::Research { .. }))
            .filter_map(|p| {
                let preview = economy.preview_purchase(p).ok()?;
                let gain = income(preview.click_power, preview.auto_points).saturating_sub(now);
                (preview.affordable && gain > 0).then(|| (p, preview.cost as f64 / gain as f64))
            })
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(p, _)| p)
    }

    fn next_research<R: RandomSource, C: Clock>(economy: &Economy<R, C>) -> Option<Purchase> {
        RESEARCH_ORDER
            .iter()
            .map(|id| Purchase::Research { id: *id })
            .find(|p| {
                economy
                    .preview_purchase(*p)
                    .is_ok_and(|preview| preview.affordable)
            })
    }
}

impl Strategy for GreedyRoi {
    fn name(&self) -> &'static str {
        "greedy_roi"
    }

    fn decide<R: RandomSource, C: Clock>(&mut self, economy: &Economy<R, C>) -> Vec<Action> {
        if economy.is_crashed() {
            return Vec::new();
        }
        if economy.points() >= economy.config().prestige_threshold {
            return vec![Action::PrestigeReset];
        }

        let mut actions = clicks(self.clicks_per_tick);
        if economy.inspection().visible() {
            actions.push(Action::ClaimInspection);
        }
        if let Some(research) = Self::next_research(economy) {
            actions.push(research.into());
        } else if let Some(purchase) = self.best_purchase(economy) {
            actions.push(purchase.into());
        }

        let inventory = economy.inventory();
        if inventory.has_research(ResearchId::CaffeineResearch)
            && !economy.coffee_buff_active()
            && economy.coffee_level() < economy.config().coffee_max
        {
            actions.push(Action::DrinkCoffee);
        }
        if inventory.has_research(ResearchId::OverclockLicense) && economy.overclock_secs() == 0 {
            actions.push(Action::ActivateOverclock);
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nierodka_core::{ChaChaSource, EconomyConfig, ManualClock, Snapshot, UpgradeId};

    type SimEconomy = Economy<ChaChaSource, ManualClock>;

    fn economy(points: u64) -> SimEconomy {
        let mut eco = Economy::new(
            EconomyConfig::default(),
            ChaChaSource::from_seed(0),
            ManualClock::new(0),
        );
        eco.restore(&Snapshot {
            points,
            ..Snapshot::default()
        });
        eco
    }

    #[test]
    fn idle_does_nothing() {
        assert!(Idle.decide(&economy(1_000)).is_empty());
    }

    #[test]
    fn clicker_clicks() {
        let actions = Clicker { clicks_per_tick: 3 }.decide(&economy(0));
        assert_eq!(actions, vec![Action::Click; 3]);
    }

    #[test]
    fn greedy_buys_best_payback() {
        // chalk: 15 for +1 click (x5) = 3.0; sponge: 100 for +5 auto = 20.0
        let mut greedy = GreedyRoi { clicks_per_tick: 5 };
        let actions = greedy.decide(&economy(200));
        assert!(actions.contains(&Action::BuyUpgrade { id: UpgradeId::Chalk }));
    }

    #[test]
    fn greedy_without_clicks_prefers_income() {
        let mut greedy = GreedyRoi { clicks_per_tick: 0 };
        let actions = greedy.decide(&economy(200));
        assert_eq!(actions, vec![Action::BuyUpgrade { id: UpgradeId::Sponge }]);
    }

    #[test]
    fn greedy_buys_research_first() {
        let mut greedy = GreedyRoi { clicks_per_tick: 0 };
        let actions = greedy.decide(&economy(2_500));
        assert_eq!(
            actions,
            vec![Action::BuyResearch {
                id: ResearchId::OverclockLicense
            }]
        );
    }

    #[test]
    fn greedy_prestiges_at_threshold() {
        let mut greedy = GreedyRoi { clicks_per_tick: 5 };
        assert_eq!(
            greedy.decide(&economy(1_000_000_000)),
            vec![Action::PrestigeReset]
        );
    }

    #[test]
    fn kinds_round_trip_through_json() {
        let kind: StrategyKind = serde_json::from_str("\"greedy_roi\"").unwrap();
        assert_eq!(kind, StrategyKind::GreedyRoi);
        assert_eq!(kind.build(2).name(), "greedy_roi");
    }
}
