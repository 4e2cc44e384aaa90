//! Catalog data. Order of the id-indexed tables must follow the id enums.

use super::{
    EvolutionDef, HardwareEffect, HardwareTierDef, MusicDef, ProductionKind, Rank, ResearchDef,
    ResearchId, ThemeDef, UpgradeDef, UpgradeId,
};
use super::{MusicId, ThemeId};

use HardwareEffect::{
    ClickBonus, CritChance, CritMultiplier, GlobalMultiplier, OverclockDuration,
    OverclockMultiplier, RiskReduction, UnlockTier,
};
use ProductionKind::{Auto, Click};

const fn up(
    id: UpgradeId,
    tier: u8,
    name: &'static str,
    base_cost: u64,
    base_effect: u64,
    kind: ProductionKind,
) -> UpgradeDef {
    UpgradeDef {
        id,
        tier,
        name,
        base_cost,
        base_effect,
        kind,
    }
}

const fn hw(id: &'static str, name: &'static str, cost: u64, effect: HardwareEffect) -> HardwareTierDef {
    HardwareTierDef {
        id,
        name,
        cost,
        effect,
    }
}

const fn evo(tier: u32, name: &'static str, multiplier: f64, cost: Option<u64>) -> EvolutionDef {
    EvolutionDef {
        tier,
        name,
        multiplier,
        cost,
    }
}

pub(super) static UPGRADES: [UpgradeDef; UpgradeId::COUNT] = [
    up(UpgradeId::Chalk, 1, "Złamana Kreda", 15, 1, Click),
    up(UpgradeId::Sponge, 1, "Gąbka Nasiąknięta Strachem", 100, 5, Auto),
    up(UpgradeId::Keys, 1, "Klucze Woźnego", 500, 12, Auto),
    up(UpgradeId::Quiz, 1, "Niezapowiedziana Kartkówka", 1_200, 25, Auto),
    up(UpgradeId::CoffeeMachine, 1, "Automat z Kawą", 3_000, 50, Auto),
    up(UpgradeId::Zbyszko, 2, "Syn w Zbyszko 3 Cytryny", 10_000, 150, Auto),
    up(UpgradeId::Pen, 2, "Złoty Długopis Oceniania", 50_000, 400, Click),
    up(UpgradeId::Physics, 2, "Podręcznik Zakazanej Fizyki", 150_000, 1_000, Auto),
    up(UpgradeId::Projector, 2, "Projektor z 1995", 500_000, 2_500, Auto),
    up(UpgradeId::Ai, 2, "Dziennik Elektroniczny AI", 1_500_000, 6_000, Auto),
    up(UpgradeId::Explosion, 3, "Eksplozja Wiedzy", 10_000_000, 20_000, Auto),
    up(UpgradeId::Cloning, 3, "Klonowanie Nierodki", 50_000_000, 80_000, Auto),
    up(UpgradeId::Parents, 3, "Symulator Wywiadówki", 250_000_000, 250_000, Auto),
    up(UpgradeId::Blackhole, 3, "Czarna Dziura w Sali 105", 1_000_000_000, 1_000_000, Auto),
];

pub(super) static MOUSE: [HardwareTierDef; 3] = [
    hw("mouse_1", "Myszka z Kulką", 50, ClickBonus(1)),
    hw("mouse_2", "Bezprzewodowa", 2_500, ClickBonus(50)),
    hw("mouse_3", "Gryzoń RGB", 50_000, ClickBonus(500)),
];

pub(super) static MONITOR: [HardwareTierDef; 3] = [
    hw("monitor_1", "CRT 14 cali", 1_000, GlobalMultiplier(1.2)),
    hw("monitor_2", "Płaski LCD", 25_000, GlobalMultiplier(2.0)),
    hw("monitor_3", "Ściana Wideo", 1_000_000, GlobalMultiplier(5.0)),
];

pub(super) static KEYBOARD: [HardwareTierDef; 3] = [
    hw("kb_1", "Biblioteczna", 100, UnlockTier(1)),
    hw("kb_2", "Mechaniczna", 10_000, UnlockTier(2)),
    hw("kb_3", "Neural Link", 500_000, UnlockTier(3)),
];

pub(super) static GPU: [HardwareTierDef; 4] = [
    hw("gpu_1", "Zintegrowana Grafika", 1_000, CritChance(0.01)),
    hw("gpu_2", "Riva TNT2", 15_000, CritChance(0.03)),
    hw("gpu_3", "Koparka Kryptowalut", 200_000, CritChance(0.10)),
    hw("gpu_4", "RTX 9090 Ti", 5_000_000, CritChance(0.25)),
];

pub(super) static CPU: [HardwareTierDef; 3] = [
    hw("cpu_1", "Procesor Ziemniaczany", 5_000, CritMultiplier(1.5)),
    hw("cpu_2", "Intel Core i-Nierodka", 100_000, CritMultiplier(3.0)),
    hw("cpu_3", "Kwantowy Mózg", 10_000_000, CritMultiplier(10.0)),
];

pub(super) static RAM: [HardwareTierDef; 3] = [
    hw("ram_1", "Karteczka Samoprzylepna", 500, RiskReduction(0.05)),
    hw("ram_2", "RAM Ściągnięty z Internetu", 5_000, RiskReduction(0.15)),
    hw("ram_3", "Mózg Prymusa", 50_000, RiskReduction(0.50)),
];

pub(super) static COOLING: [HardwareTierDef; 3] = [
    hw("cool_1", "Dmuchanie na Procesor", 1_000, OverclockDuration(5)),
    hw("cool_2", "Wiatrak Biurowy z PRL", 15_000, OverclockDuration(15)),
    hw("cool_3", "Otwarte Okno w Zimie", 200_000, OverclockDuration(40)),
];

pub(super) static POWER: [HardwareTierDef; 3] = [
    hw("psu_1", "Chomik w Kołowrotku", 2_000, OverclockMultiplier(2.2)),
    hw("psu_2", "Kabel od Sąsiada", 25_000, OverclockMultiplier(3.0)),
    hw("psu_3", "Mini-Reaktor Czarnobylski", 500_000, OverclockMultiplier(5.0)),
];

pub(super) static CHALK_EVOLUTIONS: [EvolutionDef; 3] = [
    evo(0, "Złamana Kreda", 1.0, None),
    evo(1, "Solidna Kreda", 5.0, Some(10_000)),
    evo(2, "Kreda Laserowa", 20.0, Some(250_000)),
];

pub(super) static SPONGE_EVOLUTIONS: [EvolutionDef; 3] = [
    evo(0, "Brudna Gąbka", 1.0, None),
    evo(1, "Gąbka z Mikrofibry", 5.0, Some(25_000)),
    evo(2, "Czarna Dziura Chłonna", 25.0, Some(500_000)),
];

pub(super) static QUIZ_EVOLUTIONS: [EvolutionDef; 3] = [
    evo(0, "Kartkówka", 1.0, None),
    evo(1, "Sprawdzian Semestralny", 4.0, Some(100_000)),
    evo(2, "Egzamin Dojrzałości", 15.0, Some(2_000_000)),
];

pub(super) static RESEARCH: [ResearchDef; ResearchId::COUNT] = [
    ResearchDef {
        id: ResearchId::CaffeineResearch,
        name: "Badania nad Kofeiną",
        cost: 500,
        requires: None,
    },
    ResearchDef {
        id: ResearchId::OverclockLicense,
        name: "Licencja na Podkręcanie",
        cost: 2_000,
        requires: None,
    },
    ResearchDef {
        id: ResearchId::ItCertificate,
        name: "Certyfikat Informatyka",
        cost: 10_000,
        requires: None,
    },
    ResearchDef {
        id: ResearchId::BiggerMug,
        name: "Większy Kubek",
        cost: 5_000,
        requires: Some(ResearchId::CaffeineResearch),
    },
    ResearchDef {
        id: ResearchId::StrongerBrew,
        name: "Mocniejsza Parzona",
        cost: 15_000,
        requires: Some(ResearchId::CaffeineResearch),
    },
];

pub(super) static THEMES: [ThemeDef; ThemeId::COUNT] = [
    ThemeDef {
        id: ThemeId::Dark,
        name: "Domyślny Mrok",
        cost: 0,
    },
    ThemeDef {
        id: ThemeId::Red,
        name: "Krwawa Kartkówka",
        cost: 50_000,
    },
    ThemeDef {
        id: ThemeId::Neon,
        name: "Cyber-Nierodka",
        cost: 100_000,
    },
    ThemeDef {
        id: ThemeId::Gold,
        name: "Złoty Długopis",
        cost: 1_000_000,
    },
];

pub(super) static MUSIC: [MusicDef; MusicId::COUNT] = [
    MusicDef {
        id: MusicId::Silence,
        name: "Cisza Egzaminacyjna",
        cost: 0,
    },
    MusicDef {
        id: MusicId::Lofi,
        name: "LoFi do Sprawdzania Prac",
        cost: 5_000,
    },
    MusicDef {
        id: MusicId::Techno,
        name: "Techno Dzwonek",
        cost: 25_000,
    },
    MusicDef {
        id: MusicId::Classical,
        name: "Symfonia Cierpienia",
        cost: 100_000,
    },
];

/// Rank thresholds over lifetime earnings, sorted ascending.
pub const RANKS: &[Rank] = &[
    Rank {
        threshold: 0,
        title: "Amator Kredy",
    },
    Rank {
        threshold: 1_000,
        title: "Czeladnik Mazaka",
    },
    Rank {
        threshold: 10_000,
        title: "Magister Cytrynologii",
    },
    Rank {
        threshold: 100_000,
        title: "Doktor Habilitowany Absurdu",
    },
    Rank {
        threshold: 1_000_000,
        title: "Profesor Nierodka",
    },
    Rank {
        threshold: 10_000_000,
        title: "Minister Edukacji Wszechświata",
    },
];
