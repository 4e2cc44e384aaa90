//! Typed identifiers for catalog entries.
//!
//! Every identifier has a stable string key matching the save format, so
//! snapshots written by the browser client keep loading. Parsing an unknown
//! key yields [`EconomyError::UnknownId`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EconomyError;

macro_rules! catalog_ids {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $key:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl $name {
            /// Every identifier, in catalog order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Number of identifiers.
            pub const COUNT: usize = Self::ALL.len();

            /// Stable string key used in saves.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            /// Position of this identifier in [`Self::ALL`].
            #[must_use]
            pub const fn index(self) -> usize {
                self as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = EconomyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($key => Ok($name::$variant),)+
                    other => Err(EconomyError::UnknownId {
                        kind: $kind,
                        id: other.to_string(),
                    }),
                }
            }
        }
    };
}

catalog_ids! {
    /// Shop upgrade identifier.
    UpgradeId, "upgrade" {
        /// Broken chalk (tier 1, click).
        Chalk => "chalk",
        /// Fear-soaked sponge (tier 1, auto).
        Sponge => "sponge",
        /// Janitor's keys (tier 1, auto).
        Keys => "keys",
        /// Surprise quiz (tier 1, auto).
        Quiz => "quiz",
        /// Coffee vending machine (tier 1, auto).
        CoffeeMachine => "coffee_machine",
        /// Son in a lemon soda (tier 2, auto).
        Zbyszko => "zbyszko",
        /// Golden grading pen (tier 2, click).
        Pen => "pen",
        /// Forbidden physics textbook (tier 2, auto).
        Physics => "physics",
        /// Projector from 1995 (tier 2, auto).
        Projector => "projector",
        /// AI grade book (tier 2, auto).
        Ai => "ai",
        /// Knowledge explosion (tier 3, auto).
        Explosion => "explosion",
        /// Teacher cloning (tier 3, auto).
        Cloning => "clone",
        /// Parent-teacher meeting simulator (tier 3, auto).
        Parents => "parents",
        /// Black hole in room 105 (tier 3, auto).
        Blackhole => "blackhole",
    }
}

catalog_ids! {
    /// Hardware slot of the player's workstation.
    HardwareSlot, "hardware slot" {
        /// Flat click bonus.
        Mouse => "mouse",
        /// Global production multiplier.
        Monitor => "monitor",
        /// Unlocks shop tiers.
        Keyboard => "keyboard",
        /// Critical click chance.
        Gpu => "gpu",
        /// Critical click multiplier bonus.
        Cpu => "cpu",
        /// Overclock crash-risk reduction.
        Ram => "ram",
        /// Overclock duration bonus.
        Cooling => "cooling",
        /// Overclock multiplier.
        Power => "power",
        /// Cosmetic case slot with no purchasable tiers.
        Case => "case",
    }
}

catalog_ids! {
    /// One-shot research unlock.
    ResearchId, "research" {
        /// Enables the coffee mug and its depletion debuff.
        CaffeineResearch => "caffeine_research",
        /// Enables the overclock switch.
        OverclockLicense => "overclock_license",
        /// Enables hardware tiers above 1.
        ItCertificate => "it_certificate",
        /// Longer coffee buff.
        BiggerMug => "bigger_mug",
        /// Stronger coffee buff.
        StrongerBrew => "stronger_brew",
    }
}

catalog_ids! {
    /// Colour theme.
    ThemeId, "theme" {
        /// Default dark theme, owned from the start.
        Dark => "default",
        /// Red theme.
        Red => "red",
        /// Neon theme.
        Neon => "neon",
        /// Gold theme.
        Gold => "gold",
    }
}

catalog_ids! {
    /// Background music track.
    MusicId, "music track" {
        /// Exam silence, owned from the start.
        Silence => "silence",
        /// Lo-fi grading beats.
        Lofi => "lofi",
        /// Bell techno.
        Techno => "techno",
        /// Symphony of suffering.
        Classical => "classical",
    }
}
