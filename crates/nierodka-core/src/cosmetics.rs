//! Themes and music tracks.
//!
//! Cosmetics are bought once, never affect production, and survive prestige.

use std::collections::BTreeSet;
use std::fmt;

use crate::catalog::{MusicId, ThemeId};

/// A purchasable cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cosmetic {
    /// Colour theme.
    Theme(ThemeId),
    /// Music track.
    Music(MusicId),
}

impl fmt::Display for Cosmetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cosmetic::Theme(id) => write!(f, "theme `{id}`"),
            Cosmetic::Music(id) => write!(f, "music track `{id}`"),
        }
    }
}

/// Owned and active cosmetics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Wardrobe {
    owned_themes: BTreeSet<ThemeId>,
    active_theme: ThemeId,
    owned_music: BTreeSet<MusicId>,
    active_music: MusicId,
}

impl Default for Wardrobe {
    fn default() -> Self {
        Self {
            owned_themes: BTreeSet::from([ThemeId::Dark]),
            active_theme: ThemeId::Dark,
            owned_music: BTreeSet::from([MusicId::Silence]),
            active_music: MusicId::Silence,
        }
    }
}

impl Wardrobe {
    /// Whether `theme` is owned.
    #[must_use]
    pub fn owns_theme(&self, theme: ThemeId) -> bool {
        self.owned_themes.contains(&theme)
    }

    /// Whether `track` is owned.
    #[must_use]
    pub fn owns_music(&self, track: MusicId) -> bool {
        self.owned_music.contains(&track)
    }

    /// Owned themes in catalog order.
    pub fn themes(&self) -> impl Iterator<Item = ThemeId> + '_ {
        self.owned_themes.iter().copied()
    }

    /// Owned tracks in catalog order.
    pub fn music(&self) -> impl Iterator<Item = MusicId> + '_ {
        self.owned_music.iter().copied()
    }

    /// Theme in use.
    #[must_use]
    pub fn active_theme(&self) -> ThemeId {
        self.active_theme
    }

    /// Track in use.
    #[must_use]
    pub fn active_music(&self) -> MusicId {
        self.active_music
    }

    pub(crate) fn add_theme(&mut self, theme: ThemeId) {
        self.owned_themes.insert(theme);
    }

    pub(crate) fn add_music(&mut self, track: MusicId) {
        self.owned_music.insert(track);
    }

    /// Switch theme; `false` if not owned.
    pub(crate) fn wear_theme(&mut self, theme: ThemeId) -> bool {
        let owned = self.owns_theme(theme);
        if owned {
            self.active_theme = theme;
        }
        owned
    }

    /// Switch track; `false` if not owned.
    pub(crate) fn play_music(&mut self, track: MusicId) -> bool {
        let owned = self.owns_music(track);
        if owned {
            self.active_music = track;
        }
        owned
    }
}
