//! Player preferences
//!
//! Persisted separately from high scores in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform::storage;

/// Snake colour scheme, unlocked by reaching a high score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Skin {
    #[default]
    Basic,
    Golden,
    Neon,
}

impl Skin {
    pub const ALL: [Skin; 3] = [Skin::Basic, Skin::Golden, Skin::Neon];

    pub fn as_str(&self) -> &'static str {
        match self {
            Skin::Basic => "Basic",
            Skin::Golden => "Golden",
            Skin::Neon => "Neon",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "basic" => Some(Skin::Basic),
            "golden" | "gold" => Some(Skin::Golden),
            "neon" => Some(Skin::Neon),
            _ => None,
        }
    }

    /// High score needed to unlock this skin
    pub fn unlock_threshold(&self) -> u64 {
        match self {
            Skin::Basic => 0,
            Skin::Golden => 5000,
            Skin::Neon => 10000,
        }
    }

    pub fn is_unlocked(&self, high_score: u64) -> bool {
        high_score >= self.unlock_threshold()
    }

    /// All skins available at this high score
    pub fn unlocked(high_score: u64) -> Vec<Skin> {
        Self::ALL
            .into_iter()
            .filter(|s| s.is_unlocked(high_score))
            .collect()
    }

    /// Body fill colour
    pub fn body_color(&self) -> &'static str {
        match self {
            Skin::Basic => "#4CAF50",
            Skin::Golden => "#FFC107",
            Skin::Neon => "#00E5FF",
        }
    }

    /// Head fill colour
    pub fn head_color(&self) -> &'static str {
        match self {
            Skin::Basic => "#2E7D32",
            Skin::Golden => "#FF8F00",
            Skin::Neon => "#D500F9",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Sound effects on/off
    pub audio_enabled: bool,
    /// Sound effects volume (0.0 - 1.0)
    pub volume: f32,
    /// Selected snake skin
    #[serde(default)]
    pub skin: Skin,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            audio_enabled: true,
            volume: 0.7,
            skin: Skin::Basic,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "fruit_snake_settings";

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn toggle_audio(&mut self) -> bool {
        self.audio_enabled = !self.audio_enabled;
        self.audio_enabled
    }

    /// Select a skin if the high score allows it
    pub fn select_skin(&mut self, skin: Skin, high_score: u64) -> bool {
        if skin.is_unlocked(high_score) {
            self.skin = skin;
            true
        } else {
            false
        }
    }

    /// Skin to actually draw (falls back if the saved one is still locked)
    pub fn effective_skin(&self, high_score: u64) -> Skin {
        if self.skin.is_unlocked(high_score) {
            self.skin
        } else {
            Skin::Basic
        }
    }

    /// Load settings from LocalStorage (defaults on native or when missing)
    pub fn load() -> Self {
        match storage::load_json::<Settings>(Self::STORAGE_KEY) {
            Some(mut settings) => {
                settings.set_volume(settings.volume);
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage
    pub fn save(&self) {
        if storage::save_json(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skin_thresholds() {
        assert_eq!(Skin::Basic.unlock_threshold(), 0);
        assert_eq!(Skin::Golden.unlock_threshold(), 5000);
        assert_eq!(Skin::Neon.unlock_threshold(), 10000);
        assert_eq!(Skin::unlocked(0), vec![Skin::Basic]);
        assert_eq!(Skin::unlocked(5000), vec![Skin::Basic, Skin::Golden]);
        assert_eq!(Skin::unlocked(12000).len(), 3);
    }

    #[test]
    fn test_skin_from_str() {
        assert_eq!(Skin::from_str("NEON"), Some(Skin::Neon));
        assert_eq!(Skin::from_str("gold"), Some(Skin::Golden));
        assert_eq!(Skin::from_str("plaid"), None);
    }

    #[test]
    fn test_select_locked_skin() {
        let mut settings = Settings::default();
        assert!(!settings.select_skin(Skin::Neon, 4000));
        assert_eq!(settings.skin, Skin::Basic);
        assert!(settings.select_skin(Skin::Golden, 6000));
        assert_eq!(settings.effective_skin(6000), Skin::Golden);
        assert_eq!(settings.effective_skin(100), Skin::Basic);
    }

    #[test]
    fn test_volume_clamped() {
        let mut settings = Settings::default();
        settings.set_volume(1.5);
        assert_eq!(settings.volume, 1.0);
        settings.set_volume(-0.2);
        assert_eq!(settings.volume, 0.0);
    }

    #[test]
    fn test_toggle_audio() {
        let mut settings = Settings::default();
        assert!(!settings.toggle_audio());
        assert!(settings.toggle_audio());
    }

    #[test]
    fn test_json_without_skin_uses_default() {
        let settings: Settings =
            serde_json::from_str(r#"{"audio_enabled":false,"volume":0.4}"#).unwrap();
        assert!(!settings.audio_enabled);
        assert_eq!(settings.skin, Skin::Basic);
    }

    #[test]
    fn test_native_load_gives_defaults() {
        let settings = Settings::load();
        assert!(settings.audio_enabled);
        assert_eq!(settings.volume, 0.7);
    }
}
