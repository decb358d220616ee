//! Game settings and preferences
//!
//! Persisted as JSON next to the binary (or wherever `--settings` points).

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Difficulty levels, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Peon,
    Hero,
    Legend,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Peon, Difficulty::Hero, Difficulty::Legend];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Peon => "PEON",
            Difficulty::Hero => "HERO",
            Difficulty::Legend => "LEGEND",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "peon" | "0" => Some(Difficulty::Peon),
            "hero" | "1" => Some(Difficulty::Hero),
            "legend" | "2" => Some(Difficulty::Legend),
            _ => None,
        }
    }

    /// Skulls in play at this difficulty
    pub fn skull_count(&self) -> usize {
        match self {
            Difficulty::Peon => 3,
            Difficulty::Hero => 6,
            Difficulty::Legend => 12,
        }
    }

    /// Next level, wrapping Legend back to Peon
    pub fn next(self) -> Self {
        match self {
            Difficulty::Peon => Difficulty::Hero,
            Difficulty::Hero => Difficulty::Legend,
            Difficulty::Legend => Difficulty::Peon,
        }
    }

    /// Previous level, wrapping Peon to Legend
    pub fn prev(self) -> Self {
        match self {
            Difficulty::Peon => Difficulty::Legend,
            Difficulty::Hero => Difficulty::Peon,
            Difficulty::Legend => Difficulty::Hero,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Master volume (0 - 100)
    pub volume: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Peon,
            volume: 100,
        }
    }
}

impl Settings {
    /// Default file name used by the binary
    pub const FILE_NAME: &'static str = "skullamanjaro_settings.json";

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(mut settings) => {
                settings.volume = settings.volume.min(100);
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to `path` as pretty JSON
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_wraps() {
        assert_eq!(Difficulty::Legend.next(), Difficulty::Peon);
        assert_eq!(Difficulty::Peon.prev(), Difficulty::Legend);
        for d in Difficulty::ALL {
            assert_eq!(d.next().prev(), d);
        }
    }

    #[test]
    fn test_skull_counts() {
        let counts: Vec<usize> = Difficulty::ALL.iter().map(|d| d.skull_count()).collect();
        assert_eq!(counts, vec![3, 6, 12]);
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("Legend"), Some(Difficulty::Legend));
        assert_eq!(Difficulty::from_str("1"), Some(Difficulty::Hero));
        assert_eq!(Difficulty::from_str("god"), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            difficulty: Difficulty::Hero,
            volume: 42,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "difficulty": "Legend" }"#).unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.difficulty, Difficulty::Legend);
        assert_eq!(settings.volume, 100);
    }
}
