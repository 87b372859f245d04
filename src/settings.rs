//! Display and runtime settings
//!
//! Read from a flat `key=value` text file (one pair per line, `#` comments).
//! Command-line flags override whatever the file says.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::ScaleContext;

/// Window size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ResolutionPreset {
    Small,
    #[default]
    Medium,
    Large,
}

impl ResolutionPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionPreset::Small => "Small",
            ResolutionPreset::Medium => "Medium",
            ResolutionPreset::Large => "Large",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "small" => Some(ResolutionPreset::Small),
            "medium" | "med" => Some(ResolutionPreset::Medium),
            "large" => Some(ResolutionPreset::Large),
            _ => None,
        }
    }

    /// Window size in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            ResolutionPreset::Small => (842, 616),
            ResolutionPreset::Medium => (1263, 924),
            ResolutionPreset::Large => (1685, 1232),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub resolution: ResolutionPreset,
    /// Explicit size; overrides the preset when set
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Fish-only rounds
    pub hazard_free: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolution: ResolutionPreset::Medium,
            width: None,
            height: None,
            tick_rate: 60,
            hazard_free: false,
        }
    }
}

impl Settings {
    /// Effective window size
    pub fn dimensions(&self) -> (u32, u32) {
        let (w, h) = self.resolution.dimensions();
        (self.width.unwrap_or(w), self.height.unwrap_or(h))
    }

    pub fn scale_context(&self) -> ScaleContext {
        let (w, h) = self.dimensions();
        ScaleContext::new(w as f32, h as f32)
    }

    /// Milliseconds per simulation tick
    pub fn tick_period_ms(&self) -> u64 {
        (1000 / u64::from(self.tick_rate.max(1))).max(1)
    }

    /// Parse `key=value` lines on top of the defaults. Bad values are logged
    /// and skipped.
    pub fn from_kv_str(text: &str) -> Self {
        let mut settings = Self::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                log::warn!("Ignoring malformed settings line: {line}");
                continue;
            };
            settings.apply(key.trim(), value.trim());
        }
        settings
    }

    fn apply(&mut self, key: &str, value: &str) {
        let applied = match key {
            "resolution_width" => parse_side(value).map(|w| self.width = Some(w)).is_some(),
            "resolution_height" => parse_side(value).map(|h| self.height = Some(h)).is_some(),
            "resolution" => ResolutionPreset::from_str(value)
                .map(|preset| self.resolution = preset)
                .is_some(),
            "tick_rate" => match value.parse::<u32>() {
                Ok(rate) if rate > 0 => {
                    self.tick_rate = rate;
                    true
                }
                _ => false,
            },
            "hazard_free" => parse_bool(value)
                .map(|flag| self.hazard_free = flag)
                .is_some(),
            _ => {
                log::debug!("Unknown settings key: {key}");
                true
            }
        };
        if !applied {
            log::warn!("Invalid value for {key}: {value}");
        }
    }

    pub fn to_kv_string(&self) -> String {
        let (w, h) = self.dimensions();
        format!(
            "resolution={}\nresolution_width={w}\nresolution_height={h}\ntick_rate={}\nhazard_free={}\n",
            self.resolution.as_str(),
            self.tick_rate,
            self.hazard_free
        )
    }

    /// Load from a config file, falling back to defaults when it can't be read
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let settings = Self::from_kv_str(&text);
                let (w, h) = settings.dimensions();
                log::info!("Loaded settings from {}: {w}x{h}", path.display());
                settings
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("Failed to read {}: {err}, using defaults", path.display());
                Self::default()
            }
        }
    }
}

/// Window side in pixels; zero is rejected
fn parse_side(value: &str) -> Option<u32> {
    value.parse().ok().filter(|&side| side > 0)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.dimensions(), (1263, 924));
        assert_eq!(settings.tick_period_ms(), 16);
        assert_eq!(settings.scale_context(), ScaleContext::default());
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(ResolutionPreset::from_str("LARGE"), Some(ResolutionPreset::Large));
        assert_eq!(ResolutionPreset::from_str(" small "), Some(ResolutionPreset::Small));
        assert_eq!(ResolutionPreset::from_str("huge"), None);
        assert_eq!(ResolutionPreset::Small.as_str(), "Small");
    }

    #[test]
    fn test_parse_overrides_and_skips_garbage() {
        let text = "# window\nresolution_width=800\nresolution_height=abc\nresolution=small\ntick_rate=0\nhazard_free=yes\nnot a pair\ncolor=blue\n";
        let settings = Settings::from_kv_str(text);
        assert_eq!(settings.dimensions(), (800, 616));
        assert_eq!(settings.tick_rate, 60);
        assert!(settings.hazard_free);
    }

    #[test]
    fn test_zero_size_rejected() {
        let settings = Settings::from_kv_str("resolution_width=0\nresolution_height=0\n");
        assert_eq!(settings.width, None);
        assert_eq!(settings.height, None);
        assert!(settings.scale_context().is_valid());
    }

    #[test]
    fn test_kv_round_trip() {
        let settings = Settings {
            resolution: ResolutionPreset::Large,
            width: Some(1000),
            height: Some(700),
            tick_rate: 30,
            hazard_free: true,
        };
        let parsed = Settings::from_kv_str(&settings.to_kv_string());
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "resolution_width=842").unwrap();
        writeln!(file, "resolution_height=616").unwrap();
        let settings = Settings::load(file.path());
        assert_eq!(settings.dimensions(), (842, 616));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path().join("game_config.txt"));
        assert_eq!(settings, Settings::default());
    }
}
