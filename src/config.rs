//! Startup configuration
//!
//! An optional TOML file seeds the initial session settings and the sound
//! assets. It is only ever read; changes made in the settings overlay are
//! not written back.
//!
//! ```toml
//! phase_duration_seconds = 5
//! cycle_sound = true
//! background_sound = false
//! cycle_cue_path = "/usr/share/sounds/bell.ogg"
//! cue_volume = 0.7
//! ```

use crate::audio::SoundAssets;
use crate::session::{SoundConfig, DEFAULT_PHASE_SECONDS, MAX_PHASE_SECONDS, MIN_PHASE_SECONDS};
use crate::{BreatheError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "BREATHE_CONFIG";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BreatheConfig {
    /// Seconds per phase at startup (2..=8)
    pub phase_duration_seconds: u32,
    /// Whether the cycle cue starts enabled
    pub cycle_sound: bool,
    /// Whether the background ambience starts enabled
    pub background_sound: bool,
    /// Cycle cue sound file; built-in bell when absent
    pub cycle_cue_path: Option<PathBuf>,
    /// Ambience sound file; built-in rain when absent
    pub ambience_path: Option<PathBuf>,
    /// Cue volume (0.0..=1.0)
    pub cue_volume: f32,
    /// Ambience volume (0.0..=1.0)
    pub ambience_volume: f32,
}

impl Default for BreatheConfig {
    fn default() -> Self {
        let assets = SoundAssets::default();
        Self {
            phase_duration_seconds: DEFAULT_PHASE_SECONDS,
            cycle_sound: true,
            background_sound: true,
            cycle_cue_path: None,
            ambience_path: None,
            cue_volume: assets.cue_volume,
            ambience_volume: assets.ambience_volume,
        }
    }
}

impl BreatheConfig {
    /// Default location: `<config dir>/breathe/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("breathe").join("config.toml"))
    }

    /// Resolve the config path from the environment, then the default location
    pub fn resolve_path() -> Option<PathBuf> {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .or_else(Self::default_path)
    }

    /// Load from the resolved path
    ///
    /// A missing file yields the defaults; an unreadable or invalid file is
    /// an error.
    pub fn load() -> Result<Self> {
        match Self::resolve_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                info!("[CONFIG] No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Load and validate a specific file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BreatheError::ConfigError(format!("Failed to read '{}': {}", path.display(), e))
        })?;

        let config = Self::parse(&content).map_err(|e| match e {
            BreatheError::ConfigError(msg) => {
                BreatheError::ConfigError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        info!("[CONFIG] Loaded {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let config: BreatheConfig =
            toml::from_str(content).map_err(|e| BreatheError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(MIN_PHASE_SECONDS..=MAX_PHASE_SECONDS).contains(&self.phase_duration_seconds) {
            return Err(BreatheError::ConfigError(format!(
                "phase_duration_seconds must be between {} and {}, got {}",
                MIN_PHASE_SECONDS, MAX_PHASE_SECONDS, self.phase_duration_seconds
            )));
        }

        for (name, volume) in [
            ("cue_volume", self.cue_volume),
            ("ambience_volume", self.ambience_volume),
        ] {
            if !(0.0..=1.0).contains(&volume) {
                return Err(BreatheError::ConfigError(format!(
                    "{} must be between 0.0 and 1.0, got {}",
                    name, volume
                )));
            }
        }

        Ok(())
    }

    /// Initial sound toggles
    pub fn sounds(&self) -> SoundConfig {
        SoundConfig {
            cycle_sound_enabled: self.cycle_sound,
            background_sound_enabled: self.background_sound,
        }
    }

    /// Sound files and levels for the audio backend
    pub fn assets(&self) -> SoundAssets {
        SoundAssets {
            cycle_cue_path: self.cycle_cue_path.clone(),
            ambience_path: self.ambience_path.clone(),
            cue_volume: self.cue_volume,
            ambience_volume: self.ambience_volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BreatheConfig::default();
        assert_eq!(config.phase_duration_seconds, 4);
        assert!(config.cycle_sound);
        assert!(config.background_sound);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_is_defaults() {
        assert_eq!(BreatheConfig::parse("").unwrap(), BreatheConfig::default());
    }

    #[test]
    fn test_parse_partial() {
        let config = BreatheConfig::parse(
            r#"
            phase_duration_seconds = 6
            background_sound = false
            ambience_path = "/tmp/rain.wav"
            "#,
        )
        .unwrap();

        assert_eq!(config.phase_duration_seconds, 6);
        assert!(config.cycle_sound);
        assert!(!config.background_sound);
        assert_eq!(config.assets().ambience_path, Some(PathBuf::from("/tmp/rain.wav")));
        assert_eq!(
            config.sounds(),
            SoundConfig {
                cycle_sound_enabled: true,
                background_sound_enabled: false,
            }
        );
    }

    #[test]
    fn test_duration_out_of_range_rejected() {
        let err = BreatheConfig::parse("phase_duration_seconds = 9").unwrap_err();
        assert!(matches!(err, BreatheError::ConfigError(_)));
        assert!(BreatheConfig::parse("phase_duration_seconds = 1").is_err());
    }

    #[test]
    fn test_volume_out_of_range_rejected() {
        assert!(BreatheConfig::parse("cue_volume = 1.5").is_err());
        assert!(BreatheConfig::parse("ambience_volume = -0.1").is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(BreatheConfig::parse("tick_ms = 1000").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("breathe_config_test.toml");
        fs::write(&path, "phase_duration_seconds = 3\ncue_volume = 0.25\n").unwrap();
        let config = BreatheConfig::load_from(&path);
        fs::remove_file(&path).ok();

        let config = config.unwrap();
        assert_eq!(config.phase_duration_seconds, 3);
        assert_eq!(config.assets().cue_volume, 0.25);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = BreatheConfig::load_from("/nonexistent/breathe.toml").unwrap_err();
        assert!(matches!(err, BreatheError::ConfigError(_)));
    }
}
