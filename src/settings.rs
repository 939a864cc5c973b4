//! Animation settings
//!
//! Loaded from an optional JSON file; every field falls back to the
//! matching `consts` value so partial files are valid.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, LoadError};

/// What a trajectory does when its head segment touches the coastline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Clear the trail and start over from the first point on the same tick
    Restart,
    /// Hold the trail in place, fade it out, then start over
    #[default]
    FreezeFade,
}

impl CollisionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionPolicy::Restart => "restart",
            CollisionPolicy::FreezeFade => "freeze-fade",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "restart" | "a" => Some(CollisionPolicy::Restart),
            "freeze" | "freeze-fade" | "freeze_fade" | "fade" | "b" => {
                Some(CollisionPolicy::FreezeFade)
            }
            _ => None,
        }
    }

    /// Whether the whole trail fades out late in a run
    pub fn uses_global_fade(&self) -> bool {
        matches!(self, CollisionPolicy::Restart)
    }
}

/// Animation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Collision response
    pub policy: CollisionPolicy,

    // === Trail shape ===
    /// Trailing points drawn behind the head
    pub visible_length: usize,
    /// Tail width
    pub min_width: f32,
    /// Head width
    pub max_width: f32,

    // === Fades ===
    /// Opacity lost per tick while frozen
    pub fade_step: f32,
    /// Frame where the late-run global fade begins
    pub global_fade_start: usize,
    /// Frames for the global fade to reach zero
    pub global_fade_span: usize,

    // === Clock ===
    /// Nominal frame interval in milliseconds
    pub tick_interval_ms: u64,
    /// Pulses allowed per clock update when catching up
    pub max_catchup_pulses: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            policy: CollisionPolicy::default(),

            visible_length: VISIBLE_LENGTH,
            min_width: MIN_WIDTH,
            max_width: MAX_WIDTH,

            fade_step: FADE_STEP,
            global_fade_start: GLOBAL_FADE_START,
            global_fade_span: GLOBAL_FADE_SPAN,

            tick_interval_ms: TICK_INTERVAL_MS,
            max_catchup_pulses: MAX_CATCHUP_PULSES,
        }
    }
}

impl Settings {
    /// Default settings with a specific collision policy
    pub fn with_policy(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Check value ranges the animator relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reason = if self.visible_length < 1 {
            Some("visible_length must be at least 1".to_string())
        } else if !(self.fade_step > 0.0 && self.fade_step.is_finite()) {
            Some(format!("fade_step must be positive, got {}", self.fade_step))
        } else if !(self.min_width > 0.0 && self.min_width < self.max_width) {
            Some(format!(
                "widths must satisfy 0 < min_width < max_width, got {} and {}",
                self.min_width, self.max_width
            ))
        } else if self.global_fade_span == 0 {
            Some("global_fade_span must be non-zero".to_string())
        } else if !(1..=MAX_TICK_INTERVAL_MS).contains(&self.tick_interval_ms) {
            Some(format!(
                "tick_interval_ms must be in 1..={}, got {}",
                MAX_TICK_INTERVAL_MS, self.tick_interval_ms
            ))
        } else if !(1..=MAX_CATCHUP_LIMIT).contains(&self.max_catchup_pulses) {
            Some(format!(
                "max_catchup_pulses must be in 1..={}, got {}",
                MAX_CATCHUP_LIMIT, self.max_catchup_pulses
            ))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ConfigError::InvalidSettings { reason }),
            None => Ok(()),
        }
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Read settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Using default settings ({}: {})",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Serialize for writing back to disk
    pub fn to_json(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
