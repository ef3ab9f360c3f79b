//! Character Settings
//!
//! Tuning for the parametric motions and the body controls.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use croak_animation::{CharacterSettings, MotionSettings};
//!
//! // Defaults reproduce the stock frog: 2-unit motions, 10 units high,
//! // 500 ms per elapsed unit.
//! let settings = CharacterSettings::default();
//!
//! // Higher, slower jump
//! let settings = CharacterSettings {
//!     jump: MotionSettings::default().with_height(16.0).with_duration(3.0),
//!     ..Default::default()
//! };
//!
//! // Or from JSON
//! let settings = CharacterSettings::from_json(r#"{ "body_step": 0.05 }"#)?;
//! ```

use serde::{Deserialize, Serialize};

use croak_core::{CroakError, Result};

/// Timing and amplitude of one parametric motion.
///
/// Elapsed time is measured in units of [`unit_seconds`](Self::unit_seconds);
/// `duration` is expressed in those units, so the real-time length of a
/// motion is `duration * unit_seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Length of the motion, in elapsed units.
    pub duration: f32,
    /// Amplitude; together with `duration` it sets the speed `v = height / duration`.
    pub height: f32,
    /// Real seconds per elapsed unit.
    pub unit_seconds: f32,
    /// Forward creep per tick, scaled by the speed.
    pub creep_per_tick: f32,
    /// Real seconds per creep tick.
    pub tick_seconds: f32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            duration: 2.0,
            height: 10.0,
            unit_seconds: 0.5,
            creep_per_tick: 0.02,
            tick_seconds: 0.01,
        }
    }
}

impl MotionSettings {
    #[must_use]
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_unit_seconds(mut self, unit_seconds: f32) -> Self {
        self.unit_seconds = unit_seconds;
        self
    }

    /// Speed constant `v = height / duration`.
    #[inline]
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.height / self.duration
    }

    /// Forward distance crept over `dt` real seconds.
    #[inline]
    #[must_use]
    pub fn creep(&self, dt: f32) -> f32 {
        self.speed() * self.creep_per_tick * (dt / self.tick_seconds)
    }

    /// Converts real seconds into elapsed units.
    #[inline]
    #[must_use]
    pub fn to_units(&self, seconds: f32) -> f32 {
        seconds / self.unit_seconds
    }

    fn validate(&self, name: &str) -> Result<()> {
        let positive = [
            ("duration", self.duration),
            ("unit_seconds", self.unit_seconds),
            ("tick_seconds", self.tick_seconds),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CroakError::InvalidSettings(format!(
                    "{name}.{field} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Settings for a [`CharacterController`](crate::CharacterController).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSettings {
    pub jump: MotionSettings,
    pub swim: MotionSettings,
    /// Body translation per arrow key press.
    pub body_step: f32,
    /// Body tilt/roll per shift+arrow key press, in radians.
    pub body_tilt_step: f32,
}

impl Default for CharacterSettings {
    fn default() -> Self {
        Self {
            jump: MotionSettings::default(),
            swim: MotionSettings::default(),
            body_step: 0.01,
            body_tilt_step: 0.01,
        }
    }
}

impl CharacterSettings {
    /// Parses settings from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects values that would make the motion arithmetic degenerate.
    pub fn validate(&self) -> Result<()> {
        self.jump.validate("jump")?;
        self.swim.validate("swim")
    }
}
