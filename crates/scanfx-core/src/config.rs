//! Live configuration records for the configurable effects.
//!
//! Both records deserialize from camelCase JSON objects with per-field
//! defaults, so a partial update such as `{"mouseRadius": 80}` is valid.
//! Effects re-read their config every tick; callers only swap the value.

use crate::error::{FxError, Result};
use serde::Deserialize;
use std::str::FromStr;

/// JSON values go through `FromStr`, so `"Rainbow"` and `"rainbow"` both parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum ColorMode {
    #[default]
    Classic,
    Rainbow,
    Purple,
    Red,
}

impl FromStr for ColorMode {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "rainbow" => Ok(Self::Rainbow),
            "purple" => Ok(Self::Purple),
            "red" => Ok(Self::Red),
            _ => Err(FxError::UnknownColorMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for ColorMode {
    type Error = FxError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RainConfig {
    pub speed: f32,
    pub font_size: f32,
    pub density: f32,
    pub color_mode: ColorMode,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            font_size: 16.0,
            density: 0.8,
            color_mode: ColorMode::Classic,
        }
    }
}

impl RainConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str::<Self>(json)?.sanitized())
    }

    /// Clamp degenerate values so layout never divides by zero.
    pub fn sanitized(mut self) -> Self {
        self.speed = finite_or(self.speed, 1.0).clamp(0.0, 10.0);
        self.font_size = finite_or(self.font_size, 16.0).max(4.0);
        self.density = finite_or(self.density, 0.8).clamp(0.05, 1.0);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    pub particle_count: usize,
    pub connection_distance: f32,
    pub mouse_radius: f32,
    pub particle_speed: f32,
    pub particle_size: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            connection_distance: 150.0,
            mouse_radius: 200.0,
            particle_speed: 0.5,
            particle_size: 2.0,
        }
    }
}

impl FieldConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str::<Self>(json)?.sanitized())
    }

    /// Negative distances and radii collapse to zero ("no effect"); the
    /// force and link code treats zero as disabled.
    pub fn sanitized(mut self) -> Self {
        self.particle_count = self.particle_count.min(5_000);
        self.connection_distance = finite_or(self.connection_distance, 0.0).max(0.0);
        self.mouse_radius = finite_or(self.mouse_radius, 0.0).max(0.0);
        self.particle_speed = finite_or(self.particle_speed, 0.0).max(0.0);
        self.particle_size = finite_or(self.particle_size, 1.0).max(0.1);
        self
    }
}

#[inline]
fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}
