//! The gravitational source and the click-and-hold state used to size it.

use crate::constants::{
    parked_lens_position, CIRCLE_SEGMENTS, PARKED_LENS_RS, RS_MAX, RS_MIN, RS_PER_SECOND,
};
use crate::error::ConfigError;
use glam::Vec2;

/// A point-mass lens in NDC.
///
/// When `active` is false the generator ignores `position` and
/// `schwarzschild_radius`; they are kept so the UI can still show them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lens {
    pub position: Vec2,
    pub schwarzschild_radius: f32,
    pub active: bool,
}

impl Lens {
    /// An active lens at `position`. `schwarzschild_radius` must be positive.
    pub fn placed(position: Vec2, schwarzschild_radius: f32) -> Self {
        debug_assert!(schwarzschild_radius > 0.0);
        Self {
            position,
            schwarzschild_radius,
            active: true,
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Outline of the horizon, if the lens is active.
    pub fn circle(&self) -> Option<Circle> {
        self.active.then_some(Circle {
            center: self.position,
            radius: self.schwarzschild_radius,
        })
    }
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            position: parked_lens_position(),
            schwarzschild_radius: PARKED_LENS_RS,
            active: false,
        }
    }
}

/// Click-and-hold state. Only meaningful while `charging` is set; the other
/// fields keep their last values afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChargeState {
    pub charging: bool,
    pub start_time: f64,
    pub anchor: Vec2,
}

impl ChargeState {
    pub fn begin(anchor: Vec2, start_time: f64) -> Self {
        Self {
            charging: true,
            start_time,
            anchor,
        }
    }

    /// Ends the charge, on release or reset.
    pub fn end(&mut self) {
        self.charging = false;
    }

    #[inline]
    pub fn held(&self, now: f64) -> f64 {
        now - self.start_time
    }
}

/// How hold duration maps to Schwarzschild radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChargeConfig {
    pub rs_min: f32,
    pub rs_max: f32,
    pub rs_per_second: f32,
}

impl ChargeConfig {
    pub fn new(rs_min: f32, rs_max: f32, rs_per_second: f32) -> Result<Self, ConfigError> {
        for (field, v) in [
            ("rs_min", rs_min),
            ("rs_max", rs_max),
            ("rs_per_second", rs_per_second),
        ] {
            if !v.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        if !(rs_min > 0.0 && rs_min <= rs_max) {
            return Err(ConfigError::BadRadiusRange { rs_min, rs_max });
        }
        if rs_per_second < 0.0 {
            return Err(ConfigError::NegativeGrowth(rs_per_second));
        }
        Ok(Self {
            rs_min,
            rs_max,
            rs_per_second,
        })
    }

    /// `clamp(rs_min + held * rs_per_second, rs_min, rs_max)`.
    pub fn radius_for_hold(&self, held_secs: f64) -> f32 {
        let grown = self.rs_min + held_secs as f32 * self.rs_per_second;
        grown.clamp(self.rs_min, self.rs_max)
    }
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            rs_min: RS_MIN,
            rs_max: RS_MAX,
            rs_per_second: RS_PER_SECOND,
        }
    }
}

/// Circle handed to the renderer for the horizon or the charge preview.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    /// Closed line loop: `segments + 1` points, the last repeating the first.
    pub fn outline(&self, segments: usize) -> Vec<Vec2> {
        let segments = segments.max(3);
        (0..=segments)
            .map(|i| {
                let theta = std::f32::consts::TAU * (i % segments) as f32 / segments as f32;
                self.center + self.radius * Vec2::new(theta.cos(), theta.sin())
            })
            .collect()
    }

    pub fn default_outline(&self) -> Vec<Vec2> {
        self.outline(CIRCLE_SEGMENTS)
    }
}
