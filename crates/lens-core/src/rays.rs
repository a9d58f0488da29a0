//! Ray-path generation.
//!
//! Rays enter from the left as a fan of horizontal lines. With no active lens
//! each ray is a single straight segment. With a lens, the orbit equation for
//! light in the lens's polar frame,
//!
//! ```text
//! d²u/dφ² + u = 1.5 · rs · u²      (u = 1/r)
//! ```
//!
//! is integrated with fixed-step RK4 in φ until the ray is captured, escapes,
//! leaves the visible region, or runs out of steps.

use crate::constants::{
    ANGLE_STEP, CLIP_LEFT_X, CLIP_Y, DECIMATION, HORIZON_START_MARGIN,
    MAX_STEPS, MIN_IMPACT_PARAMETER, RAY_COUNT, RAY_START_X, RAY_Y_MAX, RAY_Y_MIN, RIGHT_EDGE_X,
    TILT_SCALE,
};
use crate::error::ConfigError;
use crate::lens::Lens;
use glam::Vec2;

/// Polyline of one ray in NDC, ordered from its start. Never empty.
pub type RayPath = Vec<Vec2>;

/// Fan of parallel rays entering from the left, evenly spaced in y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaySetConfig {
    pub ray_count: usize,
    pub y_min: f32,
    pub y_max: f32,
    pub start_x: f32,
}

impl RaySetConfig {
    pub fn new(ray_count: usize, y_min: f32, y_max: f32, start_x: f32) -> Result<Self, ConfigError> {
        if ray_count == 0 {
            return Err(ConfigError::NoRays);
        }
        for (field, v) in [("y_min", y_min), ("y_max", y_max), ("start_x", start_x)] {
            if !v.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        if y_min >= y_max {
            return Err(ConfigError::EmptySweep { y_min, y_max });
        }
        Ok(Self {
            ray_count,
            y_min,
            y_max,
            start_x,
        })
    }

    /// Sweep parameter of ray `index` in `[0, 1]`; a lone ray sits in the middle.
    #[inline]
    pub fn ray_param(&self, index: usize) -> f32 {
        if self.ray_count <= 1 {
            0.5
        } else {
            index as f32 / (self.ray_count - 1) as f32
        }
    }

    #[inline]
    pub fn start(&self, index: usize) -> Vec2 {
        let t = self.ray_param(index);
        Vec2::new(self.start_x, self.y_min + (self.y_max - self.y_min) * t)
    }
}

impl Default for RaySetConfig {
    fn default() -> Self {
        Self {
            ray_count: RAY_COUNT,
            y_min: RAY_Y_MIN,
            y_max: RAY_Y_MAX,
            start_x: RAY_START_X,
        }
    }
}

/// Why a ray's path ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// No lens: closed-form straight segment.
    Straight,
    /// `u` dropped to zero or below, or the state went non-finite.
    Escaped,
    /// Crossed the event horizon.
    Captured,
    /// Reached the right edge; the last point is clamped to `x = 1`.
    ExitedRight,
    /// Left through the top, bottom or far-left margin.
    OutOfBounds,
    /// Ran the full step budget.
    StepBudget,
}

/// A path together with how it ended and how many RK4 steps it took.
#[derive(Clone, Debug, PartialEq)]
pub struct RayTrace {
    pub path: RayPath,
    pub termination: Termination,
    pub steps: usize,
}

/// Inverse radius and its derivative with respect to φ.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitState {
    pub u: f32,
    pub du: f32,
}

impl OrbitState {
    #[inline]
    fn is_finite(&self) -> bool {
        self.u.is_finite() && self.du.is_finite()
    }

    #[inline]
    fn offset(self, k: OrbitState, h: f32) -> OrbitState {
        OrbitState {
            u: self.u + h * k.u,
            du: self.du + h * k.du,
        }
    }
}

#[inline]
fn derivative(s: OrbitState, rs: f32) -> OrbitState {
    OrbitState {
        u: s.du,
        du: -s.u + 1.5 * rs * s.u * s.u,
    }
}

/// One classical RK4 step of `(u, du/dφ)` over `dphi`.
pub fn rk4_step(state: OrbitState, dphi: f32, rs: f32) -> OrbitState {
    let k1 = derivative(state, rs);
    let k2 = derivative(state.offset(k1, dphi / 2.0), rs);
    let k3 = derivative(state.offset(k2, dphi / 2.0), rs);
    let k4 = derivative(state.offset(k3, dphi), rs);
    OrbitState {
        u: state.u + dphi / 6.0 * (k1.u + 2.0 * k2.u + 2.0 * k3.u + k4.u),
        du: state.du + dphi / 6.0 * (k1.du + 2.0 * k2.du + 2.0 * k3.du + k4.du),
    }
}

/// Build every ray of `config` against `lens`, in ray order.
///
/// Each call produces a fresh set; nothing is carried over from earlier calls.
pub fn compute_rays(config: &RaySetConfig, lens: &Lens) -> Vec<RayPath> {
    trace_rays(config, lens)
        .into_iter()
        .map(|trace| trace.path)
        .collect()
}

/// Like [`compute_rays`] but keeps the termination reason and step count.
pub fn trace_rays(config: &RaySetConfig, lens: &Lens) -> Vec<RayTrace> {
    debug_assert!(config.ray_count >= 1, "ray fan needs at least one ray");
    let traces: Vec<RayTrace> = (0..config.ray_count)
        .map(|i| trace_ray(config.start(i), config.ray_param(i), lens))
        .collect();
    if log::log_enabled!(log::Level::Debug) {
        let captured = traces
            .iter()
            .filter(|t| t.termination == Termination::Captured)
            .count();
        let points: usize = traces.iter().map(|t| t.path.len()).sum();
        log::debug!(
            "[rays] traced {} rays ({} captured, {} points)",
            traces.len(),
            captured,
            points
        );
    }
    traces
}

/// Trace one ray starting at `start`. `t` is its sweep parameter, used to tilt
/// the initial direction slightly so the fan is not perfectly parallel.
pub fn trace_ray(start: Vec2, t: f32, lens: &Lens) -> RayTrace {
    trace_ray_with_budget(start, t, lens, MAX_STEPS)
}

/// [`trace_ray`] with an explicit cap on RK4 steps instead of [`MAX_STEPS`].
pub fn trace_ray_with_budget(start: Vec2, t: f32, lens: &Lens, max_steps: usize) -> RayTrace {
    if lens.active {
        bent_ray(start, t, lens, max_steps)
    } else {
        straight_ray(start)
    }
}

fn straight_ray(start: Vec2) -> RayTrace {
    RayTrace {
        path: vec![start, Vec2::new(RIGHT_EDGE_X, start.y)],
        termination: Termination::Straight,
        steps: 0,
    }
}

fn bent_ray(start: Vec2, t: f32, lens: &Lens, max_steps: usize) -> RayTrace {
    let rs = lens.schwarzschild_radius;
    debug_assert!(rs > 0.0, "active lens needs a positive radius");

    let rel = start - lens.position;
    let r = rel.length().max(HORIZON_START_MARGIN * rs);
    let mut phi = rel.y.atan2(rel.x);

    let vel = Vec2::new(1.0, (t - 0.5) * TILT_SCALE).normalize();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let v_r = vel.dot(Vec2::new(cos_phi, sin_phi));
    let v_phi = vel.dot(Vec2::new(-sin_phi, cos_phi));

    let b = (r * v_phi).abs().max(MIN_IMPACT_PARAMETER);
    let direction = if v_phi < 0.0 { -1.0 } else { 1.0 };

    let mut state = OrbitState {
        u: 1.0 / r,
        du: -v_r / b * direction,
    };
    let dphi = ANGLE_STEP * direction;
    let u_horizon = 1.0 / rs;

    let mut path = Vec::with_capacity(max_steps.div_ceil(DECIMATION) + 2);
    path.push(start);

    for step in 0..max_steps {
        state = rk4_step(state, dphi, rs);
        phi += dphi;
        let steps = step + 1;

        if state.u <= 0.0 || !state.is_finite() {
            return RayTrace {
                path,
                termination: Termination::Escaped,
                steps,
            };
        }
        if state.u >= u_horizon {
            return RayTrace {
                path,
                termination: Termination::Captured,
                steps,
            };
        }

        let (sin_phi, cos_phi) = phi.sin_cos();
        let pos = lens.position + Vec2::new(cos_phi, sin_phi) / state.u;
        if pos.x >= RIGHT_EDGE_X {
            path.push(Vec2::new(RIGHT_EDGE_X, pos.y));
            return RayTrace {
                path,
                termination: Termination::ExitedRight,
                steps,
            };
        }
        if pos.y < -CLIP_Y || pos.y > CLIP_Y || pos.x < CLIP_LEFT_X {
            return RayTrace {
                path,
                termination: Termination::OutOfBounds,
                steps,
            };
        }

        if step % DECIMATION == 0 {
            path.push(pos);
        }
    }

    RayTrace {
        path,
        termination: Termination::StepBudget,
        steps: max_steps,
    }
}
