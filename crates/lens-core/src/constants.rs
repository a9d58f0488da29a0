use glam::Vec2;

// Tuning constants shared by the generator, the session and the native frontend.

// Ray fan
pub const RAY_COUNT: usize = 27; // 21..31 reads well on screen
pub const RAY_Y_MIN: f32 = -0.85;
pub const RAY_Y_MAX: f32 = 0.85;
pub const RAY_START_X: f32 = -0.98; // just inside the left edge

// Click-and-hold lens sizing
pub const RS_MIN: f32 = 0.03;
pub const RS_MAX: f32 = 0.25;
pub const RS_PER_SECOND: f32 = 0.09;

// Integrator
pub const MAX_STEPS: usize = 12_000;
pub const ANGLE_STEP: f32 = 0.01; // radians per RK4 step
pub const DECIMATION: usize = 4; // keep every Nth step
pub const HORIZON_START_MARGIN: f32 = 1.01; // start radius floor, in units of rs
pub const MIN_IMPACT_PARAMETER: f32 = 0.01;
pub const TILT_SCALE: f32 = 0.1; // per-ray direction fan, visual only

// Clipping. Vertical and left margins are wider than the viewport so curvature
// close to the edges is not cut short.
pub const RIGHT_EDGE_X: f32 = 1.0;
pub const CLIP_Y: f32 = 1.2;
pub const CLIP_LEFT_X: f32 = -1.5;

// Lens outline
pub const CIRCLE_SEGMENTS: usize = 100;

// Initial (inactive) lens, parked off-screen
pub const PARKED_LENS_POSITION: [f32; 2] = [100.0, 100.0];
pub const PARKED_LENS_RS: f32 = 0.1;

// Window
pub const DEFAULT_DRAWABLE_WIDTH: u32 = 800;
pub const DEFAULT_DRAWABLE_HEIGHT: u32 = 600;

/// Upper bound on the number of points a single bent ray can produce.
#[inline]
pub const fn max_points_per_ray() -> usize {
    MAX_STEPS.div_ceil(DECIMATION) + 2
}

#[inline]
pub fn parked_lens_position() -> Vec2 {
    Vec2::new(PARKED_LENS_POSITION[0], PARKED_LENS_POSITION[1])
}
