//! Interaction state: the current lens, an in-progress charge, and the ray set
//! computed for that lens.
//!
//! Input arrives as [`InputEvent`]s. Each `on_*` handler takes the session by
//! value and hands back the updated one; [`Session::apply`] does the same in
//! place for callers that keep the session behind a `&mut`. Rays are rebuilt
//! only when the lens changes, never per frame; `revision` tells the renderer
//! when that happened.

use crate::coords::DrawableSize;
use crate::lens::{ChargeConfig, ChargeState, Circle, Lens};
use crate::rays::{compute_rays, RayPath, RaySetConfig};

/// Discrete input the session reacts to. Times are seconds on any monotonic
/// clock, as long as press and release use the same one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Primary button went down at pixel `(x, y)` of the drawable surface.
    PointerPressed { x: f64, y: f64, time: f64 },
    PointerReleased { time: f64 },
    /// Remove the lens.
    Reset,
    /// Drawable surface size in physical pixels.
    Resized { width: u32, height: u32 },
}

#[derive(Clone, Debug)]
pub struct Session {
    pub lens: Lens,
    pub charge: ChargeState,
    pub drawable: DrawableSize,
    pub ray_config: RaySetConfig,
    pub charge_config: ChargeConfig,
    rays: Vec<RayPath>,
    revision: u64,
}

impl Session {
    /// Starts with no lens and the straight ray fan already computed.
    pub fn new(ray_config: RaySetConfig, charge_config: ChargeConfig, drawable: DrawableSize) -> Self {
        let lens = Lens::default();
        let rays = compute_rays(&ray_config, &lens);
        Self {
            lens,
            charge: ChargeState::default(),
            drawable,
            ray_config,
            charge_config,
            rays,
            revision: 0,
        }
    }

    pub fn handle(mut self, event: InputEvent) -> Self {
        self.apply(event);
        self
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerPressed { x, y, time } => self.press(x, y, time),
            InputEvent::PointerReleased { time } => self.release(time),
            InputEvent::Reset => self.reset(),
            InputEvent::Resized { width, height } => self.resize(width, height),
        }
    }

    pub fn on_press(mut self, x: f64, y: f64, time: f64) -> Self {
        self.press(x, y, time);
        self
    }

    /// Commits the lens if a charge is in progress; stray releases are ignored.
    pub fn on_release(mut self, time: f64) -> Self {
        self.release(time);
        self
    }

    pub fn on_reset(mut self) -> Self {
        self.reset();
        self
    }

    /// Only records the size; the ray set does not depend on it.
    pub fn on_resize(mut self, width: u32, height: u32) -> Self {
        self.resize(width, height);
        self
    }

    fn press(&mut self, x: f64, y: f64, time: f64) {
        let anchor = self.drawable.to_ndc(x, y);
        log::info!("[lens] charging at ({:.3}, {:.3})", anchor.x, anchor.y);
        self.charge = ChargeState::begin(anchor, time);
    }

    fn release(&mut self, time: f64) {
        if !self.charge.charging {
            return;
        }
        self.charge.end();
        let anchor = self.charge.anchor;
        let rs = self
            .charge_config
            .radius_for_hold(self.charge.held(time));
        self.lens = Lens::placed(anchor, rs);
        log::info!(
            "[lens] placed at ({:.3}, {:.3}) rs={:.3}",
            anchor.x,
            anchor.y,
            rs
        );
        self.recompute();
    }

    fn reset(&mut self) {
        self.charge.end();
        self.lens.deactivate();
        log::info!("[lens] reset");
        self.recompute();
    }

    fn resize(&mut self, width: u32, height: u32) {
        let size = DrawableSize::new(width, height);
        if size.is_empty() {
            log::debug!("[session] ignoring zero-area resize");
            return;
        }
        self.drawable = size;
    }

    fn recompute(&mut self) {
        self.rays = compute_rays(&self.ray_config, &self.lens);
        self.revision += 1;
    }

    pub fn rays(&self) -> &[RayPath] {
        &self.rays
    }

    /// Bumped every time the ray set is rebuilt.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_charging(&self) -> bool {
        self.charge.charging
    }

    /// Live preview of the lens being charged, sized as if released at `now`.
    pub fn preview_circle(&self, now: f64) -> Option<Circle> {
        self.charge.charging.then(|| Circle {
            center: self.charge.anchor,
            radius: self.charge_config.radius_for_hold(self.charge.held(now)),
        })
    }

    pub fn lens_circle(&self) -> Option<Circle> {
        self.lens.circle()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            RaySetConfig::default(),
            ChargeConfig::default(),
            DrawableSize::default(),
        )
    }
}
