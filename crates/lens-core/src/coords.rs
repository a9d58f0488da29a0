//! Pixel to normalized-device-coordinate conversion.
//!
//! Pointer positions arrive in physical pixels with the origin at the top-left
//! and y pointing down. Everything downstream works in NDC: `[-1, 1]` on both
//! axes, y up.

use crate::constants::{DEFAULT_DRAWABLE_HEIGHT, DEFAULT_DRAWABLE_WIDTH};
use glam::Vec2;

/// Backing-store size of the drawable surface in physical pixels.
///
/// This must be the framebuffer size, not the logical window size, otherwise
/// conversions drift on HiDPI displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawableSize {
    pub width: u32,
    pub height: u32,
}

impl DrawableSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Minimised windows report a zero-area surface.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn to_ndc(&self, pixel_x: f64, pixel_y: f64) -> Vec2 {
        to_ndc(pixel_x, pixel_y, self.width, self.height)
    }
}

impl Default for DrawableSize {
    fn default() -> Self {
        Self::new(DEFAULT_DRAWABLE_WIDTH, DEFAULT_DRAWABLE_HEIGHT)
    }
}

/// Map a pixel coordinate onto NDC.
///
/// `drawable_width` and `drawable_height` must be non-zero.
#[inline]
pub fn to_ndc(pixel_x: f64, pixel_y: f64, drawable_width: u32, drawable_height: u32) -> Vec2 {
    debug_assert!(
        drawable_width > 0 && drawable_height > 0,
        "drawable surface must have a non-zero area"
    );
    let w = drawable_width as f64;
    let h = drawable_height as f64;
    Vec2::new(
        (2.0 * pixel_x / w - 1.0) as f32,
        (1.0 - 2.0 * pixel_y / h) as f32,
    )
}
