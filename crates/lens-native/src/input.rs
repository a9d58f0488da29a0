use lens_core::InputEvent;
use winit::dpi::PhysicalPosition;

/// Last known cursor position in framebuffer pixels.
///
/// winit only reports the cursor through `CursorMoved`, so until the first one
/// arrives there is no position to anchor a lens at.
#[derive(Default, Clone, Copy, Debug)]
pub struct PointerTracker {
    cursor: Option<PhysicalPosition<f64>>,
}

impl PointerTracker {
    pub fn moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = Some(position);
    }

    /// Cursor left the window; the next press needs a fresh position.
    pub fn left(&mut self) {
        self.cursor = None;
    }

    pub fn press(&self, time: f64) -> Option<InputEvent> {
        let Some(p) = self.cursor else {
            log::debug!("[app] press ignored, cursor position unknown");
            return None;
        };
        Some(InputEvent::PointerPressed { x: p.x, y: p.y, time })
    }

    #[inline]
    pub fn release(&self, time: f64) -> InputEvent {
        InputEvent::PointerReleased { time }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_before_any_motion_is_dropped() {
        let tracker = PointerTracker::default();
        assert_eq!(tracker.press(1.0), None);
    }

    #[test]
    fn press_uses_last_reported_position() {
        let mut tracker = PointerTracker::default();
        tracker.moved(PhysicalPosition::new(10.0, 20.0));
        tracker.moved(PhysicalPosition::new(412.5, 300.0));
        assert_eq!(
            tracker.press(2.5),
            Some(InputEvent::PointerPressed {
                x: 412.5,
                y: 300.0,
                time: 2.5
            })
        );
    }

    #[test]
    fn leaving_the_window_forgets_the_cursor() {
        let mut tracker = PointerTracker::default();
        tracker.moved(PhysicalPosition::new(5.0, 5.0));
        tracker.left();
        assert_eq!(tracker.press(0.0), None);
        assert_eq!(tracker.release(0.5), InputEvent::PointerReleased { time: 0.5 });
    }
}
