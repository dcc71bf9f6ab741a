//! Viewport size tracking and screen ↔ world coordinate mapping.
//!
//! The game lays out everything relative to the window: Earth sits at the
//! centre, enemies spawn just outside the edges, and sprite scales follow the
//! short side.  [`Viewport`] caches the current logical size and is refreshed
//! from `WindowResized` messages.

use crate::constants::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, VIEWPORT_SCALE_REFERENCE};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

/// Current logical window size in pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn min_side(self) -> f32 {
        self.width.min(self.height)
    }

    /// Resolution factor applied to sprite scales and enemy speeds.
    #[inline]
    pub fn scale_factor(self) -> f32 {
        self.min_side() / VIEWPORT_SCALE_REFERENCE
    }

    /// Screen centre in screen space (top-left origin, y down).
    #[inline]
    pub fn screen_center(self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Convert a screen-space point (top-left origin, y down) into world space
    /// (centre origin, y up).
    #[inline]
    pub fn screen_to_world(self, p: Vec2) -> Vec2 {
        Vec2::new(p.x - self.width / 2.0, self.height / 2.0 - p.y)
    }

    /// Inverse of [`Viewport::screen_to_world`].
    #[inline]
    pub fn world_to_screen(self, p: Vec2) -> Vec2 {
        Vec2::new(p.x + self.width / 2.0, self.height / 2.0 - p.y)
    }
}

/// Startup system: seed [`Viewport`] from the primary window.
pub fn init_viewport_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<Viewport>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    *viewport = Viewport::new(window.width(), window.height());
}

/// Keep [`Viewport`] in sync with the primary window size.
pub fn viewport_resize_system(
    mut resized: MessageReader<WindowResized>,
    mut viewport: ResMut<Viewport>,
) {
    // Only the latest size matters when several resizes arrive in one frame.
    if let Some(event) = resized.read().last() {
        if event.width > 0.0 && event.height > 0.0 {
            *viewport = Viewport::new(event.width, event.height);
            debug!("Viewport resized to {}x{}", event.width, event.height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_and_world_round_trip_through_centre() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.screen_to_world(vp.screen_center()), Vec2::ZERO);
        assert_eq!(vp.screen_to_world(Vec2::ZERO), Vec2::new(-400.0, 300.0));
        let p = Vec2::new(123.0, 456.0);
        assert!((vp.world_to_screen(vp.screen_to_world(p)) - p).length() < 1e-4);
    }

    #[test]
    fn scale_factor_follows_short_side() {
        assert_eq!(Viewport::new(1000.0, 500.0).scale_factor(), 1.0);
        assert_eq!(Viewport::new(500.0, 1500.0).scale_factor(), 1.0);
        assert_eq!(Viewport::new(2000.0, 1000.0).scale_factor(), 2.0);
    }
}
