//! Window geometry reconciliation against the current display.

use serde::{Deserialize, Serialize};

/// Outer window rectangle in screen points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WindowRect {
    /// Right edge of the rectangle.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge of the rectangle.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Fit a saved window rectangle to the current screen.
///
/// A rectangle fully inside the screen is returned verbatim. When the origin is
/// negative or the far edge spills past the screen, the size is clamped to the
/// screen size and the window is centered. Always produces a valid rectangle.
pub fn reconcile(saved: WindowRect, screen_width: f32, screen_height: f32) -> WindowRect {
    let out_of_range = saved.x < 0.0
        || saved.y < 0.0
        || saved.right() > screen_width
        || saved.bottom() > screen_height;
    if !out_of_range {
        return saved;
    }
    let width = saved.width.min(screen_width);
    let height = saved.height.min(screen_height);
    WindowRect {
        x: (screen_width - width) / 2.0,
        y: (screen_height - height) / 2.0,
        width,
        height,
    }
}

/// Initial placement when no geometry was saved: 80% of the screen, centered.
pub fn default_rect(screen_width: f32, screen_height: f32) -> WindowRect {
    let width = screen_width * 0.8;
    let height = screen_height * 0.8;
    WindowRect {
        x: (screen_width - width) / 2.0,
        y: (screen_height - height) / 2.0,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_inside(rect: WindowRect, screen_width: f32, screen_height: f32) {
        assert!(rect.x >= 0.0 && rect.y >= 0.0);
        assert!(rect.right() <= screen_width);
        assert!(rect.bottom() <= screen_height);
    }

    #[test]
    fn rect_inside_screen_is_untouched() {
        let saved = WindowRect {
            x: 100.0,
            y: 50.0,
            width: 800.0,
            height: 600.0,
        };
        assert_eq!(reconcile(saved, 1920.0, 1080.0), saved);
    }

    #[test]
    fn negative_origin_recenters() {
        let saved = WindowRect {
            x: -20.0,
            y: 50.0,
            width: 800.0,
            height: 600.0,
        };
        let fitted = reconcile(saved, 1920.0, 1080.0);
        assert_inside(fitted, 1920.0, 1080.0);
        assert_eq!(fitted.x, (1920.0 - 800.0) / 2.0);
        assert_eq!(fitted.y, (1080.0 - 600.0) / 2.0);
    }

    #[test]
    fn oversized_rect_is_clamped_and_centered() {
        let saved = WindowRect {
            x: 0.0,
            y: 0.0,
            width: 2560.0,
            height: 1440.0,
        };
        let fitted = reconcile(saved, 1920.0, 1080.0);
        assert_inside(fitted, 1920.0, 1080.0);
        assert_eq!(fitted.width, 1920.0);
        assert_eq!(fitted.height, 1080.0);
        assert_eq!(fitted.x, 0.0);
        assert_eq!(fitted.y, 0.0);
    }

    #[test]
    fn far_edge_past_screen_recenters() {
        let saved = WindowRect {
            x: 1500.0,
            y: 900.0,
            width: 800.0,
            height: 600.0,
        };
        let fitted = reconcile(saved, 1920.0, 1080.0);
        assert_inside(fitted, 1920.0, 1080.0);
        assert_eq!(fitted.width, 800.0);
        assert_eq!(fitted.height, 600.0);
    }

    #[test]
    fn default_rect_takes_most_of_the_screen() {
        let rect = default_rect(1920.0, 1080.0);
        assert_inside(rect, 1920.0, 1080.0);
        assert_eq!(rect.width, 1920.0 * 0.8);
        assert_eq!(rect.height, 1080.0 * 0.8);
        assert_eq!(rect.x, (1920.0 - rect.width) / 2.0);
    }
}
