//! Viewport geometry supplied by the host.
//!
//! All rectangles are in viewport coordinates: `top == 0` is the top edge of
//! the visible area, exactly what a browser's bounding client rect reports.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in viewport coordinates (px).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }
}

/// Visible area of the page plus the current document scroll offset.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub scroll_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            scroll_y: 0.0,
        }
    }
}

impl Viewport {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Fraction of `rect` that lies inside the viewport, in [0, 1].
///
/// Zero-area rects have no meaningful fraction; they report 1.0 while they sit
/// inside the viewport (edges inclusive) and 0.0 otherwise.
pub fn intersection_ratio(rect: &Rect, viewport: &Viewport) -> f32 {
    let vp = viewport.rect();
    let area = rect.area();
    if area <= 0.0 {
        let inside = rect.top >= vp.top
            && rect.bottom() <= vp.bottom()
            && rect.left >= vp.left
            && rect.right() <= vp.right();
        return if inside { 1.0 } else { 0.0 };
    }
    let w = (rect.right().min(vp.right()) - rect.left.max(vp.left)).max(0.0);
    let h = (rect.bottom().min(vp.bottom()) - rect.top.max(vp.top)).max(0.0);
    ((w * h) / area).clamp(0.0, 1.0)
}

/// Polling seam between the core and whatever owns layout.
///
/// The engine asks for the geometry of every region it observes; regions the
/// source does not know about report `None` and are simply left untouched.
pub trait GeometrySource {
    fn viewport(&self) -> Viewport;
    fn region_rect(&self, region: &str) -> Option<Rect>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport {
        Viewport {
            width: 1000.0,
            height: 800.0,
            scroll_y: 0.0,
        }
    }

    #[test]
    fn fully_inside_is_one() {
        let r = Rect::new(100.0, 0.0, 500.0, 200.0);
        assert_eq!(intersection_ratio(&r, &vp()), 1.0);
    }

    #[test]
    fn half_below_fold() {
        let r = Rect::new(700.0, 0.0, 500.0, 200.0);
        assert!((intersection_ratio(&r, &vp()) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn fully_outside_is_zero() {
        let r = Rect::new(-300.0, 0.0, 500.0, 200.0);
        assert_eq!(intersection_ratio(&r, &vp()), 0.0);
        let r = Rect::new(900.0, 0.0, 500.0, 200.0);
        assert_eq!(intersection_ratio(&r, &vp()), 0.0);
    }

    #[test]
    fn zero_area_uses_containment() {
        let inside = Rect::new(10.0, 10.0, 0.0, 0.0);
        let outside = Rect::new(900.0, 10.0, 0.0, 0.0);
        assert_eq!(intersection_ratio(&inside, &vp()), 1.0);
        assert_eq!(intersection_ratio(&outside, &vp()), 0.0);
    }
}
