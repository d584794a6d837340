//! Contains the Viewport struct, which describes the affine zoom/pan
//! mapping between the screen's pixel plane and the fractal's
//! coordinate plane.  The screen plane has its origin at 0,0 in the
//! upper-left corner; the fractal plane is centered on the middle of
//! the canvas and slides around underneath it as the user pans and
//! zooms.

use num::Complex;

/// The smallest zoom a gesture is allowed to reach.  Wheel and pinch
/// events arrive as multiplicative factors, and a pathological stream
/// of zoom-out events must not drive the scale to zero or negative,
/// which would make the screen-to-fractal mapping meaningless.
pub const MIN_ZOOM: f64 = 1e-12;

/// The zoom scalar and pan offset for one rendering session.  All of
/// the mutating gestures are expressed as pure functions returning the
/// updated value, so the host can keep exactly one of these per canvas
/// and swap it atomically between frames.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Magnification.  Always finite and greater than zero.
    pub zoom: f64,
    /// Horizontal pan, in pre-scale fractal units.
    pub offset_x: f64,
    /// Vertical pan, in pre-scale fractal units.
    pub offset_y: f64,
}

impl Default for Viewport {
    fn default() -> Viewport {
        Viewport {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl Viewport {
    /// The home view: unit zoom, no pan.
    pub fn new() -> Viewport {
        Default::default()
    }

    /// Maps a screen pixel to a point on the fractal plane.  The pixel
    /// is re-centered on the middle of the canvas, un-zoomed, panned,
    /// and finally divided by the per-fractal `scale` constant that
    /// decides how many pixels a unit of fractal space spans at zoom
    /// one.
    pub fn screen_to_fractal(
        &self,
        px: f64,
        py: f64,
        width: f64,
        height: f64,
        scale: f64,
    ) -> Complex<f64> {
        Complex::new(
            ((px - width / 2.0) / self.zoom + self.offset_x) / scale,
            ((py - height / 2.0) / self.zoom + self.offset_y) / scale,
        )
    }

    /// Applies a drag gesture.  The screen-space delta is divided by
    /// the zoom so that dragging feels like a constant speed no matter
    /// how deep into the fractal the view is.
    pub fn pan(&self, delta_x: f64, delta_y: f64) -> Viewport {
        Viewport {
            zoom: self.zoom,
            offset_x: self.offset_x + delta_x / self.zoom,
            offset_y: self.offset_y + delta_y / self.zoom,
        }
    }

    /// Applies a zoom gesture anchored at a screen point, usually the
    /// cursor.  The zoom is scaled by `factor` and the offset is then
    /// adjusted so the fractal point under the anchor stays put.
    /// Factors above one zoom in, below one zoom out.
    ///
    /// A non-finite or non-positive factor is a degenerate gesture and
    /// leaves the viewport untouched; a factor that would land below
    /// `MIN_ZOOM` is clamped to it, with the offset correction computed
    /// from the effective factor so the anchor invariant still holds.
    pub fn zoom_at(&self, anchor_x: f64, anchor_y: f64, factor: f64) -> Viewport {
        if !factor.is_finite() || factor <= 0.0 {
            return *self;
        }
        let zoom = self.zoom * factor;
        if !zoom.is_finite() {
            return *self;
        }
        let zoom = if zoom < MIN_ZOOM { MIN_ZOOM } else { zoom };
        let factor = zoom / self.zoom;
        Viewport {
            zoom,
            offset_x: self.offset_x + (anchor_x / zoom) * (1.0 - factor),
            offset_y: self.offset_y + (anchor_y / zoom) * (1.0 - factor),
        }
    }

    /// Returns the home view.  Invoked when the user switches to a
    /// different fractal, since a deep Mandelbrot zoom is nonsense as
    /// a view of the Sierpinski carpet.
    pub fn reset(&self) -> Viewport {
        Viewport::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn center_pixel_maps_to_scaled_offset() {
        let v = Viewport::new();
        let p = v.screen_to_fractal(400.0, 300.0, 800.0, 600.0, 200.0);
        assert_eq!(p, Complex::new(0.0, 0.0));

        let v = v.pan(100.0, -50.0);
        let p = v.screen_to_fractal(400.0, 300.0, 800.0, 600.0, 200.0);
        assert!((p.re - 0.5).abs() < EPSILON);
        assert!((p.im + 0.25).abs() < EPSILON);
    }

    #[test]
    fn pan_speed_scales_inversely_with_zoom() {
        let near = Viewport::new().pan(10.0, 0.0);
        let far = Viewport::new().zoom_at(0.0, 0.0, 4.0).pan(10.0, 0.0);
        assert!((near.offset_x - 10.0).abs() < EPSILON);
        assert!((far.offset_x - 2.5).abs() < EPSILON);
    }

    #[test]
    fn zoom_then_inverse_zoom_restores_viewport() {
        let original = Viewport {
            zoom: 3.0,
            offset_x: 1.25,
            offset_y: -0.5,
        };
        let round_trip = original.zoom_at(17.0, -4.0, 1.6).zoom_at(17.0, -4.0, 1.0 / 1.6);
        assert!((round_trip.zoom - original.zoom).abs() < EPSILON);
        assert!((round_trip.offset_x - original.offset_x).abs() < 1e-9);
        assert!((round_trip.offset_y - original.offset_y).abs() < 1e-9);
    }

    #[test]
    fn zoom_rejects_degenerate_factors() {
        let v = Viewport::new();
        assert_eq!(v.zoom_at(0.0, 0.0, 0.0), v);
        assert_eq!(v.zoom_at(0.0, 0.0, -2.0), v);
        assert_eq!(v.zoom_at(0.0, 0.0, ::std::f64::NAN), v);
        assert_eq!(v.zoom_at(0.0, 0.0, ::std::f64::INFINITY), v);
    }

    #[test]
    fn zoom_clamps_at_the_floor() {
        let mut v = Viewport::new();
        for _ in 0..2000 {
            v = v.zoom_at(5.0, 5.0, 0.5);
        }
        assert!(v.zoom >= MIN_ZOOM);
        assert!(v.zoom > 0.0);
    }

    #[test]
    fn reset_returns_home_regardless_of_history() {
        let v = Viewport::new()
            .zoom_at(12.0, 9.0, 42.0)
            .pan(-300.0, 77.0)
            .reset();
        assert_eq!(v, Viewport::new());
    }
}
