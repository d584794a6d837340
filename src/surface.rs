//! The seam between this crate and the host's actual canvas.  The
//! compositor draws against this trait and nothing else, so the host
//! can back it with a raster framebuffer, a vector recorder, or the
//! in-memory doubles the tests use.

use shapes::Point;

/// An 8-bit-per-channel RGB color, in red, green, blue order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The drawing operations the compositor needs from the host.  All
/// coordinates are screen-plane pixels with the origin at the upper
/// left.
pub trait DrawSurface {
    /// Erases the whole surface back to the background.
    fn clear(&mut self);

    /// Sets the color used by every subsequent fill and stroke call.
    fn set_color(&mut self, color: Rgb);

    /// Fills an axis-aligned rectangle.  The escape-time sweep paints
    /// individual pixels as 1x1 rectangles through this call.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Fills the polygon through `points`, closed back to the first
    /// vertex.
    fn fill_polygon(&mut self, points: &[Point]);

    /// Strokes a line segment.
    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
}
