// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The frame compositor: orchestrates one full redraw.  It validates
//! the incoming request, clears the surface, and dispatches to either
//! the per-pixel escape-time sweep or the recursive subdivision
//! generators.  Every call is a complete redraw of the whole surface;
//! there is no incremental rendering, and a later frame simply
//! overwrites an earlier one.  The host is expected to serialize
//! redraw triggers (one logical frame in flight at a time) and to
//! schedule them off its input path, typically as the next drawable
//! frame.

use itertools::iproduct;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

use escape::EscapeFractal;
use pool;
use pool::EvalPool;
use request::{FractalKind, RenderError, RenderRequest};
use shapes;
use shapes::{Point, ShapePrimitive};
use surface::DrawSurface;

// The geometric fractals fill 80% of the canvas's smaller dimension;
// the tree trunk gets 30% and is planted 50px above the bottom edge
// so the canopy has room to spread.
const SHAPE_FILL: f64 = 0.8;
const TREE_FILL: f64 = 0.3;
const TREE_BASELINE: f64 = 50.0;

/// Where the compositor is in its redraw cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderState {
    /// Between frames; the surface holds the last completed frame.
    Idle,
    /// A redraw is in progress on this thread.
    Rendering,
}

/// Orchestrates full-frame redraws.  Owns nothing but its state and,
/// optionally, an `EvalPool` for offloading the escape-time sweep.
pub struct Compositor {
    state: RenderState,
    pool: Option<EvalPool>,
}

impl Compositor {
    /// A compositor that evaluates escape-time sweeps inline on the
    /// calling thread.
    pub fn new() -> Compositor {
        Compositor {
            state: RenderState::Idle,
            pool: None,
        }
    }

    /// A compositor that offloads escape-time sweeps to the given
    /// pool.  Results are identical to the inline path.
    pub fn with_pool(pool: EvalPool) -> Compositor {
        Compositor {
            state: RenderState::Idle,
            pool: Some(pool),
        }
    }

    /// Where the compositor currently is in its redraw cycle.
    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Performs one full redraw of `request` against `surface`.
    /// Idempotent for identical inputs.  An invalid request is
    /// rejected before the surface is touched, so the last good frame
    /// survives.
    pub fn render<S: DrawSurface>(
        &mut self,
        request: &RenderRequest,
        surface: &mut S,
    ) -> Result<(), RenderError> {
        request.validate()?;
        self.state = RenderState::Rendering;
        debug!(
            "rendering {:?} at {}x{}, {} iterations",
            request.kind, request.width, request.height, request.max_iterations
        );

        surface.clear();
        surface.set_color(request.color);

        match request.kind.escape_variant() {
            Some(variant) => self.sweep(variant, request, surface),
            None => subdivide(request, surface),
        }

        self.state = RenderState::Idle;
        debug!("frame complete");
        Ok(())
    }

    /// The escape-time branch: evaluate every pixel, then paint only
    /// the ones that never escaped within the budget.  Escaped pixels
    /// are left as background, so the image is the set's interior
    /// rather than the usual iteration-count halo around it.
    fn sweep<S: DrawSurface>(
        &self,
        variant: EscapeFractal,
        request: &RenderRequest,
        surface: &mut S,
    ) {
        let (width, height) = (request.width, request.height);
        let limit = request.max_iterations;

        let counts = match self.pool {
            Some(ref pool) => pool.sweep(variant, request.viewport, width, height, limit),
            None => (0..height)
                .flat_map(|py| pool::eval_row(variant, request.viewport, py, width, height, limit))
                .collect(),
        };

        for (py, px) in iproduct!(0..height, 0..width) {
            if counts[py * width + px] == limit {
                surface.fill_rect(px as f64, py as f64, 1.0, 1.0);
            }
        }
    }
}

/// The geometric branch: lay out a centered base shape and replay the
/// generator's primitives onto the surface at its fixed depth.
fn subdivide<S: DrawSurface>(request: &RenderRequest, surface: &mut S) {
    let (width, height) = (request.width as f64, request.height as f64);
    let mut primitives: Vec<ShapePrimitive> = vec![];

    match request.kind {
        FractalKind::SierpinskiCarpet => {
            let (x, y, size) = carpet_layout(width, height);
            shapes::sierpinski_carpet(x, y, size, shapes::CARPET_DEPTH, &mut primitives);
        }
        FractalKind::SierpinskiTriangle => {
            let (p1, p2, p3) = triangle_layout(width, height);
            shapes::sierpinski_triangle(p1, p2, p3, shapes::TRIANGLE_DEPTH, &mut primitives);
        }
        FractalKind::PythagorasTree => {
            let (root, size) = tree_layout(width, height);
            shapes::pythagoras_tree(root, size, FRAC_PI_2, shapes::TREE_DEPTH, &mut primitives);
        }
        // The escape-time kinds never reach the geometric branch.
        FractalKind::Mandelbrot | FractalKind::Julia => unreachable!(),
    }

    debug!("replaying {} primitives", primitives.len());
    for primitive in &primitives {
        draw(surface, primitive);
    }
}

fn draw<S: DrawSurface>(surface: &mut S, primitive: &ShapePrimitive) {
    match *primitive {
        ShapePrimitive::FilledRect {
            x,
            y,
            width,
            height,
        } => surface.fill_rect(x, y, width, height),
        ShapePrimitive::FilledPolygon(ref points) => surface.fill_polygon(points),
        ShapePrimitive::LineSegment { from, to } => {
            surface.stroke_line(from.0, from.1, to.0, to.1)
        }
    }
}

/// A square filling 80% of the smaller canvas dimension, centered.
fn carpet_layout(width: f64, height: f64) -> (f64, f64, f64) {
    let size = width.min(height) * SHAPE_FILL;
    ((width - size) / 2.0, (height - size) / 2.0, size)
}

/// An equilateral-ish triangle on an 80% base, centered horizontally,
/// with the base raised off the bottom so the apex has headroom.
fn triangle_layout(width: f64, height: f64) -> (Point, Point, Point) {
    let size = width.min(height) * SHAPE_FILL;
    let left = (width - size) / 2.0;
    let base = height - (height - size) / 2.0;
    (
        Point(left, base),
        Point(left + size, base),
        Point(left + size / 2.0, base - size * FRAC_PI_3.sin()),
    )
}

/// The trunk's root and length: 30% of the smaller dimension, planted
/// just above the bottom edge, growing straight up.
fn tree_layout(width: f64, height: f64) -> (Point, f64) {
    let size = width.min(height) * TREE_FILL;
    (Point(width / 2.0 - size / 2.0, height - TREE_BASELINE), size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use request::RenderRequest;
    use surface::{DrawSurface, Rgb};
    use viewport::Viewport;

    /// Records every draw call instead of rasterizing anything.
    #[derive(Default)]
    struct Recording {
        clears: usize,
        color: Option<Rgb>,
        rects: Vec<(f64, f64, f64, f64)>,
        polygons: usize,
        lines: usize,
    }

    impl DrawSurface for Recording {
        fn clear(&mut self) {
            self.clears += 1;
        }
        fn set_color(&mut self, color: Rgb) {
            self.color = Some(color);
        }
        fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
            self.rects.push((x, y, width, height));
        }
        fn fill_polygon(&mut self, _points: &[::shapes::Point]) {
            self.polygons += 1;
        }
        fn stroke_line(&mut self, _x1: f64, _y1: f64, _x2: f64, _y2: f64) {
            self.lines += 1;
        }
    }

    fn request(kind: FractalKind, width: usize, height: usize) -> RenderRequest {
        RenderRequest {
            kind,
            max_iterations: 50,
            color: Rgb(59, 130, 246),
            viewport: Viewport::new(),
            width,
            height,
        }
    }

    #[test]
    fn interior_pixels_are_painted_as_unit_rects() {
        // Every pixel of a tiny centered canvas maps to points within
        // a few thousandths of the origin, deep inside the set, so
        // every one of them hits the cap and gets painted.
        let mut surface = Recording::default();
        let mut compositor = Compositor::new();
        compositor
            .render(&request(FractalKind::Mandelbrot, 9, 9), &mut surface)
            .unwrap();

        assert_eq!(surface.clears, 1);
        assert_eq!(surface.color, Some(Rgb(59, 130, 246)));
        assert_eq!(surface.rects.len(), 81);
        assert!(surface.rects.contains(&(4.0, 4.0, 1.0, 1.0)));
    }

    #[test]
    fn escaped_pixels_are_left_as_background() {
        // Pan the single pixel out to roughly (2, 2) in fractal space,
        // which is outside the escape circle before the first step.
        let mut r = request(FractalKind::Mandelbrot, 1, 1);
        r.viewport = Viewport {
            zoom: 1.0,
            offset_x: 400.0,
            offset_y: 400.0,
        };

        let mut surface = Recording::default();
        Compositor::new().render(&r, &mut surface).unwrap();

        assert_eq!(surface.clears, 1);
        assert!(surface.rects.is_empty());
    }

    #[test]
    fn pooled_and_inline_frames_paint_the_same_pixels() {
        let mut r = request(FractalKind::Julia, 40, 30);
        r.viewport = Viewport::new().zoom_at(10.0, 10.0, 2.0);

        let mut inline = Recording::default();
        Compositor::new().render(&r, &mut inline).unwrap();

        let mut pooled = Recording::default();
        Compositor::with_pool(EvalPool::new(3))
            .render(&r, &mut pooled)
            .unwrap();

        assert_eq!(inline.rects, pooled.rects);
    }

    #[test]
    fn carpet_frame_replays_every_rectangle() {
        let mut surface = Recording::default();
        Compositor::new()
            .render(&request(FractalKind::SierpinskiCarpet, 300, 200), &mut surface)
            .unwrap();
        assert_eq!(surface.rects.len(), 8usize.pow(shapes::CARPET_DEPTH));
    }

    #[test]
    fn triangle_frame_replays_every_polygon() {
        let mut surface = Recording::default();
        Compositor::new()
            .render(
                &request(FractalKind::SierpinskiTriangle, 300, 200),
                &mut surface,
            )
            .unwrap();
        assert_eq!(surface.polygons, 3usize.pow(shapes::TRIANGLE_DEPTH));
    }

    #[test]
    fn tree_frame_replays_every_branch() {
        let mut surface = Recording::default();
        Compositor::new()
            .render(&request(FractalKind::PythagorasTree, 300, 200), &mut surface)
            .unwrap();
        assert_eq!(surface.lines, 2usize.pow(shapes::TREE_DEPTH) - 1);
    }

    #[test]
    fn an_invalid_request_never_touches_the_surface() {
        let mut r = request(FractalKind::Mandelbrot, 10, 10);
        r.max_iterations = 0;

        let mut surface = Recording::default();
        let mut compositor = Compositor::new();
        assert!(compositor.render(&r, &mut surface).is_err());
        assert_eq!(surface.clears, 0);
        assert!(surface.rects.is_empty());
        assert_eq!(compositor.state(), RenderState::Idle);
    }

    #[test]
    fn compositor_returns_to_idle_after_a_frame() {
        let mut surface = Recording::default();
        let mut compositor = Compositor::new();
        assert_eq!(compositor.state(), RenderState::Idle);
        compositor
            .render(&request(FractalKind::SierpinskiCarpet, 30, 30), &mut surface)
            .unwrap();
        assert_eq!(compositor.state(), RenderState::Idle);
    }

    #[test]
    fn triangle_layout_leaves_apex_headroom() {
        let (p1, p2, p3) = triangle_layout(300.0, 200.0);
        // 80% of 200 is 160: base runs from x=70 to x=230 at y=180,
        // apex is centered and above the base.
        assert_eq!(p1, Point(70.0, 180.0));
        assert_eq!(p2, Point(230.0, 180.0));
        assert!((p3.0 - 150.0).abs() < 1e-9);
        assert!(p3.1 > 0.0 && p3.1 < p1.1);
    }
}
