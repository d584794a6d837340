//! The RenderRequest value object, the immutable snapshot of
//! everything one frame needs, and the small error taxonomy for
//! rejecting requests that could never render sensibly.  The host UI
//! assembles a request from its widgets and gesture state; validation
//! happens here, once, instead of being smeared across the renderer.

use escape::EscapeFractal;
use surface::Rgb;
use viewport::Viewport;

/// The five fractals this crate knows how to render.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FractalKind {
    /// Escape-time: `z = z*z + c` with `c` varying per pixel.
    Mandelbrot,
    /// Escape-time: `z = z*z + c` with a fixed `c` and `z` per pixel.
    Julia,
    /// Self-similar subdivision of a square, 8 of 9 cells kept.
    SierpinskiCarpet,
    /// Self-similar subdivision of a triangle, 3 of 4 kept.
    SierpinskiTriangle,
    /// Recursive binary branching from a trunk segment.
    PythagorasTree,
}

impl FractalKind {
    /// The escape-time variant this kind maps to, or `None` for the
    /// geometric fractals.  The compositor dispatches on this, and the
    /// pool only ever sees the `Some` cases.
    pub fn escape_variant(&self) -> Option<EscapeFractal> {
        match *self {
            FractalKind::Mandelbrot => Some(EscapeFractal::Mandelbrot),
            FractalKind::Julia => Some(EscapeFractal::Julia),
            _ => None,
        }
    }
}

/// Everything that can be wrong with a render request.  None of these
/// are fatal; a rejected request leaves the surface holding its last
/// good frame.
#[derive(Debug, Fail, PartialEq)]
pub enum RenderError {
    /// The iteration cap was zero; the escape-time sweep would
    /// classify every point as escaped and paint nothing meaningful.
    #[fail(display = "iteration cap must be at least one")]
    InvalidIterations,

    /// The canvas has no pixels in at least one dimension.
    #[fail(display = "canvas dimensions must be positive, got {}x{}", width, height)]
    InvalidCanvas {
        /// Requested canvas width.
        width: usize,
        /// Requested canvas height.
        height: usize,
    },

    /// The viewport carries a non-finite or non-positive zoom or a
    /// non-finite offset.  The viewport's own gesture operations clamp
    /// these away, so seeing one here means the host built a viewport
    /// by hand and got it wrong.
    #[fail(display = "degenerate viewport: zoom {}, offset ({}, {})", zoom, offset_x, offset_y)]
    InvalidViewport {
        /// The offending zoom.
        zoom: f64,
        /// The offending horizontal offset.
        offset_x: f64,
        /// The offending vertical offset.
        offset_y: f64,
    },
}

/// One frame's worth of parameters.  Built by the host per redraw and
/// treated as read-only by the renderer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderRequest {
    /// Which fractal to draw.
    pub kind: FractalKind,
    /// Iteration budget for the escape-time sweep.  Ignored by the
    /// geometric fractals, whose depths are fixed constants.
    pub max_iterations: u32,
    /// Fill and stroke color for everything drawn this frame.
    pub color: Rgb,
    /// Current pan/zoom state.
    pub viewport: Viewport,
    /// Canvas width in pixels.
    pub width: usize,
    /// Canvas height in pixels.
    pub height: usize,
}

impl RenderRequest {
    /// Builds and validates a request in one step.
    pub fn new(
        kind: FractalKind,
        max_iterations: u32,
        color: Rgb,
        viewport: Viewport,
        width: usize,
        height: usize,
    ) -> Result<RenderRequest, RenderError> {
        let request = RenderRequest {
            kind,
            max_iterations,
            color,
            viewport,
            width,
            height,
        };
        request.validate()?;
        Ok(request)
    }

    /// Checks the request against the validity rules.  The compositor
    /// re-runs this before touching the surface, so a host that builds
    /// requests by struct literal still cannot smuggle in a bad one.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.max_iterations == 0 {
            return Err(RenderError::InvalidIterations);
        }
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        let v = self.viewport;
        if !v.zoom.is_finite() || v.zoom <= 0.0 || !v.offset_x.is_finite() || !v.offset_y.is_finite() {
            return Err(RenderError::InvalidViewport {
                zoom: v.zoom,
                offset_x: v.offset_x,
                offset_y: v.offset_y,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good() -> RenderRequest {
        RenderRequest {
            kind: FractalKind::Mandelbrot,
            max_iterations: 100,
            color: Rgb(59, 130, 246),
            viewport: Viewport::new(),
            width: 800,
            height: 600,
        }
    }

    #[test]
    fn a_sensible_request_validates() {
        assert!(good().validate().is_ok());
        assert!(RenderRequest::new(
            FractalKind::Julia,
            50,
            Rgb(0, 0, 0),
            Viewport::new(),
            1,
            1,
        )
        .is_ok());
    }

    #[test]
    fn zero_iterations_are_rejected() {
        let mut r = good();
        r.max_iterations = 0;
        assert_eq!(r.validate(), Err(RenderError::InvalidIterations));
    }

    #[test]
    fn empty_canvases_are_rejected() {
        let mut r = good();
        r.height = 0;
        assert_eq!(
            r.validate(),
            Err(RenderError::InvalidCanvas {
                width: 800,
                height: 0,
            })
        );
    }

    #[test]
    fn hand_built_degenerate_viewports_are_rejected() {
        let mut r = good();
        r.viewport.zoom = 0.0;
        assert!(r.validate().is_err());

        let mut r = good();
        r.viewport.offset_x = ::std::f64::NAN;
        assert!(r.validate().is_err());
    }

    #[test]
    fn only_the_escape_time_kinds_have_variants() {
        assert_eq!(
            FractalKind::Mandelbrot.escape_variant(),
            Some(EscapeFractal::Mandelbrot)
        );
        assert_eq!(FractalKind::Julia.escape_variant(), Some(EscapeFractal::Julia));
        assert_eq!(FractalKind::SierpinskiCarpet.escape_variant(), None);
        assert_eq!(FractalKind::SierpinskiTriangle.escape_variant(), None);
        assert_eq!(FractalKind::PythagorasTree.escape_variant(), None);
    }
}
