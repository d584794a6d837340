// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time evaluators for the Mandelbrot and Julia sets.
//!
//! Both sets iterate the same recurrence, `z = z*z + c`, and classify
//! a point by how many steps its orbit takes to leave the circle of
//! radius two.  Once the orbit's magnitude passes two it is proven to
//! diverge, so the loop tests `norm_sqr() >= 4` rather than paying for
//! a square root.  The two sets differ only in where the orbit starts
//! and what the additive constant is: the Mandelbrot varies `c` per
//! point and starts the orbit at the origin, while the Julia starts
//! the orbit at the point and holds `c` fixed.

use num::Complex;

/// How many pixels one unit of fractal space spans at zoom one.  The
/// evaluators live in the mathematically interesting window around the
/// origin, a few units across; the viewport hands out re-centered
/// pixel coordinates, and this constant brings them down into that
/// window.
pub const ESCAPE_SCALE: f64 = 200.0;

/// The fixed Julia constant.  This particular `c` sits near the edge
/// of the Mandelbrot set and produces a nicely dendritic Julia set.
pub const JULIA_C: Complex<f64> = Complex { re: -0.4, im: 0.6 };

/// Names the two escape-time fractals, for render dispatch and for
/// tagging pool tasks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EscapeFractal {
    /// Orbit starts at the origin, constant is the input point.
    Mandelbrot,
    /// Orbit starts at the input point, constant is `JULIA_C`.
    Julia,
}

impl EscapeFractal {
    /// Evaluates one fractal-space point under this variant's
    /// recurrence.
    pub fn eval(&self, point: Complex<f64>, limit: u32) -> u32 {
        match *self {
            EscapeFractal::Mandelbrot => mandelbrot(point, limit),
            EscapeFractal::Julia => julia(point, limit),
        }
    }
}

/// Counts the iterations before the Mandelbrot orbit of `c` escapes,
/// up to `limit`.  A result equal to `limit` means the orbit stayed
/// bounded for the whole budget and the point is (as far as we can
/// tell) inside the set.
pub fn mandelbrot(c: Complex<f64>, limit: u32) -> u32 {
    escape_count(Complex { re: 0.0, im: 0.0 }, c, limit)
}

/// Counts the iterations before the Julia orbit starting at `z0`
/// escapes, up to `limit`.
pub fn julia(z0: Complex<f64>, limit: u32) -> u32 {
    escape_count(z0, JULIA_C, limit)
}

// The shared iteration skeleton.  The complex multiply performs the
// coupled update (x' = x^2 - y^2 + cx, y' = 2xy + cy) as one value, so
// the new x can never leak into the computation of the new y.
fn escape_count(mut z: Complex<f64>, c: Complex<f64>, limit: u32) -> u32 {
    let mut iter = 0;
    while z.norm_sqr() < 4.0 && iter < limit {
        z = z * z + c;
        iter += 1;
    }
    iter
}
