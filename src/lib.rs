#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Interactive fractal renderer core
//!
//! This crate is the rendering engine behind an interactive fractal
//! explorer.  It knows how to draw five classic fractals: two
//! escape-time fractals (the Mandelbrot and Julia sets), two
//! self-similar subdivision fractals (the Sierpinski carpet and
//! triangle), and one recursive branching fractal (the Pythagoras
//! tree).
//!
//! The escape-time fractals iterate `z = z*z + c` per pixel and paint
//! only the points whose orbits never leave the circle of radius two
//! within the iteration budget, so what you see is the black heart of
//! the set rather than the usual velocity-gradient halo.  The
//! geometric fractals are generated as pure sequences of draw
//! primitives, independent of any actual drawing surface.
//!
//! The crate deliberately ends at the `DrawSurface` seam: the host
//! owns the actual raster canvas, the event loop, and the widgets, and
//! hands us a `RenderRequest` snapshot whenever it wants a frame.  Pan
//! and zoom gestures flow through `Viewport`, which keeps the
//! screen-to-fractal mapping honest while the user drags the world
//! around.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod compositor;
pub mod escape;
pub mod pool;
pub mod request;
pub mod shapes;
pub mod surface;
pub mod viewport;

pub use compositor::{Compositor, RenderState};
pub use escape::EscapeFractal;
pub use pool::EvalPool;
pub use request::{FractalKind, RenderError, RenderRequest};
pub use shapes::{Point, ShapePrimitive};
pub use surface::{DrawSurface, Rgb};
pub use viewport::Viewport;
