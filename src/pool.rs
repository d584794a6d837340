//! Optional worker pool for the escape-time pixel sweep.
//!
//! A full-canvas Mandelbrot sweep at a generous iteration cap is the
//! one genuinely expensive thing this crate does, and every pixel is
//! independent of every other, so the sweep parallelizes trivially:
//! workers pull rows off a shared queue, evaluate them with the exact
//! same per-point function the inline sweep uses, and hand the
//! finished rows back to the calling thread for assembly.  The output
//! is bit-identical to the single-threaded sweep for every input.

extern crate crossbeam;
extern crate num_cpus;

use std::sync::{Arc, Mutex};

use crossbeam::thread::ScopedJoinHandle;
use num::Complex;

use escape::{EscapeFractal, ESCAPE_SCALE};
use viewport::Viewport;

/// Pool size used when hardware parallelism cannot be detected.
const FALLBACK_WORKERS: usize = 4;

/// One unit of escape-time work: a single fractal-space point and an
/// iteration budget.  Tasks are stateless and carry everything they
/// need, so any worker can take any task and a lost task can simply
/// be evaluated again.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SweepTask {
    /// Which recurrence to run.
    pub kind: EscapeFractal,
    /// Real part of the fractal-space point.
    pub x0: f64,
    /// Imaginary part of the fractal-space point.
    pub y0: f64,
    /// Iteration budget.
    pub limit: u32,
}

impl SweepTask {
    /// Runs the task to completion, returning the escape iteration
    /// count in `[0, limit]`.
    pub fn eval(&self) -> u32 {
        self.kind.eval(Complex::new(self.x0, self.y0), self.limit)
    }
}

/// A fixed-size pool of escape-time evaluators.  Constructed once at
/// startup; holds no state beyond its size, so teardown is just
/// dropping it.
#[derive(Clone, Debug)]
pub struct EvalPool {
    threads: usize,
}

impl EvalPool {
    /// Creates a pool of `threads` workers.  Zero means "size to the
    /// machine": the detected hardware parallelism, or
    /// `FALLBACK_WORKERS` if detection reports nothing usable.
    pub fn new(threads: usize) -> EvalPool {
        let threads = match threads {
            0 => num_cpus::get(),
            n => n,
        };
        let threads = if threads == 0 { FALLBACK_WORKERS } else { threads };
        EvalPool { threads }
    }

    /// How many workers a sweep will spawn.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Evaluates every pixel of a `width` x `height` canvas, returning
    /// the escape counts in row-major order.  Rows are distributed to
    /// the workers through a shared queue; if a worker dies, whatever
    /// rows it had claimed are re-evaluated inline on the calling
    /// thread, so no pixel is ever dropped.
    pub fn sweep(
        &self,
        kind: EscapeFractal,
        viewport: Viewport,
        width: usize,
        height: usize,
        limit: u32,
    ) -> Vec<u32> {
        self.sweep_with(width, height, |py| {
            eval_row(kind, viewport, py, width, height, limit)
        })
    }

    // The sweep machinery, parameterized over the row evaluator so the
    // worker-death recovery path can be driven deliberately from tests.
    fn sweep_with<F>(&self, width: usize, height: usize, row_fn: F) -> Vec<u32>
    where
        F: Fn(usize) -> Vec<u32> + Sync,
    {
        let mut counts = vec![0 as u32; width * height];
        let mut filled = vec![false; height];
        let rows = Arc::new(Mutex::new(0..height));
        let row_fn = &row_fn;

        crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<Vec<(usize, Vec<u32>)>>> = (0..self.threads)
                .map(|_| {
                    let rows = rows.clone();
                    spawner.spawn(move |_| {
                        let mut done: Vec<(usize, Vec<u32>)> = vec![];
                        loop {
                            // A sibling that panicked poisons the
                            // queue, but the queue itself is still
                            // sound; recover the guard and keep
                            // pulling rather than cascading the panic
                            // through every surviving worker.
                            let row = {
                                let mut rows = rows
                                    .lock()
                                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                                rows.next()
                            };
                            match row {
                                Some(py) => {
                                    done.push((py, row_fn(py)));
                                }
                                None => {
                                    break;
                                }
                            }
                        }
                        done
                    })
                })
                .collect();

            for handle in handles {
                if let Ok(done) = handle.join() {
                    for (py, row) in done {
                        counts[py * width..(py + 1) * width].copy_from_slice(&row);
                        filled[py] = true;
                    }
                }
            }
        })
        .unwrap();

        for py in 0..height {
            if !filled[py] {
                warn!("worker lost row {}; re-evaluating inline", py);
                let row = row_fn(py);
                counts[py * width..(py + 1) * width].copy_from_slice(&row);
            }
        }

        counts
    }
}

/// Evaluates one canvas row, mapping each pixel through the viewport
/// and running the recurrence.  Both the pool workers and the
/// compositor's inline sweep go through here, which is what makes the
/// two paths agree bit-for-bit.
pub fn eval_row(
    kind: EscapeFractal,
    viewport: Viewport,
    py: usize,
    width: usize,
    height: usize,
    limit: u32,
) -> Vec<u32> {
    (0..width)
        .map(|px| {
            let point = viewport.screen_to_fractal(
                px as f64,
                py as f64,
                width as f64,
                height as f64,
                ESCAPE_SCALE,
            );
            SweepTask {
                kind,
                x0: point.re,
                y0: point.im,
                limit,
            }
            .eval()
        })
        .collect()
}
