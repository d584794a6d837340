//! Pure recursive generators for the three geometric fractals.  Each
//! generator decomposes a base shape into smaller self-similar copies
//! down to a caller-supplied depth, pushing a draw primitive at every
//! leaf.  None of them touch a drawing surface; they only describe
//! geometry, which keeps them trivially testable and lets the
//! compositor decide how the primitives reach pixels.

use std::f64::consts::FRAC_PI_4;

/// Subdivision depth the compositor uses for the Sierpinski carpet.
pub const CARPET_DEPTH: u32 = 5;
/// Subdivision depth the compositor uses for the Sierpinski triangle.
pub const TRIANGLE_DEPTH: u32 = 6;
/// Recursion depth the compositor uses for the Pythagoras tree.
pub const TREE_DEPTH: u32 = 12;

/// Each Pythagoras branch is this much shorter than its parent.
pub const TREE_SCALE: f64 = 0.7;
/// Each Pythagoras branch forks 45 degrees off its parent's heading.
pub const BRANCH_ANGLE: f64 = FRAC_PI_4;

/// The x, y of a point on the screen plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point(pub f64, pub f64);

impl Point {
    /// The point halfway between this one and `other`.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point((self.0 + other.0) / 2.0, (self.1 + other.1) / 2.0)
    }
}

/// The output alphabet of the subdivision generators.  The compositor
/// replays these against whatever `DrawSurface` the host supplied.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapePrimitive {
    /// An axis-aligned filled rectangle.
    FilledRect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Horizontal extent.
        width: f64,
        /// Vertical extent.
        height: f64,
    },
    /// A filled polygon through the listed vertices, closed back to
    /// the first.
    FilledPolygon(Vec<Point>),
    /// A stroked line segment.
    LineSegment {
        /// Where the segment starts.
        from: Point,
        /// Where the segment ends.
        to: Point,
    },
}

/// Subdivides a square into the Sierpinski carpet.  At depth zero the
/// square itself is emitted; otherwise the square is cut into a 3x3
/// grid and all eight outer cells recurse, leaving the center cell as
/// the hole.  Depth d yields 8^d rectangles of side `size / 3^d`.
pub fn sierpinski_carpet(x: f64, y: f64, size: f64, depth: u32, out: &mut Vec<ShapePrimitive>) {
    if depth == 0 {
        out.push(ShapePrimitive::FilledRect {
            x,
            y,
            width: size,
            height: size,
        });
        return;
    }

    let sub = size / 3.0;
    for i in 0..3 {
        for j in 0..3 {
            if i != 1 || j != 1 {
                sierpinski_carpet(
                    x + f64::from(i) * sub,
                    y + f64::from(j) * sub,
                    sub,
                    depth - 1,
                    out,
                );
            }
        }
    }
}

/// Subdivides a triangle into the Sierpinski triangle.  At depth zero
/// the triangle is emitted as a polygon; otherwise the three corner
/// sub-triangles formed by the edge midpoints recurse, and the central
/// inverted triangle is omitted by construction.  Depth d yields 3^d
/// polygons.
pub fn sierpinski_triangle(p1: Point, p2: Point, p3: Point, depth: u32, out: &mut Vec<ShapePrimitive>) {
    if depth == 0 {
        out.push(ShapePrimitive::FilledPolygon(vec![p1, p2, p3]));
        return;
    }

    let m12 = p1.midpoint(&p2);
    let m23 = p2.midpoint(&p3);
    let m31 = p3.midpoint(&p1);

    sierpinski_triangle(p1, m12, m31, depth - 1, out);
    sierpinski_triangle(m12, p2, m23, depth - 1, out);
    sierpinski_triangle(m31, m23, p3, depth - 1, out);
}

/// Grows a Pythagoras tree.  Each call strokes one branch from `root`
/// along `angle` (measured counter-clockwise from screen-east, with
/// the screen's y axis pointing down, so positive angles head up the
/// canvas) and then forks twice from the branch tip, scaled by
/// `TREE_SCALE` and rotated `BRANCH_ANGLE` either way.  Depth zero
/// emits nothing, so depth d yields 2^d - 1 segments.
pub fn pythagoras_tree(root: Point, size: f64, angle: f64, depth: u32, out: &mut Vec<ShapePrimitive>) {
    if depth == 0 {
        return;
    }

    let tip = Point(root.0 + size * angle.cos(), root.1 - size * angle.sin());
    out.push(ShapePrimitive::LineSegment { from: root, to: tip });

    let size = size * TREE_SCALE;
    pythagoras_tree(tip, size, angle + BRANCH_ANGLE, depth - 1, out);
    pythagoras_tree(tip, size, angle - BRANCH_ANGLE, depth - 1, out);
}
