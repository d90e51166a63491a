//! Path geometry: radius scale, annular arcs and bundled splines
//!
//! Angles are in radians measured clockwise from 12 o'clock, so a point at
//! angle `a` and radius `r` sits at `(r·sin a, −r·cos a)` in SVG coordinates.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::Write;

/// Sweeps this close to a full turn are drawn as complete rings
const FULL_TURN: f64 = TAU - 1e-6;

/// Cubic B-spline to Bézier control point weights
const BASIS_1: [f64; 4] = [0.0, 2.0 / 3.0, 1.0 / 3.0, 0.0];
const BASIS_2: [f64; 4] = [0.0, 1.0 / 3.0, 2.0 / 3.0, 0.0];
const BASIS_3: [f64; 4] = [0.0, 1.0 / 6.0, 2.0 / 3.0, 1.0 / 6.0];

/// A point in SVG user space
pub type Point = (f64, f64);

/// Linear map from layout depth `[0, 1]` to a pixel radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    inner: f64,
    outer: f64,
}

impl RadiusScale {
    /// Scale mapping 0 to `inner` and 1 to `outer`
    #[must_use]
    pub const fn new(inner: f64, outer: f64) -> Self {
        Self { inner, outer }
    }

    /// The ring band used for a canvas of the given height: `[0.1h, 0.21h]`
    #[must_use]
    pub fn for_height(height: f64) -> Self {
        Self::new(0.1 * height, 0.21 * height)
    }

    /// Radius for a layout depth
    #[must_use]
    pub fn apply(&self, y: f64) -> f64 {
        (self.outer - self.inner).mul_add(y, self.inner)
    }
}

/// Format a coordinate compactly: at most three decimals, no trailing zeros
#[must_use]
pub fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Avoid printing "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let mut text = format!("{rounded:.3}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

fn fmt_point((x, y): Point) -> String {
    format!("{},{}", fmt_num(x), fmt_num(y))
}

/// Convert polar coordinates (angle clockwise from 12 o'clock) to SVG space
#[must_use]
pub fn polar(radius: f64, angle: f64) -> Point {
    let a = angle - FRAC_PI_2;
    (radius * a.cos(), radius * a.sin())
}

/// Rotation in degrees that turns a label laid along +x to point at `angle`
#[must_use]
pub fn label_rotation(angle: f64) -> f64 {
    (angle - FRAC_PI_2) / PI * 180.0
}

/// SVG path data for an annular sector
///
/// `start`/`end` are angles, `inner`/`outer` radii. An inner radius of zero
/// gives a pie slice.
#[must_use]
pub fn arc_path(start: f64, end: f64, inner: f64, outer: f64) -> String {
    let (a0, a1) = if end < start { (end, start) } else { (start, end) };
    let sweep = a1 - a0;
    let (r0, r1) = (fmt_num(inner), fmt_num(outer));
    let (nr0, nr1) = (fmt_num(-inner), fmt_num(-outer));

    if sweep >= FULL_TURN {
        let mut d = format!("M0,{r1}A{r1},{r1} 0 1,1 0,{nr1}A{r1},{r1} 0 1,1 0,{r1}");
        if inner > 0.0 {
            let _ = write!(d, "M0,{r0}A{r0},{r0} 0 1,0 0,{nr0}A{r0},{r0} 0 1,0 0,{r0}");
        }
        d.push('Z');
        return d;
    }

    let large = u8::from(sweep >= PI);
    let outer_start = fmt_point(polar(outer, a0));
    let outer_end = fmt_point(polar(outer, a1));
    if inner > 0.0 {
        let inner_end = fmt_point(polar(inner, a1));
        let inner_start = fmt_point(polar(inner, a0));
        format!(
            "M{outer_start}A{r1},{r1} 0 {large},1 {outer_end}L{inner_end}A{r0},{r0} 0 {large},0 {inner_start}Z"
        )
    } else {
        format!("M{outer_start}A{r1},{r1} 0 {large},1 {outer_end}L0,0Z")
    }
}

/// SVG path data for a bundled curve through `points`
///
/// Each point is first pulled towards the straight chord between the first
/// and last points: `tension` 1 keeps the points, 0 flattens them onto the
/// chord. A uniform cubic B-spline is then drawn through the result. Fewer
/// than three points are joined with straight segments.
#[must_use]
pub fn bundle_line(points: &[Point], tension: f64) -> String {
    if points.is_empty() {
        return String::new();
    }
    let straightened = straighten(points, tension);
    format!("M{}", basis(&straightened))
}

#[allow(clippy::cast_precision_loss)]
fn straighten(points: &[Point], tension: f64) -> Vec<Point> {
    let n = points.len() - 1;
    if n == 0 {
        return points.to_vec();
    }
    let (x0, y0) = points[0];
    let (dx, dy) = (points[n].0 - x0, points[n].1 - y0);
    points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| {
            let t = i as f64 / n as f64;
            (
                tension.mul_add(x, (1.0 - tension) * t.mul_add(dx, x0)),
                tension.mul_add(y, (1.0 - tension) * t.mul_add(dy, y0)),
            )
        })
        .collect()
}

fn dot4(weights: [f64; 4], values: [f64; 4]) -> f64 {
    weights.iter().zip(values).map(|(w, v)| w * v).sum()
}

fn linear(points: &[Point]) -> String {
    points
        .iter()
        .map(|&p| fmt_point(p))
        .collect::<Vec<_>>()
        .join("L")
}

/// Uniform cubic B-spline as Bézier segments, clamped at both ends
fn basis(points: &[Point]) -> String {
    if points.len() < 3 {
        return linear(points);
    }

    let (x0, y0) = points[0];
    let mut px = [x0, x0, x0, points[1].0];
    let mut py = [y0, y0, y0, points[1].1];
    let mut d = format!(
        "{}L{},{}",
        fmt_point(points[0]),
        fmt_num(dot4(BASIS_3, px)),
        fmt_num(dot4(BASIS_3, py))
    );

    let last = points[points.len() - 1];
    // The final point is repeated once so the curve reaches it
    for &(x, y) in points[2..].iter().chain(std::iter::once(&last)) {
        px.rotate_left(1);
        px[3] = x;
        py.rotate_left(1);
        py[3] = y;
        let _ = write!(
            d,
            "C{},{},{},{},{},{}",
            fmt_num(dot4(BASIS_1, px)),
            fmt_num(dot4(BASIS_1, py)),
            fmt_num(dot4(BASIS_2, px)),
            fmt_num(dot4(BASIS_2, py)),
            fmt_num(dot4(BASIS_3, px)),
            fmt_num(dot4(BASIS_3, py)),
        );
    }
    let _ = write!(d, "L{}", fmt_point(last));
    d
}
