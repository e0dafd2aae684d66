/// Scalar and 2D helpers used by the projection and scanline stages
use nalgebra::Point2;

/// Convert a field-of-view angle (degrees) into the projection scale factor.
///
/// The result is multiplied by the larger raster dimension to get the
/// pixel scale used for the perspective divide.
pub fn to_fov(degrees: f64) -> f64 {
    ((180.0 - degrees) / 2.0).to_radians().tan() / 2.0
}

/// Linearly map `x` from `[a_min, a_max]` onto `[b_min, b_max]`.
///
/// Values outside the source domain extrapolate. A degenerate domain
/// (`a_min == a_max`) maps everything to `b_min`.
pub fn remap(x: f64, a_min: f64, a_max: f64, b_min: f64, b_max: f64) -> f64 {
    let span = a_max - a_min;
    if span == 0.0 {
        return b_min;
    }
    (x - a_min) * (b_max - b_min) / span + b_min
}

/// Rotate a point around the origin in 2D
pub fn rotate_2d(point: Point2<f64>, sin: f64, cos: f64) -> Point2<f64> {
    Point2::new(point.x * cos + point.y * sin, point.x * -sin + point.y * cos)
}

/// Whether `a`, `b`, `c` wind clockwise in screen space (y down).
pub fn is_clockwise(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> bool {
    (c.y - a.y) * (b.x - a.x) < (b.y - a.y) * (c.x - a.x)
}

/// Intersect segment `a-b` with segment `c-d`.
///
/// Parallel, coincident and zero-length segments all report an
/// intersection at the midpoint of `a-b`.
pub fn line_intersection(
    a: Point2<f64>,
    b: Point2<f64>,
    c: Point2<f64>,
    d: Point2<f64>,
) -> Option<Point2<f64>> {
    let s1 = b - a;
    let s2 = d - c;

    let dx = a.x - c.x;
    let dy = a.y - c.y;
    let denom = -s2.x * s1.y + s1.x * s2.y;

    if denom == 0.0 {
        return Some(nalgebra::center(&a, &b));
    }

    let s = (-s1.y * dx + s1.x * dy) / denom;
    let t = (s2.x * dy - s2.y * dx) / denom;

    if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t) {
        Some(a + s1 * t)
    } else {
        None
    }
}
