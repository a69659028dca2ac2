use crate::foundation::core::Point;

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Component-wise linear interpolation between two points.
pub fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Clamp to `[0, 1]`.
pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Euclidean distance.
pub fn dist(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Squared Euclidean distance.
pub fn dist2(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dx * dx + dy * dy
}

/// Evaluate a cubic Bézier at `t` (Bernstein form).
pub fn cubic_bezier(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    Point::new(
        b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
        b0 * p0.y + b1 * p1.y + b2 * p2.y + b3 * p3.y,
    )
}

/// Sample a cubic Bézier at `count` uniformly spaced parameters, endpoints included.
pub fn sample_cubic(p0: Point, p1: Point, p2: Point, p3: Point, count: usize) -> Vec<Point> {
    match count {
        0 => Vec::new(),
        1 => vec![p0],
        n => (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                cubic_bezier(p0, p1, p2, p3, t)
            })
            .collect(),
    }
}

/// Total arc length of a polyline.
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| dist(w[0], w[1])).sum()
}

/// Resample a polyline to exactly `m` points evenly spaced by arc length.
///
/// The first and last outputs are the input endpoints exactly. A single point or a polyline of
/// zero length yields `m` copies of its first point; an empty input yields an empty output.
pub fn resample_polyline(points: &[Point], m: usize) -> Vec<Point> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    if m == 0 {
        return Vec::new();
    }
    let total = polyline_length(points);
    if points.len() < 2 || total <= 0.0 {
        return vec![first; m];
    }
    if m == 1 {
        return vec![first];
    }

    let mut cumulative = Vec::with_capacity(points.len());
    let mut acc = 0.0;
    cumulative.push(0.0);
    for w in points.windows(2) {
        acc += dist(w[0], w[1]);
        cumulative.push(acc);
    }

    let mut out = Vec::with_capacity(m);
    let mut seg = 1;
    for k in 0..m {
        let target = total * (k as f64) / ((m - 1) as f64);
        while seg < points.len() - 1 && cumulative[seg] < target {
            seg += 1;
        }
        let seg_start = cumulative[seg - 1];
        let seg_len = cumulative[seg] - seg_start;
        let t = if seg_len > 0.0 {
            clamp01((target - seg_start) / seg_len)
        } else {
            0.0
        };
        out.push(lerp_point(points[seg - 1], points[seg], t));
    }

    out[0] = first;
    if let Some(&last) = points.last() {
        out[m - 1] = last;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
