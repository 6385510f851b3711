//! Interpolating curves through pixel-space points.
//!
//! Curves are fitted with the Catmull-Rom family and stored as cubic Bézier
//! segments, which canvas paths draw directly. The parameterization exponent
//! `alpha` selects the variant: 0.0 uniform, 0.5 centripetal, 1.0 chordal.
//! Centripetal curves never cusp or self-intersect within a segment.

/// Lengths below this are treated as coincident points.
const EPSILON: f64 = 1e-12;

/// A 2D point in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Point {
	/// Point at (`x`, `y`).
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance.
	pub fn distance(self, other: Point) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}

	/// Shortest distance from `self` to the segment `a`-`b`.
	pub fn distance_to_segment(self, a: Point, b: Point) -> f64 {
		let (dx, dy) = (b.x - a.x, b.y - a.y);
		let len_sq = dx * dx + dy * dy;
		if len_sq < EPSILON {
			return self.distance(a);
		}
		let t = (((self.x - a.x) * dx + (self.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
		self.distance(Point::new(a.x + t * dx, a.y + t * dy))
	}
}

/// One cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicSegment {
	/// Start point.
	pub from: Point,
	/// Control point near `from`.
	pub ctrl1: Point,
	/// Control point near `to`.
	pub ctrl2: Point,
	/// End point.
	pub to: Point,
}

impl CubicSegment {
	/// Evaluate the segment at `t` in `[0, 1]`.
	pub fn at(&self, t: f64) -> Point {
		let u = 1.0 - t;
		let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
		Point::new(
			a * self.from.x + b * self.ctrl1.x + c * self.ctrl2.x + d * self.to.x,
			a * self.from.y + b * self.ctrl1.y + c * self.ctrl2.y + d * self.to.y,
		)
	}
}

/// A smooth curve passing through every input point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurvePath {
	/// Segments in order. `segments[i].to == segments[i + 1].from`.
	pub segments: Vec<CubicSegment>,
}

impl CurvePath {
	/// Fit a Catmull-Rom spline with parameterization `alpha` through `points`.
	///
	/// End segments reuse their endpoint as the missing outer neighbor, so the
	/// curve starts and ends exactly at the first and last points.
	pub fn catmull_rom(points: &[Point], alpha: f64) -> Self {
		let segments = points
			.windows(2)
			.enumerate()
			.map(|(i, pair)| {
				let (p1, p2) = (pair[0], pair[1]);
				let p0 = i.checked_sub(1).map(|j| points[j]);
				let p3 = points.get(i + 2).copied();
				catmull_rom_segment(p0, p1, p2, p3, alpha)
			})
			.collect();
		Self { segments }
	}

	/// First point of the curve, `None` when empty.
	pub fn start(&self) -> Option<Point> {
		self.segments.first().map(|s| s.from)
	}

	/// Last point of the curve.
	pub fn end(&self) -> Option<Point> {
		self.segments.last().map(|s| s.to)
	}

	/// Polyline approximation with `steps` samples per segment, endpoints included.
	pub fn sample(&self, steps: usize) -> Vec<Point> {
		let steps = steps.max(1);
		let mut out = Vec::with_capacity(self.segments.len() * steps + 1);
		if let Some(start) = self.start() {
			out.push(start);
		}
		for seg in &self.segments {
			out.extend((1..=steps).map(|i| seg.at(i as f64 / steps as f64)));
		}
		out
	}

	/// Shortest distance from `p` to the sampled curve.
	pub fn distance_to(&self, p: Point, steps: usize) -> f64 {
		let samples = self.sample(steps);
		match samples.as_slice() {
			[] => f64::INFINITY,
			[only] => p.distance(*only),
			_ => samples
				.windows(2)
				.map(|w| p.distance_to_segment(w[0], w[1]))
				.fold(f64::INFINITY, f64::min),
		}
	}
}

/// Bézier form of the Catmull-Rom segment from `p1` to `p2`.
///
/// Neighbors are optional; a missing neighbor (or one coincident with the
/// segment end) leaves the corresponding control point on the endpoint.
fn catmull_rom_segment(
	p0: Option<Point>,
	p1: Point,
	p2: Point,
	p3: Option<Point>,
	alpha: f64,
) -> CubicSegment {
	// d^(2*alpha) and d^alpha for each knot interval
	let knot = |a: Point, b: Point| {
		let l_2a = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).powf(alpha);
		(l_2a.sqrt(), l_2a)
	};
	let (l12_a, l12_2a) = knot(p1, p2);

	let ctrl1 = match p0 {
		Some(p0) => {
			let (l01_a, l01_2a) = knot(p0, p1);
			if l01_a > EPSILON {
				let a = 2.0 * l01_2a + 3.0 * l01_a * l12_a + l12_2a;
				let n = 3.0 * l01_a * (l01_a + l12_a);
				Point::new(
					(p1.x * a - p0.x * l12_2a + p2.x * l01_2a) / n,
					(p1.y * a - p0.y * l12_2a + p2.y * l01_2a) / n,
				)
			} else {
				p1
			}
		}
		None => p1,
	};

	let ctrl2 = match p3 {
		Some(p3) => {
			let (l23_a, l23_2a) = knot(p2, p3);
			if l23_a > EPSILON {
				let b = 2.0 * l23_2a + 3.0 * l23_a * l12_a + l12_2a;
				let m = 3.0 * l23_a * (l23_a + l12_a);
				Point::new(
					(p2.x * b + p1.x * l23_2a - p3.x * l12_2a) / m,
					(p2.y * b + p1.y * l23_2a - p3.y * l12_2a) / m,
				)
			} else {
				p2
			}
		}
		None => p2,
	};

	CubicSegment {
		from: p1,
		ctrl1,
		ctrl2,
		to: p2,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: Point, b: Point) -> bool {
		a.distance(b) < 1e-9
	}

	#[test]
	fn curve_interpolates_every_point() {
		let pts = [
			Point::new(0.0, 100.0),
			Point::new(50.0, 20.0),
			Point::new(100.0, 100.0),
		];
		let curve = CurvePath::catmull_rom(&pts, 0.5);
		assert_eq!(curve.segments.len(), 2);
		assert!(close(curve.segments[0].from, pts[0]));
		assert!(close(curve.segments[0].to, pts[1]));
		assert!(close(curve.segments[1].at(0.0), pts[1]));
		assert!(close(curve.segments[1].at(1.0), pts[2]));
	}

	#[test]
	fn symmetric_arc_has_mirrored_controls() {
		let pts = [
			Point::new(0.0, 100.0),
			Point::new(50.0, 70.0),
			Point::new(100.0, 100.0),
		];
		let curve = CurvePath::catmull_rom(&pts, 0.5);
		let (first, second) = (curve.segments[0], curve.segments[1]);
		assert!((first.ctrl2.x - (100.0 - second.ctrl1.x)).abs() < 1e-9);
		assert!((first.ctrl2.y - second.ctrl1.y).abs() < 1e-9);
		// tangent at the apex is horizontal
		assert!((first.ctrl2.y - 70.0).abs() < 1e-9);
	}

	#[test]
	fn end_controls_sit_on_endpoints() {
		let pts = [Point::new(0.0, 0.0), Point::new(10.0, 5.0), Point::new(20.0, 0.0)];
		let curve = CurvePath::catmull_rom(&pts, 0.5);
		assert!(close(curve.segments[0].ctrl1, pts[0]));
		assert!(close(curve.segments[1].ctrl2, pts[2]));
	}

	#[test]
	fn degenerate_inputs() {
		assert!(CurvePath::catmull_rom(&[], 0.5).segments.is_empty());
		assert!(CurvePath::catmull_rom(&[Point::new(1.0, 1.0)], 0.5).segments.is_empty());
		let same = Point::new(3.0, 4.0);
		let curve = CurvePath::catmull_rom(&[same, same, same], 0.5);
		assert!(curve.sample(4).iter().all(|p| close(*p, same)));
	}

	#[test]
	fn distance_to_curve() {
		let pts = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
		let curve = CurvePath::catmull_rom(&pts, 0.5);
		assert!(curve.distance_to(Point::new(50.0, 3.0), 8) < 3.0 + 1e-9);
		assert!(curve.distance_to(Point::new(50.0, 40.0), 8) > 39.0);
		assert_eq!(CurvePath::default().distance_to(Point::new(0.0, 0.0), 8), f64::INFINITY);
	}

	#[test]
	fn segment_distance_clamps_to_endpoints() {
		let d = Point::new(-3.0, 4.0).distance_to_segment(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
		assert!((d - 5.0).abs() < 1e-9);
	}
}
