//! Edge curves, arrowheads and curve hit distances.

use super::types::{EdgeStyle, Point};

/// The curve bows sideways by this fraction of the edge length.
const CURVE_OFFSET_RATIO: f64 = 5.0;
/// Arrowheads are pulled back from the target by this fraction of the edge vector.
const ARROW_PULLBACK_RATIO: f64 = 8.0;
/// Segments used to approximate a curve for hit testing.
pub const HIT_SEGMENTS: usize = 32;

/// Arrowhead outline in local coordinates, pointing along +x.
pub const ARROW_SHAPE: [Point; 3] = [
	Point::new(0.0, -4.0),
	Point::new(8.0, 0.0),
	Point::new(0.0, 4.0),
];

/// A quadratic Bézier from `start` through `control` to `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgePath {
	/// Source node position.
	pub start: Point,
	/// Quadratic control point.
	pub control: Point,
	/// Target node position.
	pub end: Point,
}

/// Where the arrowhead goes and how it is rotated (radians).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowPlacement {
	/// Where [`ARROW_SHAPE`]'s origin is translated to.
	pub origin: Point,
	/// Rotation applied to [`ARROW_SHAPE`].
	pub angle: f64,
}

/// Builds the curved connector between two node positions.
///
/// The control point sits on the perpendicular bisector, `distance / 5` to the
/// left of the travel direction. Coincident endpoints get a zero offset, so
/// the control point is simply the shared position.
pub fn build_edge_path(source: Point, target: Point) -> EdgePath {
	let mid = source.midpoint(target);
	let (dx, dy) = (target.x - source.x, target.y - source.y);
	let distance = dx.hypot(dy);

	let control = if distance > 0.0 && distance.is_finite() {
		let offset = distance / CURVE_OFFSET_RATIO;
		Point::new(mid.x - dy / distance * offset, mid.y + dx / distance * offset)
	} else {
		mid
	};

	EdgePath {
		start: source,
		control,
		end: target,
	}
}

/// Builds a connector in the requested style.
pub fn build_styled_path(source: Point, target: Point, style: EdgeStyle) -> EdgePath {
	match style {
		EdgeStyle::Curved => build_edge_path(source, target),
		EdgeStyle::Straight => EdgePath {
			start: source,
			control: source.midpoint(target),
			end: target,
		},
	}
}

impl EdgePath {
	/// Straight-line distance between the endpoints.
	pub fn length(&self) -> f64 {
		self.start.distance(self.end)
	}

	/// Point at parameter `t` in `[0, 1]`.
	pub fn sample(&self, t: f64) -> Point {
		let u = 1.0 - t;
		let (a, b, c) = (u * u, 2.0 * u * t, t * t);
		Point::new(
			a * self.start.x + b * self.control.x + c * self.end.x,
			a * self.start.y + b * self.control.y + c * self.end.y,
		)
	}

	/// Arrowhead origin at `end - d/8`, aligned with the chord direction.
	pub fn arrow(&self) -> ArrowPlacement {
		let (dx, dy) = (self.end.x - self.start.x, self.end.y - self.start.y);
		ArrowPlacement {
			origin: Point::new(
				self.end.x - dx / ARROW_PULLBACK_RATIO,
				self.end.y - dy / ARROW_PULLBACK_RATIO,
			),
			angle: dy.atan2(dx),
		}
	}

	/// Approximate distance from `p` to the curve, by uniform sampling.
	pub fn distance_to(&self, p: Point, segments: usize) -> f64 {
		let segments = segments.max(1);
		let mut prev = self.start;
		let mut best = f64::INFINITY;
		for i in 1..=segments {
			let next = self.sample(i as f64 / segments as f64);
			best = best.min(distance_to_segment(p, prev, next));
			prev = next;
		}
		best
	}
}

impl ArrowPlacement {
	/// The arrow outline in surface coordinates.
	pub fn polygon(&self) -> [Point; 3] {
		let (sin, cos) = self.angle.sin_cos();
		ARROW_SHAPE.map(|v| {
			Point::new(
				self.origin.x + v.x * cos - v.y * sin,
				self.origin.y + v.x * sin + v.y * cos,
			)
		})
	}
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
	let (abx, aby) = (b.x - a.x, b.y - a.y);
	let len_sq = abx * abx + aby * aby;
	if len_sq == 0.0 {
		return p.distance(a);
	}
	let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
	p.distance(Point::new(a.x + abx * t, a.y + aby * t))
}
