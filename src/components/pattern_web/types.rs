//! Plain data shared across the pattern web.

/// A labeled node in the pattern web together with its outgoing edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
	/// Unique key.
	pub id: String,
	/// Display text.
	pub label: String,
	/// Target ids, in order. Unknown ids are skipped when the scene is built.
	pub connected_to: Vec<String>,
}

impl Pattern {
	/// Builds a pattern from anything string-like.
	pub fn new<I, S>(id: impl Into<String>, label: impl Into<String>, connected_to: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			id: id.into(),
			label: label.into(),
			connected_to: connected_to.into_iter().map(Into::into).collect(),
		}
	}
}

/// A position on the drawing surface, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal offset from the left edge.
	pub x: f64,
	/// Vertical offset from the top edge.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Halfway between `self` and `other`.
	pub fn midpoint(self, other: Point) -> Point {
		Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Point) -> f64 {
		(other.x - self.x).hypot(other.y - self.y)
	}

	/// Neither coordinate is NaN or infinite.
	pub fn is_finite(self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}
}

/// Identity of a directed edge: the `(source, target)` id pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey {
	/// Id of the node the edge leaves.
	pub source: String,
	/// Id of the node the edge points at.
	pub target: String,
}

impl EdgeKey {
	/// Key for the edge `source -> target`.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}

	/// Whether `id` is either endpoint.
	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}
}

/// How connectors are drawn between node positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeStyle {
	/// Quadratic curve bowed to the left of the travel direction.
	#[default]
	Curved,
	/// Plain chord from source to target.
	Straight,
}

/// Rendering and emphasis knobs for [`PatternWeb`](super::PatternWeb).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatternWebOptions {
	/// Curved or straight connectors.
	pub edge_style: EdgeStyle,
	/// Draw an arrowhead near each edge's target.
	pub arrows: bool,
	/// Also emphasize both endpoint nodes of the hovered edge.
	pub highlight_edge_endpoints: bool,
}

impl Default for PatternWebOptions {
	fn default() -> Self {
		Self {
			edge_style: EdgeStyle::Curved,
			arrows: true,
			highlight_edge_endpoints: true,
		}
	}
}
