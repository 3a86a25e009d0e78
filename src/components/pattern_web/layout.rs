//! Circular node placement.

use std::collections::HashMap;
use std::f64::consts::PI;

use super::types::{Pattern, Point};

/// Fraction of the half-extent of the shorter side used as the circle radius.
pub const RADIUS_FACTOR: f64 = 0.7;

/// Places `nodes` evenly on a circle centred in a `width` x `height` surface.
///
/// Node `i` sits at angle `i * 2π / n`, starting at three o'clock and running
/// clockwise in screen coordinates. The result depends only on the inputs, so
/// callers recompute it wholesale whenever the node list or surface changes.
/// Empty or non-finite surfaces collapse every node onto the centre.
pub fn compute_layout(nodes: &[Pattern], width: f64, height: f64) -> HashMap<String, Point> {
	let (width, height) = (finite_or_zero(width), finite_or_zero(height));
	let center = Point::new(width / 2.0, height / 2.0);
	let radius = (RADIUS_FACTOR * width.min(height) / 2.0).max(0.0);
	let angle_step = 2.0 * PI / nodes.len().max(1) as f64;

	nodes
		.iter()
		.enumerate()
		.map(|(i, node)| {
			let angle = i as f64 * angle_step;
			let position = Point::new(
				center.x + radius * angle.cos(),
				center.y + radius * angle.sin(),
			);
			(node.id.clone(), position)
		})
		.collect()
}

fn finite_or_zero(v: f64) -> f64 {
	if v.is_finite() { v } else { 0.0 }
}
