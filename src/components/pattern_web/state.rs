//! Scene, hit testing and emphasis fades behind the canvas.

use std::collections::HashMap;

use log::debug;

use super::interaction::{InteractionState, NodeClicked};
use super::layout::compute_layout;
use super::path::{EdgePath, HIT_SEGMENTS, build_styled_path};
use super::types::{EdgeKey, Pattern, PatternWebOptions, Point};

/// Estimated advance of one label character, in pixels.
pub const LABEL_CHAR_WIDTH: f64 = 7.0;
/// Height of the single label line.
pub const LABEL_LINE_HEIGHT: f64 = 20.0;
/// Horizontal padding on each side of a label pill.
pub const NODE_PADDING_X: f64 = 16.0;
/// Vertical padding above and below a label pill.
pub const NODE_PADDING_Y: f64 = 8.0;
/// Width of the invisible stroke around each edge that counts as hovering it.
pub const EDGE_HIT_WIDTH: f64 = 20.0;

const EDGE_FADE_SECS: f64 = 0.3;
const NODE_FADE_SECS: f64 = 0.2;

/// A node placed on the surface, with the size of its label pill.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	/// Pattern id.
	pub id: String,
	/// Text drawn in the pill.
	pub label: String,
	/// Centre of the pill.
	pub position: Point,
	/// Pill width.
	pub width: f64,
	/// Pill height.
	pub height: f64,
}

impl SceneNode {
	fn new(pattern: &Pattern, position: Point) -> Self {
		let chars = pattern.label.chars().count() as f64;
		Self {
			id: pattern.id.clone(),
			label: pattern.label.clone(),
			position,
			width: LABEL_CHAR_WIDTH * chars + 2.0 * NODE_PADDING_X,
			height: LABEL_LINE_HEIGHT + 2.0 * NODE_PADDING_Y,
		}
	}

	/// Whether `p` falls inside the label pill.
	pub fn contains(&self, p: Point) -> bool {
		(p.x - self.position.x).abs() <= self.width / 2.0
			&& (p.y - self.position.y).abs() <= self.height / 2.0
	}
}

/// A resolved connector between two laid-out nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneEdge {
	/// Source and target ids.
	pub key: EdgeKey,
	/// Geometry in surface coordinates.
	pub path: EdgePath,
}

/// An edge ready to draw, with emphasis resolved against the current state.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRenderSpec {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Curve to draw.
	pub path: EdgePath,
	/// Whether hover or selection currently highlights this edge.
	pub emphasized: bool,
}

/// What the pointer is over, as indices into the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
	/// Index into [`PatternWebState::nodes`].
	Node(usize),
	/// Index into [`PatternWebState::edges`].
	Edge(usize),
}

/// Everything the canvas needs between frames: the laid-out scene, the
/// interaction state and the per-element emphasis fades.
pub struct PatternWebState {
	/// Rendering and emphasis knobs.
	pub options: PatternWebOptions,
	/// Current hover and selection.
	pub interaction: InteractionState,
	/// Surface width in CSS pixels.
	pub width: f64,
	/// Surface height in CSS pixels.
	pub height: f64,
	patterns: Vec<Pattern>,
	positions: HashMap<String, Point>,
	nodes: Vec<SceneNode>,
	edges: Vec<SceneEdge>,
	pointer: Option<HitTarget>,
	node_fade: HashMap<String, f64>,
	edge_fade: Vec<f64>,
}

impl PatternWebState {
	/// Lays out `patterns` on a `width` x `height` surface with nothing hovered or selected.
	pub fn new(patterns: Vec<Pattern>, options: PatternWebOptions, width: f64, height: f64) -> Self {
		let mut state = Self {
			options,
			interaction: InteractionState::default(),
			width,
			height,
			patterns,
			positions: HashMap::new(),
			nodes: Vec::new(),
			edges: Vec::new(),
			pointer: None,
			node_fade: HashMap::new(),
			edge_fade: Vec::new(),
		};
		state.rebuild();
		state
	}

	/// Swaps in a new node list. Hover and selection survive; ids that no
	/// longer exist simply match nothing.
	pub fn set_patterns(&mut self, patterns: Vec<Pattern>) {
		self.patterns = patterns;
		self.rebuild();
	}

	/// Replaces the node list and surface size together with a single layout pass.
	pub fn update(&mut self, patterns: Vec<Pattern>, width: f64, height: f64) {
		self.patterns = patterns;
		self.width = width;
		self.height = height;
		self.rebuild();
	}

	/// Recomputes the layout for a new surface size. Same size is a no-op.
	pub fn resize(&mut self, width: f64, height: f64) {
		if self.width == width && self.height == height {
			return;
		}
		self.width = width;
		self.height = height;
		self.rebuild();
	}

	fn rebuild(&mut self) {
		self.positions = compute_layout(&self.patterns, self.width, self.height);
		self.nodes = self
			.patterns
			.iter()
			.filter_map(|p| self.positions.get(&p.id).map(|&pos| SceneNode::new(p, pos)))
			.collect();

		self.edges.clear();
		for pattern in &self.patterns {
			let Some(&source) = self.positions.get(&pattern.id) else {
				continue;
			};
			for target_id in &pattern.connected_to {
				let Some(&target) = self.positions.get(target_id) else {
					debug!("pattern {:?} links to unknown {:?}, skipping", pattern.id, target_id);
					continue;
				};
				self.edges.push(SceneEdge {
					key: EdgeKey::new(pattern.id.as_str(), target_id.as_str()),
					path: build_styled_path(source, target, self.options.edge_style),
				});
			}
		}

		// Old hit indices may point at different elements now; the next
		// pointer move re-enters whatever sits under the cursor.
		self.leave_current();
		self.pointer = None;
		self.edge_fade = self
			.edges
			.iter()
			.map(|e| f64::from(u8::from(self.interaction.is_edge_emphasized(&e.key))))
			.collect();
		self.node_fade.retain(|id, _| self.positions.contains_key(id));
		debug!(
			"laid out {} nodes and {} edges on {}x{}",
			self.nodes.len(),
			self.edges.len(),
			self.width,
			self.height
		);
	}

	/// Node id to position, as computed by [`compute_layout`].
	pub fn positions(&self) -> &HashMap<String, Point> {
		&self.positions
	}

	/// Laid-out nodes in input order.
	pub fn nodes(&self) -> &[SceneNode] {
		&self.nodes
	}

	/// Edges whose endpoints both exist, in input order.
	pub fn edges(&self) -> &[SceneEdge] {
		&self.edges
	}

	/// Edges with emphasis resolved against the current interaction state.
	pub fn edge_specs(&self) -> Vec<EdgeRenderSpec> {
		self.edges
			.iter()
			.map(|e| EdgeRenderSpec {
				source: e.key.source.clone(),
				target: e.key.target.clone(),
				path: e.path,
				emphasized: self.interaction.is_edge_emphasized(&e.key),
			})
			.collect()
	}

	/// Emphasis for node `id` under the configured endpoint policy.
	pub fn is_node_emphasized(&self, id: &str) -> bool {
		self.interaction
			.is_node_emphasized(id, self.options.highlight_edge_endpoints)
	}

	/// Node indices back to front: plain nodes first, then selected or
	/// hovered ones so they sit on top.
	pub fn draw_order(&self) -> Vec<usize> {
		let raised = |n: &SceneNode| {
			self.interaction.is_selected(&n.id) || self.interaction.is_hovered(&n.id)
		};
		let (mut top, mut bottom): (Vec<usize>, Vec<usize>) =
			(0..self.nodes.len()).partition(|&i| raised(&self.nodes[i]));
		bottom.append(&mut top);
		bottom
	}

	/// Nodes win over edges; among edges the closest within the hit width wins.
	pub fn hit_test(&self, p: Point) -> Option<HitTarget> {
		if let Some(i) = self
			.draw_order()
			.into_iter()
			.rev()
			.find(|&i| self.nodes[i].contains(p))
		{
			return Some(HitTarget::Node(i));
		}

		let mut best = None;
		let mut best_dist = EDGE_HIT_WIDTH / 2.0;
		for (i, edge) in self.edges.iter().enumerate() {
			let dist = edge.path.distance_to(p, HIT_SEGMENTS);
			if dist < best_dist {
				best_dist = dist;
				best = Some(HitTarget::Edge(i));
			}
		}
		best
	}

	/// What the pointer was last over.
	pub fn pointer_target(&self) -> Option<HitTarget> {
		self.pointer
	}

	/// Routes a pointer move into leave/enter transitions. Returns whether the
	/// target changed.
	pub fn pointer_move(&mut self, p: Point) -> bool {
		let target = self.hit_test(p);
		if target == self.pointer {
			return false;
		}
		self.leave_current();
		match target {
			Some(HitTarget::Node(i)) => self.interaction.pointer_enter_node(&self.nodes[i].id),
			Some(HitTarget::Edge(i)) => self.interaction.pointer_enter_edge(&self.edges[i].key),
			None => {}
		}
		self.pointer = target;
		true
	}

	/// Pointer left the surface: clears whatever hover is active.
	pub fn pointer_leave(&mut self) {
		self.leave_current();
		self.pointer = None;
	}

	fn leave_current(&mut self) {
		match self.pointer {
			Some(HitTarget::Node(_)) => self.interaction.pointer_leave_node(),
			Some(HitTarget::Edge(_)) => self.interaction.pointer_leave_edge(),
			None => {}
		}
	}

	/// Selects the node under `p`, if any. Clicks on empty space or edges do
	/// nothing.
	pub fn click(&mut self, p: Point) -> Option<NodeClicked> {
		match self.hit_test(p) {
			Some(HitTarget::Node(i)) => {
				let id = self.nodes[i].id.clone();
				Some(self.interaction.click_node(&id))
			}
			_ => None,
		}
	}

	/// CSS cursor for the current pointer target.
	pub fn cursor(&self) -> &'static str {
		if self.pointer.is_some() { "pointer" } else { "default" }
	}

	/// Moves every emphasis fade towards its current target. Returns whether
	/// anything is still in motion.
	pub fn tick(&mut self, dt: f64) -> bool {
		let mut moving = false;

		let edge_step = dt / EDGE_FADE_SECS;
		for (i, edge) in self.edges.iter().enumerate() {
			let target = f64::from(u8::from(self.interaction.is_edge_emphasized(&edge.key)));
			moving |= approach(&mut self.edge_fade[i], target, edge_step);
		}

		let node_step = dt / NODE_FADE_SECS;
		for node in &self.nodes {
			let target = f64::from(u8::from(self.is_node_emphasized(&node.id)));
			let level = self.node_fade.entry(node.id.clone()).or_insert(0.0);
			moving |= approach(level, target, node_step);
		}
		moving
	}

	/// Emphasis of edge `i` in `[0, 1]`, eased over the fade duration.
	pub fn edge_emphasis(&self, i: usize) -> f64 {
		self.edge_fade.get(i).copied().unwrap_or(0.0)
	}

	/// Emphasis of node `id` in `[0, 1]`, eased over the fade duration.
	pub fn node_emphasis(&self, id: &str) -> f64 {
		self.node_fade.get(id).copied().unwrap_or(0.0)
	}
}

fn approach(level: &mut f64, target: f64, step: f64) -> bool {
	if *level < target {
		*level = (*level + step).min(target);
	} else if *level > target {
		*level = (*level - step).max(target);
	}
	*level != target
}

#[cfg(test)]
mod tests {
	use super::*;

	fn three_patterns() -> Vec<Pattern> {
		vec![
			Pattern::new("A", "Alpha", ["B"]),
			Pattern::new("B", "Beta", ["C"]),
			Pattern::new("C", "Gamma", Vec::<String>::new()),
		]
	}

	fn state() -> PatternWebState {
		PatternWebState::new(three_patterns(), PatternWebOptions::default(), 300.0, 300.0)
	}

	#[test]
	fn dangling_and_self_edges_do_not_break_the_scene() {
		let patterns = vec![
			Pattern::new("A", "A", ["missing", "A", "B", "B"]),
			Pattern::new("B", "B", Vec::<String>::new()),
		];
		let state = PatternWebState::new(patterns, PatternWebOptions::default(), 200.0, 200.0);
		let keys: Vec<_> = state.edges().iter().map(|e| e.key.clone()).collect();
		assert_eq!(
			keys,
			vec![EdgeKey::new("A", "A"), EdgeKey::new("A", "B"), EdgeKey::new("A", "B")]
		);
		for edge in state.edges() {
			assert!(edge.path.control.is_finite());
		}
	}

	#[test]
	fn pill_size_follows_label() {
		let state = state();
		let alpha = &state.nodes()[0];
		assert_eq!(alpha.width, 5.0 * LABEL_CHAR_WIDTH + 2.0 * NODE_PADDING_X);
		assert_eq!(alpha.height, LABEL_LINE_HEIGHT + 2.0 * NODE_PADDING_Y);
		assert!(alpha.contains(alpha.position));
		assert!(!alpha.contains(Point::new(alpha.position.x, alpha.position.y + 30.0)));
	}

	#[test]
	fn nodes_take_priority_over_edges() {
		let state = state();
		// A's position is also where edge A->B starts.
		let a = state.positions()["A"];
		assert_eq!(state.hit_test(a), Some(HitTarget::Node(0)));
	}

	#[test]
	fn edge_is_hit_along_its_curve() {
		let state = state();
		let apex = state.edges()[0].path.sample(0.5);
		assert_eq!(state.hit_test(apex), Some(HitTarget::Edge(0)));
		let off = Point::new(apex.x + 40.0, apex.y + 40.0);
		assert_ne!(state.hit_test(off), Some(HitTarget::Edge(0)));
		assert_eq!(state.hit_test(Point::new(150.0, 150.0)), None);
	}

	#[test]
	fn moving_between_targets_leaves_then_enters() {
		let mut state = state();
		let a = state.positions()["A"];
		let apex = state.edges()[0].path.sample(0.5);

		assert!(state.pointer_move(a));
		assert_eq!(state.interaction.hovered_node.as_deref(), Some("A"));
		assert!(!state.pointer_move(a));
		assert_eq!(state.cursor(), "pointer");

		assert!(state.pointer_move(apex));
		assert!(state.interaction.hovered_node.is_none());
		assert_eq!(state.interaction.hovered_edge, Some(EdgeKey::new("A", "B")));

		state.pointer_leave();
		assert!(state.interaction.is_idle());
		assert_eq!(state.cursor(), "default");
	}

	#[test]
	fn clicking_empty_space_keeps_selection() {
		let mut state = state();
		let c = state.positions()["C"];
		assert_eq!(state.click(c), Some(NodeClicked("C".into())));
		assert_eq!(state.click(Point::new(150.0, 150.0)), None);
		assert_eq!(state.interaction.selected_node.as_deref(), Some("C"));
	}

	#[test]
	fn raised_nodes_draw_last() {
		let mut state = state();
		state.interaction.click_node("A");
		assert_eq!(state.draw_order(), vec![1, 2, 0]);
	}

	#[test]
	fn fades_converge_on_emphasis() {
		let mut state = state();
		let b = state.positions()["B"];
		state.pointer_move(b);

		assert!(state.tick(0.1));
		assert!(state.node_emphasis("B") > 0.0 && state.node_emphasis("B") < 1.0);
		while state.tick(0.05) {}
		assert_eq!(state.node_emphasis("B"), 1.0);
		assert_eq!(state.edge_emphasis(0), 1.0);
		assert_eq!(state.edge_emphasis(1), 1.0);
		assert_eq!(state.node_emphasis("A"), 0.0);

		state.pointer_leave();
		while state.tick(0.05) {}
		assert_eq!(state.node_emphasis("B"), 0.0);
		assert_eq!(state.edge_emphasis(0), 0.0);
	}

	#[test]
	fn hover_clears_after_resize_then_leave() {
		let mut state = state();
		let b = state.positions()["B"];
		state.pointer_move(b);
		state.resize(310.0, 310.0);
		state.pointer_leave();
		assert!(state.interaction.is_idle());
		assert_eq!(state.draw_order(), vec![0, 1, 2]);
	}

	#[test]
	fn hover_clears_after_new_patterns_then_move_away() {
		let mut state = state();
		let b = state.positions()["B"];
		state.pointer_move(b);
		state.set_patterns(three_patterns());
		state.pointer_move(Point::new(150.0, 150.0));
		assert!(state.interaction.hovered_node.is_none());
		assert!(state.edge_specs().iter().all(|e| !e.emphasized));
	}

	#[test]
	fn hovered_edge_clears_after_update() {
		let mut state = state();
		let apex = state.edges()[0].path.sample(0.5);
		state.pointer_move(apex);
		state.update(three_patterns(), 320.0, 320.0);
		assert!(state.interaction.hovered_edge.is_none());
		assert_eq!(state.pointer_target(), None);

		// The same spot re-enters on the next move.
		let apex = state.edges()[0].path.sample(0.5);
		assert!(state.pointer_move(apex));
		assert_eq!(state.interaction.hovered_edge, Some(EdgeKey::new("A", "B")));
	}

	#[test]
	fn update_keeps_selection() {
		let mut state = state();
		let a = state.positions()["A"];
		state.click(a);
		state.update(three_patterns(), 600.0, 600.0);
		assert_eq!(state.interaction.selected_node.as_deref(), Some("A"));
		assert!(state.positions()["A"].distance(Point::new(510.0, 300.0)) < 1e-9);
	}

	#[test]
	fn resize_recomputes_layout() {
		let mut state = state();
		let before = state.positions()["A"];
		state.resize(600.0, 600.0);
		let after = state.positions()["A"];
		assert!(before.distance(Point::new(255.0, 150.0)) < 1e-9);
		assert!(after.distance(Point::new(510.0, 300.0)) < 1e-9);

		state.resize(0.0, 0.0);
		for node in state.nodes() {
			assert_eq!(node.position, Point::new(0.0, 0.0));
		}
	}
}
